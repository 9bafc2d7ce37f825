use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use self::config::DaoConfig;
pub use error::DaoError;
pub use http::LogDaoHttp;
pub use memory::LogDaoMemory;

mod config;
mod error;
mod http;
mod memory;

/// One persisted calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub operation: String,
    pub result: String,
    /// Unix seconds
    pub timestamp: i64,
}

#[async_trait]
pub trait LogDao: Sync + Send {
    async fn create(&self, operation: String, result: String) -> Result<LogEntry, DaoError>;

    /// Newest first
    async fn list(&self) -> Result<Vec<LogEntry>, DaoError>;

    async fn delete(&self, id: &str) -> Result<(), DaoError>;

    /// Removes every entry, returning how many were removed
    async fn delete_all(&self) -> Result<usize, DaoError>;
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use super::*;

    fn daos() -> Vec<Box<dyn LogDao>> {
        vec![Box::new(LogDaoMemory::new())]
    }

    #[tokio::test]
    async fn test_create_list() -> Result<(), Box<dyn Error>> {
        for dao in daos().iter() {
            let first = dao.create("2+2".to_string(), "4".to_string()).await?;
            let second = dao.create("4*3".to_string(), "12".to_string()).await?;

            assert_ne!(first.id, second.id);
            assert_eq!(first.operation, "2+2");
            assert_eq!(first.result, "4");

            let listed = dao.list().await?;
            assert_eq!(listed, vec![second, first]);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_delete() -> Result<(), Box<dyn Error>> {
        for dao in daos().iter() {
            let entry = dao.create("1/4".to_string(), "0.25".to_string()).await?;
            dao.delete(&entry.id).await?;

            assert!(dao.list().await?.is_empty());
            assert!(matches!(
                dao.delete(&entry.id).await,
                Err(DaoError::NotFound)
            ));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_all() -> Result<(), Box<dyn Error>> {
        for dao in daos().iter() {
            assert_eq!(dao.delete_all().await?, 0);

            dao.create("1+1".to_string(), "2".to_string()).await?;
            dao.create("2+2".to_string(), "4".to_string()).await?;
            dao.create("3+3".to_string(), "6".to_string()).await?;

            assert_eq!(dao.delete_all().await?, 3);
            assert!(dao.list().await?.is_empty());

            let entry = dao.create("5*5".to_string(), "25".to_string()).await?;
            assert_eq!(dao.list().await?, vec![entry]);
        }
        Ok(())
    }
}
