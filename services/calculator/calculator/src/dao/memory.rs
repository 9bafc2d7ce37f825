use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dao::{DaoError, LogDao, LogEntry};

pub struct LogDaoMemory {
    data: Mutex<Vec<LogEntry>>,
}

impl LogDaoMemory {
    pub fn new() -> LogDaoMemory {
        LogDaoMemory {
            data: Mutex::new(Default::default()),
        }
    }
}

#[async_trait]
impl LogDao for LogDaoMemory {
    async fn create(&self, operation: String, result: String) -> Result<LogEntry, DaoError> {
        let entry = LogEntry {
            id: Uuid::new_v4().to_string(),
            operation,
            result,
            timestamp: Utc::now().timestamp(),
        };

        self.data.lock().await.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<LogEntry>, DaoError> {
        let data = self.data.lock().await;
        Ok(data.iter().rev().cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<(), DaoError> {
        let mut data = self.data.lock().await;
        let idx = data
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(DaoError::NotFound)?;
        data.remove(idx);
        Ok(())
    }

    async fn delete_all(&self) -> Result<usize, DaoError> {
        let mut data = self.data.lock().await;
        Ok(data.drain(..).count())
    }
}
