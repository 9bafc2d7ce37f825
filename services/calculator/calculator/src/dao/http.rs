use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::{DaoConfig, DaoError, LogDao, LogEntry};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

#[derive(Debug, Serialize, Deserialize)]
struct LogData {
    operation: String,
    result: String,
    timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocument {
    document_id: String,
    data: LogData,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "$id")]
    id: String,
    #[serde(flatten)]
    data: LogData,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<Document>,
}

impl From<Document> for LogEntry {
    fn from(document: Document) -> Self {
        LogEntry {
            id: document.id,
            operation: document.data.operation,
            result: document.data.result,
            timestamp: document.data.timestamp,
        }
    }
}

/// Calculation log stored as documents in a remote collection
pub struct LogDaoHttp {
    documents_url: String,
    project: String,
    key: Option<String>,
    client: reqwest::Client,
}

impl LogDaoHttp {
    pub fn new(client: reqwest::Client, config: &DaoConfig, endpoint: &str) -> LogDaoHttp {
        LogDaoHttp {
            documents_url: format!(
                "{}/databases/{}/collections/{}/documents",
                endpoint.trim_end_matches('/'),
                config.database,
                config.collection
            ),
            project: config.project.clone(),
            key: config.key.clone(),
            client,
        }
    }

    /// Returns `None` when no remote endpoint is configured
    pub fn from_config(config: &DaoConfig) -> Result<Option<LogDaoHttp>, DaoError> {
        let endpoint = match &config.endpoint {
            Some(endpoint) => endpoint,
            None => return Ok(None),
        };

        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(LogDaoHttp::new(client, config, endpoint)))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(PROJECT_HEADER, &self.project);

        match &self.key {
            Some(key) => builder.header(KEY_HEADER, key),
            None => builder,
        }
    }
}

#[async_trait]
impl LogDao for LogDaoHttp {
    async fn create(&self, operation: String, result: String) -> Result<LogEntry, DaoError> {
        let request = CreateDocument {
            document_id: Uuid::new_v4().simple().to_string(),
            data: LogData {
                operation,
                result,
                timestamp: Utc::now().timestamp(),
            },
        };

        let document: Document = self
            .request(Method::POST, &self.documents_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(document.into())
    }

    async fn list(&self) -> Result<Vec<LogEntry>, DaoError> {
        let list: DocumentList = self
            .request(Method::GET, &self.documents_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut entries: Vec<LogEntry> = list.documents.into_iter().map(LogEntry::from).collect();
        // Stable, so documents created within the same second keep store order
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn delete(&self, id: &str) -> Result<(), DaoError> {
        let url = format!("{}/{}", self.documents_url, id);
        let response = self.request(Method::DELETE, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DaoError::NotFound);
        }
        response.error_for_status()?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<usize, DaoError> {
        let mut deleted = 0;
        for entry in self.list().await? {
            match self.delete(&entry.id).await {
                Ok(()) => deleted += 1,
                // Already removed by a concurrent delete
                Err(DaoError::NotFound) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(deleted)
    }
}
