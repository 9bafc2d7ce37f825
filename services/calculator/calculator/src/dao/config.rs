use serde::Deserialize;

/// Connection settings for the remote document store holding the
/// calculation log. Without an `endpoint` the log is kept in memory.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DaoConfig {
    pub endpoint: Option<String>,
    pub project: String,
    pub key: Option<String>,
    pub database: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl Default for DaoConfig {
    fn default() -> DaoConfig {
        DaoConfig {
            endpoint: None,
            project: "calculator".to_string(),
            key: None,
            database: "calculator".to_string(),
            collection: "logs".to_string(),
            timeout_secs: 5,
        }
    }
}
