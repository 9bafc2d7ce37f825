use derive_more::Display;

use telemetry::IsErr;

#[derive(Debug, Display)]
pub enum DaoError {
    #[display(fmt = "Not Found")]
    NotFound,

    #[display(fmt = "Internal Error: {}", _0)]
    InternalError(String),
}

impl std::error::Error for DaoError {}

impl IsErr for DaoError {
    fn is_err(&self) -> bool {
        matches!(self, DaoError::InternalError(_))
    }
}

impl From<reqwest::Error> for DaoError {
    fn from(e: reqwest::Error) -> Self {
        DaoError::InternalError(format!("Reqwest Error: {}", e))
    }
}
