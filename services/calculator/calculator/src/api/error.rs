use std::borrow::Cow;

use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{response, Request};
use serde::Serialize;

use expression::EvaluationError;
use telemetry::IsErr;

use crate::dao::DaoError;

#[derive(Debug)]
pub enum ApiError {
    InvalidExpression(EvaluationError),
    NotFound,
    InternalError(String),
}

impl From<EvaluationError> for ApiError {
    fn from(e: EvaluationError) -> Self {
        ApiError::InvalidExpression(e)
    }
}

impl From<DaoError> for ApiError {
    fn from(e: DaoError) -> Self {
        match e {
            DaoError::NotFound => ApiError::NotFound,
            DaoError::InternalError(e) => ApiError::InternalError(format!("DaoError: {}", e)),
        }
    }
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::InternalError(_))
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (message, kind, status) = match self {
            ApiError::InternalError(e) => {
                error!("Internal Error: {}", e);
                (
                    Cow::Borrowed("Internal Server Error"),
                    None,
                    Status::InternalServerError,
                )
            }
            ApiError::InvalidExpression(e) => (
                Cow::Owned(e.to_string()),
                Some(e.kind()),
                Status::BadRequest,
            ),
            ApiError::NotFound => (Cow::Borrowed("Not Found"), None, Status::NotFound),
        };
        response::status::Custom(status, Json(ErrorResponse { message, kind })).respond_to(req)
    }
}
