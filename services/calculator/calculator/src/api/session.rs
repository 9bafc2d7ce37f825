use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::{Deserialize, Serialize};

use expression::{GuardDecision, Session};
use rocket_util::SessionKey;
use telemetry::Measure;

use crate::api::error::ApiError;
use crate::session::SessionStore;
use crate::sink::LogSink;

lazy_static! {
    static ref EQUALS_MEASURE: Measure = Measure::new("controller", "session_equals");
}

#[derive(Debug, Serialize, Deserialize)]
struct InputRequest {
    input: char,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionResponse {
    expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decision: Option<GuardDecision>,
}

impl SessionResponse {
    fn new(session: &Session) -> SessionResponse {
        SessionResponse {
            expression: session.candidate().to_string(),
            error: session.error().map(ToString::to_string),
            kind: session.error().map(|e| e.kind().to_string()),
            decision: None,
        }
    }
}

#[get("/api/v1/session")]
async fn get(key: SessionKey, sessions: &State<SessionStore>) -> Json<SessionResponse> {
    Json(sessions.view(&key, SessionResponse::new).await)
}

#[post("/api/v1/session/input", format = "json", data = "<request>")]
async fn input(
    key: SessionKey,
    request: Json<InputRequest>,
    sessions: &State<SessionStore>,
) -> Json<SessionResponse> {
    let response = sessions
        .with(&key, |session| {
            let decision = session.input(request.input);
            SessionResponse {
                decision: Some(decision),
                ..SessionResponse::new(session)
            }
        })
        .await;
    Json(response)
}

#[post("/api/v1/session/delete")]
async fn delete(key: SessionKey, sessions: &State<SessionStore>) -> Json<SessionResponse> {
    let response = sessions
        .with(&key, |session| {
            session.delete();
            SessionResponse::new(session)
        })
        .await;
    Json(response)
}

#[post("/api/v1/session/clear")]
async fn clear(key: SessionKey, sessions: &State<SessionStore>) -> Json<SessionResponse> {
    sessions.remove(&key).await;
    Json(SessionResponse::new(&Session::new()))
}

#[post("/api/v1/session/equals")]
async fn equals(
    key: SessionKey,
    sessions: &State<SessionStore>,
    sink: &State<LogSink>,
) -> Result<Json<SessionResponse>, ApiError> {
    EQUALS_MEASURE
        .stats(async move {
            let (response, outcome) = sessions
                .with(&key, |session| {
                    let outcome = session.equals();
                    (SessionResponse::new(session), outcome)
                })
                .await;

            if let Some(Ok(calculation)) = outcome {
                sink.record(calculation.operation, calculation.result);
            }

            Ok(Json(response))
        })
        .await
}

pub fn routes() -> Vec<Route> {
    routes![get, input, delete, clear, equals]
}
