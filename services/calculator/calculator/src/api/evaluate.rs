use rocket::serde::json::Json;
use rocket::Route;
use serde::{Deserialize, Serialize};

use expression::{format_number, guard_accept, GuardDecision};
use telemetry::Measure;

use crate::api::error::ApiError;

lazy_static! {
    static ref EVALUATE_MEASURE: Measure = Measure::new("controller", "evaluate");
}

#[derive(Debug, Serialize, Deserialize)]
struct EvaluateRequest {
    expression: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct EvaluateResponse {
    value: f64,
    result: String,
}

#[post("/api/v1/evaluate", format = "json", data = "<request>")]
fn evaluate(request: Json<EvaluateRequest>) -> Result<Json<EvaluateResponse>, ApiError> {
    EVALUATE_MEASURE.time(|| {
        let value = expression::evaluate(&request.expression)?;
        Ok(Json(EvaluateResponse {
            value,
            result: format_number(value),
        }))
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct GuardRequest {
    candidate: String,
    input: char,
}

#[derive(Debug, Serialize, Deserialize)]
struct GuardResponse {
    decision: GuardDecision,
}

#[post("/api/v1/guard", format = "json", data = "<request>")]
fn guard(request: Json<GuardRequest>) -> Json<GuardResponse> {
    Json(GuardResponse {
        decision: guard_accept(&request.candidate, request.input),
    })
}

pub fn routes() -> Vec<Route> {
    routes![evaluate, guard]
}
