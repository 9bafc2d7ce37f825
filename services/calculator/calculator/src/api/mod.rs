use rocket::http::Status;
use rocket::serde::json::{json, Value};
use rocket::Route;

mod error;
mod evaluate;
mod logs;
mod session;

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, Status> {
    telemetry::encode().map_err(|_| Status::InternalServerError)
}

pub fn routes() -> Vec<Route> {
    let mut routes = routes![status, metrics];
    routes.append(&mut evaluate::routes());
    routes.append(&mut session::routes());
    routes.append(&mut logs::routes());
    routes
}
