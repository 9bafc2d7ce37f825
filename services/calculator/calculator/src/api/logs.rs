use std::sync::Arc;

use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::{Route, State};

use telemetry::Measure;

use crate::api::error::ApiError;
use crate::dao::{LogDao, LogEntry};

lazy_static! {
    static ref LIST_MEASURE: Measure = Measure::new("controller", "logs_list");
    static ref DELETE_MEASURE: Measure = Measure::new("controller", "logs_delete");
    static ref DELETE_ALL_MEASURE: Measure = Measure::new("controller", "logs_delete_all");
}

#[get("/api/v1/logs")]
async fn list(dao: &State<Arc<dyn LogDao>>) -> Result<Json<Vec<LogEntry>>, ApiError> {
    LIST_MEASURE
        .stats(async move { Ok(Json(dao.list().await?)) })
        .await
}

#[delete("/api/v1/logs/<id>")]
async fn delete(id: String, dao: &State<Arc<dyn LogDao>>) -> Result<Status, ApiError> {
    DELETE_MEASURE
        .stats(async move {
            dao.delete(&id).await?;
            Ok(Status::NoContent)
        })
        .await
}

#[delete("/api/v1/logs")]
async fn delete_all(dao: &State<Arc<dyn LogDao>>) -> Result<Json<Value>, ApiError> {
    DELETE_ALL_MEASURE
        .stats(async move {
            let deleted = dao.delete_all().await?;
            Ok(Json(json!({ "deleted": deleted })))
        })
        .await
}

pub fn routes() -> Vec<Route> {
    routes![list, delete, delete_all]
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use rocket::local::asynchronous::Client;

    use crate::dao::LogDaoMemory;

    use super::*;

    async fn setup() -> Result<(Client, Arc<dyn LogDao>), Box<dyn Error>> {
        let dao: Arc<dyn LogDao> = Arc::new(LogDaoMemory::new());

        let rocket = rocket::build().manage(dao.clone()).mount("/", routes());
        let client = Client::untracked(rocket)
            .await
            .expect("valid rocket instance");

        Ok((client, dao))
    }

    #[tokio::test]
    async fn test_list() -> Result<(), Box<dyn Error>> {
        let (client, dao) = setup().await?;
        let first = dao.create("1+1".to_string(), "2".to_string()).await?;
        let second = dao.create("2*2".to_string(), "4".to_string()).await?;

        let res = client.get("/api/v1/logs").dispatch().await;
        assert_eq!(res.status(), Status::Ok);

        let body = res.into_bytes().await.unwrap_or_default();
        let decoded: Vec<LogEntry> = serde_json::from_slice(&body)?;
        assert_eq!(decoded, vec![second, first]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete() -> Result<(), Box<dyn Error>> {
        let (client, dao) = setup().await?;
        let entry = dao.create("1+1".to_string(), "2".to_string()).await?;

        let path = format!("/api/v1/logs/{}", entry.id);
        let res = client.delete(path.as_str()).dispatch().await;
        assert_eq!(res.status(), Status::NoContent);
        assert!(dao.list().await?.is_empty());

        let res = client.delete(path.as_str()).dispatch().await;
        assert_eq!(res.status(), Status::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_all() -> Result<(), Box<dyn Error>> {
        let (client, dao) = setup().await?;
        dao.create("1+1".to_string(), "2".to_string()).await?;
        dao.create("2*2".to_string(), "4".to_string()).await?;

        let res = client.delete("/api/v1/logs").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_bytes().await.unwrap_or_default();
        let decoded: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(decoded["deleted"], 2);
        assert!(dao.list().await?.is_empty());

        // Clearing an empty log is not an error
        let res = client.delete("/api/v1/logs").dispatch().await;
        assert_eq!(res.status(), Status::Ok);
        let body = res.into_bytes().await.unwrap_or_default();
        let decoded: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(decoded["deleted"], 0);
        Ok(())
    }
}
