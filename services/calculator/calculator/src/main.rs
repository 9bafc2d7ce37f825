#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

use std::sync::Arc;

use log::{info, warn};

use crate::dao::{LogDao, LogDaoHttp, LogDaoMemory};
use crate::session::SessionStore;
use crate::sink::LogSink;

mod api;
mod config;
mod dao;
mod session;
mod sink;

#[rocket::main]
async fn main() {
    env_logger::init();
    let figment = rocket_util::figment();
    let config: config::Config = figment.extract().expect("Failed to load configuration");

    let dao: Arc<dyn LogDao> =
        match LogDaoHttp::from_config(&config.dao).expect("Failed to build HTTP Client") {
            Some(dao) => {
                info!("Recording calculations to {:?}", config.dao.endpoint);
                Arc::new(dao)
            }
            None => {
                warn!("No log store endpoint configured, keeping calculations in memory");
                Arc::new(LogDaoMemory::new())
            }
        };

    let result = rocket::custom(figment)
        .manage(SessionStore::new(&config.session))
        .manage(LogSink::new(dao.clone()))
        .manage(dao)
        .mount("/", api::routes())
        .launch()
        .await;

    assert!(result.is_ok());
}
