use std::sync::Arc;

use log::warn;
use tokio::task::JoinHandle;

use telemetry::Measure;

use crate::dao::LogDao;

lazy_static! {
    static ref RECORD_MEASURE: Measure = Measure::new("sink", "record");
}

/// Fire-and-forget writer for completed calculations.
///
/// A failed write is logged and dropped; it never reaches the caller.
#[derive(Clone)]
pub struct LogSink {
    dao: Arc<dyn LogDao>,
}

impl LogSink {
    pub fn new(dao: Arc<dyn LogDao>) -> LogSink {
        LogSink { dao }
    }

    pub fn record(&self, operation: String, result: String) -> JoinHandle<()> {
        let dao = self.dao.clone();
        tokio::spawn(async move {
            if let Err(e) = RECORD_MEASURE.stats(dao.create(operation, result)).await {
                warn!("Failed to record calculation: {}", e);
            }
        })
    }
}
