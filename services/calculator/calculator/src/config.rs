use serde::Deserialize;

use crate::dao::DaoConfig;
use crate::session::SessionConfig;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub dao: DaoConfig,
    pub session: SessionConfig,
}
