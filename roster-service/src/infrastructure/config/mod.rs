use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::policy::RosterPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub solver: SolverSettings,
    pub staffing: StaffingSettings,
    pub policy: RosterPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolverSettings {
    pub time_limit_seconds: u64,
}

/// Default daily staffing minima and the on-call window length.
#[derive(Debug, Deserialize, Clone)]
pub struct StaffingSettings {
    pub morning_weekday: u32,
    pub morning_special: u32,
    pub afternoon_default: u32,
    pub night_default: u32,
    pub oncall_days: u32,
}

impl Default for StaffingSettings {
    fn default() -> Self {
        Self {
            morning_weekday: 3,
            morning_special: 4,
            afternoon_default: 2,
            night_default: 1,
            oncall_days: 10,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
