use crate::session::SessionTimeouts;
use anyhow::{ensure, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Soft inactivity timeout in minutes (default policy: 120).
    pub timeout_minutes: i64,
    /// Warning window before expiry, in minutes.
    pub warning_minutes: i64,
    /// How often the expiry tick runs, in seconds.
    pub tick_interval_secs: u64,
}

impl SessionConfig {
    pub fn timeouts(&self) -> SessionTimeouts {
        SessionTimeouts {
            timeout: chrono::Duration::minutes(self.timeout_minutes),
            warning: chrono::Duration::minutes(self.warning_minutes),
        }
    }

    /// Check the timing invariants: a positive timeout, a positive tick
    /// interval, and a warning window strictly shorter than the timeout.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.timeout_minutes > 0,
            "session.timeout_minutes must be positive, got {}",
            self.timeout_minutes
        );
        ensure!(
            self.warning_minutes > 0 && self.warning_minutes < self.timeout_minutes,
            "session.warning_minutes ({}) must be positive and shorter than timeout_minutes ({})",
            self.warning_minutes,
            self.timeout_minutes
        );
        ensure!(
            self.tick_interval_secs > 0,
            "session.tick_interval_secs must be positive"
        );
        Ok(())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.session.validate()?;
        Ok(cfg)
    }
}
