use std::path::PathBuf;

/// Server settings derived from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: String,
    pub port: u16,
    /// JSON rates document loaded at startup.
    pub rates_file: PathBuf,
    /// Prometheus exporter port. None ⇒ exporter disabled.
    pub metrics_port: Option<u16>,
}

impl Settings {
    pub fn from_env() -> Self {
        let bind = std::env::var("RATEBOARD_BIND").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("RATEBOARD_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let rates_file = std::env::var("RATEBOARD_RATES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("rates.json"));
        let metrics_port = std::env::var("RATEBOARD_METRICS_PORT")
            .ok()
            .and_then(|s| s.parse().ok());
        Self {
            bind,
            port,
            rates_file,
            metrics_port,
        }
    }
}
