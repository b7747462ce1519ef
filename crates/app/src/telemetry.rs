//! Logging and metrics initialisation

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::settings::LoggingConfig;
use crate::AppError;

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| AppError::Logging(format!("invalid log level '{}'", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}

/// Serve Prometheus metrics on `addr`; needs a running tokio runtime
pub fn install_metrics(addr: SocketAddr) -> Result<(), AppError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| AppError::Metrics(e.to_string()))?;

    info!("Prometheus metrics on http://{}/metrics", addr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            json: false,
        };
        assert!(matches!(init_logging(&config), Err(AppError::Logging(_))));
    }
}
