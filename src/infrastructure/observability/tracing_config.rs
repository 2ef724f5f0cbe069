/// Filter used when `RUST_LOG` is unset and no level is configured.
pub const DEFAULT_LOG_FILTER: &str = "info,audioscribe=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, level: &str) -> Self {
        let filter = if level.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            format!("{},audioscribe={},tower_http=debug", level, level)
        };
        Self {
            environment: environment.into(),
            json_format,
            filter,
        }
    }
}
