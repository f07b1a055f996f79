//! Process-wide `env_logger` setup.

use std::sync::Once;

/// Used when neither [`LoggingConfig::env_filter`] nor `RUST_LOG` is set.
///
/// wgpu's internals log every pipeline and buffer at `info`; keep them quiet
/// unless asked for.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter string, e.g. `"vitrine_gallery=debug"`. Takes
    /// precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// The filter that [`init_logging`] will install.
    pub fn resolve_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter();
        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .init();
        log::debug!("logging initialized with {filter:?}");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig {
            env_filter: Some("vitrine_gallery=trace".into()),
            ..LoggingConfig::default()
        };
        assert_eq!(config.resolve_filter(), "vitrine_gallery=trace");
    }

    #[test]
    fn blank_filter_is_ignored() {
        let config = LoggingConfig { env_filter: Some("  ".into()), ..LoggingConfig::default() };
        assert_ne!(config.resolve_filter().trim(), "");
    }
}
