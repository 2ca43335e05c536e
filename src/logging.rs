//=========================================================================
// Logging
//
// One-shot `env_logger` setup for binaries and demos. Library code only
// emits through the `log` facade, under these targets:
//
//   engine           frame loop lifecycle, quit, per-event trace
//   platform         window/surface lifecycle, callbacks, media
//   platform::gpu    surface configuration and present failures
//   platform::input  mapped OS events (trace)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Once;

use env_logger::WriteStyle;
use log::LevelFilter;

//=== Constants ===========================================================

/// Applied when neither an explicit filter nor `RUST_LOG` is present.
/// wgpu is noisy at `info`.
const DEFAULT_FILTER: &str = "wgpu_core=warn,wgpu_hal=warn,naga=warn";

//=== LoggingConfig =======================================================

/// Logger configuration.
///
/// `env_filter` uses `env_logger` directive syntax, e.g.
/// `"engine=debug,platform::gpu=trace"`. `None` defers to `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

//=== Initialization ======================================================

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(LevelFilter::Info);
                builder.parse_filters(DEFAULT_FILTER);
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed (tests, embedding apps).
        if builder.try_init().is_ok() {
            log::debug!(target: "engine", "Logging initialized");
        }
    });
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_defers_to_environment() {
        let config = LoggingConfig::default();
        assert!(config.env_filter.is_none());
        assert!(matches!(config.write_style, WriteStyle::Auto));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig {
            env_filter: Some("engine=trace".into()),
            write_style: WriteStyle::Never,
        });
        init_logging(LoggingConfig::default());
        log::trace!(target: "engine", "still alive");
    }
}
