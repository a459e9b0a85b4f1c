//! Tracing setup for the demo binary.
//!
//! Only the driver calls [`init_tracing`]. Library code just emits events and
//! stays silent when no subscriber is installed.

use serde::Deserialize;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".to_string(),
            show_targets: true,
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. The first call wins.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.filter.clone();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_ids(false)
            .compact();

        // Someone else may already own the global subscriber.
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(&TracingConfig::default());
        init_tracing(&TracingConfig { filter: "trace".into(), show_targets: false });
    }
}
