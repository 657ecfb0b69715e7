pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Directive applied when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LOG_FILTER: &str = "kopilka=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` wins over `directive`; later calls are no-ops.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(directive));
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Parses `directive`, falling back to [`DEFAULT_LOG_FILTER`] when it is absent or malformed.
pub(crate) fn fallback_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directive_is_used_as_fallback() {
        let rendered = |directive| fallback_filter(directive).to_string().to_lowercase();
        assert_eq!(rendered(Some("kopi_core=debug")), "kopi_core=debug");
        assert_eq!(rendered(None), DEFAULT_LOG_FILTER);
    }
}
