use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a stderr subscriber. `RUST_LOG` overrides the default filter.
///
/// Events are compiled in at every level; this filter is the only gate.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose {
            "phrase_core=debug,phrase_cli=debug"
        } else {
            "warn"
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .init();
    });
}
