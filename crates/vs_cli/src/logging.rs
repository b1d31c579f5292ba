use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Diagnostics go to stderr; stdout is kept for the worker's progress lines.
pub fn init_logging(level: Level) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        });
    }
}
