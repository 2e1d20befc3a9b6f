use std::error::Error;

use loadlink_application::Verbosity;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. `RUST_LOG` wins over the verbosity default.
pub fn init_logging(verbosity: Verbosity) -> Result<(), Box<dyn Error + Send + Sync>> {
    let default_directive = if verbosity.is_verbose() {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
