pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when neither `RUST_LOG` nor a configured filter is usable.
pub const DEFAULT_LOG_FILTER: &str = "luca_core=warn";

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `configured`; an unparsable directive falls back to
/// [`DEFAULT_LOG_FILTER`]. Call through [`crate::init_with_filter`], which
/// runs this once per process.
pub(crate) fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::warn!(%err, "keeping the already installed tracing subscriber");
    }
}
