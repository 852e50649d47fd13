//! Boot: logging init and pipeline construction.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipeline::{BuildError, Pipeline};

/// Initialise the tracing / logging subsystem. Logs go to stderr so they
/// never mix with converted output.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "convert=info,pipeline=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the standard pipeline (dotted and piped input, tabbed output).
pub fn pipeline() -> Result<Pipeline, BuildError> {
    let pipeline = Pipeline::standard().map_err(|e| {
        error!("Failed to build pipeline: {}", e);
        e
    })?;
    info!(
        "Pipeline ready: {} input formats -> {}",
        pipeline.parser().formats().len(),
        pipeline.transformer().map().output_format()
    );
    Ok(pipeline)
}
