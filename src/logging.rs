use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "grid_snake=info";

/// Installs a file-backed tracing subscriber.
///
/// The terminal belongs to the renderer, so without a log file nothing is
/// installed and events are dropped. `RUST_LOG` overrides the default filter.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
