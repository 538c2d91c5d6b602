//! Tracing setup.
//!
//! The terminal belongs to the UI, so events go to a log file.
//! - `OCEAN_QUIZ_LOG` sets the filter (default `info`).
//! - `OCEAN_QUIZ_LOG_FORMAT=json` switches to JSON lines.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub fn init_tracing(log_file: &Path) -> io::Result<()> {
    let filter =
        EnvFilter::try_from_env("OCEAN_QUIZ_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    match std::env::var("OCEAN_QUIZ_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
    Ok(())
}
