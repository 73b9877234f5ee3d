use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "SD_LOG";

/// Route `tracing` output to `~/.shiftdesk/shiftdesk.log`.
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout or
/// stderr. The filter is read from `SD_LOG` and defaults to `info`.
pub fn init() -> Result<()> {
    let dir = Config::data_dir()?;
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("shiftdesk.log"))?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be set (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}
