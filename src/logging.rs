use std::env;
use std::fs::OpenOptions;
use std::ops::Deref;
use std::panic;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DEFAULT_LOG_FILTER, LOG_FILE_ENV};

/// Sends log output to the file named by `SNAKE_LOG`, since the terminal
/// itself is taken by the game. Does nothing when the variable is unset.
pub fn setup() -> Result<()> {
    let path = match env::var_os(LOG_FILE_ENV) {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_thread_names(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .init();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));

        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref)
            .or_else(|| panic_info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("<cause unknown>");

        error!("A panic occurred at {}:{}: {}", filename, line, cause);
        default_hook(panic_info);
    }));

    Ok(())
}
