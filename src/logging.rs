//! File-based logging. The terminal belongs to the TUI, so every diagnostic
//! goes to a rotating log file under the data directory instead of stderr.

use std::fs;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;

use crate::config::CatalogConfig;

const LOG_FILE_BASENAME: &str = "library-catalog";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Start the file logger. The returned handle must be kept alive for the
/// lifetime of the process; dropping it flushes and stops logging.
pub fn init_logging(config: &CatalogConfig) -> Result<LoggerHandle> {
    fs::create_dir_all(&config.log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(&config.log_level)
        .with_context(|| format!("invalid log level `{}`", config.log_level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    install_panic_hook_once();

    info!(
        "event=app_start module=core status=ok platform={} version={} db_path={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        config.db_path.display()
    );

    Ok(handle)
}

fn install_panic_hook_once() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error!("event=panic module=core status=error location={location}");
            previous(panic_info);
        }));
    });
}
