//! Application logging.
//!
//! Everything goes through the `log` macros. [`Logger::install`] registers a
//! `fern` dispatcher that keeps recent lines in memory for the logs dialog and,
//! when file logging is enabled, appends them to a log file.

use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME, MAX_LOG_ENTRIES};
use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    file_path: Option<PathBuf>,
}

impl Logger {
    /// In-memory logger without file output
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            file_path: None,
        }
    }

    /// Build a logger from the `logging.enabled` setting
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            logger.file_path = Some(Self::get_log_file_path()?);
        }
        Ok(logger)
    }

    /// Whether file logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn log_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Location of the log file under the user's data directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::cache_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory for logs"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        self.push(format!("[{}] {}", timestamp, message));
    }

    /// Add an entry for a `log` record
    pub fn record(&self, record: &log::Record) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        self.push(format!("[{}] {:<5} {}", timestamp, record.level(), record.args()));
    }

    fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= MAX_LOG_ENTRIES {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Build the `fern` dispatcher feeding this logger (and the log file, if enabled)
    pub fn dispatch(&self, level: log::LevelFilter) -> Result<fern::Dispatch> {
        let sink = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .level(level)
            // reqwest/hyper internals are noisy at debug level
            .level_for("hyper", log::LevelFilter::Warn)
            .level_for("hyper_util", log::LevelFilter::Warn)
            .level_for("reqwest", log::LevelFilter::Warn)
            .chain(fern::Output::call(move |record| sink.record(record)));

        if let Some(path) = &self.file_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file =
                fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} {:<5} [{}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        Ok(dispatch)
    }

    /// Install as the global `log` backend. Can only succeed once per process.
    pub fn install(&self, level: log::LevelFilter) -> Result<()> {
        self.dispatch(level)?
            .apply()
            .context("A global logger is already installed")
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
