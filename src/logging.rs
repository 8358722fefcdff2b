//! Structured logging for HeartMend
//!
//! Writes logs to ~/.heartmend/logs/ with categories:
//! - CHAT: message dispatch and persona replies
//! - MOOD: mood log and recovery-day changes
//! - EXPORT: transcript export runs
//! - SESSION: session lifecycle (create, clear)
//! - ERROR: errors surfaced to the user

use chrono::{Local, Utc};
use once_cell::sync::Lazy;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Log categories for structured logging
#[derive(Debug, Clone, Copy)]
pub enum LogCategory {
    Chat,
    Mood,
    Export,
    Session,
    Error,
}

impl LogCategory {
    fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Chat => "CHAT",
            LogCategory::Mood => "MOOD",
            LogCategory::Export => "EXPORT",
            LogCategory::Session => "SESSION",
            LogCategory::Error => "ERROR",
        }
    }
}

/// Set once by `init_logging`; file output stays off until then.
static LOG_DIR: Lazy<Mutex<Option<PathBuf>>> = Lazy::new(|| Mutex::new(None));

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".heartmend/logs")
}

fn log_file_path(dir: &PathBuf) -> PathBuf {
    let today = Local::now().format("%Y-%m-%d").to_string();
    dir.join(format!("heartmend-{}.log", today))
}

/// Initialize the logging system - creates the log directory if needed.
pub fn init_logging() -> Result<(), std::io::Error> {
    let log_dir = default_log_dir();

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }

    *LOG_DIR.lock().unwrap() = Some(log_dir);

    log(LogCategory::Session, "HeartMend logging initialized");

    Ok(())
}

/// Log a message with a category. Always mirrors to the console; writes to
/// the daily file only once `init_logging` has run.
pub fn log(category: LogCategory, message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let log_line = format!("[{}] [{}] {}\n", timestamp, category.as_str(), message);

    print!("{}", log_line);

    let dir = LOG_DIR.lock().unwrap().clone();
    if let Some(dir) = dir {
        let path = log_file_path(&dir);
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = file.write_all(log_line.as_bytes());
        }
    }
}

pub fn log_chat(message: &str) {
    log(LogCategory::Chat, message);
}

pub fn log_mood(message: &str) {
    log(LogCategory::Mood, message);
}

pub fn log_export(message: &str) {
    log(LogCategory::Export, message);
}

pub fn log_session(message: &str) {
    log(LogCategory::Session, message);
}

pub fn log_error(message: &str) {
    log(LogCategory::Error, message);
}

/// Clean up old log files (keep last 7 days)
pub fn cleanup_old_logs() -> Result<usize, std::io::Error> {
    let log_dir = match LOG_DIR.lock().unwrap().clone() {
        Some(dir) => dir,
        None => default_log_dir(),
    };
    let mut deleted = 0;

    if !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = Utc::now() - chrono::Duration::days(7);

    for entry in fs::read_dir(&log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Ok(metadata) = entry.metadata() {
            if let Ok(modified) = metadata.modified() {
                let modified_time: chrono::DateTime<Utc> = modified.into();
                if modified_time < cutoff && fs::remove_file(&path).is_ok() {
                    deleted += 1;
                }
            }
        }
    }

    Ok(deleted)
}
