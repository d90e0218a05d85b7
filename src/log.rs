//! Operational log: a bounded in-app buffer shown in the Logs dialog, mirrored to `tracing`.

use std::sync::{Mutex, OnceLock};

use dioxus::logger::tracing;
use serde::{Deserialize, Serialize};

const MAX_LOGS: usize = 2000;

static LOG_BUF: OnceLock<Mutex<Vec<LogEntry>>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

fn buf() -> &'static Mutex<Vec<LogEntry>> {
    LOG_BUF.get_or_init(|| Mutex::new(Vec::new()))
}

/// Append a log line. Safe to call from any thread, including server functions.
pub fn app_log(level: LogLevel, message: impl Into<String>) {
    let message = message.into();
    match level {
        LogLevel::Info => tracing::info!("{message}"),
        LogLevel::Warn => tracing::warn!("{message}"),
        LogLevel::Error => tracing::error!("{message}"),
    }
    let entry = LogEntry {
        time: chrono::Utc::now().format("%H:%M:%S%.3f").to_string(),
        level,
        message,
    };
    if let Ok(mut v) = buf().lock() {
        v.push(entry);
        let n = v.len();
        if n > MAX_LOGS {
            v.drain(0..n - MAX_LOGS);
        }
    }
}

/// Snapshot of current logs for display.
pub fn app_logs_snapshot() -> Vec<LogEntry> {
    buf().lock().map(|v| v.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The buffer is process-global, so assertions look for unique markers
    // instead of exact lengths.
    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn entries_are_recorded_with_level() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        app_log(LogLevel::Warn, "log-test: not an array");
        let snapshot = app_logs_snapshot();
        let entry = snapshot
            .iter()
            .rev()
            .find(|e| e.message == "log-test: not an array")
            .unwrap();
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.level.as_str(), "WARN");
        assert!(!entry.time.is_empty());
    }

    #[test]
    fn buffer_is_capped() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        for i in 0..MAX_LOGS + 25 {
            app_log(LogLevel::Info, format!("log-test: flood {i}"));
        }
        let snapshot = app_logs_snapshot();
        assert!(snapshot.len() <= MAX_LOGS);
        let last = format!("log-test: flood {}", MAX_LOGS + 24);
        assert!(snapshot.iter().any(|e| e.message == last));
    }
}
