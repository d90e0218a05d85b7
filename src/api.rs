//! Server functions bridging the UI to the server-side analysis client.
//! These are callable from both web (WASM) and desktop clients.

use dioxus::prelude::*;

use crate::log::LogEntry;
use crate::model::IssueRecord;

/// Analyze a log with the configured model. One remote call, no retry.
///
/// Failures come back as a single human-readable message; a reply that is
/// valid JSON but not an array comes back as an empty list.
#[server]
pub async fn analyze_log(log_text: String) -> Result<Vec<IssueRecord>, ServerFnError> {
    use crate::analysis::{LogAnalyzer, failure_text};
    use crate::gemini::GeminiBackend;
    use crate::log::{LogLevel, app_log};

    let outcome = match GeminiBackend::from_env() {
        Ok(backend) => LogAnalyzer::new(backend).analyze(&log_text).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(issues) => {
            app_log(LogLevel::Info, format!("Analysis: done, {} issues", issues.len()));
            Ok(issues)
        }
        Err(e) => {
            let message = failure_text(&e);
            app_log(LogLevel::Error, message.clone());
            Err(ServerFnError::new(message))
        }
    }
}

/// Snapshot of the server's operational log for the Logs dialog.
#[server]
pub async fn fetch_server_logs() -> Result<Vec<LogEntry>, ServerFnError> {
    Ok(crate::log::app_logs_snapshot())
}
