//! Analysis client: prompt construction, the declared response shape, and
//! defensive decoding of the model's text reply into [IssueRecord]s.
//!
//! The remote model sits behind [ModelBackend] so tests can swap in a
//! deterministic fake. [crate::gemini] provides the production backend.

use async_trait::async_trait;
use serde_json::{Value, json};
use thiserror::Error;

use crate::log::{self, LogLevel};
use crate::model::{IssueCategory, IssueRecord};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("log text is empty")]
    EmptyInput,

    #[error("GEMINI_API_KEY is not set")]
    MissingCredential,

    #[error("request to the model failed: {0}")]
    Request(String),

    #[error("model returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("model returned no content ({0})")]
    Blocked(String),

    #[error("response was not valid issue JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A remote text-generation capability that can be asked for JSON output of a given shape.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// One request/response call. Returns the raw response text.
    async fn generate(&self, prompt: &str, response_schema: &Value) -> Result<String, AnalysisError>;
}

pub struct LogAnalyzer<B> {
    backend: B,
}

impl<B: ModelBackend> LogAnalyzer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Send the log to the model once and decode the reply.
    ///
    /// A reply that is valid JSON but not an array yields an empty list; every
    /// other failure is returned as an error.
    pub async fn analyze(&self, log_text: &str) -> Result<Vec<IssueRecord>, AnalysisError> {
        if log_text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        log::app_log(
            LogLevel::Info,
            format!(
                "Analysis: sending {} bytes of log to {}...",
                log_text.len(),
                self.backend.model()
            ),
        );
        let prompt = build_prompt(log_text);
        let raw = self.backend.generate(&prompt, &response_schema()).await?;
        decode_issues(&raw)
    }
}

pub fn build_prompt(log_text: &str) -> String {
    format!(
        "You are an expert DayZ server administrator and troubleshooter. Your primary function is to \
analyze the provided DayZ server log file to identify all errors, critical warnings, and significant \
issues. For each issue you find, you must provide a concise title, the relevant log lines, a clear \
description of the problem, and a detailed, actionable solution.

Analyze the following DayZ server log file. Identify all issues and provide solutions for each one. \
Your response MUST be a valid JSON array matching the schema provided and nothing else.

Log File Content:
---
{log_text}
---
"
    )
}

/// Output shape requested from the model. Informational only; nothing here
/// enforces it locally beyond typed decoding.
pub fn response_schema() -> Value {
    let categories: Vec<&str> = IssueCategory::ALL.iter().map(|c| c.wire_name()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": {
                    "type": "STRING",
                    "description": "The kind of issue: 'critical' for errors that break the server, \
'cautionary' for potential problems, 'informational' for non-critical notices.",
                    "enum": categories,
                },
                "title": {
                    "type": "STRING",
                    "description": "A short, descriptive title for the issue (e.g. 'XML Parsing Error', 'Missing Mod Dependency').",
                },
                "logLines": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "The exact, unmodified log line(s) that indicate this issue.",
                },
                "description": {
                    "type": "STRING",
                    "description": "What the issue means, its root cause, and its impact on the server.",
                },
                "solution": {
                    "type": "STRING",
                    "description": "Step-by-step instructions to resolve the issue, naming specific files, settings, or actions.",
                },
            },
            "required": ["category", "title", "logLines", "description", "solution"],
        },
    })
}

/// Strip surrounding whitespace and an optional Markdown code fence
/// (` ```json ` or bare ` ``` ` on the left, ` ``` ` on the right).
///
/// Only the outermost markers are removed. Clean input is returned unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let text = match text.strip_prefix("```") {
        Some(rest) => {
            let untagged = match rest.get(..4) {
                Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
                _ => rest,
            };
            untagged.trim_start()
        }
        None => text,
    };
    text.strip_suffix("```").map(str::trim_end).unwrap_or(text)
}

/// Decode the model's raw reply into issue records.
pub fn decode_issues(raw: &str) -> Result<Vec<IssueRecord>, AnalysisError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    if !value.is_array() {
        let preview: String = value.to_string().chars().take(300).collect();
        log::app_log(
            LogLevel::Warn,
            format!("Analysis: model response was not an array, treating as no issues: {preview}"),
        );
        return Ok(Vec::new());
    }
    let records: Vec<IssueRecord> = serde_json::from_value(value)?;
    log::app_log(LogLevel::Info, format!("Analysis: decoded {} issues", records.len()));
    Ok(records)
}

/// Message shown to the user for a failed analysis.
pub fn failure_text(err: &AnalysisError) -> String {
    format!("Failed to analyze log file: {}", err)
}
