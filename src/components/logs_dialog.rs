//! Logs dialog: operational log of this client plus the server's buffer.

use dioxus::prelude::*;
use dioxus_primitives::dialog::{DialogContent, DialogRoot, DialogTitle};

use crate::api::fetch_server_logs;
use crate::log::{LogEntry, LogLevel, app_logs_snapshot};

/// Client entries first, then whatever the server has buffered.
async fn collect_logs() -> Vec<LogEntry> {
    let mut entries = app_logs_snapshot();
    match fetch_server_logs().await {
        Ok(server) => entries.extend(server),
        Err(e) => entries.push(LogEntry {
            time: chrono::Utc::now().format("%H:%M:%S%.3f").to_string(),
            level: LogLevel::Error,
            message: format!("Could not load server logs: {}", e),
        }),
    }
    entries
}

#[component]
pub fn LogsDialog(open: Signal<bool>) -> Element {
    let mut open = open;
    let mut snapshot = use_signal(Vec::<LogEntry>::new);

    use_effect(move || {
        if open() {
            spawn(async move { snapshot.set(collect_logs().await) });
        }
    });

    rsx! {
        DialogRoot {
            class: "dialog-backdrop",
            open: open(),
            on_open_change: move |is_open: bool| open.set(is_open),
            DialogContent {
                class: "dialog flex flex-col",
                DialogTitle { class: "dialog-title", "📋 Logs" }
                p { class: "text-muted text-sm", "Analysis activity. Re-open to refresh." }
                div { class: "log-list",
                    for entry in snapshot.read().iter() {
                        div { class: "log-line",
                            span { class: "text-muted mr-2", "{entry.time}" }
                            span {
                                class: match entry.level {
                                    LogLevel::Error => "log-level-error",
                                    LogLevel::Warn => "log-level-warn",
                                    LogLevel::Info => "log-level-info",
                                },
                                "{entry.level.as_str()}"
                            }
                            span { class: "ml-2", "{entry.message}" }
                        }
                    }
                }
                div { class: "flex gap-2 mt-4",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| async move { snapshot.set(collect_logs().await) },
                        "Refresh logs"
                    }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| open.set(false),
                        "Close"
                    }
                }
            }
        }
    }
}
