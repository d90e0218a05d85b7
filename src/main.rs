#![allow(non_snake_case)]

#[cfg(any(feature = "server", test))]
mod analysis;
mod api;
mod components;
#[cfg(feature = "server")]
mod gemini;
mod log;
mod model;
mod state;

use dioxus::prelude::*;

use api::analyze_log;
use components::logs_dialog::LogsDialog;
use log::LogLevel;
use model::{CategoryCounts, IssueCategory, IssueRecord};
use state::ViewState;

// ============================================================================
// Entry & root component
// ============================================================================

fn main() {
    #[cfg(feature = "server")]
    dotenvy::dotenv().ok();

    dioxus::launch(App);
}

/// Keep the server's own message; other transport failures fall back to Display.
fn failure_message(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError { message, .. } => message,
        other => other.to_string(),
    }
}

#[component]
fn App() -> Element {
    let mut view = use_signal(ViewState::default);
    let mut logs_open = use_signal(|| false);

    let busy = use_memo(move || view.read().is_busy());
    let can_run = use_memo(move || view.read().can_run());

    rsx! {
        document::Stylesheet { href: asset!("/assets/styles.css") }
        document::Stylesheet { href: asset!("/assets/dialog.css") }

        LogsDialog { open: logs_open }

        div { class: "app-shell",
            main { class: "app-grid",
                // Left column: input
                div { class: "column",
                    header { class: "mb-6",
                        div { class: "flex items-center justify-between gap-3",
                            h1 { class: "app-title", "DayZ Log Analyzer" }
                            button {
                                class: "btn-secondary",
                                onclick: move |_| logs_open.set(true),
                                "📋 Logs"
                            }
                        }
                        p { class: "text-muted mt-2",
                            "Paste your server log, or upload a file, to get an expert analysis of its issues."
                        }
                    }
                    textarea {
                        class: "log-input",
                        placeholder: "Paste your DayZ server log file content here...",
                        value: "{view.read().log_text}",
                        oninput: move |evt| view.write().log_text = evt.value()
                    }
                    div { class: "flex items-center gap-4 mt-4",
                        button {
                            class: "btn-primary flex-grow",
                            disabled: !can_run(),
                            onclick: move |_| {
                                let Some(text) = view.write().begin_run() else {
                                    return;
                                };
                                log::app_log(LogLevel::Info, format!("Run: analyzing {} bytes...", text.len()));
                                spawn(async move {
                                    let outcome = analyze_log(text).await.map_err(failure_message);
                                    match &outcome {
                                        Ok(issues) => log::app_log(LogLevel::Info, format!("Run: {} issues", issues.len())),
                                        Err(e) => log::app_log(LogLevel::Error, format!("Run: {}", e)),
                                    }
                                    view.write().finish(outcome);
                                });
                            },
                            if busy() { "Analyzing..." } else { "Analyze Log File" }
                        }
                        input {
                            id: "log-upload",
                            r#type: "file",
                            class: "hidden",
                            accept: ".log,.txt,.rpt",
                            disabled: busy(),
                            onchange: move |evt| async move {
                                let Some(file) = evt.files().into_iter().next() else {
                                    return;
                                };
                                let name = file.name();
                                match file.read_string().await {
                                    Ok(text) => {
                                        log::app_log(LogLevel::Info, format!("Loaded {} ({} bytes)", name, text.len()));
                                        view.write().log_text = text;
                                    }
                                    Err(e) => log::app_log(LogLevel::Error, format!("Could not read {}: {}", name, e)),
                                }
                            }
                        }
                        label {
                            r#for: "log-upload",
                            class: if busy() { "btn-secondary btn-disabled" } else { "btn-secondary" },
                            "Upload File"
                        }
                    }
                }

                // Right column: results
                div { class: "results-panel",
                    {
                        let view = view.read();
                        if view.is_busy() {
                            rsx! { Loader {} }
                        } else if let Some(message) = view.error() {
                            rsx! { ErrorPanel { message: message.to_string() } }
                        } else {
                            rsx! { AnalysisResults { results: view.sorted_results() } }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Result views
// ============================================================================

#[component]
fn Loader() -> Element {
    rsx! {
        div { class: "panel-center",
            div { class: "animate-pulse-glow", span { class: "text-4xl", "⏳" } }
            h3 { class: "panel-heading mt-4", "Analyzing Log File..." }
            p { class: "text-muted", "The model is scanning for issues. This may take a moment." }
        }
    }
}

#[component]
fn ErrorPanel(message: String) -> Element {
    rsx! {
        div { class: "panel-center",
            span { class: "text-4xl", "⛔" }
            h3 { class: "panel-heading text-critical mt-4", "Analysis Failed" }
            p { class: "text-muted max-w-md", "{message}" }
        }
    }
}

#[component]
fn AnalysisResults(results: Option<Vec<IssueRecord>>) -> Element {
    let Some(results) = results else {
        return rsx! {
            div { class: "panel-center",
                span { class: "text-4xl", "📄" }
                h3 { class: "panel-heading mt-4", "Awaiting Analysis" }
                p { class: "text-muted", "Your analysis results will appear here." }
            }
        };
    };

    if results.is_empty() {
        return rsx! {
            div { class: "panel-center",
                span { class: "text-4xl", "✅" }
                h3 { class: "panel-heading mt-4", "No Issues Found" }
                p { class: "text-muted", "The model analyzed your log file and found no critical errors or warnings." }
            }
        };
    }

    let counts = CategoryCounts::tally(&results);

    rsx! {
        div { class: "space-y-4",
            div { class: "flex items-center justify-between flex-wrap gap-3 mb-4",
                h2 { class: "text-2xl font-bold", "Analysis Results" }
                div { class: "flex gap-3 text-sm",
                    for category in IssueCategory::ALL {
                        span { class: "badge {category.display_class()}",
                            "{category.icon()} {counts.get(category)} {category.display_name()}"
                        }
                    }
                }
            }
            for item in results {
                IssueCard { item }
            }
        }
    }
}

#[component]
fn IssueCard(item: IssueRecord) -> Element {
    let log_block = item.log_lines.join("\n");
    rsx! {
        div { class: "issue-card {item.category.display_class()}",
            div { class: "flex items-center gap-4 mb-4",
                span { class: "issue-icon", "{item.category.icon()}" }
                h2 { class: "issue-title", "{item.title}" }
            }
            div { class: "space-y-4",
                div {
                    h3 { class: "section-label", "Description" }
                    p { class: "text-muted text-sm mt-1", "{item.description}" }
                }
                div {
                    h3 { class: "section-label", "Relevant Log Lines" }
                    pre { class: "log-lines", code { "{log_block}" } }
                }
                div {
                    h3 { class: "section-label", "Solution" }
                    p { class: "text-muted text-sm mt-1 whitespace-pre-wrap", "{item.remedy}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_is_shown_unchanged() {
        let message = "Failed to analyze log file: model returned 503: overloaded";
        assert_eq!(failure_message(ServerFnError::new(message)), message);
    }
}
