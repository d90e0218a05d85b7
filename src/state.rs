//! View state for the analyzer screen.

use crate::model::{IssueRecord, sort_by_severity};

/// Bundled sample shown on first load.
pub const EXAMPLE_LOG: &str = include_str!("../assets/example.log");

/// Lifecycle of the single analysis request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunState {
    /// Nothing analyzed yet this session.
    #[default]
    Idle,
    Running,
    Succeeded(Vec<IssueRecord>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub log_text: String,
    pub run: RunState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            log_text: EXAMPLE_LOG.to_string(),
            run: RunState::Idle,
        }
    }
}

impl ViewState {
    pub fn is_busy(&self) -> bool {
        matches!(self.run, RunState::Running)
    }

    /// Blank or whitespace-only buffers cannot be analyzed.
    pub fn can_run(&self) -> bool {
        !self.log_text.trim().is_empty() && !self.is_busy()
    }

    /// Enter `Running`, dropping any previous result or error, and hand back the
    /// text to analyze. `None` when the run action is unavailable.
    pub fn begin_run(&mut self) -> Option<String> {
        if !self.can_run() {
            return None;
        }
        self.run = RunState::Running;
        Some(self.log_text.clone())
    }

    /// Record the outcome of the run started by [ViewState::begin_run].
    pub fn finish(&mut self, outcome: Result<Vec<IssueRecord>, String>) {
        self.run = match outcome {
            Ok(issues) => RunState::Succeeded(issues),
            Err(message) => RunState::Failed(message),
        };
    }

    /// Results in display order, or `None` before the first successful run.
    pub fn sorted_results(&self) -> Option<Vec<IssueRecord>> {
        match &self.run {
            RunState::Succeeded(issues) => {
                let mut sorted = issues.clone();
                sort_by_severity(&mut sorted);
                Some(sorted)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.run {
            RunState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fake::FakeBackend;
    use crate::analysis::{LogAnalyzer, failure_text};
    use crate::model::IssueCategory;

    fn issue(category: IssueCategory, title: &str) -> IssueRecord {
        IssueRecord {
            category,
            title: title.to_string(),
            log_lines: vec![],
            description: format!("{title} description"),
            remedy: format!("{title} remedy"),
        }
    }

    #[test]
    fn starts_idle_with_example_log() {
        let state = ViewState::default();
        assert_eq!(state.run, RunState::Idle);
        assert!(state.log_text.contains("[ERROR][XML]"));
        assert!(state.can_run());
        assert!(state.sorted_results().is_none());
    }

    #[test]
    fn empty_buffer_cannot_run() {
        let mut state = ViewState { log_text: String::new(), run: RunState::Idle };
        assert!(!state.can_run());
        assert_eq!(state.begin_run(), None);
        assert_eq!(state.run, RunState::Idle);
    }

    #[test]
    fn second_run_is_refused_while_busy() {
        let mut state = ViewState::default();
        assert!(state.begin_run().is_some());
        assert!(state.is_busy());
        assert_eq!(state.begin_run(), None);
        assert!(state.is_busy());
    }

    #[test]
    fn begin_clears_previous_error_and_results() {
        let mut state = ViewState::default();
        state.run = RunState::Failed("old".into());
        state.begin_run();
        assert_eq!(state.error(), None);

        state.finish(Ok(vec![issue(IssueCategory::Informational, "x")]));
        state.begin_run();
        assert!(state.sorted_results().is_none());
    }

    #[tokio::test]
    async fn busy_is_cleared_after_success_and_failure() {
        let backends = [
            FakeBackend::replying(r#"[{"category":"critical","title":"a","logLines":[],"description":"d","solution":"s"}]"#),
            FakeBackend::failing("connection reset"),
        ];
        for backend in backends {
            let analyzer = LogAnalyzer::new(backend);
            let mut state = ViewState { log_text: "abc".into(), run: RunState::Idle };
            let text = state.begin_run().unwrap();
            assert!(state.is_busy());
            let outcome = analyzer
                .analyze(&text)
                .await
                .map_err(|e| failure_text(&e));
            state.finish(outcome);
            assert!(!state.is_busy());
            assert!(state.can_run());
        }
    }

    #[tokio::test]
    async fn analyzer_failure_text_reaches_the_error_panel() {
        let analyzer = LogAnalyzer::new(FakeBackend::failing("connection reset"));
        let mut state = ViewState::default();
        let text = state.begin_run().unwrap();
        state.finish(analyzer.analyze(&text).await.map_err(|e| failure_text(&e)));
        assert_eq!(
            state.error(),
            Some("Failed to analyze log file: request to the model failed: connection reset")
        );
    }

    #[test]
    fn whitespace_buffer_cannot_run() {
        let mut state = ViewState { log_text: "  \n\t ".into(), run: RunState::Idle };
        assert!(!state.can_run());
        assert_eq!(state.begin_run(), None);
        assert_eq!(state.run, RunState::Idle);
    }

    #[test]
    fn failure_message_is_displayed_verbatim() {
        let mut state = ViewState::default();
        state.begin_run();
        state.finish(Err("Failed to analyze log file: model returned 503: overloaded".into()));
        assert_eq!(
            state.error(),
            Some("Failed to analyze log file: model returned 503: overloaded")
        );
    }

    #[test]
    fn zero_results_differs_from_not_run() {
        let mut state = ViewState::default();
        state.begin_run();
        state.finish(Ok(vec![]));
        assert_eq!(state.sorted_results(), Some(vec![]));
    }

    #[test]
    fn end_to_end_results_are_sorted_and_verbatim() {
        let mut state = ViewState {
            log_text: "[ERROR][XML] :: load failed\n[CE][CoreData] :: ZERO root classes".into(),
            run: RunState::Idle,
        };
        state.begin_run();
        let mut xml = issue(IssueCategory::Critical, "XML Parsing Error");
        xml.log_lines = vec!["[ERROR][XML] :: load failed".into()];
        let mut spawn = issue(IssueCategory::Critical, "No Spawn Classes");
        spawn.log_lines = vec!["[CE][CoreData] :: ZERO root classes".into()];
        state.finish(Ok(vec![
            issue(IssueCategory::Informational, "Mods loaded"),
            xml.clone(),
            issue(IssueCategory::Cautionary, "Missing type"),
            spawn.clone(),
        ]));

        let shown = state.sorted_results().unwrap();
        assert_eq!(shown[0], xml);
        assert_eq!(shown[1], spawn);
        assert_eq!(shown[2].category, IssueCategory::Cautionary);
        assert_eq!(shown[3].category, IssueCategory::Informational);
    }
}
