//! Shared domain types for issue records (used by the UI and by the analysis client).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    #[serde(alias = "ERROR")]
    Critical,
    #[serde(alias = "WARNING")]
    Cautionary,
    #[serde(alias = "INFO")]
    Informational,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 3] = [
        IssueCategory::Critical,
        IssueCategory::Cautionary,
        IssueCategory::Informational,
    ];

    /// Display priority; lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            IssueCategory::Critical => 0,
            IssueCategory::Cautionary => 1,
            IssueCategory::Informational => 2,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            IssueCategory::Critical => "critical",
            IssueCategory::Cautionary => "cautionary",
            IssueCategory::Informational => "informational",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IssueCategory::Critical => "Critical",
            IssueCategory::Cautionary => "Warning",
            IssueCategory::Informational => "Info",
        }
    }

    pub fn display_class(&self) -> &'static str {
        match self {
            IssueCategory::Critical => "issue-critical",
            IssueCategory::Cautionary => "issue-cautionary",
            IssueCategory::Informational => "issue-informational",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            IssueCategory::Critical => "⛔",
            IssueCategory::Cautionary => "⚠️",
            IssueCategory::Informational => "ℹ️",
        }
    }
}

/// One finding about the log, as returned by the model.
///
/// Every field is required; a response whose records miss one fails to decode
/// as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub category: IssueCategory,
    pub title: String,
    /// Verbatim source lines implicated by the finding, in log order.
    pub log_lines: Vec<String>,
    pub description: String,
    #[serde(rename = "solution", alias = "remedy")]
    pub remedy: String,
}

/// Stable sort by severity: critical, then cautionary, then informational.
/// Records of the same category keep their relative order.
pub fn sort_by_severity(records: &mut [IssueRecord]) {
    records.sort_by_key(|r| r.category.rank());
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub critical: usize,
    pub cautionary: usize,
    pub informational: usize,
}

impl CategoryCounts {
    pub fn tally(records: &[IssueRecord]) -> Self {
        records.iter().fold(Self::default(), |mut counts, r| {
            match r.category {
                IssueCategory::Critical => counts.critical += 1,
                IssueCategory::Cautionary => counts.cautionary += 1,
                IssueCategory::Informational => counts.informational += 1,
            }
            counts
        })
    }

    pub fn get(&self, category: IssueCategory) -> usize {
        match category {
            IssueCategory::Critical => self.critical,
            IssueCategory::Cautionary => self.cautionary,
            IssueCategory::Informational => self.informational,
        }
    }
}
