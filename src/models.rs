use serde::{Deserialize, Serialize};

/// Signals extracted and classified from one fetched page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSignals {
    pub url: String,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub meta_description_status: LengthStatus,
    pub title: Option<String>,
    pub title_length: usize,
    pub title_status: LengthStatus,
    pub heading_counts: HeadingCounts,
    pub h1_texts: Vec<String>,
    pub h1_status: H1Status,
    pub word_count: usize,
    pub content_status: ContentStatus,
    pub images_total: usize,
    pub images_without_alt: usize,
}

/// Outcome of a single classify-page call. Fetch and parse failures are data,
/// not errors: the classifier never raises past its boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageClassification {
    Classified(PageSignals),
    Unreachable { url: String, error: String },
}

impl PageClassification {
    pub fn signals(&self) -> Option<&PageSignals> {
        match self {
            PageClassification::Classified(signals) => Some(signals),
            PageClassification::Unreachable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthStatus {
    Good,
    NeedsFix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum H1Status {
    Good,
    Multiple,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentStatus {
    Good,
    Moderate,
    Thin,
}

/// Severity of an audit finding. Authoritative per finding: it comes from the
/// response section (errors/warnings/notices) the finding was reported under,
/// not from the issue-id band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl Severity {
    /// Sort rank for presentation: errors first, notices last.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Notice => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Notice => "Notice",
        }
    }
}

/// One audit finding for one project snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub issue_id: u32,
    pub issue_name: String,
    pub severity: Severity,
    /// Number of pages affected. Entries reported with a zero count are
    /// dropped before an IssueRecord is ever built.
    pub count: u64,
    /// Change since the previous snapshot; 0 when the provider omits it.
    pub delta: i64,
}

/// One page implicated by a specific issue. The provider attaches varying
/// extra fields per issue type; they pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDetailPage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single AI-generated SEO recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub severity: String,
    pub issue: String,
    pub fix: String,
}

/// Full analysis output rendered by the reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub target: String,
    pub page: PageClassification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    pub issues: Vec<IssueRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_overview: Option<std::collections::HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_details: Option<IssueDetailsSection>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub recommendations: Vec<Recommendation>,
    pub timestamp: String,
}

/// Drill-down into one issue's affected pages, when requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDetailsSection {
    pub issue_id: u32,
    pub issue_name: String,
    pub total: u64,
    /// False when pagination stopped short of the provider-reported total.
    pub complete: bool,
    pub pages: Vec<IssueDetailPage>,
}
