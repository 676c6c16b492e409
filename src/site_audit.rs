use crate::models::{IssueDetailPage, IssueRecord, Severity};
use crate::taxonomy;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_AUDIT_URL: &str = "https://api.semrush.com/reports/v1";

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("audit API returned HTTP {0}")]
    Status(u16),
    #[error("malformed audit response: {0}")]
    MalformedResponse(String),
}

/// Latest-snapshot issue summary. Tri-state so callers can tell "no issues"
/// from "could not fetch" (the fetch failure is an `Err` at the call site).
#[derive(Debug, Clone)]
pub enum IssueSummary {
    Issues {
        records: Vec<IssueRecord>,
        snapshot_id: String,
    },
    Empty {
        snapshot_id: String,
    },
}

impl IssueSummary {
    pub fn records(&self) -> &[IssueRecord] {
        match self {
            IssueSummary::Issues { records, .. } => records,
            IssueSummary::Empty { .. } => &[],
        }
    }

    pub fn snapshot_id(&self) -> &str {
        match self {
            IssueSummary::Issues { snapshot_id, .. } => snapshot_id,
            IssueSummary::Empty { snapshot_id } => snapshot_id,
        }
    }
}

/// Affected pages for one issue, aggregated across all result pages.
#[derive(Debug, Clone)]
pub struct IssueDetails {
    pub pages: Vec<IssueDetailPage>,
    /// Grand total reported by the provider.
    pub total: u64,
    /// False when pagination stopped short of the reported total; whatever
    /// was collected is still returned.
    pub complete: bool,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    snapshot_id: Option<String>,
    #[serde(default)]
    errors: Vec<IssueCounter>,
    #[serde(default)]
    warnings: Vec<IssueCounter>,
    #[serde(default)]
    notices: Vec<IssueCounter>,
}

#[derive(Debug, Deserialize)]
struct IssueCounter {
    id: u32,
    count: u64,
    #[serde(default)]
    delta: i64,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(default)]
    data: Vec<IssueDetailPage>,
    #[serde(default)]
    total: u64,
}

pub struct AuditClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuditClient {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            base_url: DEFAULT_AUDIT_URL.to_string(),
            api_key,
        }
    }

    /// Points the client at a different audit endpoint. Tests use this to
    /// target a loopback server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the latest audit snapshot and normalizes its findings. Each
    /// section entry with a positive count becomes one `IssueRecord` whose
    /// severity is the section it came from; zero-count entries are dropped.
    pub async fn fetch_issue_summary(&self, project_id: &str) -> Result<IssueSummary, AuditError> {
        let url = format!(
            "{}/projects/{}/siteaudit/snapshot",
            self.base_url, project_id
        );
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::Status(status.as_u16()));
        }

        let snapshot: SnapshotResponse = response
            .json()
            .await
            .map_err(|e| AuditError::MalformedResponse(e.to_string()))?;

        let snapshot_id = snapshot
            .snapshot_id
            .ok_or_else(|| AuditError::MalformedResponse("missing snapshot_id".to_string()))?;

        let mut records = Vec::new();
        for (section, severity) in [
            (&snapshot.errors, Severity::Error),
            (&snapshot.warnings, Severity::Warning),
            (&snapshot.notices, Severity::Notice),
        ] {
            for entry in section {
                if entry.count == 0 {
                    continue;
                }
                records.push(IssueRecord {
                    issue_id: entry.id,
                    issue_name: taxonomy::issue_name(entry.id),
                    severity,
                    count: entry.count,
                    delta: entry.delta,
                });
            }
        }

        tracing::info!(
            project_id = %project_id,
            snapshot_id = %snapshot_id,
            issues = records.len(),
            "Fetched audit snapshot"
        );

        if records.is_empty() {
            Ok(IssueSummary::Empty { snapshot_id })
        } else {
            Ok(IssueSummary::Issues {
                records,
                snapshot_id,
            })
        }
    }

    /// Collects every page affected by one issue, one result page at a time,
    /// until a page comes back empty or the running count reaches the
    /// provider-reported total. A hard iteration cap (total / page_size + 2)
    /// bounds the loop against a provider that reports an inflated total.
    pub async fn fetch_issue_details(
        &self,
        project_id: &str,
        snapshot_id: &str,
        issue_id: u32,
        page_size: u64,
    ) -> Result<IssueDetails, AuditError> {
        let url = format!(
            "{}/projects/{}/siteaudit/snapshot/{}/issue/{}",
            self.base_url, project_id, snapshot_id, issue_id
        );
        let page_size = page_size.max(1);

        let mut all_pages: Vec<IssueDetailPage> = Vec::new();
        let mut total: u64 = 0;
        let mut current_page: u64 = 1;
        let mut max_requests: u64 = 2;
        let mut progress: Option<ProgressBar> = None;

        loop {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("key", self.api_key.clone()),
                    ("limit", page_size.to_string()),
                    ("page", current_page.to_string()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(AuditError::Status(status.as_u16()));
            }

            let detail: DetailResponse = response
                .json()
                .await
                .map_err(|e| AuditError::MalformedResponse(e.to_string()))?;

            if current_page == 1 {
                total = detail.total;
                max_requests = total / page_size + 2;
                if total > page_size {
                    let pb = ProgressBar::new(total);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("[{elapsed_precise}] {bar:40.cyan} {pos}/{len} pages")
                            .expect("Progress bar template should be valid"),
                    );
                    progress = Some(pb);
                }
            }

            if detail.data.is_empty() {
                break;
            }

            all_pages.extend(detail.data);
            if let Some(ref pb) = progress {
                pb.set_position(all_pages.len().min(total as usize) as u64);
            }

            if all_pages.len() as u64 >= total {
                break;
            }

            current_page += 1;
            if current_page > max_requests {
                tracing::warn!(
                    issue_id,
                    collected = all_pages.len(),
                    total,
                    "Pagination cap reached before the reported total"
                );
                break;
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let complete = all_pages.len() as u64 >= total;
        Ok(IssueDetails {
            pages: all_pages,
            total,
            complete,
        })
    }
}
