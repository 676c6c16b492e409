use crate::flat_table::{self, FlatTable, FlatTableError};
use std::collections::HashMap;
use thiserror::Error;

const DEFAULT_REPORTS_URL: &str = "https://api.semrush.com/";
const DEFAULT_BACKLINKS_URL: &str = "https://api.semrush.com/analytics/v1/";

// Authority-score cutoffs for referring-domain triage
const TOXIC_SCORE: f64 = 30.0;
const CAUTION_SCORE: f64 = 50.0;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    /// The provider signals failures in-band with an HTTP 200 whose body
    /// starts with an ERROR line.
    #[error("provider error response: {0}")]
    ApiError(String),
    #[error("malformed provider response: {0}")]
    Malformed(#[from] FlatTableError),
}

/// Referring domains bucketed by authority score.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BacklinkTriage {
    pub total: usize,
    pub toxic: usize,
    pub potentially_toxic: usize,
    pub healthy: usize,
}

/// Client for the key-authenticated flat-text SEO data API (domain, keyword
/// and backlink reports).
pub struct ProviderClient {
    client: reqwest::Client,
    reports_url: String,
    backlinks_url: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            reports_url: DEFAULT_REPORTS_URL.to_string(),
            backlinks_url: DEFAULT_BACKLINKS_URL.to_string(),
            api_key,
        }
    }

    /// Points both report endpoints at a different host. Tests use this to
    /// target a loopback server.
    pub fn with_base_urls(
        mut self,
        reports_url: impl Into<String>,
        backlinks_url: impl Into<String>,
    ) -> Self {
        self.reports_url = reports_url.into();
        self.backlinks_url = backlinks_url.into();
        self
    }

    /// One GET against a report endpoint with the `type` discriminator,
    /// parsed into a flat table. Success requires HTTP 200 and no in-band
    /// ERROR marker in the body.
    async fn fetch(
        &self,
        base_url: &str,
        report_type: &str,
        params: &[(&str, String)],
    ) -> Result<FlatTable, ProviderError> {
        let mut query: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("type", report_type.to_string()),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.clone())));

        let response = self.client.get(base_url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.to_uppercase().contains("ERROR") {
            return Err(ProviderError::ApiError(
                body.lines().next().unwrap_or("").trim().to_string(),
            ));
        }

        Ok(flat_table::parse(&body)?)
    }

    pub async fn fetch_report(
        &self,
        report_type: &str,
        params: &[(&str, String)],
    ) -> Result<FlatTable, ProviderError> {
        self.fetch(&self.reports_url, report_type, params).await
    }

    pub async fn fetch_backlinks_report(
        &self,
        report_type: &str,
        params: &[(&str, String)],
    ) -> Result<FlatTable, ProviderError> {
        self.fetch(&self.backlinks_url, report_type, params).await
    }

    pub async fn domain_overview(
        &self,
        domain: &str,
        database: &str,
    ) -> Result<FlatTable, ProviderError> {
        self.fetch_report(
            "domain_rank",
            &[
                ("domain", domain.to_string()),
                ("database", database.to_string()),
            ],
        )
        .await
    }

    pub async fn organic_keywords(
        &self,
        domain: &str,
        database: &str,
        limit: u32,
    ) -> Result<FlatTable, ProviderError> {
        self.fetch_report(
            "domain_organic",
            &[
                ("domain", domain.to_string()),
                ("database", database.to_string()),
                ("display_limit", limit.to_string()),
                ("export_escape", "1".to_string()),
            ],
        )
        .await
    }

    pub async fn competitors(
        &self,
        domain: &str,
        database: &str,
        limit: u32,
    ) -> Result<FlatTable, ProviderError> {
        self.fetch_report(
            "domain_organic_organic",
            &[
                ("domain", domain.to_string()),
                ("database", database.to_string()),
                ("display_limit", limit.to_string()),
            ],
        )
        .await
    }

    pub async fn keyword_overview(
        &self,
        keyword: &str,
        database: &str,
    ) -> Result<FlatTable, ProviderError> {
        self.fetch_report(
            "phrase_this",
            &[
                ("phrase", keyword.to_string()),
                ("database", database.to_string()),
                ("export_escape", "1".to_string()),
            ],
        )
        .await
    }

    pub async fn related_keywords(
        &self,
        keyword: &str,
        database: &str,
        limit: u32,
    ) -> Result<FlatTable, ProviderError> {
        self.fetch_report(
            "phrase_related",
            &[
                ("phrase", keyword.to_string()),
                ("database", database.to_string()),
                ("display_limit", limit.to_string()),
                ("export_escape", "1".to_string()),
            ],
        )
        .await
    }

    pub async fn serp(
        &self,
        keyword: &str,
        database: &str,
        limit: u32,
    ) -> Result<FlatTable, ProviderError> {
        self.fetch_report(
            "phrase_organic",
            &[
                ("phrase", keyword.to_string()),
                ("database", database.to_string()),
                ("display_limit", limit.to_string()),
                ("export_escape", "1".to_string()),
            ],
        )
        .await
    }

    pub async fn backlinks_overview(&self, domain: &str) -> Result<FlatTable, ProviderError> {
        self.fetch_backlinks_report(
            "backlinks_overview",
            &[
                ("target", domain.to_string()),
                ("target_type", "root_domain".to_string()),
            ],
        )
        .await
    }

    pub async fn anchors(&self, domain: &str, limit: u32) -> Result<FlatTable, ProviderError> {
        self.fetch_backlinks_report(
            "backlinks_anchors",
            &[
                ("target", domain.to_string()),
                ("target_type", "root_domain".to_string()),
                ("export_columns", "anchor,domains_num,backlinks_num".to_string()),
                ("display_limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Referring-domain report plus the authority-score triage from the
    /// original dashboard: toxic below 30, caution below 50, healthy above.
    pub async fn referring_domains(
        &self,
        domain: &str,
        limit: u32,
    ) -> Result<(FlatTable, BacklinkTriage), ProviderError> {
        let table = self
            .fetch_backlinks_report(
                "backlinks_refdomains",
                &[
                    ("target", domain.to_string()),
                    ("target_type", "root_domain".to_string()),
                    (
                        "export_columns",
                        "domain_ascore,domain,backlinks_num,ip,country".to_string(),
                    ),
                    ("display_limit", limit.to_string()),
                ],
            )
            .await?;

        let triage = triage_referring_domains(&table);
        Ok((table, triage))
    }
}

pub fn triage_referring_domains(table: &FlatTable) -> BacklinkTriage {
    let mut triage = BacklinkTriage::default();
    for record in table.records() {
        triage.total += 1;
        let score = authority_score(record);
        if score < TOXIC_SCORE {
            triage.toxic += 1;
        } else if score < CAUTION_SCORE {
            triage.potentially_toxic += 1;
        } else {
            triage.healthy += 1;
        }
    }
    triage
}

fn authority_score(record: &HashMap<String, String>) -> f64 {
    record
        .get("domain_ascore")
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}
