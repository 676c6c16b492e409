pub mod cli;
pub mod config;
pub mod flat_table;
pub mod http_client;
pub mod models;
pub mod page_classifier;
pub mod provider;
pub mod recommend;
pub mod reporter;
pub mod site_audit;
pub mod taxonomy;

use anyhow::Result;
use cli::Cli;
use colored::*;
use config::Config;
use http_client::{build_http_client, PAGE_FETCH_TIMEOUT_SECS, PROVIDER_TIMEOUT_SECS};
use models::{IssueDetailsSection, IssueRecord, Recommendation};
use provider::ProviderClient;
use recommend::Recommender;
use reporter::Reporter;
use site_audit::AuditClient;
use std::collections::HashMap;

pub async fn run(args: Cli, config: Config) -> Result<()> {
    println!(
        "{}",
        "Seopulse - SEO Signal Classifier & Audit Normalizer"
            .bright_cyan()
            .bold()
    );
    println!("{}", "=".repeat(50).bright_blue());
    println!();

    println!("{} {}", "Analyzing:".bright_white().bold(), args.target);
    println!();

    let api_key = config.provider_api_key();

    // On-page crawl and classification: never fails, failures are data
    if args.verbose {
        println!("{}", "Fetching page...".bright_yellow());
    }
    let page_client = build_http_client(PAGE_FETCH_TIMEOUT_SECS)?;
    let page = page_classifier::classify_page(&page_client, &args.target).await;

    let provider_http = build_http_client(PROVIDER_TIMEOUT_SECS)?;

    // Site audit issue summary, when a project is configured
    let mut snapshot_id: Option<String> = None;
    let mut issues: Vec<IssueRecord> = Vec::new();
    let mut issue_details: Option<IssueDetailsSection> = None;

    if let Some(project_id) = &args.project_id {
        match &api_key {
            Some(key) => {
                if args.verbose {
                    println!("{}", "Fetching audit snapshot...".bright_yellow());
                }
                let audit = AuditClient::new(provider_http.clone(), key.clone());
                match audit.fetch_issue_summary(project_id).await {
                    Ok(summary) => {
                        snapshot_id = Some(summary.snapshot_id().to_string());
                        issues = summary.records().to_vec();

                        if let Some(issue_id) = args.issue_id {
                            issue_details = Some(
                                fetch_details(&audit, project_id, &summary, issue_id, &args)
                                    .await?,
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Audit summary fetch failed");
                        eprintln!("{} {}", "Audit fetch failed:".bright_red().bold(), e);
                    }
                }
            }
            None => {
                eprintln!(
                    "{} set {} to enable the site audit",
                    "Warning:".yellow().bold(),
                    config::API_KEY_ENV
                );
            }
        }
    }

    // Domain overview report from the flat-text provider
    let mut domain_overview: Option<HashMap<String, String>> = None;
    if args.overview {
        match &api_key {
            Some(key) => {
                if args.verbose {
                    println!("{}", "Fetching domain overview...".bright_yellow());
                }
                let provider = ProviderClient::new(provider_http.clone(), key.clone());
                match provider.domain_overview(&args.target, &args.database).await {
                    Ok(table) => domain_overview = table.first().cloned(),
                    Err(e) => {
                        tracing::error!(error = %e, "Domain overview fetch failed");
                        eprintln!("{} {}", "Overview fetch failed:".bright_red().bold(), e);
                    }
                }
            }
            None => {
                eprintln!(
                    "{} set {} to enable provider reports",
                    "Warning:".yellow().bold(),
                    config::API_KEY_ENV
                );
            }
        }
    }

    // AI recommendations, best-effort with a static fallback
    let mut recommendations: Vec<Recommendation> = Vec::new();
    if args.recommend {
        if args.verbose {
            println!("{}", "Generating recommendations...".bright_yellow());
        }
        match config.llm_api_key() {
            Some(llm_key) => {
                let recommender = Recommender::new(provider_http.clone(), llm_key);
                recommendations = recommender
                    .recommendations(
                        &args.target,
                        config.business_goals.as_ref(),
                        page.signals(),
                        &issues,
                        domain_overview.as_ref(),
                    )
                    .await;
            }
            None => {
                eprintln!(
                    "{} set {} for AI recommendations; using the generic list",
                    "Warning:".yellow().bold(),
                    config::LLM_KEY_ENV
                );
                recommendations = recommend::fallback_recommendations();
            }
        }
    }

    let mut report = Reporter::generate_report(
        &args.target,
        page,
        snapshot_id,
        issues,
        domain_overview,
        recommendations,
    );
    report.issue_details = issue_details;

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        _ => {
            Reporter::print_text_report(&report, args.top);
            if let Some(details) = &report.issue_details {
                print_issue_details(details);
            }
        }
    }

    if let Some(filename) = args.save {
        Reporter::save_json_report(&report, &filename)?;
    }

    Ok(())
}

async fn fetch_details(
    audit: &AuditClient,
    project_id: &str,
    summary: &site_audit::IssueSummary,
    issue_id: u32,
    args: &Cli,
) -> Result<IssueDetailsSection> {
    if args.verbose {
        println!("{}", "Fetching issue details...".bright_yellow());
    }
    let details = audit
        .fetch_issue_details(project_id, summary.snapshot_id(), issue_id, args.page_size)
        .await?;

    Ok(IssueDetailsSection {
        issue_id,
        issue_name: taxonomy::issue_name(issue_id),
        total: details.total,
        complete: details.complete,
        pages: details.pages,
    })
}

fn print_issue_details(details: &IssueDetailsSection) {
    println!();
    println!(
        "{} {} (id {})",
        "Affected pages:".bright_yellow().bold(),
        details.issue_name,
        details.issue_id
    );
    println!(
        "  {} of {} pages collected{}",
        details.pages.len(),
        details.total,
        if details.complete {
            "".normal()
        } else {
            " (incomplete)".yellow()
        }
    );
    for page in &details.pages {
        match &page.title {
            Some(title) => println!("  - {} ({})", page.url, title.dimmed()),
            None => println!("  - {}", page.url),
        }
    }
}
