use crate::models::{
    AnalysisReport, ContentStatus, H1Status, IssueRecord, LengthStatus, PageClassification,
    PageSignals, Recommendation,
};
use anyhow::Result;
use colored::*;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn generate_report(
        target: &str,
        page: PageClassification,
        snapshot_id: Option<String>,
        issues: Vec<IssueRecord>,
        domain_overview: Option<HashMap<String, String>>,
        recommendations: Vec<Recommendation>,
    ) -> AnalysisReport {
        AnalysisReport {
            target: target.to_string(),
            page,
            snapshot_id,
            issues,
            domain_overview,
            issue_details: None,
            recommendations,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn print_text_report(report: &AnalysisReport, top: usize) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "Seopulse - SEO Analysis Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "Target".bright_white().bold(), report.target);
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.timestamp
        );
        println!();

        match &report.page {
            PageClassification::Classified(signals) => Self::print_signals(signals),
            PageClassification::Unreachable { url, error } => {
                println!("{}", "On-Page Signals".bright_yellow().bold().underline());
                println!("  {} {}", "URL:".bright_white().bold(), url);
                println!("  {} {}", "Crawl failed:".bright_red().bold(), error);
            }
        }
        println!();

        if let Some(overview) = &report.domain_overview {
            println!("{}", "Domain Overview".bright_yellow().bold().underline());
            for key in ["Rank", "Organic Keywords", "Organic Traffic", "Organic Cost"] {
                if let Some(value) = overview.get(key) {
                    println!("  {:<22}{}", format!("{}:", key).bright_white(), value);
                }
            }
            println!();
        }

        if let Some(snapshot_id) = &report.snapshot_id {
            println!("{}", "Site Audit".bright_yellow().bold().underline());
            println!("  Snapshot: {}", snapshot_id.bright_white());
            if report.issues.is_empty() {
                println!("  {}", "No issues found".bright_green());
            } else {
                let errors = Self::count_severity(&report.issues, 0);
                let warnings = Self::count_severity(&report.issues, 1);
                let notices = Self::count_severity(&report.issues, 2);
                println!(
                    "  Issues: {} ({} errors, {} warnings, {} notices)",
                    report.issues.len().to_string().bright_white(),
                    errors.to_string().bright_red(),
                    warnings.to_string().yellow(),
                    notices.to_string().bright_cyan()
                );
                println!();
                for issue in rank_issues(&report.issues, top) {
                    let severity_str = match issue.severity.rank() {
                        0 => "ERROR ".bright_red(),
                        1 => "WARN  ".yellow(),
                        _ => "NOTICE".bright_cyan(),
                    };
                    let delta = if issue.delta != 0 {
                        format!(" ({:+} since last snapshot)", issue.delta)
                    } else {
                        String::new()
                    };
                    println!(
                        "  [{}] {} - {} pages{}",
                        severity_str,
                        issue.issue_name,
                        issue.count.to_string().bright_white(),
                        delta.dimmed()
                    );
                }
            }
            println!();
        }

        if !report.recommendations.is_empty() {
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for rec in &report.recommendations {
                let severity = if rec.severity == "high" {
                    rec.severity.bright_red()
                } else {
                    rec.severity.yellow()
                };
                println!();
                println!(
                    "  {} [{}]",
                    rec.category.bright_white().bold(),
                    severity
                );
                println!("    Issue: {}", rec.issue);
                println!("    Fix:   {}", rec.fix);
            }
            println!();
        }

        println!("{}", "=".repeat(80).bright_blue());
    }

    fn print_signals(signals: &PageSignals) {
        println!("{}", "On-Page Signals".bright_yellow().bold().underline());
        println!("  {} {}", "URL:".bright_white().bold(), signals.url);

        let title = signals.title.as_deref().unwrap_or("(missing)");
        println!(
            "  Title:            {} [{} chars, {}]",
            title.bright_white(),
            signals.title_length,
            Self::length_status_str(signals.title_status)
        );

        let meta = signals.meta_description.as_deref().unwrap_or("(missing)");
        println!(
            "  Meta description: {} [{} chars, {}]",
            meta,
            signals.meta_description_length,
            Self::length_status_str(signals.meta_description_status)
        );

        let h1_status = match signals.h1_status {
            H1Status::Good => "Good".bright_green(),
            H1Status::Multiple => "Multiple".yellow(),
            H1Status::Missing => "Missing".bright_red(),
        };
        println!(
            "  Headings:         H1={} ({}), H2={}, H3={}, H4={}",
            signals.heading_counts.h1,
            h1_status,
            signals.heading_counts.h2,
            signals.heading_counts.h3,
            signals.heading_counts.h4
        );
        for h1 in &signals.h1_texts {
            println!("    H1: {}", h1.dimmed());
        }

        let content_status = match signals.content_status {
            ContentStatus::Good => "Good".bright_green(),
            ContentStatus::Moderate => "Moderate".yellow(),
            ContentStatus::Thin => "Thin".bright_red(),
        };
        println!(
            "  Content:          {} words ({})",
            signals.word_count, content_status
        );

        println!(
            "  Images:           {} total, {} without alt text",
            signals.images_total,
            if signals.images_without_alt > 0 {
                signals.images_without_alt.to_string().yellow()
            } else {
                signals.images_without_alt.to_string().bright_green()
            }
        );
    }

    fn length_status_str(status: LengthStatus) -> ColoredString {
        match status {
            LengthStatus::Good => "Good".bright_green(),
            LengthStatus::NeedsFix => "Needs Fix".yellow(),
        }
    }

    fn count_severity(issues: &[IssueRecord], rank: u8) -> usize {
        issues.iter().filter(|i| i.severity.rank() == rank).count()
    }

    pub fn save_json_report(report: &AnalysisReport, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}

/// Top-N issues for presentation: severity rank ascending (errors first),
/// affected-page count descending within a rank.
pub fn rank_issues(issues: &[IssueRecord], top: usize) -> Vec<&IssueRecord> {
    let mut ranked: Vec<&IssueRecord> = issues.iter().collect();
    ranked.sort_by_key(|issue| (issue.severity.rank(), Reverse(issue.count)));
    ranked.truncate(top);
    ranked
}
