use crate::models::{IssueRecord, PageSignals, Recommendation};
use crate::reporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

const DEFAULT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const RECOMMENDATION_COUNT: usize = 10;
const TOP_ISSUES_IN_PROMPT: usize = 10;

/// Answers to the business questionnaire, embedded in the prompt so the
/// recommendations reflect the site's goals instead of generic advice.
/// Unanswered questions render as N/A.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessGoals {
    pub objective: Option<String>,
    pub audience: Option<String>,
    pub conversion: Option<String>,
    pub strategy: Option<String>,
    pub stage: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Asks an OpenAI-compatible completion API for SEO recommendations grounded
/// in the classified signals and ranked audit issues.
pub struct Recommender {
    client: reqwest::Client,
    completions_url: String,
    model: String,
    api_key: String,
}

impl Recommender {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            completions_url: DEFAULT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
        }
    }

    pub fn with_completions_url(mut self, url: impl Into<String>) -> Self {
        self.completions_url = url.into();
        self
    }

    /// Best-effort: any transport or parse failure falls back to the fixed
    /// generic list rather than surfacing an error. The recommendations are
    /// advisory output, not data the rest of the pipeline depends on.
    pub async fn recommendations(
        &self,
        domain: &str,
        goals: Option<&BusinessGoals>,
        signals: Option<&PageSignals>,
        issues: &[IssueRecord],
        metrics: Option<&HashMap<String, String>>,
    ) -> Vec<Recommendation> {
        let prompt = compose_prompt(domain, goals, signals, issues, metrics);

        match self.request_completion(&prompt).await {
            Ok(recs) if !recs.is_empty() => recs,
            Ok(_) => {
                tracing::warn!("Completion API returned no recommendations, using fallback");
                fallback_recommendations()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Completion API call failed, using fallback");
                fallback_recommendations()
            }
        }
    }

    async fn request_completion(&self, prompt: &str) -> anyhow::Result<Vec<Recommendation>> {
        let body = json!({
            "model": self.model,
            "temperature": 0.7,
            "max_tokens": 8000,
            "messages": [
                {"role": "system", "content": "SEO expert. Return only JSON."},
                {"role": "user", "content": prompt},
            ],
        });

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("");

        let recs: Vec<Recommendation> = serde_json::from_str(strip_code_fences(content))?;
        Ok(recs.into_iter().take(RECOMMENDATION_COUNT).collect())
    }
}

/// Models routinely wrap JSON answers in markdown fences despite being told
/// not to; strip them before parsing.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn compose_prompt(
    domain: &str,
    goals: Option<&BusinessGoals>,
    signals: Option<&PageSignals>,
    issues: &[IssueRecord],
    metrics: Option<&HashMap<String, String>>,
) -> String {
    let mut prompt = format!("SEO expert analysis.\n\nDOMAIN: {}\n", domain);

    if let Some(goals) = goals {
        let answer = |field: &Option<String>| field.as_deref().unwrap_or("N/A").to_string();
        prompt.push_str(&format!(
            "\nBUSINESS:\n\
             - Objective: {}\n\
             - Audience: {}\n\
             - Conversion: {}\n\
             - Strategy: {}\n\
             - Stage: {}\n\
             - Position: {}\n",
            answer(&goals.objective),
            answer(&goals.audience),
            answer(&goals.conversion),
            answer(&goals.strategy),
            answer(&goals.stage),
            answer(&goals.position),
        ));
    }

    if let Some(metrics) = metrics {
        let field = |name: &str| metrics.get(name).cloned().unwrap_or_else(|| "N/A".into());
        prompt.push_str(&format!(
            "\nMETRICS:\n- Rank: {}\n- Keywords: {}\n- Traffic: {}\n",
            field("Rank"),
            field("Organic Keywords"),
            field("Organic Traffic"),
        ));
    }

    if let Some(s) = signals {
        prompt.push_str(&format!(
            "\nON-PAGE DATA:\n\
             - Meta: {:?} ({} chars)\n\
             - Title: {:?} ({} chars)\n\
             - H1: {:?} (Count: {})\n\
             - Headers: H2={}, H3={}, H4={}\n\
             - Content: {:?} ({} words)\n\
             - Images without Alt: {}/{}\n",
            s.meta_description_status,
            s.meta_description_length,
            s.title_status,
            s.title_length,
            s.h1_status,
            s.heading_counts.h1,
            s.heading_counts.h2,
            s.heading_counts.h3,
            s.heading_counts.h4,
            s.content_status,
            s.word_count,
            s.images_without_alt,
            s.images_total,
        ));
    }

    if !issues.is_empty() {
        let errors = issues.iter().filter(|i| i.severity.rank() == 0).count();
        let warnings = issues.iter().filter(|i| i.severity.rank() == 1).count();
        let notices = issues.iter().filter(|i| i.severity.rank() == 2).count();
        prompt.push_str(&format!(
            "\nSITE AUDIT DATA:\n- Total Issues: {}\n- Errors: {}\n- Warnings: {}\n- Notices: {}\n\nTop Critical Issues:\n",
            issues.len(),
            errors,
            warnings,
            notices,
        ));
        for issue in reporter::rank_issues(issues, TOP_ISSUES_IN_PROMPT) {
            prompt.push_str(&format!(
                "- [{}] {}: {} pages affected\n",
                issue.severity.label(),
                issue.issue_name,
                issue.count
            ));
        }
    }

    prompt.push_str(
        "\nGenerate 10 SEO recommendations using ALL data above.\n\n\
         JSON format (10 objects):\n\
         [{\"category\":\"Short title\",\"severity\":\"high/medium\",\
         \"issue\":\"Specific problem with actual data from above\",\
         \"fix\":\"1. Step 2. Step 3. Step\"}]\n\n\
         ONLY JSON, no markdown.",
    );

    prompt
}

/// Generic recommendations served when the completion API is unavailable.
pub fn fallback_recommendations() -> Vec<Recommendation> {
    let items = [
        (
            "Meta Description",
            "high",
            "Optimize meta descriptions",
            "1. Write 150-160 chars 2. Include keywords 3. Add CTA 4. Benefit-focused 5. Unique 6. Test CTR",
        ),
        (
            "Title Tags",
            "high",
            "Improve title tags",
            "1. Keep 50-60 chars 2. Keywords first 3. Add brand 4. Unique 5. Power words 6. Match intent",
        ),
        (
            "H1 Tags",
            "high",
            "Fix H1 structure",
            "1. Single H1 2. Include keyword 3. Descriptive 4. Under 70 chars 5. Match title 6. Unique",
        ),
        (
            "Headers",
            "medium",
            "Better header hierarchy",
            "1. Logical order 2. H1-H2-H3-H4 3. Keywords natural 4. Descriptive 5. Section breaks 6. Consistent",
        ),
        (
            "Content",
            "high",
            "Enhance content quality",
            "1. Create 1000+ words 2. Research competitors 3. Answer questions 4. Add value 5. Update often 6. E-E-A-T",
        ),
        (
            "Keywords",
            "high",
            "Refine keyword strategy",
            "1. Long-tail research 2. Optimize title H1 URL 3. LSI keywords 4. 1-2% density 5. Alt text 6. User intent",
        ),
        (
            "Images",
            "medium",
            "Add alt text to images",
            "1. Descriptive alt 2. Keywords natural 3. Describe image 4. Under 125 chars 5. No stuffing 6. All images",
        ),
        (
            "Technical SEO",
            "high",
            "Fix technical issues",
            "1. Crawl errors 2. Robots.txt 3. XML sitemap 4. Broken links 5. Canonical tags 6. Schema markup",
        ),
        (
            "Link Building",
            "medium",
            "Strengthen backlinks",
            "1. Quality content 2. Guest posts 3. Fix broken links 4. Relationships 5. Shareable assets 6. Monitor",
        ),
        (
            "Conversions",
            "high",
            "Optimize conversions",
            "1. Clear CTAs 2. Simple forms 3. Trust signals 4. Landing pages 5. A/B test 6. Reduce friction",
        ),
    ];

    items
        .iter()
        .map(|(category, severity, issue, fix)| Recommendation {
            category: category.to_string(),
            severity: severity.to_string(),
            issue: issue.to_string(),
            fix: fix.to_string(),
        })
        .collect()
}
