use crate::models::{
    ContentStatus, H1Status, HeadingCounts, LengthStatus, PageClassification, PageSignals,
};
use once_cell::sync::Lazy;
use scraper::{Html, Node, Selector};
use std::ops::RangeInclusive;
use url::Url;

// Widely-cited on-page SEO heuristics. Intentionally plain range checks.
const META_DESC_GOOD: RangeInclusive<usize> = 150..=160;
const TITLE_GOOD: RangeInclusive<usize> = 50..=60;
const THIN_CONTENT_WORDS: usize = 300;
const GOOD_CONTENT_WORDS: usize = 1000;

/// Subtrees excluded from the body-text word count. Navigation and chrome
/// would otherwise inflate the count on every page.
const NON_CONTENT_TAGS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

// Cached selectors to avoid repeated parsing and eliminate unwrap() calls
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4").expect("heading selector should be valid"));
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));

/// Fetches a single page and classifies its on-page SEO signals against the
/// fixed thresholds. Total: every failure (DNS, timeout, non-2xx, anything
/// the transport reports) becomes an `Unreachable` variant carrying the
/// error's description, never an `Err`.
pub async fn classify_page(client: &reqwest::Client, domain_or_url: &str) -> PageClassification {
    let url = normalize_url(domain_or_url);

    // Only http and https make sense here; anything else is a caller typo
    match Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            return unreachable_page(&url, format!("unsupported URL scheme '{}'", parsed.scheme()))
        }
        Err(e) => return unreachable_page(&url, format!("invalid URL: {}", e)),
    }

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return unreachable_page(&url, e.to_string()),
    };

    if let Err(e) = response.error_for_status_ref() {
        return unreachable_page(&url, e.to_string());
    }

    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => return unreachable_page(&url, e.to_string()),
    };

    PageClassification::Classified(classify_html(&url, &html))
}

/// Prepends a secure scheme when the target is given as a bare domain.
fn normalize_url(domain_or_url: &str) -> String {
    if domain_or_url.starts_with("http") {
        domain_or_url.to_string()
    } else {
        format!("https://{}", domain_or_url)
    }
}

fn unreachable_page(url: &str, error: String) -> PageClassification {
    tracing::warn!(url = %url, error = %error, "Page fetch failed");
    PageClassification::Unreachable {
        url: url.to_string(),
        error,
    }
}

/// Extraction and threshold classification, separated from the fetch so it
/// can run against any markup.
pub fn classify_html(url: &str, html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    // Meta description: absent or empty both count as missing
    let meta_description = document
        .select(&META_DESC_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(|content| content.to_string());
    let meta_description_length = meta_description
        .as_ref()
        .map(|d| d.chars().count())
        .unwrap_or(0);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string());
    let title_length = title.as_ref().map(|t| t.chars().count()).unwrap_or(0);

    let mut heading_counts = HeadingCounts::default();
    let mut h1_texts = Vec::new();
    for element in document.select(&HEADING_SELECTOR) {
        match element.value().name() {
            "h1" => {
                heading_counts.h1 += 1;
                h1_texts.push(element.text().collect::<String>().trim().to_string());
            }
            "h2" => heading_counts.h2 += 1,
            "h3" => heading_counts.h3 += 1,
            "h4" => heading_counts.h4 += 1,
            _ => {}
        }
    }

    let word_count = count_body_words(&document);

    let mut images_total = 0;
    let mut images_with_alt = 0;
    for element in document.select(&IMG_SELECTOR) {
        images_total += 1;
        if element
            .value()
            .attr("alt")
            .is_some_and(|alt| !alt.is_empty())
        {
            images_with_alt += 1;
        }
    }

    PageSignals {
        url: url.to_string(),
        meta_description,
        meta_description_length,
        meta_description_status: length_status(meta_description_length, META_DESC_GOOD),
        title,
        title_length,
        title_status: length_status(title_length, TITLE_GOOD),
        h1_status: match heading_counts.h1 {
            0 => H1Status::Missing,
            1 => H1Status::Good,
            _ => H1Status::Multiple,
        },
        heading_counts,
        h1_texts,
        word_count,
        content_status: if word_count < THIN_CONTENT_WORDS {
            ContentStatus::Thin
        } else if word_count >= GOOD_CONTENT_WORDS {
            ContentStatus::Good
        } else {
            ContentStatus::Moderate
        },
        images_total,
        images_without_alt: images_total - images_with_alt,
    }
}

fn length_status(length: usize, good: RangeInclusive<usize>) -> LengthStatus {
    if good.contains(&length) {
        LengthStatus::Good
    } else {
        LengthStatus::NeedsFix
    }
}

/// Word count over the page's visible text, skipping non-content subtrees.
/// split_whitespace collapses runs of whitespace for free.
fn count_body_words(document: &Html) -> usize {
    let mut text = String::new();
    collect_content_text(document.tree.root(), &mut text);
    text.split_whitespace().count()
}

fn collect_content_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(t) => {
                out.push_str(&t);
                out.push(' ');
            }
            Node::Element(el) => {
                if !NON_CONTENT_TAGS.contains(&el.name()) {
                    collect_content_text(child, out);
                }
            }
            _ => {}
        }
    }
}
