use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Static issue-id to canonical-name table, as published by the audit
/// provider. The numeric bands (errors in the low ids plus 111, warnings in
/// 12-14/31/101-137, notices in 201-223) are a documentation convention only:
/// the severity attached to a finding always comes from the response section
/// it was reported under, never from this table.
static ISSUE_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Errors
        (1, "5xx errors"),
        (2, "4xx errors"),
        (3, "Title tag is missing or empty"),
        (4, "Blocked from crawling"),
        (6, "Duplicate title tag"),
        (7, "Duplicate content"),
        (8, "Broken internal links"),
        (9, "Pages not crawled"),
        (10, "DNS resolution issue"),
        (11, "We couldn't open the page's URL"),
        (13, "Broken internal images"),
        (15, "Duplicate meta descriptions"),
        (16, "Invalid robots.txt format"),
        (17, "Invalid sitemap.xml format"),
        (18, "Incorrect pages found in"),
        (19, "www resolve issues"),
        (20, "Viewport not configured"),
        (21, "Large HTML page size"),
        (22, "Missing canonical tags in AMP pages"),
        (26, "Non-secure pages"),
        (27, "Certificate Expiration"),
        (28, "Old security protocol version"),
        (29, "Certificate registered to incorrect"),
        (30, "Issues with mixed content"),
        (32, "Neither canonical URL nor 301 redirect from HTTP homepage"),
        (33, "Redirect chains and loops"),
        (34, "AMP Pages with HTML Issues"),
        (35, "AMP Pages with Style and Layout"),
        (36, "AMP Pages with Templating Issues"),
        (38, "Broken canonical URLs"),
        (39, "Multiple canonical URLs"),
        (40, "Meta refresh redirects"),
        (41, "Broken internal JavaScript and CSS"),
        (42, "Insecure encryption algorithms"),
        (43, "Sitemap file too large"),
        (44, "Malformed links"),
        (45, "Structured data that contains"),
        (46, "Viewport width not set"),
        (111, "Slow page load speed"),
        // Warnings
        (12, "Broken external links"),
        (14, "Broken external images"),
        (31, "Links lead to HTTP pages for HTTPS"),
        (101, "Title element is too short"),
        (102, "Title element is too long"),
        (103, "Missing h1"),
        (104, "Multiple h1 tags"),
        (105, "Duplicate content in h1 and title"),
        (106, "Missing meta description"),
        (108, "Too many on-page links"),
        (109, "Temporary redirects"),
        (110, "Missing ALT attributes"),
        (112, "Low text to HTML ratio"),
        (113, "Too many URL parameters"),
        (114, "Missing hreflang and lang attributes"),
        (115, "Encoding not declared"),
        (116, "Doctype not declared"),
        (117, "Low word count"),
        (120, "Incompatible plugins used"),
        (121, "Frames used"),
        (122, "Underscores in URL"),
        (123, "Nofollow attributes in internal links"),
        (124, "Sitemap.xml not specified in"),
        (125, "Sitemap.xml not found"),
        (126, "HTTPS encryption not used"),
        (127, "No SNI support"),
        (128, "HTTP URLs in sitemap.xml for HTTPS"),
        (129, "Uncompressed pages"),
        (130, "Disallowed internal resources"),
        (131, "Uncompressed JavaScript and CSS"),
        (132, "Uncached JavaScript and CSS files"),
        (133, "Too large JavaScript and CSS total"),
        (134, "Too many JavaScript and CSS files"),
        (135, "Unminified JavaScript and CSS files"),
        (136, "Warning - Too long URLs"),
        (137, "Llms.txt not found"),
        // Notices
        (201, "Too long URLs"),
        (202, "Nofollow attributes in external links"),
        (203, "Robots.txt not found"),
        (205, "No HSTS support"),
        (206, "Orphaned pages (Google Analytics)"),
        (207, "Orphaned sitemap pages"),
        (208, "Pages have high Document"),
        (209, "Blocked by X-Robots-Tag: noindex HTTP header"),
        (210, "Disallowed external resources"),
        (211, "Broken external JavaScript and CSS"),
        (212, "Page crawl depth"),
        (213, "Pages with only one internal link"),
        (214, "Permanent redirects"),
        (215, "Resources formatted as page links"),
        (216, "Links with no anchor text"),
        (217, "Links with non-descriptive anchor"),
        (218, "External pages or resources with 403 HTTP status code"),
        (219, "Llms.txt has formatting issues"),
        (220, "Too much content"),
        (221, "Outdated content"),
        (222, "Low semantic HTML usage"),
        (223, "Content not optimized"),
    ])
});

/// Resolve an issue id to its canonical display name. Unknown ids get a
/// literal fallback rather than an error, so new provider ids degrade to
/// something readable.
pub fn issue_name(id: u32) -> String {
    match ISSUE_NAMES.get(&id) {
        Some(name) => (*name).to_string(),
        None => format!("Unknown Issue {}", id),
    }
}
