#![allow(dead_code)]

use actix_web::{web, App, HttpResponse, HttpServer};

/// Synthetic pages exercising each classification threshold.
fn html_page(title: &str, meta: &str, h1s: usize, words: usize, body_extra: &str) -> String {
    let meta_tag = if meta.is_empty() {
        String::new()
    } else {
        format!(r#"<meta name="description" content="{}">"#, meta)
    };
    let title_tag = if title.is_empty() {
        String::new()
    } else {
        format!("<title>{}</title>", title)
    };
    let h1_tags: String = (0..h1s)
        .map(|i| format!("<h1>Heading number {}</h1>", i + 1))
        .collect();
    let body_words: String = (0..words).map(|i| format!("word{} ", i)).collect();

    format!(
        "<!DOCTYPE html><html><head>{}{}</head><body>{}<p>{}</p>{}</body></html>",
        title_tag, meta_tag, h1_tags, body_words, body_extra
    )
}

async fn page_good() -> HttpResponse {
    // Title exactly 55 chars, meta exactly 155 chars
    let title = "A".repeat(55);
    let meta = "d".repeat(155);
    HttpResponse::Ok()
        .content_type("text/html")
        .body(html_page(&title, &meta, 1, 1200, ""))
}

async fn page_weak() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(html_page(
        "Tiny",
        "",
        0,
        50,
        r#"<img src="a.png"><img src="b.png" alt=""><img src="c.png" alt="described">"#,
    ))
}

async fn page_boilerplate() -> HttpResponse {
    // Visible body is exactly 10 words; everything else is excluded chrome
    let body = r#"
        <nav>nav words that should never be counted at all</nav>
        <header>more hidden words</header>
        <h1>one two three</h1>
        <p>four five six seven eight nine ten</p>
        <script>var hidden = "script words here";</script>
        <style>.x { color: red; }</style>
        <footer>footer words hidden too</footer>
    "#;
    // No title: its text would count toward the exact word total
    let html = format!("<html><head></head><body>{}</body></html>", body);
    HttpResponse::Ok().content_type("text/html").body(html)
}

async fn page_server_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("boom")
}

/// Serves the synthetic HTML pages on a random loopback port.
pub async fn start_page_server() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route("/good.html", web::get().to(page_good))
            .route("/weak.html", web::get().to(page_weak))
            .route("/boilerplate.html", web::get().to(page_boilerplate))
            .route("/error.html", web::get().to(page_server_error))
    })
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = server.addrs().first().cloned().expect("No address bound");
    let url = format!("http://{}", addr);

    let running = server.run();
    tokio::spawn(async move {
        if let Err(e) = running.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

async fn audit_snapshot() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "snapshot_id": "S1",
        "errors": [
            {"id": 3, "count": 5},
            {"id": 999, "count": 0}
        ],
        "warnings": [
            {"id": 101, "count": 2, "delta": -1}
        ]
    }))
}

async fn audit_snapshot_empty() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "snapshot_id": "S2",
        "errors": [{"id": 3, "count": 0}],
        "warnings": [],
        "notices": []
    }))
}

async fn audit_snapshot_unknown() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "snapshot_id": "S3",
        "notices": [{"id": 9999, "count": 1}]
    }))
}

async fn audit_snapshot_broken() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"unexpected": true}))
}

async fn audit_snapshot_unavailable() -> HttpResponse {
    HttpResponse::InternalServerError().body("audit down")
}

/// Paginated detail endpoint: 237 records total served in pages of at most
/// 100, mirroring the provider's {data, total} shape.
async fn audit_issue_details(query: web::Query<DetailQuery>) -> HttpResponse {
    const TOTAL: u64 = 237;
    let page = query.page.max(1);
    let limit = query.limit.max(1);

    let start = (page - 1) * limit;
    let end = (start + limit).min(TOTAL);
    let data: Vec<serde_json::Value> = (start..end)
        .map(|i| {
            serde_json::json!({
                "url": format!("https://example.com/page-{}", i),
                "title": format!("Page {}", i),
                "weight": i
            })
        })
        .collect();

    HttpResponse::Ok().json(serde_json::json!({"data": data, "total": TOTAL}))
}

/// Reports an inflated total but only ever serves one page of records.
async fn audit_issue_details_inflated(query: web::Query<DetailQuery>) -> HttpResponse {
    let page = query.page.max(1);
    let data: Vec<serde_json::Value> = if page == 1 {
        (0..10)
            .map(|i| serde_json::json!({"url": format!("https://example.com/only-{}", i)}))
            .collect()
    } else {
        // Never signals completion with an empty page; keeps repeating
        (0..1)
            .map(|i| serde_json::json!({"url": format!("https://example.com/repeat-{}", i)}))
            .collect()
    };
    HttpResponse::Ok().json(serde_json::json!({"data": data, "total": 10_000}))
}

#[derive(serde::Deserialize)]
struct DetailQuery {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_limit")]
    limit: u64,
    #[allow(dead_code)]
    key: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    100
}

/// Mock of the JSON site-audit API on a random loopback port.
pub async fn start_audit_server() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route(
                "/projects/P1/siteaudit/snapshot",
                web::get().to(audit_snapshot),
            )
            .route(
                "/projects/EMPTY/siteaudit/snapshot",
                web::get().to(audit_snapshot_empty),
            )
            .route(
                "/projects/UNKNOWN/siteaudit/snapshot",
                web::get().to(audit_snapshot_unknown),
            )
            .route(
                "/projects/BROKEN/siteaudit/snapshot",
                web::get().to(audit_snapshot_broken),
            )
            .route(
                "/projects/DOWN/siteaudit/snapshot",
                web::get().to(audit_snapshot_unavailable),
            )
            .route(
                "/projects/P1/siteaudit/snapshot/S1/issue/3",
                web::get().to(audit_issue_details),
            )
            .route(
                "/projects/P1/siteaudit/snapshot/S1/issue/44",
                web::get().to(audit_issue_details_inflated),
            )
    })
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind audit test server");

    let addr = server.addrs().first().cloned().expect("No address bound");
    let url = format!("http://{}", addr);

    let running = server.run();
    tokio::spawn(async move {
        if let Err(e) = running.await {
            eprintln!("Audit test server error: {}", e);
        }
    });

    url
}

/// Mock flat-text report handler. Keyed on the `type` discriminator and
/// strict about the parameter set each report requires, so a wrapper that
/// emits a wrong type or drops a parameter fails its test with a 404 or 400
/// instead of passing silently.
async fn flat_report(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> HttpResponse {
    let report_type = match query.get("type") {
        Some(t) => t.as_str(),
        None => return HttpResponse::BadRequest().body("missing type"),
    };

    let required: &[&str] = match report_type {
        "domain_rank" => &["domain", "database"],
        "domain_organic" => &["domain", "database", "display_limit"],
        "domain_organic_organic" => &["domain", "database", "display_limit"],
        "phrase_this" => &["phrase", "database"],
        "phrase_related" | "phrase_organic" => &["phrase", "database", "display_limit"],
        "backlinks_overview" => &["target", "target_type"],
        "backlinks_anchors" | "backlinks_refdomains" => {
            &["target", "target_type", "export_columns", "display_limit"]
        }
        "nothing_found" => &[],
        _ => return HttpResponse::NotFound().body("unknown report"),
    };
    for param in required.iter().chain(&["key"]) {
        if !query.contains_key(*param) {
            return HttpResponse::BadRequest().body(format!("missing parameter {}", param));
        }
    }
    if let Some(target_type) = query.get("target_type") {
        if target_type != "root_domain" {
            return HttpResponse::BadRequest().body("unsupported target_type");
        }
    }

    let body = match report_type {
        "domain_rank" => {
            "Database;Domain;Rank;Organic Keywords;Organic Traffic;Organic Cost\n\
             us;example.com;42;1500;98000;12000"
        }
        "domain_organic" => {
            "Keyword;Position;Search Volume\n\
             rust tutorial;3;5400\n\
             rust book;7;2900"
        }
        "domain_organic_organic" => {
            "Domain;Competitor Relevance;Common Keywords\n\
             rival.example;0.81;540\n\
             other.example;0.44;120"
        }
        "phrase_this" => "Keyword;Search Volume;CPC\npython tutorial;110000;1.2",
        "phrase_related" => {
            "Keyword;Search Volume\n\
             python course;49500\n\
             learn python;33100"
        }
        "phrase_organic" => {
            "Domain;Url\n\
             docs.python.org;https://docs.python.org/3/tutorial/\n\
             realpython.com;https://realpython.com/start-here/"
        }
        "backlinks_overview" => "total;domains_num;urls_num\n15200;340;1100",
        "backlinks_anchors" => {
            "anchor;domains_num;backlinks_num\n\
             click here;12;40\n\
             example;33;95"
        }
        "backlinks_refdomains" => {
            "domain_ascore;domain;backlinks_num;ip;country\n\
             12;spammy.example;40;10.0.0.1;us\n\
             45;midtier.example;12;10.0.0.2;de\n\
             83;solid.example;220;10.0.0.3;us"
        }
        "nothing_found" => "ERROR 50 :: NOTHING FOUND",
        _ => unreachable!("type validated above"),
    };
    HttpResponse::Ok().content_type("text/plain").body(body)
}

/// Mock of the flat-text report API on a random loopback port.
pub async fn start_provider_server() -> String {
    let server = HttpServer::new(|| App::new().route("/", web::get().to(flat_report)))
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind provider test server");

    let addr = server.addrs().first().cloned().expect("No address bound");
    let url = format!("http://{}/", addr);

    let running = server.run();
    tokio::spawn(async move {
        if let Err(e) = running.await {
            eprintln!("Provider test server error: {}", e);
        }
    });

    url
}

async fn completions_fenced() -> HttpResponse {
    let recs = serde_json::json!([
        {"category": "Titles", "severity": "high", "issue": "Title too short", "fix": "1. Lengthen it"},
        {"category": "Content", "severity": "medium", "issue": "Thin content", "fix": "1. Write more"}
    ]);
    let content = format!("```json\n{}\n```", recs);
    HttpResponse::Ok().json(serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

/// Mock OpenAI-compatible completions endpoint that wraps its JSON answer in
/// markdown fences.
pub async fn start_completions_server() -> String {
    let server = HttpServer::new(|| {
        App::new().route("/v1/chat/completions", web::post().to(completions_fenced))
    })
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind completions test server");

    let addr = server.addrs().first().cloned().expect("No address bound");
    let url = format!("http://{}/v1/chat/completions", addr);

    let running = server.run();
    tokio::spawn(async move {
        if let Err(e) = running.await {
            eprintln!("Completions test server error: {}", e);
        }
    });

    url
}
