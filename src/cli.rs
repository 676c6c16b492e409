use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "seopulse")]
#[command(about = "A CLI on-page SEO signal classifier and site-audit issue normalizer", long_about = None)]
pub struct Cli {
    /// The domain or URL to analyze
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Regional database for provider reports (default: us)
    #[arg(short, long, default_value = "us")]
    pub database: String,

    /// Site-audit project ID; enables the issue summary
    #[arg(short, long)]
    pub project_id: Option<String>,

    /// Drill into the affected pages of one audit issue
    #[arg(long)]
    pub issue_id: Option<u32>,

    /// Page size for the issue-detail pagination (default: 100)
    #[arg(long, default_value_t = 100)]
    pub page_size: u64,

    /// Number of top-ranked issues to show (default: 10)
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Fetch the domain overview report from the data provider
    #[arg(long)]
    pub overview: bool,

    /// Ask the completion API for SEO recommendations
    #[arg(long)]
    pub recommend: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Save report to file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
