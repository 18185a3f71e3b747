//! Command-line scraper: prints a page's posts as a JSON array on stdout.
//!
//! Logs go to stderr and honour `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use fb_post_scraper::{
    extract_posts_with_options, Error, PageScraper, PostRecord, ScraperOptions, DEFAULT_MAX_POSTS,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fb_scrape", about = "Extract posts from a public page feed")]
struct Cli {
    /// Page URL; also recorded as `facebookUrl` on every post
    page_url: String,

    /// Maximum number of posts to return
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_POSTS)]
    max_posts: usize,

    /// Read HTML from this file instead of fetching (`-` for stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// User agent sent with each request
    #[arg(long, env = "FB_SCRAPE_USER_AGENT")]
    user_agent: Option<String>,

    /// Per-attempt timeout in seconds
    #[arg(long, env = "FB_SCRAPE_TIMEOUT", default_value_t = 15)]
    timeout: u64,

    /// Total fetch attempts
    #[arg(long, env = "FB_SCRAPE_RETRIES", default_value_t = 3)]
    retries: u32,

    /// Seconds to wait between attempts
    #[arg(long, env = "FB_SCRAPE_RETRY_DELAY", default_value_t = 1)]
    retry_delay: u64,
}

impl Cli {
    fn options(&self) -> ScraperOptions {
        let mut options = ScraperOptions::default()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retries(self.retries, Duration::from_secs(self.retry_delay))
            .with_max_posts(self.max_posts);
        if let Some(ua) = &self.user_agent {
            options = options.with_user_agent(ua.clone());
        }
        options
    }
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        return Ok(html);
    }
    let bytes = fs::read(path)?;
    Ok(fb_post_scraper::encoding::transcode_to_utf8(&bytes, None))
}

fn run(cli: &Cli) -> Result<Vec<PostRecord>, String> {
    let options = cli.options();
    url::Url::parse(&cli.page_url).map_err(|e| Error::from(e).to_string())?;

    if let Some(path) = &cli.input {
        let html = read_input(path).map_err(|e| format!("reading {path}: {e}"))?;
        let cap = options.max_posts;
        return Ok(extract_posts_with_options(&html, &cli.page_url, cap, &options));
    }

    let scraper = PageScraper::new(options).map_err(|e| e.to_string())?;
    Ok(scraper.scrape_default(&cli.page_url))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let posts = match run(&cli) {
        Ok(posts) => posts,
        Err(err) => {
            error!(error = %err, "scrape failed");
            return ExitCode::FAILURE;
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&posts)
    } else {
        serde_json::to_string(&posts)
    };

    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "could not serialize posts");
            ExitCode::FAILURE
        }
    }
}
