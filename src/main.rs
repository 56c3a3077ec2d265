use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use alarmfeed::{Announcement, Config, FeedClient, Pipeline, Variant};

/// Get the default config file path (~/.config/alarmfeed/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("alarmfeed")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(
    name = "alarmfeed",
    about = "Show current emergency dispatches for Midden- en West-Brabant"
)]
struct Args {
    /// Config file (defaults to ~/.config/alarmfeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the feed URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Rule preset: canonical or widget
    #[arg(long)]
    variant: Option<Variant>,

    /// Print announcements as a JSON array
    #[arg(long)]
    json: bool,
}

fn print_announcement(a: &Announcement) {
    println!("[{}] {} {}", a.icon(), a.priority(), a.emergency_type());
    println!("  {}", a.title());
    println!("  {}", a.description());
    println!("  {}", a.pub_date().trim());
    println!("  {}", a.link());
    if let Some(label) = a.accessibility_label() {
        println!("  ({})", label);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(url) = args.url {
        config.feed_url = url;
    }
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    config
        .validate()
        .with_context(|| format!("Invalid feed URL {}", config.feed_url))?;

    let http = FeedClient::default_http().context("Failed to create HTTP client")?;
    let pipeline = Pipeline::new(FeedClient::new(http, &config.feed_url), config.rules());

    let announcements = pipeline
        .run()
        .await
        .with_context(|| format!("Failed to refresh feed {}", config.feed_url))?;

    if args.json {
        let json = serde_json::to_string_pretty(&announcements)
            .context("Failed to serialize announcements")?;
        println!("{}", json);
    } else if announcements.is_empty() {
        println!("No announcements.");
    } else {
        for a in &announcements {
            print_announcement(a);
            println!();
        }
    }

    Ok(())
}
