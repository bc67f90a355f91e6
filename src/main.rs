mod config;
mod ics;
mod parser;
mod schedule;
mod scraper;
mod uid;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use scraper::{HttpTransport, Scraper};

#[derive(Parser)]
#[command(name = "mleague-ical")]
#[command(about = "Scrape the M-League match schedule and generate an iCalendar feed")]
struct Cli {
    /// Path to a TOML config file overriding the built-in season defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the generated .ics file (overrides the config value)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref())?;

    println!("Starting M-League schedule fetcher...");

    let transport = HttpTransport::new()?;
    let scraper = Scraper::new(&config, transport)?;
    let records = scraper.fetch_all().await;

    if records.is_empty() {
        // A fully empty season scrape means the source is unavailable;
        // keep whatever feed was published last instead of blanking it.
        println!("\nNo schedule data found");
        return Ok(());
    }

    println!("\nTotal: {} matches found", records.len());

    let content = ics::assemble(&records, &config.calendar);

    let output = cli.output.unwrap_or_else(|| PathBuf::from(&config.output));
    save(&output, &content)?;

    Ok(())
}

/// Write the document to disk, creating parent directories as needed.
/// Overwrites any previous feed. Failure here is fatal to the run.
fn save(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Saved to {}", path.display());
    Ok(())
}
