//! Sequential retrieval of monthly schedule pages.
//!
//! Periods are fetched one at a time, in configured order. A failed
//! period degrades to zero records and the run continues: partial data
//! is strictly better than none for a feed that is regenerated anyway.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::parser::Extractor;
use crate::schedule::ScheduleRecord;

/// Page retrieval seam. Production wraps `reqwest`; tests substitute a
/// stub so orchestration can be exercised without a network.
pub trait Transport {
    async fn get(&self, url: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mleague-ical/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

pub struct Scraper<'a, T: Transport> {
    config: &'a Config,
    extractor: Extractor,
    transport: T,
}

impl<'a, T: Transport> Scraper<'a, T> {
    pub fn new(config: &'a Config, transport: T) -> Result<Self> {
        let extractor = Extractor::new(&config.scrape)?;
        Ok(Scraper {
            config,
            extractor,
            transport,
        })
    }

    /// Fetch and extract one monthly page. Never fails: transport errors
    /// and absent-data pages both come back as zero records.
    pub async fn fetch_month(&self, year: i32, month: u32) -> Vec<ScheduleRecord> {
        let url = format!("{}?mly={}&mlm={}#schedule", self.config.base_url, year, month);

        println!("Fetching schedule from: {}", url);

        let html = match self.transport.get(&url).await {
            Ok(html) => html,
            Err(e) => {
                println!(
                    "  {}",
                    format!("Error fetching schedule for {}/{}: {:#}", year, month, e).red()
                );
                return Vec::new();
            }
        };

        if !self.extractor.has_data(&html) {
            println!("  No schedule data available for {}/{}", year, month);
            return Vec::new();
        }

        self.extractor.extract(&html, year)
    }

    /// Fetch every configured period in order and concatenate the results.
    /// No single period's failure aborts the run.
    pub async fn fetch_all(&self) -> Vec<ScheduleRecord> {
        let mut all = Vec::new();

        for period in &self.config.periods {
            let records = self.fetch_month(period.year, period.month).await;
            println!(
                "  Found {} matches for {}/{}",
                records.len(),
                period.year,
                period.month
            );
            all.extend(records);
        }

        all
    }
}
