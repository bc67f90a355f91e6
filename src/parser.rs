//! Tolerant extraction of schedule records from the monthly games page.
//!
//! The page is one known, stable shape, so this deliberately scans for
//! repeating `<li>` fragments by substring instead of parsing a DOM tree.
//! Field extraction inside each fragment uses small regexes compiled once
//! from the configured class names.

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::ScrapeConfig;
use crate::schedule::ScheduleRecord;

pub struct Extractor {
    /// Opening-tag prefix of one schedule list item. Left open-ended so
    /// state classes appended by the site (e.g. `is-finish`) still match.
    list_marker: String,
    /// Token whose presence anywhere in the page means schedule markup
    /// exists at all.
    list_class: String,
    excluded_alt: String,
    date_re: Regex,
    team_re: Regex,
    url_re: Regex,
}

impl Extractor {
    pub fn new(scrape: &ScrapeConfig) -> Result<Self> {
        // Date paragraph holds the month, a decorative <span>/</span>
        // separator, then the day: e.g. `>9<span>/</span>2`.
        let date_pattern = format!(
            r#"<p class="{}">(\d+)<span[^>]*>/[^<]*</span>(\d+)"#,
            regex::escape(&scrape.date_class)
        );

        Ok(Extractor {
            list_marker: format!(r#"<li class="{}"#, scrape.list_class),
            list_class: scrape.list_class.clone(),
            excluded_alt: scrape.excluded_alt_substring.clone(),
            date_re: Regex::new(&date_pattern).context("Invalid date pattern")?,
            team_re: Regex::new(r#"<img[^>]*alt="([^"]+)"[^>]*>"#)
                .context("Invalid team pattern")?,
            url_re: Regex::new(r#"<a href="([^"]+)""#).context("Invalid url pattern")?,
        })
    }

    /// Cheap existence check: does the page contain schedule markup at all?
    /// Weaker than extractability — an off-season page can carry the class
    /// yet yield zero usable records.
    pub fn has_data(&self, html: &str) -> bool {
        html.contains(&self.list_class)
    }

    /// Extract all well-formed records from `html`, in source order.
    /// Fragments missing a date or resolving to zero team names are
    /// silently dropped; their siblings are unaffected.
    pub fn extract(&self, html: &str, year: i32) -> Vec<ScheduleRecord> {
        self.fragments(html)
            .into_iter()
            .filter_map(|fragment| self.extract_fragment(fragment, year))
            .collect()
    }

    /// Split the page into per-item fragments. A fragment starts at the
    /// list-item marker and runs to the next marker or the enclosing
    /// `</ul>`, whichever comes first.
    fn fragments<'a>(&self, html: &'a str) -> Vec<&'a str> {
        let mut items = Vec::new();
        let mut pos = 0;

        while let Some(found) = html[pos..].find(&self.list_marker) {
            let start = pos + found;
            let after = start + self.list_marker.len();

            let next_item = html[after..].find(&self.list_marker).map(|i| after + i);
            let list_end = html[after..].find("</ul>").map(|i| after + i);

            let end = match (next_item, list_end) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => html.len(),
            };

            items.push(&html[start..end]);
            pos = end;
        }

        items
    }

    fn extract_fragment(&self, fragment: &str, year: i32) -> Option<ScheduleRecord> {
        let date = self.extract_date(fragment, year)?;

        let teams = self.extract_teams(fragment);
        if teams.is_empty() {
            return None;
        }

        let url = self
            .url_re
            .captures(fragment)
            .map(|c| c[1].to_string());

        Some(ScheduleRecord { date, teams, url })
    }

    fn extract_date(&self, fragment: &str, year: i32) -> Option<String> {
        let caps = self.date_re.captures(fragment)?;
        // Padding is purely lexical; no calendar arithmetic.
        Some(format!("{}-{:0>2}-{:0>2}", year, &caps[1], &caps[2]))
    }

    fn extract_teams(&self, fragment: &str) -> Vec<String> {
        self.team_re
            .captures_iter(fragment)
            .map(|c| c[1].trim().to_string())
            .filter(|name| !name.is_empty() && !name.contains(&self.excluded_alt))
            .collect()
    }
}
