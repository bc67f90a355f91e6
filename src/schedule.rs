//! Data types shared across the scrape → assemble pipeline.

use serde::Deserialize;

/// One match occurrence extracted from the schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    /// Calendar date, always fully zero-padded `YYYY-MM-DD`.
    pub date: String,
    /// Team display names in source order. Never empty for a record that
    /// survived extraction; duplicates are kept as-is.
    pub teams: Vec<String>,
    /// Optional link to the match detail page.
    pub url: Option<String>,
}

/// A (year, month) pair identifying one monthly schedule page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}
