//! Deterministic event identity.
//!
//! Repeated runs over unchanged source data must produce byte-stable
//! output, so UIDs are derived from record content rather than issued
//! randomly. Team order is normalized away; the detail URL never
//! participates.

use sha2::{Digest, Sha256};

use crate::schedule::ScheduleRecord;

/// Hex characters of the digest kept in the UID.
const HASH_LEN: usize = 12;

/// Generate a UID of the form `YYYY-MM-DD-<hex12>@<domain>`.
///
/// Identical (date, team set) always yields the identical UID regardless
/// of team order, call count, or process restart.
pub fn generate(record: &ScheduleRecord, domain: &str) -> String {
    let mut teams = record.teams.clone();
    teams.sort();

    let mut hasher = Sha256::new();
    hasher.update(record.date.as_bytes());
    hasher.update(teams.join(",").as_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("{}-{}@{}", record.date, &digest[..HASH_LEN], domain)
}
