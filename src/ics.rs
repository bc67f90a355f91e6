//! iCalendar document assembly.
//!
//! The document is built line by line and joined with CRLF. The property
//! order and byte content are fixed: third-party calendar clients consume
//! this output directly, so nothing here may depend on run time or
//! randomness.

use crate::config::CalendarConfig;
use crate::schedule::ScheduleRecord;
use crate::uid;

/// Assemble the complete VCALENDAR document for `records`, in input order.
/// An empty slice yields a valid header + timezone + footer document.
pub fn assemble(records: &[ScheduleRecord], cal: &CalendarConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push("VERSION:2.0".to_string());
    lines.push(format!("PRODID:{}", cal.prodid));
    lines.push("CALSCALE:GREGORIAN".to_string());
    lines.push("METHOD:PUBLISH".to_string());
    lines.push(format!("X-WR-CALNAME:{}", cal.name));
    lines.push(format!("X-WR-TIMEZONE:{}", cal.timezone));

    lines.extend(timezone_block(cal));

    for record in records {
        lines.extend(event_block(record, cal));
    }

    lines.push("END:VCALENDAR".to_string());

    lines.join("\r\n")
}

/// Single STANDARD sub-block; the target zone observes no DST.
fn timezone_block(cal: &CalendarConfig) -> Vec<String> {
    vec![
        "BEGIN:VTIMEZONE".to_string(),
        format!("TZID:{}", cal.timezone),
        "BEGIN:STANDARD".to_string(),
        "DTSTART:19700101T000000".to_string(),
        format!("TZOFFSETFROM:{}", cal.tz_offset),
        format!("TZOFFSETTO:{}", cal.tz_offset),
        "END:STANDARD".to_string(),
        "END:VTIMEZONE".to_string(),
    ]
}

fn event_block(record: &ScheduleRecord, cal: &CalendarConfig) -> Vec<String> {
    let uid = uid::generate(record, &cal.uid_domain);
    let dt_start = format_datetime(&record.date, &cal.event_start_time);
    let dt_end = format_datetime(&record.date, &cal.event_end_time);

    // Summary keeps source team order; identity does not.
    let summary: String = record
        .teams
        .iter()
        .map(|team| format!("[{}]", team))
        .collect();

    // DESCRIPTION is an encoded property value: the newlines are the
    // literal two-character sequence `\n`, never real line breaks.
    let description = format!(
        "{}\\n{}",
        cal.description_prefix,
        record
            .teams
            .iter()
            .map(|team| format!("{}{}", cal.team_bullet, team))
            .collect::<Vec<_>>()
            .join("\\n")
    );

    let location = record.url.as_deref().unwrap_or(&cal.default_location);

    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", uid),
        format!("DTSTART;TZID={}:{}", cal.timezone, dt_start),
        format!("DTEND;TZID={}:{}", cal.timezone, dt_end),
        format!("SUMMARY:{}", summary),
        format!("DESCRIPTION:{}", description),
        format!("LOCATION:{}", location),
    ];

    lines.extend(alarm_block(&summary));
    lines.push("END:VEVENT".to_string());

    lines
}

/// Display alarm firing at the event's own start instant.
fn alarm_block(summary: &str) -> Vec<String> {
    vec![
        "BEGIN:VALARM".to_string(),
        "ACTION:DISPLAY".to_string(),
        "TRIGGER:PT0M".to_string(),
        format!("DESCRIPTION:{}", summary),
        "END:VALARM".to_string(),
    ]
}

/// `YYYY-MM-DD` + `HHMMSS` → `YYYYMMDDTHHMMSS`. Purely lexical.
fn format_datetime(date: &str, time: &str) -> String {
    format!("{}T{}", date.replace('-', ""), time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal() -> CalendarConfig {
        CalendarConfig::default()
    }

    fn record(date: &str, teams: &[&str], url: Option<&str>) -> ScheduleRecord {
        ScheduleRecord {
            date: date.to_string(),
            teams: teams.iter().map(|t| t.to_string()).collect(),
            url: url.map(|u| u.to_string()),
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn empty_input_produces_envelope_without_events() {
        let out = assemble(&[], &cal());
        assert_eq!(count(&out, "BEGIN:VCALENDAR"), 1);
        assert_eq!(count(&out, "END:VCALENDAR"), 1);
        assert_eq!(count(&out, "BEGIN:VEVENT"), 0);
        assert!(out.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(out.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn exactly_one_timezone_block_regardless_of_record_count() {
        let records = vec![
            record("2025-09-02", &["A", "B"], None),
            record("2025-09-03", &["C", "D"], None),
        ];
        for input in [&records[..0], &records[..1], &records[..]] {
            let out = assemble(input, &cal());
            assert_eq!(count(&out, "BEGIN:VTIMEZONE"), 1);
            assert_eq!(count(&out, "END:VTIMEZONE"), 1);
            assert_eq!(count(&out, "BEGIN:STANDARD"), 1);
        }
    }

    #[test]
    fn all_lines_use_crlf() {
        let out = assemble(&[record("2025-09-02", &["A", "B"], None)], &cal());
        // Every \n is preceded by \r, i.e. no bare LF anywhere.
        assert_eq!(count(&out, "\n"), count(&out, "\r\n"));
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn event_fields_for_single_record() {
        let out = assemble(&[record("2025-09-02", &["A", "B"], None)], &cal());

        assert!(out.contains("SUMMARY:[A][B]"));
        assert!(out.contains("DESCRIPTION:対戦チーム:\\n・A\\n・B"));
        // No url on the record, so location falls back to the default.
        assert!(out.contains("LOCATION:https://abema.tv/now-on-air/mahjong"));
        assert!(out.contains("DTSTART;TZID=Asia/Tokyo:20250902T190000"));
        assert!(out.contains("DTEND;TZID=Asia/Tokyo:20250902T240000"));
    }

    #[test]
    fn uid_line_has_date_hex_and_domain() {
        let out = assemble(&[record("2025-09-02", &["A", "B"], None)], &cal());

        let uid_line = out
            .split("\r\n")
            .find(|line| line.starts_with("UID:"))
            .unwrap();
        let uid = &uid_line["UID:".len()..];

        assert!(uid.starts_with("2025-09-02-"));
        assert!(uid.ends_with("@m-league.jp"));
        let hash = &uid["2025-09-02-".len()..uid.len() - "@m-league.jp".len()];
        assert_eq!(hash.len(), 12);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn record_url_becomes_location() {
        let out = assemble(
            &[record(
                "2025-09-02",
                &["A", "B"],
                Some("https://m-league.jp/games/detail/42"),
            )],
            &cal(),
        );
        assert!(out.contains("LOCATION:https://m-league.jp/games/detail/42"));
        assert!(!out.contains("LOCATION:https://abema.tv"));
    }

    #[test]
    fn alarm_fires_at_event_start_with_summary() {
        let out = assemble(&[record("2025-09-02", &["A", "B"], None)], &cal());
        let alarm_start = out.find("BEGIN:VALARM").unwrap();
        let alarm = &out[alarm_start..out.find("END:VALARM").unwrap()];

        assert!(alarm.contains("ACTION:DISPLAY"));
        assert!(alarm.contains("TRIGGER:PT0M"));
        assert!(alarm.contains("DESCRIPTION:[A][B]"));
    }

    #[test]
    fn events_follow_input_order() {
        let out = assemble(
            &[
                record("2025-09-05", &["X"], None),
                record("2025-09-02", &["Y"], None),
            ],
            &cal(),
        );
        let first = out.find("SUMMARY:[X]").unwrap();
        let second = out.find("SUMMARY:[Y]").unwrap();
        assert!(first < second);
    }

    #[test]
    fn description_contains_no_real_newline() {
        let out = assemble(&[record("2025-09-02", &["A", "B"], None)], &cal());
        let desc_line = out
            .split("\r\n")
            .find(|line| line.starts_with("DESCRIPTION:対戦チーム"))
            .unwrap();
        // The bulleted list rides on escaped newlines inside a single line.
        assert!(desc_line.contains("\\n・A"));
        assert!(desc_line.contains("\\n・B"));
    }

    #[test]
    fn header_carries_calendar_metadata() {
        let out = assemble(&[], &cal());
        assert!(out.contains("VERSION:2.0"));
        assert!(out.contains("PRODID:-//M-League Schedule//JP"));
        assert!(out.contains("CALSCALE:GREGORIAN"));
        assert!(out.contains("METHOD:PUBLISH"));
        assert!(out.contains("X-WR-CALNAME:Mリーグ 2025-26 スケジュール"));
        assert!(out.contains("X-WR-TIMEZONE:Asia/Tokyo"));
        assert!(out.contains("TZOFFSETFROM:+0900"));
        assert!(out.contains("TZOFFSETTO:+0900"));
    }
}
