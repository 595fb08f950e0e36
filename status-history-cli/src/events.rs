//! Event loading
//!
//! Events come from a file (JSON array or `date,delta,flag` records), from the
//! config file's inline `[[events]]` tables, or from the built-in sample set
//! used by the demo.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use status_history::{parse_events, DateRange, Event};
use std::fs;
use std::path::Path;

/// Load events from `path`, choosing the format by file extension
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let events = if is_json {
        log::debug!("Reading {:?} as a JSON event array", path);
        serde_json::from_str::<Vec<Event>>(&content)
            .with_context(|| format!("Failed to parse events file: {:?}", path))?
    } else {
        log::debug!("Reading {:?} as event records", path);
        parse_events(&content)
            .with_context(|| format!("Failed to parse events file: {:?}", path))?
    };

    log::info!("Loaded {} events from {:?}", events.len(), path);
    Ok(events)
}

const DEMO_FROM: &str = "2014-07-27";
const DEMO_TO: &str = "2014-08-20";

/// Built-in sample history: a handful of orders moving through dispatch and
/// customer hand-over, with some activity before and after the demo range.
const SAMPLE_RECORDS: &str = "\
2014-07-02,+1,RECEIPT_EMAIL
2014-07-02,-1,RECEIPT_EMAIL
2014-07-21,+1,DISPATCH
2014-07-24,+1,DISPATCH
2014-07-28,+1,DISPATCH
2014-07-29,-1,DISPATCH
2014-07-29,+1,WITH_CUSTOMER
2014-07-30,+1,DISPATCH
2014-07-31,+1,DISPATCH
2014-08-01,-1,DISPATCH
2014-08-01,+1,WITH_CUSTOMER
2014-08-01,+1,RECEIPT_EMAIL
2014-08-04,+1,EXTRACT
2014-08-05,-1,WITH_CUSTOMER
2014-08-06,-1,DISPATCH
2014-08-06,+1,WITH_CUSTOMER
2014-08-07,-1,EXTRACT
2014-08-11,+1,DISPATCH
2014-08-12,+1,DISPATCH
2014-08-12,-1,RECEIPT_EMAIL
2014-08-13,-1,DISPATCH
2014-08-13,+1,WITH_CUSTOMER
2014-08-18,-1,WITH_CUSTOMER
2014-08-19,-1,DISPATCH
2014-08-19,+1,WITH_CUSTOMER
2014-08-25,-1,WITH_CUSTOMER
";

/// Range the demo reports on
pub fn demo_range() -> Result<DateRange> {
    let from: NaiveDate = DEMO_FROM.parse().context("Invalid demo start date")?;
    let to: NaiveDate = DEMO_TO.parse().context("Invalid demo end date")?;
    Ok(DateRange::new(from, to))
}

/// Events for the demo run
pub fn sample_events() -> Result<Vec<Event>> {
    parse_events(SAMPLE_RECORDS).context("Invalid built-in sample records")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_load_record_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "# history\n2014-08-01,+1,DISPATCH\n2014-08-02,-1,DISPATCH").unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].flag, "DISPATCH");
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"date": "2014-08-01", "delta": 2, "flag": "EXTRACT"}}]"#
        )
        .unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events, vec![Event::new(ymd(2014, 8, 1), 2, "EXTRACT")]);
    }

    #[test]
    fn test_load_rejects_bad_record() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "2014-08-01,+1,DISPATCH\n2014-08-01,lots,DISPATCH").unwrap();

        let err = load_events(file.path()).unwrap_err();
        let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert!(chain[0].starts_with("Failed to parse events file"));
        assert!(chain[1].starts_with("Line 2"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_events(&dir.path().join("absent.txt")).is_err());
    }

    #[test]
    fn test_sample_events_cover_demo_range() {
        let range = demo_range().unwrap();
        let events = sample_events().unwrap();
        assert_eq!(range.num_days(), 25);
        assert_eq!(events.len(), 26);
        assert!(events.iter().any(|e| e.date < range.from()));
        assert!(events.iter().any(|e| e.date > range.to()));
    }
}
