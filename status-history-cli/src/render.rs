//! Report rendering (TXT/JSON)

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use status_history::Report;
use std::io::Write;

/// Write `report` to `out` in the requested format.
///
/// TXT emits one line per day: the date, then `flag:count` pairs sorted by
/// flag name. JSON emits the report as an array of dated snapshots.
pub fn write_report<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Txt => {
            for snapshot in report {
                writeln!(out, "{}", snapshot).context("Failed to write report line")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize report")?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use status_history::{build_report, Event};

    fn sample_report() -> Report {
        let aug = |d| NaiveDate::from_ymd_opt(2014, 8, d).unwrap();
        let events = vec![
            Event::new(aug(1), 1, "WITH_CUSTOMER"),
            Event::new(aug(1), 2, "DISPATCH"),
            Event::new(aug(2), -1, "DISPATCH"),
        ];
        build_report(aug(1), aug(2), &events)
    }

    #[test]
    fn test_txt_lines_sorted_by_flag() {
        let mut out = Vec::new();
        write_report(&sample_report(), OutputFormat::Txt, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2014-08-01 DISPATCH:2 WITH_CUSTOMER:1\n2014-08-02 DISPATCH:1 WITH_CUSTOMER:1\n"
        );
    }

    #[test]
    fn test_txt_empty_report_writes_nothing() {
        let mut out = Vec::new();
        write_report(&Report::default(), OutputFormat::Txt, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_output_parses_back() {
        let report = sample_report();
        let mut out = Vec::new();
        write_report(&report, OutputFormat::Json, &mut out).unwrap();

        let parsed: Report = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, report);
    }
}
