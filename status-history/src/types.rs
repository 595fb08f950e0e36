//! Core types for the status history library
//!
//! This module defines the input events and the report the builder emits.
//! Everything here is plain data: the builder owns no state between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Result type for record parsing
pub type Result<T> = std::result::Result<T, ReportError>;

/// A signed tick against a flag's running count, effective on `date`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Calendar day the change takes effect
    pub date: NaiveDate,
    /// Signed adjustment to the flag's count
    pub delta: i64,
    /// Opaque flag label (e.g. "DISPATCH")
    pub flag: String,
}

impl Event {
    /// Create a new event
    pub fn new(date: NaiveDate, delta: i64, flag: impl Into<String>) -> Self {
        Self {
            date,
            delta,
            flag: flag.into(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:+},{}", self.date, self.delta, self.flag)
    }
}

/// Parses the `YYYY-MM-DD,<delta>,<FLAG>` record form.
///
/// Fields are trimmed. The delta may carry an explicit `+` sign.
impl FromStr for Event {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let &[date, delta, flag] = fields.as_slice() else {
            return Err(ReportError::MalformedRecord(s.to_string()));
        };

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ReportError::InvalidDate(date.to_string()))?;
        let delta = delta
            .parse::<i64>()
            .map_err(|_| ReportError::InvalidDelta(delta.to_string()))?;
        if flag.is_empty() {
            return Err(ReportError::EmptyFlag);
        }

        Ok(Event::new(date, delta, flag))
    }
}

/// Parse newline-separated event records.
///
/// Blank lines and lines starting with `#` are skipped. The first bad record
/// aborts parsing with its 1-based line number attached.
pub fn parse_events(input: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = line.parse::<Event>().map_err(|e| ReportError::Line {
            line: idx + 1,
            source: Box::new(e),
        })?;
        events.push(event);
    }

    log::debug!("Parsed {} event records", events.len());
    Ok(events)
}

/// Errors raised while reading event records
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Malformed event record (expected date,delta,flag): {0:?}")]
    MalformedRecord(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0:?}")]
    InvalidDate(String),

    #[error("Invalid delta (expected a signed integer): {0:?}")]
    InvalidDelta(String),

    #[error("Event flag must not be empty")]
    EmptyFlag,

    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ReportError>,
    },
}

/// Cumulative counts for every known flag as of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Day this snapshot describes
    pub date: NaiveDate,
    /// Flag name -> cumulative count, sorted by flag name
    pub counts: BTreeMap<String, i64>,
}

impl DailySnapshot {
    /// Cumulative count for `flag`, if the flag is known
    pub fn count(&self, flag: &str) -> Option<i64> {
        self.counts.get(flag).copied()
    }
}

impl fmt::Display for DailySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        for (flag, count) in &self.counts {
            write!(f, " {}:{}", flag, count)?;
        }
        Ok(())
    }
}

/// One snapshot per day of the requested range, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    snapshots: Vec<DailySnapshot>,
}

impl Report {
    pub(crate) fn from_snapshots(snapshots: Vec<DailySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailySnapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[DailySnapshot] {
        &self.snapshots
    }

    /// Snapshot for a specific day, if it lies within the report
    pub fn get(&self, date: NaiveDate) -> Option<&DailySnapshot> {
        let first = self.snapshots.first()?.date;
        let offset = usize::try_from(date.signed_duration_since(first).num_days()).ok()?;
        self.snapshots.get(offset)
    }

    /// Flags present in every snapshot (empty for an empty report)
    pub fn flags(&self) -> Vec<&str> {
        self.snapshots
            .first()
            .map(|s| s.counts.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Drop the dates and keep the positional list of count maps
    pub fn into_counts(self) -> Vec<BTreeMap<String, i64>> {
        self.snapshots.into_iter().map(|s| s.counts).collect()
    }
}

impl IntoIterator for Report {
    type Item = DailySnapshot;
    type IntoIter = std::vec::IntoIter<DailySnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a DailySnapshot;
    type IntoIter = std::slice::Iter<'a, DailySnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
