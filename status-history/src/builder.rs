//! Report builder
//!
//! Turns an unordered list of events into one cumulative snapshot per day.
//! Events are partitioned once (before the range, inside it, after it) and the
//! range is then walked day by day with a running per-flag counter.
//!
//! Sums are kept as `i128` so intermediate totals cannot overflow whatever the
//! event order; each snapshot narrows back to `i64`, saturating only when the
//! true cumulative count lies outside the `i64` range.

use crate::range::DateRange;
use crate::types::{DailySnapshot, Event, Report};
use chrono::NaiveDate;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Build the daily cumulative report for `from..=to`.
///
/// Every flag that appears anywhere in `events` is a key of every snapshot,
/// even if all of its events fall outside the range. Events dated after `to`
/// contribute nothing. An inverted range yields an empty report.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use status_history::{build_report, Event};
///
/// let day = NaiveDate::from_ymd_opt(2014, 8, 1).unwrap();
/// let events = vec![Event::new(day, 1, "DISPATCH")];
/// let report = build_report(day, day, &events);
///
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.snapshots()[0].count("DISPATCH"), Some(1));
/// ```
pub fn build_report<I>(from: NaiveDate, to: NaiveDate, events: I) -> Report
where
    I: IntoIterator,
    I::Item: Borrow<Event>,
{
    let mut builder = ReportBuilder::new(DateRange::new(from, to));
    builder.extend(events);
    builder.build()
}

/// Incremental report builder
///
/// Events can be fed one at a time; the result is independent of the order in
/// which they arrive.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    range: DateRange,
    /// Net delta per flag for events strictly before the range
    prior: HashMap<String, i128>,
    /// Net delta per day and flag for events inside the range
    deltas: HashMap<NaiveDate, HashMap<String, i128>>,
    /// Every flag seen, in or out of range
    flags: BTreeSet<String>,
    /// Events dated after the range, counted for logging only
    discarded: usize,
}

impl ReportBuilder {
    /// Create a builder for `range`
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            prior: HashMap::new(),
            deltas: HashMap::new(),
            flags: BTreeSet::new(),
            discarded: 0,
        }
    }

    /// Fold one event into the accumulators
    pub fn add_event(&mut self, event: &Event) {
        self.flags.insert(event.flag.clone());

        let delta = i128::from(event.delta);
        if event.date < self.range.from() {
            *self.prior.entry(event.flag.clone()).or_insert(0) += delta;
        } else if self.range.contains(event.date) {
            *self
                .deltas
                .entry(event.date)
                .or_default()
                .entry(event.flag.clone())
                .or_insert(0) += delta;
        } else {
            self.discarded += 1;
        }
    }

    /// Walk the range and emit one snapshot per day
    pub fn build(self) -> Report {
        let ReportBuilder {
            range,
            prior,
            deltas,
            flags,
            discarded,
        } = self;

        log::debug!(
            "Building report {}..={} ({} days, {} flags, {} prior flags, {} events after range)",
            range.from(),
            range.to(),
            range.num_days(),
            flags.len(),
            prior.len(),
            discarded
        );

        // Running totals start from the template so every flag is present
        let mut running: BTreeMap<String, i128> =
            flags.into_iter().map(|flag| (flag, 0)).collect();
        for (flag, delta) in prior {
            *running.entry(flag).or_insert(0) += delta;
        }

        let mut snapshots = Vec::with_capacity(range.days().len());
        for date in range.days() {
            if let Some(day_deltas) = deltas.get(&date) {
                log::trace!("{}: applying {} flag deltas", date, day_deltas.len());
                for (flag, delta) in day_deltas {
                    *running.entry(flag.clone()).or_insert(0) += *delta;
                }
            }
            snapshots.push(DailySnapshot {
                date,
                counts: running
                    .iter()
                    .map(|(flag, &count)| (flag.clone(), narrow(count)))
                    .collect(),
            });
        }

        Report::from_snapshots(snapshots)
    }
}

/// Clamp a cumulative sum into `i64`
fn narrow(count: i128) -> i64 {
    i64::try_from(count).unwrap_or(if count < 0 { i64::MIN } else { i64::MAX })
}

impl<E: Borrow<Event>> Extend<E> for ReportBuilder {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        for event in iter {
            self.add_event(event.borrow());
        }
    }
}
