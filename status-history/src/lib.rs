//! Status History Library
//!
//! A stateless library that turns a stream of dated, signed "tick" events into
//! a day-by-day report of cumulative counts per flag.
//!
//! # Architecture
//!
//! This library is intentionally minimal:
//! - Iterates inclusive calendar ranges lazily (`DateRange`, `Days`)
//! - Folds events into per-day cumulative snapshots (`build_report`, `ReportBuilder`)
//! - Parses the `date,delta,flag` record form with strict validation
//!
//! The library does NOT:
//! - Store or ingest events from files
//! - Render reports (text, JSON)
//! - Configure logging
//!
//! All of that lives in the application layer (status-history-cli).
//!
//! # Example Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use status_history::{build_report, Event};
//!
//! let aug = |d| NaiveDate::from_ymd_opt(2014, 8, d).unwrap();
//! let events = vec![
//!     Event::new(aug(1), 1, "DISPATCH"),
//!     Event::new(aug(2), -1, "DISPATCH"),
//!     Event::new(aug(2), 1, "WITH_CUSTOMER"),
//! ];
//!
//! let report = build_report(aug(1), aug(2), &events);
//! for snapshot in &report {
//!     println!("{}", snapshot);
//! }
//! // 2014-08-01 DISPATCH:1 WITH_CUSTOMER:0
//! // 2014-08-02 DISPATCH:0 WITH_CUSTOMER:1
//! ```

// Public modules
pub mod builder;
pub mod range;
pub mod types;

// Re-export main types for convenience
pub use builder::{build_report, ReportBuilder};
pub use range::{DateRange, Days};
pub use types::{parse_events, DailySnapshot, Event, Report, ReportError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
