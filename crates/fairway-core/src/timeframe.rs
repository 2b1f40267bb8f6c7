//! # Report Timeframes
//!
//! Timeframe presets and date-range resolution for the reports screen.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Timeframe      →  [start 00:00:00.000, end 23:59:59.999]              │
//! │                                                                         │
//! │  today          →  [today,            today]                            │
//! │  yesterday      →  [today - 1,        today - 1]                        │
//! │  last7days      →  [today - 7,        today]                            │
//! │  last30days     →  [today - 30,       today]                            │
//! │  thisMonth      →  [1st of month,     today]                            │
//! │  lastMonth      →  [1st of prev mo.,  last day of prev mo.]             │
//! │  custom         →  [start_date?,      end_date?]  (each side falls     │
//! │                     back to today when missing)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is a **total function**: any internal date-arithmetic failure
//! degrades to today's full range instead of erroring. A reports screen that
//! throws on a weird clock is worse than one that shows today.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Timeframe
// =============================================================================

/// Preset reporting windows.
///
/// Unknown strings in a snapshot deserialize to `Custom`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "thisMonth")]
    ThisMonth,
    #[serde(rename = "lastMonth")]
    LastMonth,
    #[serde(rename = "custom", other)]
    Custom,
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Today
    }
}

// =============================================================================
// Report Filter
// =============================================================================

/// Filter state for the reports screen.
///
/// `start_date`/`end_date` only apply when `timeframe` is `Custom`.
/// `event_name` is a client-side substring filter over loaded orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub event_name: String,
}

/// An inclusive `[start, end]` instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportFilter {
    /// Creates a filter with the given preset and no custom dates.
    pub fn preset(timeframe: Timeframe) -> Self {
        ReportFilter {
            timeframe,
            ..ReportFilter::default()
        }
    }

    /// Resolves this filter to a concrete instant range, relative to
    /// `reference` ("now").
    ///
    /// Never fails: calendar arithmetic that comes back `None` (which cannot
    /// happen for representable dates, but the types allow it) falls back to
    /// today's full range.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use fairway_core::timeframe::{ReportFilter, Timeframe};
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap();
    /// let range = ReportFilter::preset(Timeframe::Yesterday).resolve_range(now);
    /// assert_eq!(range.start.to_rfc3339(), "2024-03-14T00:00:00+00:00");
    /// assert_eq!(range.end.to_rfc3339(), "2024-03-14T23:59:59.999+00:00");
    /// ```
    pub fn resolve_range(&self, reference: DateTime<Utc>) -> DateRange {
        let today = reference.date_naive();
        self.try_resolve(today)
            .unwrap_or_else(|| fallback_range(reference, today))
    }

    /// Resolves against the current wall clock.
    pub fn current_range(&self) -> DateRange {
        self.resolve_range(Utc::now())
    }

    fn try_resolve(&self, today: NaiveDate) -> Option<DateRange> {
        let (start_day, end_day) = match self.timeframe {
            Timeframe::Today => (today, today),
            Timeframe::Yesterday => {
                let d = today.pred_opt()?;
                (d, d)
            }
            Timeframe::Last7Days => (today.checked_sub_days(Days::new(7))?, today),
            Timeframe::Last30Days => (today.checked_sub_days(Days::new(30))?, today),
            Timeframe::ThisMonth => (today.with_day(1)?, today),
            Timeframe::LastMonth => {
                let last_of_prev = today.with_day(1)?.pred_opt()?;
                (last_of_prev.with_day(1)?, last_of_prev)
            }
            // Each side substitutes today independently when missing.
            Timeframe::Custom => (
                self.start_date.unwrap_or(today),
                self.end_date.unwrap_or(today),
            ),
        };
        Some(DateRange {
            start: start_of_day(start_day)?,
            end: end_of_day(end_day)?,
        })
    }
}

fn start_of_day(day: NaiveDate) -> Option<DateTime<Utc>> {
    day.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

fn end_of_day(day: NaiveDate) -> Option<DateTime<Utc>> {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| Utc.from_utc_datetime(&dt))
}

fn fallback_range(reference: DateTime<Utc>, today: NaiveDate) -> DateRange {
    DateRange {
        start: start_of_day(today).unwrap_or(reference),
        end: end_of_day(today).unwrap_or(reference),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
