//! Pay period model.
//!
//! A [`Period`] identifies one monthly payroll cycle by year and month.
//! Periods order chronologically; listings present them most recent first.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A (year, month) identifier for one payroll cycle.
///
/// The derived ordering is chronological, so `a < b` means `a` is older.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Period;
///
/// let march = Period::new(2024, 3).unwrap();
/// let january = Period::new(2024, 1).unwrap();
/// assert!(january < march);
/// assert_eq!(march.to_string(), "2024年3月");
/// assert!(Period::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr")]
pub struct Period {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

/// Accepted wire forms: `{"year": 2024, "month": 3}`, the record form
/// `{"year": 2024, "month": "3"}`, or `"2024-3"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PeriodRepr {
    Fields { year: i32, month: u32 },
    RecordFields { year: i32, month: String },
    Text(String),
}

impl TryFrom<PeriodRepr> for Period {
    type Error = EngineError;

    fn try_from(repr: PeriodRepr) -> Result<Self, Self::Error> {
        match repr {
            PeriodRepr::Fields { year, month } => Period::new(year, month),
            PeriodRepr::RecordFields { year, month } => Period::from_record_fields(year, &month)
                .ok_or_else(|| EngineError::InvalidPeriod {
                    value: format!("{}-{}", year, month),
                    message: "month must be between 1 and 12".to_string(),
                }),
            PeriodRepr::Text(text) => text.parse(),
        }
    }
}

impl Period {
    /// Creates a period, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                value: format!("{}-{}", year, month),
                message: "month must be between 1 and 12".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses the string-encoded month carried by payroll records.
    ///
    /// Returns `None` when the month is not an integer between 1 and 12.
    pub fn from_record_fields(year: i32, month: &str) -> Option<Self> {
        let month = month.trim().parse::<u32>().ok()?;
        Self::new(year, month).ok()
    }

    /// Returns the heading used on payslips, e.g. `2024年3月分`.
    pub fn heading(&self) -> String {
        format!("{}分", self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}月", self.year, self.month)
    }
}

/// Parses the `YYYY-M` form used by the period select box.
impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            value: s.to_string(),
            message: message.to_string(),
        };

        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected YYYY-M"))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| invalid("year is not a number"))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| invalid("month is not a number"))?;

        Self::new(year, month)
    }
}
