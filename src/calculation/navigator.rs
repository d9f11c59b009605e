//! Period navigator state.
//!
//! [`PeriodNavigator`] is the selection state behind the payslip view's
//! period controls: a select box over the listed periods and previous/next
//! buttons that are disabled at either end.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{PayrollRecord, Period};

use super::period_index::{Direction, list_periods, neighbor};

/// Selected period plus the periods available to step through.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::PeriodNavigator;
/// use payslip_engine::models::Period;
///
/// let periods = vec![
///     Period::new(2024, 3).unwrap(),
///     Period::new(2024, 1).unwrap(),
///     Period::new(2023, 12).unwrap(),
/// ];
/// let mut navigator = PeriodNavigator::new(periods, Period::new(2024, 1).unwrap());
///
/// assert!(navigator.step_previous());
/// assert_eq!(navigator.selected(), Period::new(2023, 12).unwrap());
/// assert!(!navigator.can_step_previous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NavigatorRepr")]
pub struct PeriodNavigator {
    periods: Vec<Period>,
    selected: Period,
}

/// Injected state, normalized through [`PeriodNavigator::new`].
#[derive(Deserialize)]
struct NavigatorRepr {
    #[serde(default)]
    periods: Vec<Period>,
    selected: Period,
}

impl From<NavigatorRepr> for PeriodNavigator {
    fn from(repr: NavigatorRepr) -> Self {
        Self::new(repr.periods, repr.selected)
    }
}

impl PeriodNavigator {
    /// Creates a navigator over `periods` with `selected` as the initial
    /// state. The periods are sorted most recent first and deduplicated.
    pub fn new(mut periods: Vec<Period>, selected: Period) -> Self {
        periods.sort_by(|a, b| b.cmp(a));
        periods.dedup();
        Self { periods, selected }
    }

    /// Creates a navigator whose initial state is the month containing
    /// `today`.
    pub fn starting_at(periods: Vec<Period>, today: NaiveDate) -> Self {
        Self::new(periods, Period::from_date(today))
    }

    /// Creates a navigator over one employee's record periods, starting at
    /// the month containing `today`.
    pub fn for_employee(employee_id: &str, records: &[PayrollRecord], today: NaiveDate) -> Self {
        Self::starting_at(list_periods(employee_id, records), today)
    }

    /// The currently selected period.
    pub fn selected(&self) -> Period {
        self.selected
    }

    /// The available periods, most recent first.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns true if the selected period has a record.
    pub fn is_listed(&self) -> bool {
        self.periods.contains(&self.selected)
    }

    /// Selects `period` directly. An unlisted period is allowed; resolving
    /// it falls back to a placeholder record.
    pub fn select_period(&mut self, period: Period) {
        self.selected = period;
    }

    /// The period a step in `direction` would select, if any.
    pub fn peek(&self, direction: Direction) -> Option<Period> {
        neighbor(&self.periods, self.selected, direction)
    }

    /// Steps to the next older period. Returns false and leaves the state
    /// unchanged at the oldest period.
    pub fn step_previous(&mut self) -> bool {
        self.step(Direction::Previous)
    }

    /// Steps to the next newer period. Returns false and leaves the state
    /// unchanged at the newest period.
    pub fn step_next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    /// Whether the "previous" control is enabled.
    pub fn can_step_previous(&self) -> bool {
        self.peek(Direction::Previous).is_some()
    }

    /// Whether the "next" control is enabled.
    pub fn can_step_next(&self) -> bool {
        self.peek(Direction::Next).is_some()
    }

    fn step(&mut self, direction: Direction) -> bool {
        match self.peek(direction) {
            Some(period) => {
                self.selected = period;
                true
            }
            None => false,
        }
    }
}
