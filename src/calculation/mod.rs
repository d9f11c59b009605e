//! Calculation logic for the payslip engine.
//!
//! This module contains the period index over an employee's payroll
//! records, the navigator state stepping through those periods, the
//! fixed-rate deduction calculation, and the resolver that picks or
//! synthesizes the record to display.

mod deductions;
mod navigator;
mod period_index;
mod resolver;

pub use deductions::{Deductions, calculate_deductions};
pub use navigator::PeriodNavigator;
pub use period_index::{Direction, find_record, list_periods, neighbor};
pub use resolver::{PayslipResolver, Resolution, ResolutionSource};
