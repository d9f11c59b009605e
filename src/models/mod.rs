//! Core data models for the payslip engine.
//!
//! This module contains the employee, payroll record and period types used
//! throughout the engine.

mod employee;
mod payroll_record;
mod period;

pub use employee::Employee;
pub use payroll_record::PayrollRecord;
pub use period::Period;
