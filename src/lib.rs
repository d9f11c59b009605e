//! Payslip Engine
//!
//! This crate selects monthly pay periods from an employee's payroll
//! records, resolves the record to display for a period (synthesizing a
//! placeholder with fixed-rate deductions when none exists), and exports the
//! result as a PDF, a printable HTML page or a plain-text document.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
