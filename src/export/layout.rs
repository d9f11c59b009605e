//! Renderer-independent payslip layout.
//!
//! Every exporter renders the same sections in the same order; this module
//! builds them once from an employee and a resolved record.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

use crate::models::{Employee, PayrollRecord};

/// Offset of Japan Standard Time from UTC, in hours.
const JST_OFFSET_HOURS: i64 = 9;

/// A labelled text row in the employee information section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    /// Row label, e.g. `氏名`.
    pub label: &'static str,
    /// Row value.
    pub value: String,
}

/// A labelled amount row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRow {
    /// Row label, e.g. `基本給`.
    pub label: &'static str,
    /// Amount in yen.
    pub amount: i64,
}

/// The sections of a payslip document, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipLayout {
    /// Document title, e.g. `給与明細書`.
    pub title: String,
    /// Period heading, e.g. `2024年3月分`.
    pub heading: String,
    /// Employee information rows.
    pub employee_info: Vec<InfoRow>,
    /// Gross items; the bonus row is present only when the bonus is positive.
    pub gross_items: Vec<AmountRow>,
    /// Gross pay total row.
    pub gross_total: AmountRow,
    /// Deduction items.
    pub deduction_items: Vec<AmountRow>,
    /// Total deductions row.
    pub deduction_total: AmountRow,
    /// Net pay row.
    pub net_pay: AmountRow,
    /// Creation date in `YYYY/M/D` form.
    pub created_on: String,
}

impl PayslipLayout {
    /// Builds the layout for `record`.
    pub fn build(title: &str, employee: &Employee, record: &PayrollRecord) -> Self {
        let mut gross_items = vec![
            AmountRow {
                label: "基本給",
                amount: record.base_salary,
            },
            AmountRow {
                label: "時間外手当",
                amount: record.overtime,
            },
        ];
        if record.bonus > 0 {
            gross_items.push(AmountRow {
                label: "賞与",
                amount: record.bonus,
            });
        }

        Self {
            title: title.to_string(),
            heading: format!("{}分", period_label(record)),
            employee_info: vec![
                InfoRow {
                    label: "氏名",
                    value: employee.name.clone(),
                },
                InfoRow {
                    label: "従業員ID",
                    value: employee.id.clone(),
                },
                InfoRow {
                    label: "部署",
                    value: employee.department.clone(),
                },
                InfoRow {
                    label: "役職",
                    value: employee.position.clone(),
                },
                InfoRow {
                    label: "扶養人数",
                    value: format!("{}人", employee.dependents),
                },
                InfoRow {
                    label: "居住地",
                    value: employee.municipality.clone(),
                },
            ],
            gross_items,
            gross_total: AmountRow {
                label: "支給合計",
                amount: record.gross_pay,
            },
            deduction_items: vec![
                AmountRow {
                    label: "所得税",
                    amount: record.income_tax,
                },
                AmountRow {
                    label: "雇用保険料",
                    amount: record.employee_insurance,
                },
                AmountRow {
                    label: "健康保険料",
                    amount: record.health_insurance,
                },
                AmountRow {
                    label: "厚生年金保険料",
                    amount: record.pension_insurance,
                },
            ],
            deduction_total: AmountRow {
                label: "控除合計",
                amount: record.total_deductions,
            },
            net_pay: AmountRow {
                label: "差引支給額",
                amount: record.net_pay,
            },
            created_on: format_date(record.created_at),
        }
    }
}

/// `2024年3月` for a record, falling back to the raw month string when it
/// does not parse.
pub fn period_label(record: &PayrollRecord) -> String {
    match record.period() {
        Some(period) => period.to_string(),
        None => format!("{}年{}月", record.year, record.month.trim()),
    }
}

/// Builds `<document-type>_<employee name>_<year>年<month>月.<extension>`.
///
/// Path separators and control characters in the name and in an
/// unparseable month are replaced with `_` so the result is always a single
/// path component.
pub fn file_name(
    document_type: &str,
    employee: &Employee,
    record: &PayrollRecord,
    extension: &str,
) -> String {
    format!(
        "{}_{}_{}.{}",
        document_type,
        path_safe(&employee.name),
        path_safe(&period_label(record)),
        extension
    )
}

fn path_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Formats whole yen as `¥1,234,567`; negatives as `-¥1,234`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}

/// The calendar date of `timestamp` in Japan Standard Time.
pub fn jst_date(timestamp: DateTime<Utc>) -> NaiveDate {
    (timestamp + TimeDelta::hours(JST_OFFSET_HOURS)).date_naive()
}

/// Formats a timestamp as a Japanese calendar date, `YYYY/M/D`, in JST.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    let local = jst_date(timestamp);
    format!("{}/{}/{}", local.year(), local.month(), local.day())
}
