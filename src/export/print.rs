//! Print-formatted HTML view.
//!
//! The page is self-contained (inline CSS, no external assets), hides its
//! buttons when printed, and opens the print dialog once loaded.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::config::ExportConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord};

use super::layout::{AmountRow, PayslipLayout, file_name, format_currency};
use super::{DocumentExporter, ExportArtifact, ExportStrategy, ensure_consistent};

const STYLE: &str = r#"
    body { font-family: 'Hiragino Sans', 'Yu Gothic', sans-serif; margin: 20px; line-height: 1.6; }
    .header { text-align: center; border-bottom: 2px solid #333; padding-bottom: 10px; margin-bottom: 20px; }
    .employee-info { background-color: #f5f5f5; padding: 15px; margin-bottom: 20px; border-radius: 5px; }
    .payroll-section { margin-bottom: 20px; }
    .payroll-table { width: 100%; border-collapse: collapse; margin-bottom: 15px; }
    .payroll-table td { border: 1px solid #ddd; padding: 8px; text-align: left; }
    .amount { text-align: right; font-weight: bold; }
    .total-row { background-color: #e8f4f8; font-weight: bold; }
    .net-pay { background-color: #d4edda; font-size: 1.2em; font-weight: bold; }
    .created-on { margin-top: 30px; text-align: right; font-size: 0.9em; color: #666; }
    .controls { margin-top: 20px; text-align: center; }
    @media print { body { margin: 0; } .no-print { display: none; } }
"#;

/// Renders the payslip as a printable HTML page.
#[derive(Debug, Clone)]
pub struct PrintViewExporter {
    document_type: String,
    title: String,
}

impl PrintViewExporter {
    /// Creates an exporter using the configured document type and title.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            document_type: config.document_type.clone(),
            title: config.title.clone(),
        }
    }

    /// Renders the HTML page for `layout`, titled for `employee_name`.
    pub fn render(layout: &PayslipLayout, employee_name: &str) -> Result<String, std::fmt::Error> {
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"ja\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">")?;
        writeln!(
            html,
            "<title>{} - {}</title>",
            escape(layout.title.as_str()),
            escape(employee_name)
        )?;
        writeln!(html, "<style>{}</style>", STYLE)?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body onload=\"setTimeout(function () {{ window.print(); }}, 250)\">")?;

        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "<h1>{}</h1>", escape(layout.title.as_str()))?;
        writeln!(html, "<h2>{}</h2>", escape(layout.heading.as_str()))?;
        writeln!(html, "</div>")?;

        writeln!(html, "<div class=\"employee-info\">")?;
        writeln!(html, "<h3>従業員情報</h3>")?;
        for row in &layout.employee_info {
            writeln!(
                html,
                "<p><strong>{}:</strong> {}</p>",
                row.label,
                escape(row.value.as_str())
            )?;
        }
        writeln!(html, "</div>")?;

        write_amount_table(&mut html, "支給項目", &layout.gross_items, &layout.gross_total, "")?;
        write_amount_table(
            &mut html,
            "控除項目",
            &layout.deduction_items,
            &layout.deduction_total,
            "-",
        )?;

        writeln!(html, "<div class=\"payroll-section\">")?;
        writeln!(html, "<table class=\"payroll-table\">")?;
        writeln!(
            html,
            "<tr class=\"net-pay\"><td>{}</td><td class=\"amount\">{}</td></tr>",
            layout.net_pay.label,
            format_currency(layout.net_pay.amount)
        )?;
        writeln!(html, "</table>")?;
        writeln!(html, "</div>")?;

        writeln!(
            html,
            "<div class=\"created-on\">作成日: {}</div>",
            layout.created_on
        )?;

        writeln!(html, "<div class=\"controls no-print\">")?;
        writeln!(html, "<button onclick=\"window.print()\">印刷</button>")?;
        writeln!(html, "<button onclick=\"window.close()\">閉じる</button>")?;
        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }
}

fn write_amount_table(
    html: &mut String,
    heading: &str,
    items: &[AmountRow],
    total: &AmountRow,
    sign: &str,
) -> std::fmt::Result {
    writeln!(html, "<div class=\"payroll-section\">")?;
    writeln!(html, "<h3>{}</h3>", heading)?;
    writeln!(html, "<table class=\"payroll-table\">")?;
    for item in items {
        writeln!(
            html,
            "<tr><td>{}</td><td class=\"amount\">{}{}</td></tr>",
            item.label,
            sign,
            format_currency(item.amount)
        )?;
    }
    writeln!(
        html,
        "<tr class=\"total-row\"><td>{}</td><td class=\"amount\">{}{}</td></tr>",
        total.label,
        sign,
        format_currency(total.amount)
    )?;
    writeln!(html, "</table>")?;
    writeln!(html, "</div>")
}

impl DocumentExporter for PrintViewExporter {
    fn strategy(&self) -> ExportStrategy {
        ExportStrategy::PrintView
    }

    fn export(&self, employee: &Employee, record: &PayrollRecord) -> EngineResult<ExportArtifact> {
        ensure_consistent(self.strategy(), record)?;

        let layout = PayslipLayout::build(&self.title, employee, record);
        let html = Self::render(&layout, &employee.name).map_err(|e| EngineError::ExportFailed {
            strategy: self.strategy().to_string(),
            message: format!("failed to render HTML: {e}"),
        })?;

        Ok(ExportArtifact {
            file_name: file_name(&self.document_type, employee, record, "html"),
            media_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        })
    }
}
