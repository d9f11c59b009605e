//! Plain-text payslip download.

use crate::config::ExportConfig;
use crate::error::EngineResult;
use crate::models::{Employee, PayrollRecord};

use super::layout::{AmountRow, PayslipLayout, file_name, format_currency};
use super::{DocumentExporter, ExportArtifact, ExportStrategy, ensure_consistent};

/// Renders the payslip as UTF-8 text, one `label: value` line per row.
#[derive(Debug, Clone)]
pub struct PlainTextExporter {
    document_type: String,
    title: String,
}

impl PlainTextExporter {
    /// Creates an exporter using the configured document type and title.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            document_type: config.document_type.clone(),
            title: config.title.clone(),
        }
    }

    /// Renders the text body for `layout`.
    pub fn render(layout: &PayslipLayout) -> String {
        let mut lines = vec![layout.title.clone(), layout.heading.clone(), String::new()];

        lines.push("従業員情報:".to_string());
        for row in &layout.employee_info {
            lines.push(format!("{}: {}", row.label, row.value));
        }
        lines.push(String::new());

        lines.push("支給項目:".to_string());
        lines.extend(layout.gross_items.iter().map(amount_line));
        lines.push(amount_line(&layout.gross_total));
        lines.push(String::new());

        lines.push("控除項目:".to_string());
        lines.extend(layout.deduction_items.iter().map(amount_line));
        lines.push(amount_line(&layout.deduction_total));
        lines.push(String::new());

        lines.push(amount_line(&layout.net_pay));
        lines.push(String::new());
        lines.push(format!("作成日: {}", layout.created_on));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

fn amount_line(row: &AmountRow) -> String {
    format!("{}: {}", row.label, format_currency(row.amount))
}

impl DocumentExporter for PlainTextExporter {
    fn strategy(&self) -> ExportStrategy {
        ExportStrategy::PlainText
    }

    fn export(&self, employee: &Employee, record: &PayrollRecord) -> EngineResult<ExportArtifact> {
        ensure_consistent(self.strategy(), record)?;

        let layout = PayslipLayout::build(&self.title, employee, record);
        Ok(ExportArtifact {
            file_name: file_name(&self.document_type, employee, record, "txt"),
            media_type: "text/plain; charset=utf-8",
            bytes: Self::render(&layout).into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "山田太郎".to_string(),
            department: "営業部".to_string(),
            position: "課長".to_string(),
            base_salary: 300000,
            dependents: 2,
            municipality: "東京都千代田区".to_string(),
        }
    }

    fn create_test_record(bonus: i64) -> PayrollRecord {
        let mut record = PayrollRecord {
            employee_id: "emp_001".to_string(),
            year: 2024,
            month: "3".to_string(),
            base_salary: 300000,
            overtime: 15000,
            bonus,
            gross_pay: 315000 + bonus,
            income_tax: 25200,
            employee_insurance: 1890,
            health_insurance: 15592,
            pension_insurance: 28822,
            total_deductions: 0,
            net_pay: 0,
            created_at: Utc.with_ymd_and_hms(2024, 3, 25, 0, 0, 0).unwrap(),
        };
        record.recompute_totals();
        record
    }

    fn export_text(bonus: i64) -> String {
        let exporter = PlainTextExporter::new(&ExportConfig::default());
        let artifact = exporter
            .export(&create_test_employee(), &create_test_record(bonus))
            .unwrap();
        String::from_utf8(artifact.bytes).unwrap()
    }

    #[test]
    fn test_text_contains_all_sections_in_order() {
        let text = export_text(0);

        let positions: Vec<usize> = [
            "給与明細書",
            "2024年3月分",
            "従業員情報:",
            "扶養人数: 2人",
            "居住地: 東京都千代田区",
            "支給項目:",
            "控除項目:",
            "差引支給額: ¥243,496",
            "作成日: 2024/3/25",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_text_amounts() {
        let text = export_text(0);
        assert!(text.contains("基本給: ¥300,000"));
        assert!(text.contains("時間外手当: ¥15,000"));
        assert!(text.contains("支給合計: ¥315,000"));
        assert!(text.contains("所得税: ¥25,200"));
        assert!(text.contains("控除合計: ¥71,504"));
    }

    #[test]
    fn test_bonus_line_omitted_when_zero() {
        assert!(!export_text(0).contains("賞与"));
    }

    #[test]
    fn test_bonus_line_included_when_positive() {
        assert!(export_text(50000).contains("賞与: ¥50,000"));
    }

    #[test]
    fn test_media_type_and_extension() {
        let exporter = PlainTextExporter::new(&ExportConfig::default());
        let artifact = exporter
            .export(&create_test_employee(), &create_test_record(0))
            .unwrap();
        assert_eq!(artifact.media_type, "text/plain; charset=utf-8");
        assert!(artifact.file_name.ends_with(".txt"));
    }
}
