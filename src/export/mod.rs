//! Payslip document export.
//!
//! Export strategies are interchangeable implementations of
//! [`DocumentExporter`], chosen by [`ExportStrategy`] rather than tried as a
//! chain of fallbacks. Each one renders the same [`PayslipLayout`].
//!
//! # Example
//!
//! ```
//! use payslip_engine::calculation::PayslipResolver;
//! use payslip_engine::config::ExportConfig;
//! use payslip_engine::export::{ExportStrategy, exporter_for};
//! use payslip_engine::models::{Employee, Period};
//!
//! let employee = Employee {
//!     id: "emp_001".to_string(),
//!     name: "山田太郎".to_string(),
//!     department: "営業部".to_string(),
//!     position: "課長".to_string(),
//!     base_salary: 300000,
//!     dependents: 2,
//!     municipality: "東京都千代田区".to_string(),
//! };
//! let record = PayslipResolver::default()
//!     .resolve(&employee, &[], Period::new(2024, 3).unwrap(), None)
//!     .into_record();
//!
//! let exporter = exporter_for(ExportStrategy::PlainText, &ExportConfig::default());
//! let artifact = exporter.export(&employee, &record).unwrap();
//! assert_eq!(artifact.file_name, "給与明細_山田太郎_2024年3月.txt");
//! ```

mod layout;
mod pdf;
mod print;
mod text;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ExportConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord};

pub use layout::{
    AmountRow, InfoRow, PayslipLayout, file_name, format_currency, format_date, jst_date,
};
pub use pdf::PdfExporter;
pub use print::PrintViewExporter;
pub use text::PlainTextExporter;

/// The available export strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStrategy {
    /// A single-page PDF document.
    Pdf,
    /// A print-formatted HTML page that opens the print dialog on load.
    PrintView,
    /// A plain-text rendition offered as a direct download.
    PlainText,
}

impl ExportStrategy {
    /// Returns the snake_case name used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStrategy::Pdf => "pdf",
            ExportStrategy::PrintView => "print_view",
            ExportStrategy::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for ExportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered document ready to be downloaded, printed or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub media_type: &'static str,
    /// Document content.
    pub bytes: Vec<u8>,
}

/// Renders a resolved payslip into a document.
///
/// Implementations reject records whose derived totals are inconsistent;
/// resolve records through
/// [`PayslipResolver`](crate::calculation::PayslipResolver) first.
pub trait DocumentExporter: Send + Sync {
    /// The strategy this exporter implements.
    fn strategy(&self) -> ExportStrategy;

    /// Renders `record` for `employee`.
    fn export(&self, employee: &Employee, record: &PayrollRecord) -> EngineResult<ExportArtifact>;
}

/// Returns the exporter for `strategy`, configured from `config`.
pub fn exporter_for(strategy: ExportStrategy, config: &ExportConfig) -> Box<dyn DocumentExporter> {
    match strategy {
        ExportStrategy::Pdf => Box::new(PdfExporter::new(config)),
        ExportStrategy::PrintView => Box::new(PrintViewExporter::new(config)),
        ExportStrategy::PlainText => Box::new(PlainTextExporter::new(config)),
    }
}

/// Writes `artifact` into `dir`, creating the directory if needed.
pub fn save_artifact(dir: &Path, artifact: &ExportArtifact) -> EngineResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| EngineError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes).map_err(|e| EngineError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    info!(
        path = %path.display(),
        bytes = artifact.bytes.len(),
        "Saved payslip document"
    );
    Ok(path)
}

/// Fails with `ExportFailed` unless the record's derived totals agree with
/// their components.
fn ensure_consistent(strategy: ExportStrategy, record: &PayrollRecord) -> EngineResult<()> {
    if record.totals_consistent() {
        return Ok(());
    }
    Err(EngineError::ExportFailed {
        strategy: strategy.to_string(),
        message: format!(
            "record totals are inconsistent (total_deductions {}, net_pay {})",
            record.total_deductions, record.net_pay
        ),
    })
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

    const ALL_STRATEGIES: [ExportStrategy; 3] = [
        ExportStrategy::Pdf,
        ExportStrategy::PrintView,
        ExportStrategy::PlainText,
    ];

    #[test]
    fn test_exporter_for_returns_matching_strategy() {
        let config = ExportConfig::default();
        for strategy in ALL_STRATEGIES {
            assert_eq!(exporter_for(strategy, &config).strategy(), strategy);
        }
    }

    #[test]
    fn test_file_names_per_strategy() {
        let config = ExportConfig::default();
        let employee = create_test_employee();
        let record = create_test_record(0);

        let names: Vec<String> = ALL_STRATEGIES
            .iter()
            .map(|s| {
                exporter_for(*s, &config)
                    .export(&employee, &record)
                    .unwrap()
                    .file_name
            })
            .collect();

        assert_eq!(
            names,
            vec![
                "給与明細_山田太郎_2024年3月.pdf",
                "給与明細_山田太郎_2024年3月.html",
                "給与明細_山田太郎_2024年3月.txt",
            ]
        );
    }

    #[test]
    fn test_inconsistent_record_is_rejected_by_every_exporter() {
        let config = ExportConfig::default();
        let mut record = create_test_record(0);
        record.net_pay += 1;

        for strategy in ALL_STRATEGIES {
            let result = exporter_for(strategy, &config).export(&create_test_employee(), &record);
            match result {
                Err(EngineError::ExportFailed { strategy: s, .. }) => {
                    assert_eq!(s, strategy.as_str());
                }
                other => panic!("Expected ExportFailed, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(
            serde_json::to_string(&ExportStrategy::PrintView).unwrap(),
            "\"print_view\""
        );
        let parsed: ExportStrategy = serde_json::from_str("\"plain_text\"").unwrap();
        assert_eq!(parsed, ExportStrategy::PlainText);
    }

    #[test]
    fn test_save_artifact_writes_file() {
        let dir = std::env::temp_dir().join(format!("payslip-export-{}", uuid::Uuid::new_v4()));
        let artifact = ExportArtifact {
            file_name: "給与明細_山田太郎_2024年3月.txt".to_string(),
            media_type: "text/plain; charset=utf-8",
            bytes: "給与明細書".as_bytes().to_vec(),
        };

        let path = save_artifact(&dir, &artifact).unwrap();

        assert_eq!(path, dir.join("給与明細_山田太郎_2024年3月.txt"));
        assert_eq!(fs::read(&path).unwrap(), artifact.bytes);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_artifact_reports_io_error() {
        let file = std::env::temp_dir().join(format!("payslip-blocker-{}", uuid::Uuid::new_v4()));
        fs::write(&file, b"not a directory").unwrap();
        let artifact = ExportArtifact {
            file_name: "x.txt".to_string(),
            media_type: "text/plain; charset=utf-8",
            bytes: vec![],
        };

        let result = save_artifact(&file, &artifact);

        assert!(matches!(result, Err(EngineError::Io { .. })));
        fs::remove_file(&file).unwrap();
    }
}
