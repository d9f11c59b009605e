//! Single-page A4 PDF rendering with `lopdf`.
//!
//! Japanese text is set in `HeiseiKakuGo-W5`, one of the standard Adobe-Japan1
//! CID fonts, which PDF viewers substitute without the font being embedded.
//! Strings are UTF-16BE under the `UniJIS-UCS2-HW-H` CMap, which maps ASCII
//! to half-width glyphs.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::config::ExportConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord};

use super::layout::{AmountRow, PayslipLayout, file_name, format_currency};
use super::{DocumentExporter, ExportArtifact, ExportStrategy, ensure_consistent};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const FONT_NAME: &str = "HeiseiKakuGo-W5";

const SECTION_X: i64 = 57;
const LABEL_X: i64 = 71;
const AMOUNT_RIGHT_X: i64 = 425;
const LINE_HEIGHT: i64 = 20;

/// Renders the payslip as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    document_type: String,
    title: String,
}

impl PdfExporter {
    /// Creates an exporter using the configured document type and title.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            document_type: config.document_type.clone(),
            title: config.title.clone(),
        }
    }

    /// Renders `layout` into PDF bytes.
    pub fn render(&self, layout: &PayslipLayout, record: &PayrollRecord) -> EngineResult<Vec<u8>> {
        let content = page_content(layout)
            .encode()
            .map_err(|e| self.failure(format!("failed to encode page content: {e}")))?;

        let mut doc = Document::with_version("1.7");

        let pages_id = doc.new_object_id();
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => FONT_NAME,
            "Flags" => 4,
            "FontBBox" => vec![(-92).into(), (-250).into(), 1010.into(), 922.into()],
            "ItalicAngle" => 0,
            "Ascent" => 752,
            "Descent" => -221,
            "CapHeight" => 737,
            "StemV" => 114,
        });
        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType0",
            "BaseFont" => FONT_NAME,
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Japan1"),
                "Supplement" => 5,
            },
            "FontDescriptor" => Object::Reference(descriptor_id),
            "DW" => 1000,
            // Half-width Latin CIDs.
            "W" => vec![231.into(), 325.into(), 500.into()],
        });
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => FONT_NAME,
            "Encoding" => "UniJIS-UCS2-HW-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => Object::Reference(font_id),
            },
        });
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(&format!("{} {}", layout.title, layout.heading)),
            "Producer" => Object::string_literal("payslip-engine"),
            "CreationDate" => Object::string_literal(
                record.created_at.format("D:%Y%m%d%H%M%S+00'00'").to_string()
            ),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| self.failure(format!("failed to save PDF: {e}")))?;
        Ok(output)
    }

    fn failure(&self, message: String) -> EngineError {
        EngineError::ExportFailed {
            strategy: self.strategy().to_string(),
            message,
        }
    }
}

impl DocumentExporter for PdfExporter {
    fn strategy(&self) -> ExportStrategy {
        ExportStrategy::Pdf
    }

    fn export(&self, employee: &Employee, record: &PayrollRecord) -> EngineResult<ExportArtifact> {
        ensure_consistent(self.strategy(), record)?;

        let layout = PayslipLayout::build(&self.title, employee, record);
        Ok(ExportArtifact {
            file_name: file_name(&self.document_type, employee, record, "pdf"),
            media_type: "application/pdf",
            bytes: self.render(&layout, record)?,
        })
    }
}

fn page_content(layout: &PayslipLayout) -> Content {
    let mut page = PageWriter::default();
    let mut y = PAGE_HEIGHT - 85;

    page.centered(&layout.title, 20, y);
    y -= 43;
    page.centered(&layout.heading, 16, y);
    y -= 71;

    page.text("従業員情報", 12, SECTION_X, y);
    page.rule(y - 6);
    y -= 28;
    for row in &layout.employee_info {
        page.text(&format!("{}: {}", row.label, row.value), 12, LABEL_X, y);
        y -= LINE_HEIGHT;
    }

    y -= 37;
    page.text("支給項目", 12, SECTION_X, y);
    page.rule(y - 6);
    y -= 28;
    for row in layout.gross_items.iter().chain([&layout.gross_total]) {
        page.amount_row(row, "", y);
        y -= LINE_HEIGHT;
    }

    y -= 28;
    page.text("控除項目", 12, SECTION_X, y);
    page.rule(y - 6);
    y -= 28;
    for row in layout.deduction_items.iter().chain([&layout.deduction_total]) {
        page.amount_row(row, "-", y);
        y -= LINE_HEIGHT;
    }

    y -= 28;
    page.rule(y + 16);
    page.text(layout.net_pay.label, 14, LABEL_X, y);
    page.right_aligned(&format_currency(layout.net_pay.amount), 14, AMOUNT_RIGHT_X, y);

    y -= 57;
    page.right_aligned(
        &format!("作成日: {}", layout.created_on),
        10,
        AMOUNT_RIGHT_X,
        y,
    );

    Content {
        operations: page.operations,
    }
}

#[derive(Default)]
struct PageWriter {
    operations: Vec<Operation>,
}

impl PageWriter {
    fn text(&mut self, text: &str, size: i64, x: i64, y: i64) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![ucs2_string(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn centered(&mut self, text: &str, size: i64, y: i64) {
        let x = (PAGE_WIDTH - text_width(text, size)) / 2;
        self.text(text, size, x, y);
    }

    fn right_aligned(&mut self, text: &str, size: i64, right_x: i64, y: i64) {
        self.text(text, size, right_x - text_width(text, size), y);
    }

    fn amount_row(&mut self, row: &AmountRow, sign: &str, y: i64) {
        self.text(row.label, 12, LABEL_X, y);
        let amount = format!("{}{}", sign, format_currency(row.amount));
        self.right_aligned(&amount, 12, AMOUNT_RIGHT_X, y);
    }

    fn rule(&mut self, y: i64) {
        self.operations.extend([
            Operation::new("w", vec![1.into()]),
            Operation::new("m", vec![SECTION_X.into(), y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - SECTION_X).into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }
}

/// Nominal advance width in points: half an em for Latin-1, a full em
/// otherwise.
fn text_width(text: &str, size: i64) -> i64 {
    let half_ems: i64 = text
        .chars()
        .map(|c| if (c as u32) < 0x100 { 1 } else { 2 })
        .sum();
    half_ems * size / 2
}

/// A content-stream string for the Type0 font: UTF-16BE code units.
fn ucs2_string(text: &str) -> Object {
    let bytes = text
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// A PDF text string (document metadata): UTF-16BE with byte order mark.
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(|unit| unit.to_be_bytes()));
    Object::String(bytes, StringFormat::Hexadecimal)
}
