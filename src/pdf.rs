use std::io::BufWriter;

use printpdf::*;

use crate::error::{MonthcloseError, Result};
use crate::fmt::{amount, percent};
use crate::models::MonthlyBucket;
use crate::reports::highlights;

// A4 dimensions (mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_TOP: f32 = 18.0;
const MARGIN_X: f32 = 17.0;
const TITLE_SIZE: f32 = 20.0;
const SUBTITLE_SIZE: f32 = 12.0;
const LABEL_SIZE: f32 = 10.0;
const FIGURE_SIZE: f32 = 16.0;
const SECTION_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;
const NOTE_SIZE: f32 = 9.5;
const BOX_H: f32 = 38.8;

const NOTE: &str =
    "This summary is generated from imported transactions. Review categorisation before filing taxes.";

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    y: f32,
}

fn grey(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| MonthcloseError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| MonthcloseError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            page,
            layer,
            y: MARGIN_TOP,
        })
    }

    fn layer(&self) -> PdfLayerReference {
        self.doc.get_page(self.page).get_layer(self.layer)
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool, shade: f32) {
        let font = if bold { &self.font_bold } else { &self.font };
        let layer = self.layer();
        layer.set_fill_color(grey(shade));
        layer.use_text(s, size, Mm(x), Mm(PAGE_H - self.y), font);
    }

    /// Outline of a rectangle whose top-left corner sits at the cursor.
    fn frame(&self, x: f32, width: f32, height: f32) {
        let layer = self.layer();
        layer.set_outline_color(grey(0.9));
        layer.set_outline_thickness(0.75);
        let top = PAGE_H - self.y;
        let bottom = top - height;
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(bottom)), false),
                (Point::new(Mm(x), Mm(bottom)), false),
            ],
            is_closed: true,
        });
    }

    fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| MonthcloseError::Pdf(format!("{e:?}")))?;
        buf.into_inner().map_err(|e| MonthcloseError::Pdf(e.to_string()))
    }
}

/// One-page monthly report: header, four key figures, highlights and a note.
pub fn render_monthly_report(bucket: &MonthlyBucket, name: &str, business: &str) -> Result<Vec<u8>> {
    let title = if business.trim().is_empty() {
        "Monthly Report"
    } else {
        business.trim()
    };
    let mut pdf = PdfWriter::new(title)?;

    pdf.y += 7.0;
    pdf.text(title, MARGIN_X, TITLE_SIZE, true, 0.08);
    pdf.y += 7.8;
    let subtitle = format!("{} - Prepared for {}", bucket.month, name.trim());
    pdf.text(subtitle.trim(), MARGIN_X, SUBTITLE_SIZE, false, 0.35);

    pdf.y += 9.9;
    let box_w = PAGE_W - MARGIN_X * 2.0;
    pdf.frame(MARGIN_X, box_w, BOX_H);

    let figures = [
        ("Revenue", amount(bucket.revenue)),
        ("Expenses", amount(bucket.expenses)),
        ("Profit", amount(bucket.profit)),
        ("Margin", percent(bucket.margin)),
    ];
    let col_w = box_w / figures.len() as f32;
    pdf.y += 7.8;
    for (i, (label, _)) in figures.iter().enumerate() {
        pdf.text(label, MARGIN_X + i as f32 * col_w + 4.2, LABEL_SIZE, true, 0.45);
    }
    pdf.y += 7.8;
    for (i, (_, value)) in figures.iter().enumerate() {
        pdf.text(value, MARGIN_X + i as f32 * col_w + 4.2, FIGURE_SIZE, true, 0.1);
    }

    pdf.y += BOX_H;
    pdf.text("Highlights", MARGIN_X, SECTION_SIZE, true, 0.12);
    pdf.y += 6.4;
    for line in highlights(bucket) {
        pdf.text(&format!("- {line}"), MARGIN_X, BODY_SIZE, false, 0.2);
        pdf.y += 5.6;
    }

    pdf.y += 3.5;
    pdf.text("Notes", MARGIN_X, SECTION_SIZE, true, 0.12);
    pdf.y += 6.4;
    pdf.text(NOTE, MARGIN_X, NOTE_SIZE, false, 0.35);

    pdf.to_bytes()
}
