//! PDF sink for the laid-out report. A pure transform of layout
//! instructions into a byte buffer; never touches the score matrix or
//! the answer stores.

use super::layout::{DocumentLayout, DrawOp, PageGeometry, Tint};
use printpdf::{
    path::PaintMode, BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect,
    Rgb,
};

/// Download filename for the rendered document.
pub const PDF_FILE_NAME: &str = "självskattning_funktionellt_ledarskap.pdf";
pub const PDF_MIME_TYPE: &str = "application/pdf";

const EGGSHELL: (f32, f32, f32) = (0.98, 0.968, 0.941);
const BAR_TRACK: (f32, f32, f32) = (0.91, 0.92, 0.94);
const CARD_BORDER: (f32, f32, f32) = (0.82, 0.82, 0.82);
const BORDER_THICKNESS: f32 = 0.75;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("unable to assemble the PDF document: {0}")]
    Document(#[from] printpdf::Error),
}

pub fn render_pdf(
    layout: &DocumentLayout,
    geometry: PageGeometry,
    document_title: &str,
) -> Result<Vec<u8>, PdfError> {
    let page_width = mm(geometry.width);
    let page_height = mm(geometry.height);
    let (document, first_page, first_layer) =
        PdfDocument::new(document_title, page_width, page_height, "Sida 1");
    let regular = document.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = document.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            document.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                document.add_page(page_width, page_height, format!("Sida {}", index + 1));
            document.get_page(page_ref).get_layer(layer_ref)
        };
        for op in &page.ops {
            draw(&layer, op, &regular, &bold);
        }
    }

    Ok(document.save_to_bytes()?)
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            tint,
            filled,
        } => {
            let rect = Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height));
            if *filled {
                layer.set_fill_color(color(*tint));
                layer.add_rect(rect.with_mode(PaintMode::Fill));
            } else {
                layer.set_outline_color(color(*tint));
                layer.set_outline_thickness(BORDER_THICKNESS);
                layer.add_rect(rect.with_mode(PaintMode::Stroke));
            }
        }
        DrawOp::Text {
            x,
            y,
            size,
            bold: emphasized,
            text,
        } => {
            layer.set_fill_color(color(Tint::Ink));
            let font = if *emphasized { bold } else { regular };
            layer.use_text(text.clone(), *size as f32, mm(*x), mm(*y), font);
        }
    }
}

fn mm(points: f64) -> Mm {
    Mm((points * 25.4 / 72.0) as f32)
}

fn color(tint: Tint) -> Color {
    let (r, g, b) = match tint {
        Tint::Page => EGGSHELL,
        Tint::Ink => (0.0, 0.0, 0.0),
        Tint::BarTrack => BAR_TRACK,
        Tint::CardBorder => CARD_BORDER,
        Tint::Bar(role) => role.bar_color(),
    };
    Color::Rgb(Rgb::new(r, g, b, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::{lay_out, LayoutConfig, ReportInputs};
    use crate::report::REPORT_TITLE;
    use crate::survey::contact::ContactRecord;
    use crate::survey::domain::Role;
    use crate::survey::scoring::ScoreMatrix;

    #[test]
    fn rendered_document_is_a_pdf_byte_stream() {
        let contact = ContactRecord::new("Eva Ek", "Acme AB", "", "eva@acme.se", Role::Manager);
        let matrix = ScoreMatrix::new();
        let inputs = ReportInputs {
            title: REPORT_TITLE,
            contact: &contact,
            matrix: &matrix,
            generated_label: Some("Genererad: 2026-08-30 09:00"),
        };
        let layout = lay_out(&inputs, PageGeometry::A4, LayoutConfig::default());
        let bytes = render_pdf(&layout, PageGeometry::A4, REPORT_TITLE).expect("document renders");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1_000);
    }
}
