pub mod layout;
pub mod pdf;
pub mod views;

use crate::survey::contact::ContactRecord;
use crate::survey::scoring::ScoreMatrix;
use chrono::{DateTime, Local};
use layout::{lay_out, LayoutConfig, PageGeometry, ReportInputs};
use pdf::PdfError;

/// Page title shared by the interactive view and the document.
pub const REPORT_TITLE: &str = "Självskattning – Funktionellt ledarskap";

/// Renders the downloadable document for the current score matrix.
/// The timestamp is stamped once in the masthead and plays no part in
/// layout decisions.
pub fn build_document(
    contact: &ContactRecord,
    matrix: &ScoreMatrix,
    generated_at: Option<DateTime<Local>>,
) -> Result<Vec<u8>, PdfError> {
    let label = generated_at.map(|at| format!("Genererad: {}", at.format("%Y-%m-%d %H:%M")));
    let inputs = ReportInputs {
        title: REPORT_TITLE,
        contact,
        matrix,
        generated_label: label.as_deref(),
    };
    let layout = lay_out(&inputs, PageGeometry::A4, LayoutConfig::default());
    pdf::render_pdf(&layout, PageGeometry::A4, REPORT_TITLE)
}
