use crate::survey::contact::{ContactRecord, UniqueCode};
use crate::survey::domain::{Dimension, Role};
use crate::survey::scoring::ScoreMatrix;
use serde::Serialize;

/// Interactive representation of the report. Recomputed from the
/// score matrix on every request, so it always reflects the stores
/// populated so far; the PDF renders the same values independently.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub title: String,
    pub contact: ContactView,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub role_label: &'static str,
    pub unique_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub dimension: Dimension,
    pub key: &'static str,
    pub title: &'static str,
    pub paragraphs: Vec<&'static str>,
    pub max_score: u32,
    pub rows: Vec<ScoreRowView>,
}

/// One progress bar row. Every role is always present; roles never
/// surveyed show zero.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRowView {
    pub role: Role,
    pub role_label: &'static str,
    pub value: u32,
    pub max_score: u32,
    pub percent: u8,
    pub color: &'static str,
}

impl ReportView {
    pub fn build(title: &str, contact: &ContactRecord, matrix: &ScoreMatrix) -> Self {
        let sections = Dimension::ordered()
            .into_iter()
            .map(|dimension| SectionView {
                dimension,
                key: dimension.key(),
                title: dimension.title(),
                paragraphs: dimension.body_text().split("\n\n").collect(),
                max_score: dimension.max_score(),
                rows: Role::ordered()
                    .into_iter()
                    .map(|role| score_row(dimension, role, matrix))
                    .collect(),
            })
            .collect();

        Self {
            title: title.to_string(),
            contact: ContactView {
                name: contact.name.clone(),
                company: contact.company.clone(),
                phone: contact.phone.clone(),
                email: contact.email.clone(),
                role: contact.role,
                role_label: contact.role.label(),
                unique_code: contact
                    .unique_code
                    .as_ref()
                    .map(|code: &UniqueCode| code.as_str().to_string()),
            },
            sections,
        }
    }
}

fn score_row(dimension: Dimension, role: Role, matrix: &ScoreMatrix) -> ScoreRowView {
    let value = matrix.score_or_zero(dimension, role);
    let max_score = dimension.max_score();
    let percent = if max_score == 0 {
        0
    } else {
        ((f64::from(value) / f64::from(max_score)) * 100.0).round() as u8
    };
    ScoreRowView {
        role,
        role_label: role.label(),
        value,
        max_score,
        percent,
        color: role.css_color(),
    }
}
