use chrono::Local;
use clap::Args;
use ledarskap::error::AppError;
use ledarskap::report::build_document;
use ledarskap::report::pdf::PDF_FILE_NAME;
use ledarskap::survey::answers::LikertAnswer;
use ledarskap::survey::contact::{ContactRecord, UniqueCode};
use ledarskap::survey::domain::{Dimension, Role, QUESTION_COUNT};
use ledarskap::survey::{SessionError, SurveySession};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Respondent name printed in the contact block
    #[arg(long, default_value = "Eva Exempel")]
    pub(crate) name: String,
    /// Company printed in the contact block
    #[arg(long, default_value = "Exempel AB")]
    pub(crate) company: String,
    /// Scale value (1-7) applied to every statement
    #[arg(long, default_value_t = 4)]
    pub(crate) value: u8,
    /// Output path for the generated document
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

/// Fills in a complete manager self-assessment and writes the rendered
/// document to disk. Useful for eyeballing layout changes.
pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        name,
        company,
        value,
        out,
    } = args;

    let answer = LikertAnswer::new(value).map_err(SessionError::from)?;
    let mut contact = ContactRecord::new(&name, &company, "", "demo@exempel.se", Role::Manager);
    contact.unique_code = Some(UniqueCode::generate());

    let mut session = SurveySession::new(contact);
    session.start_questionnaire(Role::Manager);
    for index in 0..QUESTION_COUNT {
        session.record_answer(Role::Manager, index, answer)?;
    }

    let matrix = session.score_matrix();
    let bytes = build_document(&session.contact, &matrix, Some(Local::now()))?;
    let path = out.unwrap_or_else(|| PathBuf::from(PDF_FILE_NAME));
    std::fs::write(&path, &bytes)?;

    println!("Wrote {} ({} bytes)", path.display(), bytes.len());
    for dimension in Dimension::ordered() {
        println!(
            "- {}: {}/{} poäng",
            dimension.title(),
            matrix.score_or_zero(dimension, Role::Manager),
            dimension.max_score()
        );
    }

    Ok(())
}
