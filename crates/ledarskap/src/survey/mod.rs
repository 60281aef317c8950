pub mod answers;
pub mod contact;
pub mod domain;
pub mod questions;
pub mod scoring;
mod session;

pub use session::{RoleSurvey, SessionError, SurveySession};
