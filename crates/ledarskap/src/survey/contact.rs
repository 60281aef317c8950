use super::domain::Role;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Length of the short identifier linking a manager's self-assessment
/// to the peer-manager and subordinate assessments of the same manager.
pub const CODE_LENGTH: usize = 8;

/// Random token over the uppercase-letters-plus-digits alphabet. Also
/// used by the hosting layer for session identifiers.
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Short, voice-safe identifier generated for the manager role and
/// entered by the other two roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueCode(String);

impl UniqueCode {
    pub fn generate() -> Self {
        Self(generate_token(CODE_LENGTH))
    }

    /// Accepts what the respondent typed, trimmed. Codes are shared by
    /// phone or mail, so no shape beyond non-emptiness is enforced.
    pub fn parse(raw: &str) -> Result<Self, ContactError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContactError::MissingUniqueCode);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Respondent metadata carried through to the rendered report. Never
/// scored; display and provenance only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub unique_code: Option<UniqueCode>,
    /// First name of the assessed manager, filled in by non-manager
    /// respondents on the code-entry page.
    pub manager_first_name: Option<String>,
}

impl ContactRecord {
    pub fn new(name: &str, company: &str, phone: &str, email: &str, role: Role) -> Self {
        Self {
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            role,
            unique_code: None,
            manager_first_name: None,
        }
    }

    /// Landing-page validation: at least name and e-mail. A miss is a
    /// warning on the current page, never a state transition.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        if self.email.trim().is_empty() {
            return Err(ContactError::MissingEmail);
        }
        Ok(())
    }

    /// Labeled fields for the document's contact block, in fixed order.
    pub fn summary_fields(&self) -> [String; 6] {
        let code = self
            .unique_code
            .as_ref()
            .map(UniqueCode::as_str)
            .unwrap_or_default();
        [
            format!("Unikt id: {}", code),
            format!("Namn: {}", self.name),
            format!("Företag: {}", self.company),
            format!("Telefon: {}", self.phone),
            format!("E-post: {}", self.email),
            format!("Funktion: {}", self.role.label()),
        ]
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ContactError {
    MissingName,
    MissingEmail,
    MissingUniqueCode,
    MissingManagerFirstName,
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::MissingName => write!(f, "fyll i minst namn och e-post: namn saknas"),
            ContactError::MissingEmail => write!(f, "fyll i minst namn och e-post: e-post saknas"),
            ContactError::MissingUniqueCode => write!(f, "unikt id saknas"),
            ContactError::MissingManagerFirstName => write!(f, "chefens förnamn saknas"),
        }
    }
}

impl std::error::Error for ContactError {}
