use super::answers::{AnswerError, AnswerStore, LikertAnswer, PAGE_COUNT};
use super::contact::ContactRecord;
use super::domain::{Role, QUESTION_COUNT};
use super::scoring::{aggregate, ScoreMatrix};
use std::collections::HashMap;
use std::fmt;

/// One role's questionnaire state within a session: its answer store,
/// the page the respondent is on, and whether it has been sealed.
#[derive(Debug, Clone, Default)]
pub struct RoleSurvey {
    store: AnswerStore,
    page: usize,
    submitted: bool,
}

impl RoleSurvey {
    pub fn store(&self) -> &AnswerStore {
        &self.store
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }
}

/// Explicit session context owned by the hosting layer and passed into
/// the core by reference. Holds the contact record and every answer
/// store populated this session; stores are never implicitly cleared,
/// so the score matrix reflects all roles surveyed so far.
#[derive(Debug, Clone)]
pub struct SurveySession {
    pub contact: ContactRecord,
    surveys: HashMap<Role, RoleSurvey>,
}

impl SurveySession {
    pub fn new(contact: ContactRecord) -> Self {
        Self {
            contact,
            surveys: HashMap::new(),
        }
    }

    /// Creates an answer store for the role if none exists yet. An
    /// existing store is kept as-is.
    pub fn start_questionnaire(&mut self, role: Role) {
        self.surveys.entry(role).or_default();
    }

    pub fn survey(&self, role: Role) -> Option<&RoleSurvey> {
        self.surveys.get(&role)
    }

    fn survey_mut(&mut self, role: Role) -> Result<&mut RoleSurvey, SessionError> {
        self.surveys
            .get_mut(&role)
            .ok_or(SessionError::NotStarted(role))
    }

    pub fn record_answer(
        &mut self,
        role: Role,
        index: usize,
        answer: LikertAnswer,
    ) -> Result<(), SessionError> {
        let survey = self.survey_mut(role)?;
        if survey.submitted {
            return Err(SessionError::AlreadySubmitted(role));
        }
        survey.store.set(index, answer)?;
        Ok(())
    }

    /// Moves forward one page. Gated on the current page being fully
    /// answered; the last page is left through `submit`.
    pub fn advance_page(&mut self, role: Role) -> Result<usize, SessionError> {
        let survey = self.survey_mut(role)?;
        if survey.submitted {
            return Err(SessionError::AlreadySubmitted(role));
        }
        if !survey.store.page_complete(survey.page)? {
            return Err(SessionError::PageIncomplete {
                role,
                page: survey.page,
            });
        }
        if survey.page + 1 >= PAGE_COUNT {
            return Err(SessionError::AlreadyOnLastPage(role));
        }
        survey.page += 1;
        Ok(survey.page)
    }

    /// Moves back one page, unconditionally. Stays on the first page
    /// when already there.
    pub fn previous_page(&mut self, role: Role) -> Result<usize, SessionError> {
        let survey = self.survey_mut(role)?;
        survey.page = survey.page.saturating_sub(1);
        Ok(survey.page)
    }

    /// Seals the role's store. Requires all 20 answers; afterwards the
    /// store is read-only input to the aggregator.
    pub fn submit(&mut self, role: Role) -> Result<(), SessionError> {
        let survey = self.survey_mut(role)?;
        if survey.submitted {
            return Err(SessionError::AlreadySubmitted(role));
        }
        if !survey.store.is_complete() {
            return Err(SessionError::QuestionnaireIncomplete {
                role,
                answered: survey.store.answered_count(),
            });
        }
        survey.submitted = true;
        Ok(())
    }

    /// Recomputes the matrix from every store currently in the session,
    /// submitted or not. Not incremental; cheap at O(20) per role.
    pub fn score_matrix(&self) -> ScoreMatrix {
        let mut matrix = ScoreMatrix::new();
        for role in Role::ordered() {
            if let Some(survey) = self.surveys.get(&role) {
                matrix.insert(role, aggregate(&survey.store));
            }
        }
        matrix
    }

    /// Drops every answer store. The only way stale stores leave the
    /// session.
    pub fn reset_answers(&mut self) {
        self.surveys.clear();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    NotStarted(Role),
    AlreadySubmitted(Role),
    AlreadyOnLastPage(Role),
    PageIncomplete { role: Role, page: usize },
    QuestionnaireIncomplete { role: Role, answered: usize },
    Answer(AnswerError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotStarted(role) => {
                write!(f, "no questionnaire started for {}", role.label())
            }
            SessionError::AlreadySubmitted(role) => {
                write!(f, "questionnaire for {} is already submitted", role.label())
            }
            SessionError::AlreadyOnLastPage(role) => {
                write!(
                    f,
                    "questionnaire for {} is on its last page; submit instead",
                    role.label()
                )
            }
            SessionError::PageIncomplete { role, page } => write!(
                f,
                "page {} for {} has unanswered statements",
                page + 1,
                role.label()
            ),
            SessionError::QuestionnaireIncomplete { role, answered } => write!(
                f,
                "questionnaire for {} has {} of {} answers",
                role.label(),
                answered,
                QUESTION_COUNT
            ),
            SessionError::Answer(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Answer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AnswerError> for SessionError {
    fn from(value: AnswerError) -> Self {
        Self::Answer(value)
    }
}
