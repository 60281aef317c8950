use super::domain::{QUESTION_COUNT, SCALE_MAX, SCALE_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Statements shown per questionnaire page.
pub const QUESTIONS_PER_PAGE: usize = 5;
/// Number of questionnaire pages.
pub const PAGE_COUNT: usize = QUESTION_COUNT / QUESTIONS_PER_PAGE;

/// A single Likert answer, validated to the 1–7 scale on construction.
/// Downstream aggregation relies on this and never re-checks the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertAnswer(u8);

impl LikertAnswer {
    pub fn new(value: u8) -> Result<Self, AnswerError> {
        if (SCALE_MIN..=SCALE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AnswerError::OutOfScale(value))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LikertAnswer {
    type Error = AnswerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LikertAnswer> for u8 {
    fn from(answer: LikertAnswer) -> Self {
        answer.0
    }
}

/// One role's 20 answer slots. Slots start unanswered and are filled
/// one by one through the paginated questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    slots: [Option<LikertAnswer>; QUESTION_COUNT],
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, answer: LikertAnswer) -> Result<(), AnswerError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AnswerError::SlotOutOfRange(index))?;
        *slot = Some(answer);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<LikertAnswer> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<LikertAnswer>; QUESTION_COUNT] {
        &self.slots
    }

    /// Slot indices belonging to a questionnaire page.
    pub fn page_range(page: usize) -> Result<Range<usize>, AnswerError> {
        if page >= PAGE_COUNT {
            return Err(AnswerError::PageOutOfRange(page));
        }
        let start = page * QUESTIONS_PER_PAGE;
        Ok(start..start + QUESTIONS_PER_PAGE)
    }

    /// Whether every slot on the page holds an answer. Forward
    /// navigation is gated on this.
    pub fn page_complete(&self, page: usize) -> Result<bool, AnswerError> {
        let range = Self::page_range(page)?;
        Ok(self.slots[range].iter().all(Option::is_some))
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Raw scale values in slot order, `None` for unanswered slots.
    /// This is the shape serialized into submission records.
    pub fn raw_values(&self) -> Vec<Option<u8>> {
        self.slots
            .iter()
            .map(|slot| slot.map(LikertAnswer::value))
            .collect()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AnswerError {
    OutOfScale(u8),
    SlotOutOfRange(usize),
    PageOutOfRange(usize),
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerError::OutOfScale(value) => {
                write!(f, "answer {} is outside the 1-7 scale", value)
            }
            AnswerError::SlotOutOfRange(index) => {
                write!(f, "question index {} is outside the questionnaire", index)
            }
            AnswerError::PageOutOfRange(page) => {
                write!(f, "page {} is outside the questionnaire", page)
            }
        }
    }
}

impl std::error::Error for AnswerError {}
