use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of statements in every questionnaire variant.
pub const QUESTION_COUNT: usize = 20;
/// Lowest point on the answer scale ("Aldrig").
pub const SCALE_MIN: u8 = 1;
/// Highest point on the answer scale ("Alltid").
pub const SCALE_MAX: u8 = 7;

/// Respondent perspective. Each role answers its own questionnaire
/// variant and owns one answer store per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    PeerManager,
    Subordinate,
}

impl Role {
    /// Fixed display order used by the results card and the report.
    pub const fn ordered() -> [Self; 3] {
        [Self::Manager, Self::PeerManager, Self::Subordinate]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Manager => "Chef",
            Self::PeerManager => "Överordnad chef",
            Self::Subordinate => "Medarbetare",
        }
    }

    /// Key used in payloads sent to the workflow-automation endpoint.
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Manager => "chef",
            Self::PeerManager => "overchef",
            Self::Subordinate => "medarbetare",
        }
    }

    /// Progress bar fill color in the rendered document (RGB, 0..1).
    pub const fn bar_color(self) -> (f32, f32, f32) {
        match self {
            Self::Manager => (0.30, 0.69, 0.31),
            Self::PeerManager => (0.96, 0.65, 0.15),
            Self::Subordinate => (0.23, 0.51, 0.96),
        }
    }

    /// Progress bar fill color in the interactive view.
    pub const fn css_color(self) -> &'static str {
        match self {
            Self::Manager => "#4CAF50",
            Self::PeerManager => "#F5A524",
            Self::Subordinate => "#3B82F6",
        }
    }
}

/// One of the three scored leadership-competency areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ActiveListening,
    Feedback,
    GoalOrientation,
}

impl Dimension {
    /// Fixed report order: listening, feedback, goal orientation.
    pub const fn ordered() -> [Self; 3] {
        [Self::ActiveListening, Self::Feedback, Self::GoalOrientation]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ActiveListening => "lyssnande",
            Self::Feedback => "aterkoppling",
            Self::GoalOrientation => "malinriktning",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::ActiveListening => "Aktivt lyssnande",
            Self::Feedback => "Återkoppling",
            Self::GoalOrientation => "Målinriktning",
        }
    }

    /// Statement indices belonging to this dimension. The three ranges
    /// partition `0..QUESTION_COUNT` without overlap.
    pub const fn question_range(self) -> Range<usize> {
        match self {
            Self::ActiveListening => 0..7,
            Self::Feedback => 7..15,
            Self::GoalOrientation => 15..20,
        }
    }

    pub const fn question_count(self) -> usize {
        let range = self.question_range();
        range.end - range.start
    }

    /// Highest reachable sum: every statement answered with the top of
    /// the scale.
    pub const fn max_score(self) -> u32 {
        SCALE_MAX as u32 * self.question_count() as u32
    }

    /// Body paragraphs shown next to the results card, separated by
    /// blank lines.
    pub const fn body_text(self) -> &'static str {
        match self {
            Self::ActiveListening => ACTIVE_LISTENING_TEXT,
            Self::Feedback => FEEDBACK_TEXT,
            Self::GoalOrientation => GOAL_ORIENTATION_TEXT,
        }
    }
}

const ACTIVE_LISTENING_TEXT: &str = "I dagens arbetsliv har chefens roll förändrats. Medarbetarna sitter ofta på den djupaste kompetensen och lösningarna på verksamhetens utmaningar.

Därför är aktivt lyssnande en av chefens viktigaste färdigheter. Det handlar inte bara om att höra vad som sägs, utan om att förstå, visa intresse och använda den information du får. När du bjuder in till dialog och tar till dig medarbetarnas perspektiv visar du att deras erfarenheter är värdefulla.

Genom att agera på det du hör – bekräfta, följa upp och omsätta idéer i handling – stärker du både engagemang, förtroende och delaktighet.";

const FEEDBACK_TEXT: &str = "Effektiv återkoppling är grunden för både utveckling och motivation. Medarbetare behöver veta vad som förväntas, hur de ligger till och hur de kan växa. När du som chef tydligt beskriver uppgifter och förväntade beteenden skapar du trygghet och fokus i arbetet.

Återkoppling handlar sedan om närvaro och uppföljning – att se, lyssna och ge både beröm och konstruktiv feedback. Genom att tydligt lyfta fram vad som fungerar och vad som kan förbättras, förstärker du önskvärda beteenden och hjälper dina medarbetare att lyckas.

I svåra situationer blir återkopplingen extra viktig. Att vara lugn, konsekvent och tydlig när det blåser visar ledarskap på riktigt.";

const GOAL_ORIENTATION_TEXT: &str = "Målinriktat ledarskap handlar om att ge tydliga ramar – tid, resurser och ansvar – så att medarbetare kan arbeta effektivt och med trygghet. Tydliga och inspirerande mål skapar riktning och hjälper alla att förstå vad som är viktigt just nu.

Som chef handlar det om att formulera mål som går att tro på, och att tydliggöra hur de ska nås. När du delegerar ansvar och befogenheter visar du förtroende och skapar engagemang. Målen blir då inte bara något att leverera på – utan något att vara delaktig i.

Uppföljning är nyckeln. Genom att uppmärksamma framsteg, ge återkoppling och fira resultat förstärker du både prestation och motivation.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ranges_partition_all_indices_exactly_once() {
        let mut assigned = [0usize; QUESTION_COUNT];
        for dimension in Dimension::ordered() {
            for index in dimension.question_range() {
                assigned[index] += 1;
            }
        }
        assert!(assigned.iter().all(|count| *count == 1));
    }

    #[test]
    fn max_score_matches_scale_times_question_count() {
        for dimension in Dimension::ordered() {
            assert_eq!(
                dimension.max_score(),
                SCALE_MAX as u32 * dimension.question_count() as u32
            );
        }
        assert_eq!(Dimension::ActiveListening.max_score(), 49);
        assert_eq!(Dimension::Feedback.max_score(), 56);
        assert_eq!(Dimension::GoalOrientation.max_score(), 35);
    }

    #[test]
    fn body_text_paragraphs_are_blank_line_separated() {
        for dimension in Dimension::ordered() {
            assert_eq!(dimension.body_text().split("\n\n").count(), 3);
        }
    }

    #[test]
    fn role_order_matches_card_layout() {
        assert_eq!(
            Role::ordered(),
            [Role::Manager, Role::PeerManager, Role::Subordinate]
        );
        assert_eq!(Role::Manager.bar_color(), (0.30, 0.69, 0.31));
    }
}
