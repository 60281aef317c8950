use super::domain::{Role, QUESTION_COUNT};

/// Returns the 20 statements a respondent in the given role rates.
/// Manager and subordinate share one list (self-rating vs. rating the
/// same behaviors from below); the peer-manager variant rewords each
/// statement from the outside perspective.
pub const fn statements(role: Role) -> &'static [&'static str; QUESTION_COUNT] {
    match role {
        Role::Manager | Role::Subordinate => &MANAGER_STATEMENTS,
        Role::PeerManager => &PEER_MANAGER_STATEMENTS,
    }
}

/// Instruction shown above the questionnaire, including the scale
/// anchors 1–7.
pub const fn instruction(role: Role) -> &'static str {
    match role {
        Role::Manager => MANAGER_INSTRUCTION,
        Role::PeerManager => PEER_MANAGER_INSTRUCTION,
        Role::Subordinate => SUBORDINATE_INSTRUCTION,
    }
}

const MANAGER_STATEMENTS: [&str; QUESTION_COUNT] = [
    "Efterfrågar deras förslag när det gäller hur arbetet kan förbättras",
    "Efterfrågar deras idéer när det gäller planering av arbetet",
    "Uppmuntrar dem att uttrycka eventuella farhågor när det gäller arbetet",
    "Uppmuntrar dem att komma med förbättringsförslag för verksamheten",
    "Uppmuntrar dem att uttrycka idéer och förslag",
    "Använder dig av deras förslag när du fattar beslut som berör dem",
    "Överväger deras idéer även när du inte håller med",
    "Talar om deras arbete som meningsfullt och viktigt",
    "Formulerar inspirerande målsättningar för deras arbete",
    "Beskriver hur deras arbete bidrar till viktiga värderingar och ideal",
    "Pratar på ett inspirerande sätt om deras arbete",
    "Beskriver hur deras arbete bidrar till verksamhetens mål",
    "Är tydlig med hur deras arbete bidrar till verksamhetens effektivitet",
    "Tillhandahåller information som visar på betydelsen av deras arbete",
    "Använder fakta och logik när du beskriver betydelsen av deras arbete",
    "Beskriver vilka arbetsuppgifter du vill att de utför",
    "Beskriver tidsplaner för de arbetsuppgifter du delegerar till dem",
    "Kommunicerar verksamhetens målsättningar på ett tydligt sätt",
    "Är tydlig med vad du förväntar dig av dem",
    "Ser till att dina medarbetares arbete samordnas",
];

const PEER_MANAGER_STATEMENTS: [&str; QUESTION_COUNT] = [
    "Efterfrågar andras förslag när det gäller hur hens verksamhet kan förbättras",
    "Efterfrågar andras idéer när det gäller planering av hens verksamhet",
    "Uppmuntrar andra att uttrycka eventuella farhågor när det gäller hens verksamhet",
    "Uppmuntrar andra att komma med förbättringsförslag för hens verksamhet",
    "Uppmuntrar andra att uttrycka idéer och förslag",
    "Använder sig av andras förslag när hen fattar beslut som berör dem",
    "Överväger andras idéer även när hen inte håller med om dem",
    "Talar om sin verksamhet som meningsfull och viktig",
    "Formulerar inspirerande målsättningar",
    "Beskriver viktiga värderingar och ideal",
    "Pratar på ett inspirerande sätt",
    "Beskriver sin verksamhets mål",
    "Är tydlig med sin verksamhets effektivitet",
    "Tillhandahåller relevant information",
    "Använder fakta och logik",
    "Beskriver vem som är ansvarig för vad",
    "Beskriver tidsplaner för de arbetsuppgifter som ska göras",
    "Kommunicerar verksamhetens målsättningar på ett tydligt sätt",
    "Är tydlig med vad hen förväntar sig av andra",
    "Ser till att arbetet samordnas",
];

const MANAGER_INSTRUCTION: &str = "Syftet med frågorna nedan är att du ska beskriva hur du kommunicerar \
med dina medarbetare i frågor som rör deras arbete. Använd följande svarsskala: 1 = Aldrig, \
2 = Nästan aldrig, 3 = Sällan, 4 = Ibland, 5 = Ofta, 6 = Nästan alltid, 7 = Alltid. \
Ange hur ofta du gör följande:";

const PEER_MANAGER_INSTRUCTION: &str = "Syftet med frågorna nedan är att du ska beskriva hur din \
underställda chef kommunicerar i arbetsrelaterade frågor. Använd följande svarsskala: 1 = Aldrig, \
2 = Nästan aldrig, 3 = Sällan, 4 = Ibland, 5 = Ofta, 6 = Nästan alltid, 7 = Alltid. \
Ange hur ofta din underställda chef gör följande:";

const SUBORDINATE_INSTRUCTION: &str = "Syftet med frågorna nedan är att du ska beskriva hur din chef \
kommunicerar med dig i frågor som rör ditt arbete. Använd följande svarsskala: 1 = Aldrig, \
2 = Nästan aldrig, 3 = Sällan, 4 = Ibland, 5 = Ofta, 6 = Nästan alltid, 7 = Alltid. \
Ange hur ofta din chef gör följande:";
