use ledarskap::report::views::ReportView;
use ledarskap::report::REPORT_TITLE;
use ledarskap::survey::answers::{LikertAnswer, PAGE_COUNT, QUESTIONS_PER_PAGE};
use ledarskap::survey::contact::{ContactRecord, UniqueCode};
use ledarskap::survey::domain::{Dimension, Role};
use ledarskap::survey::{SessionError, SurveySession};

fn manager_session() -> SurveySession {
    let mut contact =
        ContactRecord::new("Eva Ek", "Acme AB", "070-1234567", "eva@acme.se", Role::Manager);
    contact.unique_code = Some(UniqueCode::generate());
    SurveySession::new(contact)
}

fn complete_role(session: &mut SurveySession, role: Role, value: u8) {
    session.start_questionnaire(role);
    let answer = LikertAnswer::new(value).expect("valid answer");
    for page in 0..PAGE_COUNT {
        let start = page * QUESTIONS_PER_PAGE;
        for index in start..start + QUESTIONS_PER_PAGE {
            session
                .record_answer(role, index, answer)
                .expect("answer recorded");
        }
        if page + 1 < PAGE_COUNT {
            session.advance_page(role).expect("page complete");
        }
    }
    session.submit(role).expect("all answers present");
}

#[test]
fn three_roles_produce_a_full_score_matrix() {
    let mut session = manager_session();
    complete_role(&mut session, Role::Manager, 5);
    complete_role(&mut session, Role::PeerManager, 3);
    complete_role(&mut session, Role::Subordinate, 6);

    let matrix = session.score_matrix();
    assert_eq!(matrix.entry_count(), 9);
    assert_eq!(matrix.score_or_zero(Dimension::ActiveListening, Role::Manager), 35);
    assert_eq!(
        matrix.score_or_zero(Dimension::ActiveListening, Role::PeerManager),
        21
    );
    assert_eq!(
        matrix.score_or_zero(Dimension::ActiveListening, Role::Subordinate),
        42
    );
    for dimension in Dimension::ordered() {
        for role in Role::ordered() {
            let score = matrix.score_or_zero(dimension, role);
            assert!(score <= dimension.max_score());
        }
    }
}

#[test]
fn report_view_tracks_the_session_live() {
    let mut session = manager_session();
    session.start_questionnaire(Role::Manager);

    let before = ReportView::build(REPORT_TITLE, &session.contact, &session.score_matrix());
    assert!(before.sections[0].rows.iter().all(|row| row.value == 0));

    let seven = LikertAnswer::new(7).expect("valid answer");
    for index in Dimension::ActiveListening.question_range() {
        session
            .record_answer(Role::Manager, index, seven)
            .expect("answer recorded");
    }

    let after = ReportView::build(REPORT_TITLE, &session.contact, &session.score_matrix());
    let listening_manager = &after.sections[0].rows[0];
    assert_eq!(listening_manager.value, 49);
    assert_eq!(listening_manager.percent, 100);
    // Untouched dimensions render as zero, never as an error.
    assert_eq!(after.sections[1].rows[0].value, 0);
    assert_eq!(after.sections[2].rows[0].value, 0);
}

#[test]
fn forward_navigation_is_gated_but_backward_is_not() {
    let mut session = manager_session();
    session.start_questionnaire(Role::Manager);

    assert!(matches!(
        session.advance_page(Role::Manager),
        Err(SessionError::PageIncomplete { page: 0, .. })
    ));

    let answer = LikertAnswer::new(4).expect("valid answer");
    for index in 0..QUESTIONS_PER_PAGE {
        session
            .record_answer(Role::Manager, index, answer)
            .expect("answer recorded");
    }
    assert_eq!(session.advance_page(Role::Manager), Ok(1));
    assert_eq!(session.previous_page(Role::Manager), Ok(0));
    assert_eq!(session.previous_page(Role::Manager), Ok(0));
}

#[test]
fn earlier_roles_stay_in_the_matrix_when_a_new_role_starts() {
    let mut session = manager_session();
    complete_role(&mut session, Role::Manager, 4);
    session.start_questionnaire(Role::PeerManager);

    let matrix = session.score_matrix();
    assert_eq!(matrix.score_or_zero(Dimension::Feedback, Role::Manager), 32);
    assert_eq!(matrix.score_or_zero(Dimension::Feedback, Role::PeerManager), 0);
    assert_eq!(matrix.roles_present(), vec![Role::Manager, Role::PeerManager]);
}
