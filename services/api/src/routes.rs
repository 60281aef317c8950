use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::Extension;
use axum::Json;
use chrono::{Local, Utc};
use ledarskap::error::AppError;
use ledarskap::flow::{
    FlowError, LookupMatch, LookupRequest, ParticipantLog, SubmissionRecord,
};
use ledarskap::report::pdf::{PDF_FILE_NAME, PDF_MIME_TYPE};
use ledarskap::report::views::ReportView;
use ledarskap::report::{build_document, REPORT_TITLE};
use ledarskap::survey::answers::{AnswerStore, LikertAnswer, PAGE_COUNT};
use ledarskap::survey::contact::{ContactError, ContactRecord, UniqueCode};
use ledarskap::survey::domain::Role;
use ledarskap::survey::questions;
use ledarskap::survey::scoring::aggregate;
use ledarskap::survey::{SessionError, SurveySession};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

pub(crate) fn survey_router() -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/sessions", post(create_session_endpoint))
        .route("/api/v1/sessions/:id/code", post(code_entry_endpoint))
        .route(
            "/api/v1/sessions/:id/questionnaire",
            get(questionnaire_endpoint),
        )
        .route("/api/v1/sessions/:id/answers", put(record_answers_endpoint))
        .route("/api/v1/sessions/:id/next", post(next_page_endpoint))
        .route("/api/v1/sessions/:id/previous", post(previous_page_endpoint))
        .route("/api/v1/sessions/:id/submit", post(submit_endpoint))
        .route("/api/v1/sessions/:id/report", get(report_endpoint))
        .route("/api/v1/sessions/:id/report.pdf", get(report_pdf_endpoint))
        .route("/api/v1/sessions/:id/export", post(export_endpoint))
}

/// Where the client goes after the current action. Mirrors the page
/// order of the survey: landing, code entry (non-managers only), the
/// four questionnaire pages, then the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FlowStep {
    CodeEntry,
    Questionnaire,
    Report,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateSessionRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) company: String,
    #[serde(default)]
    pub(crate) phone: String,
    pub(crate) email: String,
    pub(crate) role: Role,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionResponse {
    pub(crate) session_id: String,
    pub(crate) role: Role,
    pub(crate) role_label: &'static str,
    /// Present for managers only; shared with the other two roles out
    /// of band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unique_code: Option<String>,
    pub(crate) next: FlowStep,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CodeEntryRequest {
    pub(crate) manager_first_name: String,
    pub(crate) unique_code: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CodeEntryResponse {
    pub(crate) next: FlowStep,
    pub(crate) manager_found: bool,
    pub(crate) warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatementView {
    pub(crate) index: usize,
    pub(crate) text: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionnaireResponse {
    pub(crate) role: Role,
    pub(crate) role_label: &'static str,
    pub(crate) instruction: &'static str,
    pub(crate) page: usize,
    pub(crate) page_count: usize,
    pub(crate) statements: Vec<StatementView>,
    /// Answers for the statements on this page, in the same order.
    pub(crate) answers: Vec<Option<u8>>,
    pub(crate) page_complete: bool,
    pub(crate) submitted: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerInput {
    pub(crate) index: usize,
    pub(crate) value: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordAnswersRequest {
    pub(crate) answers: Vec<AnswerInput>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageStatusResponse {
    pub(crate) page: usize,
    pub(crate) page_complete: bool,
    pub(crate) answered_count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitResponse {
    pub(crate) next: FlowStep,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(default = "default_include_pdf")]
    pub(crate) include_pdf: bool,
}

fn default_include_pdf() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub(crate) struct ExportResponse {
    pub(crate) delivered: bool,
    pub(crate) warnings: Vec<String>,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn create_session_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let CreateSessionRequest {
        name,
        company,
        phone,
        email,
        role,
    } = payload;

    let mut contact = ContactRecord::new(&name, &company, &phone, &email, role);
    contact.validate()?;

    // Managers get their code allocated here and go straight to the
    // questionnaire; the other roles pass through code entry first.
    let next = if role == Role::Manager {
        contact.unique_code = Some(UniqueCode::generate());
        FlowStep::Questionnaire
    } else {
        FlowStep::CodeEntry
    };
    let unique_code = contact
        .unique_code
        .as_ref()
        .map(|code| code.as_str().to_string());

    let mut session = SurveySession::new(contact);
    if role == Role::Manager {
        session.start_questionnaire(role);
    }
    let session_id = state.sessions.insert(session);
    info!(%session_id, role = role.label(), "survey session created");

    Ok(Json(CreateSessionResponse {
        session_id,
        role,
        role_label: role.label(),
        unique_code,
        next,
    }))
}

pub(crate) async fn code_entry_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<CodeEntryRequest>,
) -> Result<Json<CodeEntryResponse>, AppError> {
    let code = UniqueCode::parse(&payload.unique_code)?;
    let first_name = payload.manager_first_name.trim().to_string();
    if first_name.is_empty() {
        return Err(ContactError::MissingManagerFirstName.into());
    }

    let role = state
        .sessions
        .with_session(&session_id, |session| session.contact.role)
        .ok_or_else(|| AppError::SessionNotFound(session_id.clone()))?;

    let mut warnings = Vec::new();

    // Best effort. A failed log never blocks the respondent.
    let entry = ParticipantLog::new(&code, &first_name, role, Utc::now());
    match state.flow.log_participant(&entry).await {
        Ok(()) | Err(FlowError::NotConfigured) => {}
        Err(err) => {
            warn!(%session_id, error = %err, "participant logging failed");
            warnings.push(format!("Deltagarloggningen kunde inte genomföras: {err}"));
        }
    }

    let mut lookup: Option<LookupMatch> = None;
    match state.flow.lookup_manager(&LookupRequest::new(&code)).await {
        Ok(found) if found.found => lookup = Some(found),
        Ok(_) => warnings.push(
            "Ingen chef hittades för det angivna unika id:t. Kontrollera koden eller fortsätt ändå."
                .to_string(),
        ),
        Err(FlowError::NotConfigured) => {}
        Err(err) => {
            warn!(%session_id, error = %err, "manager lookup failed");
            warnings.push(format!("Uppslaget mot arbetsflödet misslyckades: {err}"));
        }
    }
    let manager_found = lookup.is_some();

    state
        .sessions
        .with_session(&session_id, |session| {
            session.contact.unique_code = Some(code.clone());
            session.contact.manager_first_name = Some(first_name.clone());
            if let Some(hit) = &lookup {
                hit.apply_to(&mut session.contact);
            }
            session.start_questionnaire(role);
        })
        .ok_or_else(|| AppError::SessionNotFound(session_id.clone()))?;

    Ok(Json(CodeEntryResponse {
        next: FlowStep::Questionnaire,
        manager_found,
        warnings,
    }))
}

pub(crate) async fn questionnaire_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<QuestionnaireResponse>, AppError> {
    let view = state
        .sessions
        .with_session(&session_id, questionnaire_view)
        .ok_or_else(|| AppError::SessionNotFound(session_id))??;
    Ok(Json(view))
}

fn questionnaire_view(session: &mut SurveySession) -> Result<QuestionnaireResponse, SessionError> {
    let role = session.contact.role;
    let survey = session.survey(role).ok_or(SessionError::NotStarted(role))?;
    let page = survey.page();
    let range = AnswerStore::page_range(page)?;
    let bank = questions::statements(role);

    let statements = range
        .clone()
        .map(|index| StatementView {
            index,
            text: bank[index],
        })
        .collect();
    let answers = range
        .map(|index| survey.store().get(index).map(LikertAnswer::value))
        .collect();

    Ok(QuestionnaireResponse {
        role,
        role_label: role.label(),
        instruction: questions::instruction(role),
        page,
        page_count: PAGE_COUNT,
        statements,
        answers,
        page_complete: survey.store().page_complete(page)?,
        submitted: survey.submitted(),
    })
}

pub(crate) async fn record_answers_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<RecordAnswersRequest>,
) -> Result<Json<PageStatusResponse>, AppError> {
    let status = state
        .sessions
        .with_session(&session_id, |session| {
            let role = session.contact.role;
            for input in &payload.answers {
                let answer = LikertAnswer::new(input.value).map_err(SessionError::from)?;
                session.record_answer(role, input.index, answer)?;
            }
            page_status(session)
        })
        .ok_or_else(|| AppError::SessionNotFound(session_id))??;
    Ok(Json(status))
}

pub(crate) async fn next_page_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PageStatusResponse>, AppError> {
    let status = state
        .sessions
        .with_session(&session_id, |session| {
            session.advance_page(session.contact.role)?;
            page_status(session)
        })
        .ok_or_else(|| AppError::SessionNotFound(session_id))??;
    Ok(Json(status))
}

pub(crate) async fn previous_page_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PageStatusResponse>, AppError> {
    let status = state
        .sessions
        .with_session(&session_id, |session| {
            session.previous_page(session.contact.role)?;
            page_status(session)
        })
        .ok_or_else(|| AppError::SessionNotFound(session_id))??;
    Ok(Json(status))
}

fn page_status(session: &SurveySession) -> Result<PageStatusResponse, SessionError> {
    let role = session.contact.role;
    let survey = session.survey(role).ok_or(SessionError::NotStarted(role))?;
    Ok(PageStatusResponse {
        page: survey.page(),
        page_complete: survey.store().page_complete(survey.page())?,
        answered_count: survey.store().answered_count(),
    })
}

pub(crate) async fn submit_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SubmitResponse>, AppError> {
    state
        .sessions
        .with_session(&session_id, |session| session.submit(session.contact.role))
        .ok_or_else(|| AppError::SessionNotFound(session_id.clone()))??;
    info!(%session_id, "questionnaire submitted");
    Ok(Json(SubmitResponse {
        next: FlowStep::Report,
    }))
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ReportView>, AppError> {
    let session = state
        .sessions
        .snapshot(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;
    let view = ReportView::build(REPORT_TITLE, &session.contact, &session.score_matrix());
    Ok(Json(view))
}

pub(crate) async fn report_pdf_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .sessions
        .snapshot(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;
    let bytes = build_document(&session.contact, &session.score_matrix(), Some(Local::now()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}

pub(crate) async fn export_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let session = state
        .sessions
        .snapshot(&session_id)
        .ok_or_else(|| AppError::SessionNotFound(session_id.clone()))?;
    let role = session.contact.role;
    let survey = session
        .survey(role)
        .ok_or(AppError::Session(SessionError::NotStarted(role)))?;

    let sums = aggregate(survey.store());
    let raw_answers = survey.store().raw_values();
    let pdf = if payload.include_pdf {
        Some(build_document(
            &session.contact,
            &session.score_matrix(),
            Some(Local::now()),
        )?)
    } else {
        None
    };
    let record = SubmissionRecord::new(
        REPORT_TITLE,
        &session.contact,
        &sums,
        &raw_answers,
        pdf.as_deref(),
        Utc::now(),
    )?;

    let mut warnings = Vec::new();
    let delivered = match state.flow.submit_record(&record).await {
        Ok(()) => {
            info!(%session_id, role = role.label(), "submission exported");
            true
        }
        Err(FlowError::NotConfigured) => {
            warnings.push(
                "Ingen exportadress är konfigurerad; resultatet stannar i sessionen.".to_string(),
            );
            false
        }
        Err(err) => {
            warn!(%session_id, error = %err, "submission export failed");
            warnings.push(format!("Exporten kunde inte genomföras: {err}"));
            false
        }
    };

    Ok(Json(ExportResponse {
        delivered,
        warnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySessionStore;
    use ledarskap::flow::FlowGateway;
    use ledarskap::survey::answers::QUESTIONS_PER_PAGE;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingFlow {
        lookup: Option<LookupMatch>,
        accept_submissions: bool,
        logs: Mutex<Vec<ParticipantLog>>,
        submissions: Mutex<Vec<SubmissionRecord>>,
    }

    impl RecordingFlow {
        fn disabled() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn with_lookup(lookup: LookupMatch) -> Arc<Self> {
            Arc::new(Self {
                lookup: Some(lookup),
                accept_submissions: true,
                ..Self::default()
            })
        }
    }

    #[async_trait::async_trait]
    impl FlowGateway for RecordingFlow {
        async fn log_participant(&self, entry: &ParticipantLog) -> Result<(), FlowError> {
            self.logs
                .lock()
                .expect("log mutex poisoned")
                .push(entry.clone());
            Ok(())
        }

        async fn lookup_manager(&self, _request: &LookupRequest) -> Result<LookupMatch, FlowError> {
            self.lookup.clone().ok_or(FlowError::NotConfigured)
        }

        async fn submit_record(&self, record: &SubmissionRecord) -> Result<(), FlowError> {
            if !self.accept_submissions {
                return Err(FlowError::NotConfigured);
            }
            self.submissions
                .lock()
                .expect("submission mutex poisoned")
                .push(record.clone());
            Ok(())
        }
    }

    fn test_state(flow: Arc<RecordingFlow>) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
            sessions: InMemorySessionStore::default(),
            flow,
        }
    }

    async fn create_session(state: &AppState, role: Role) -> CreateSessionResponse {
        let Json(body) = create_session_endpoint(
            Extension(state.clone()),
            Json(CreateSessionRequest {
                name: "Eva Ek".to_string(),
                company: "Acme AB".to_string(),
                phone: "070-1234567".to_string(),
                email: "eva@acme.se".to_string(),
                role,
            }),
        )
        .await
        .expect("session created");
        body
    }

    async fn complete_active_survey(state: &AppState, session_id: &str) {
        for page in 0..PAGE_COUNT {
            let answers = (page * QUESTIONS_PER_PAGE..(page + 1) * QUESTIONS_PER_PAGE)
                .map(|index| AnswerInput { index, value: 4 })
                .collect();
            record_answers_endpoint(
                Extension(state.clone()),
                Path(session_id.to_string()),
                Json(RecordAnswersRequest { answers }),
            )
            .await
            .expect("answers recorded");
            if page + 1 < PAGE_COUNT {
                next_page_endpoint(Extension(state.clone()), Path(session_id.to_string()))
                    .await
                    .expect("page advances");
            }
        }
        submit_endpoint(Extension(state.clone()), Path(session_id.to_string()))
            .await
            .expect("questionnaire submits");
    }

    #[tokio::test]
    async fn manager_session_flows_from_landing_to_report() {
        let state = test_state(RecordingFlow::disabled());
        let created = create_session(&state, Role::Manager).await;
        assert_eq!(created.next, FlowStep::Questionnaire);
        let code = created.unique_code.expect("manager gets a code");
        assert_eq!(code.len(), 8);

        let Json(questionnaire) = questionnaire_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
        )
        .await
        .expect("questionnaire loads");
        assert_eq!(questionnaire.page, 0);
        assert_eq!(questionnaire.page_count, 4);
        assert_eq!(questionnaire.statements.len(), 5);
        assert!(!questionnaire.page_complete);

        complete_active_survey(&state, &created.session_id).await;

        let Json(report) =
            report_endpoint(Extension(state.clone()), Path(created.session_id.clone()))
                .await
                .expect("report builds");
        assert_eq!(report.sections.len(), 3);
        assert_eq!(report.sections[0].rows[0].value, 28);
        assert_eq!(report.sections[1].rows[0].value, 32);
        assert_eq!(report.sections[2].rows[0].value, 20);
        // Roles never surveyed render as zero.
        assert_eq!(report.sections[0].rows[2].value, 0);
    }

    #[tokio::test]
    async fn forward_navigation_is_gated_on_a_complete_page() {
        let state = test_state(RecordingFlow::disabled());
        let created = create_session(&state, Role::Manager).await;

        let result =
            next_page_endpoint(Extension(state.clone()), Path(created.session_id.clone())).await;
        assert!(matches!(
            result,
            Err(AppError::Session(SessionError::PageIncomplete { page: 0, .. }))
        ));

        let Json(status) = previous_page_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
        )
        .await
        .expect("backward navigation is unconditional");
        assert_eq!(status.page, 0);
    }

    #[tokio::test]
    async fn non_manager_passes_code_entry_and_lookup_hit_fills_the_contact() {
        let flow = RecordingFlow::with_lookup(LookupMatch {
            found: true,
            name: None,
            company: Some("Nordic Retail AB".to_string()),
            email: None,
        });
        let state = test_state(flow.clone());
        let created = create_session(&state, Role::Subordinate).await;
        assert_eq!(created.next, FlowStep::CodeEntry);
        assert!(created.unique_code.is_none());

        let Json(body) = code_entry_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
            Json(CodeEntryRequest {
                manager_first_name: "Johan".to_string(),
                unique_code: " KX7PQ2RT ".to_string(),
            }),
        )
        .await
        .expect("code entry passes");
        assert_eq!(body.next, FlowStep::Questionnaire);
        assert!(body.manager_found);
        assert!(body.warnings.is_empty());

        let logs = flow.logs.lock().expect("log mutex poisoned");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].unique_id, "KX7PQ2RT");
        assert_eq!(logs[0].role, "medarbetare");
        drop(logs);

        let session = state
            .sessions
            .snapshot(&created.session_id)
            .expect("session exists");
        assert_eq!(session.contact.company, "Nordic Retail AB");
        assert_eq!(session.contact.name, "Eva Ek");
        assert_eq!(session.contact.manager_first_name.as_deref(), Some("Johan"));
    }

    #[tokio::test]
    async fn lookup_miss_warns_but_lets_the_respondent_continue() {
        let flow = RecordingFlow::with_lookup(LookupMatch::default());
        let state = test_state(flow);
        let created = create_session(&state, Role::PeerManager).await;

        let Json(body) = code_entry_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
            Json(CodeEntryRequest {
                manager_first_name: "Johan".to_string(),
                unique_code: "NOPE1234".to_string(),
            }),
        )
        .await
        .expect("code entry still passes");
        assert_eq!(body.next, FlowStep::Questionnaire);
        assert!(!body.manager_found);
        assert_eq!(body.warnings.len(), 1);

        // The questionnaire is reachable despite the miss.
        let Json(questionnaire) = questionnaire_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
        )
        .await
        .expect("questionnaire loads");
        assert_eq!(questionnaire.role, Role::PeerManager);
    }

    #[tokio::test]
    async fn code_entry_requires_a_code_and_a_first_name() {
        let state = test_state(RecordingFlow::disabled());
        let created = create_session(&state, Role::Subordinate).await;

        let missing_code = code_entry_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
            Json(CodeEntryRequest {
                manager_first_name: "Johan".to_string(),
                unique_code: "   ".to_string(),
            }),
        )
        .await;
        assert!(matches!(
            missing_code,
            Err(AppError::Contact(ContactError::MissingUniqueCode))
        ));

        let missing_name = code_entry_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
            Json(CodeEntryRequest {
                manager_first_name: "  ".to_string(),
                unique_code: "KX7PQ2RT".to_string(),
            }),
        )
        .await;
        assert!(matches!(
            missing_name,
            Err(AppError::Contact(ContactError::MissingManagerFirstName))
        ));
    }

    #[tokio::test]
    async fn export_degrades_to_a_warning_without_an_endpoint() {
        let state = test_state(RecordingFlow::disabled());
        let created = create_session(&state, Role::Manager).await;
        complete_active_survey(&state, &created.session_id).await;

        let Json(body) = export_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
            Json(ExportRequest { include_pdf: false }),
        )
        .await
        .expect("export responds");
        assert!(!body.delivered);
        assert_eq!(body.warnings.len(), 1);
    }

    #[tokio::test]
    async fn export_delivers_the_submission_record() {
        let flow = RecordingFlow::with_lookup(LookupMatch::default());
        let state = test_state(flow.clone());
        let created = create_session(&state, Role::Manager).await;
        complete_active_survey(&state, &created.session_id).await;

        let Json(body) = export_endpoint(
            Extension(state.clone()),
            Path(created.session_id.clone()),
            Json(ExportRequest { include_pdf: true }),
        )
        .await
        .expect("export responds");
        assert!(body.delivered);
        assert!(body.warnings.is_empty());

        let submissions = flow.submissions.lock().expect("submission mutex poisoned");
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].sum_listening, 28);
        assert!(submissions[0].has_pdf);
        assert!(submissions[0].pdf_base64.is_some());
    }

    #[tokio::test]
    async fn unknown_sessions_get_a_not_found_error() {
        let state = test_state(RecordingFlow::disabled());
        let result =
            report_endpoint(Extension(state.clone()), Path("MISSING00".to_string())).await;
        assert!(matches!(result, Err(AppError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn document_download_carries_pdf_headers() {
        let state = test_state(RecordingFlow::disabled());
        let created = create_session(&state, Role::Manager).await;
        complete_active_survey(&state, &created.session_id).await;

        let app = survey_router().layer(Extension(state.clone()));
        let request = axum::http::Request::builder()
            .uri(format!("/api/v1/sessions/{}/report.pdf", created.session_id))
            .body(axum::body::Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some(PDF_MIME_TYPE)
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .expect("attachment disposition");
        assert!(disposition.as_bytes().starts_with(b"attachment; filename="));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn healthcheck_is_reachable_through_the_router() {
        let state = test_state(RecordingFlow::disabled());
        let app = survey_router().layer(Extension(state));
        let request = axum::http::Request::builder()
            .uri("/health")
            .body(axum::body::Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
