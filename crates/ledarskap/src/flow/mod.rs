//! Optional callout to the workflow-automation endpoint. Participant
//! logging, manager lookup by unique code, and submission export all
//! go through the [`FlowGateway`] seam; the HTTP implementation makes
//! a single bounded-timeout attempt per user action. Failures degrade
//! to warnings at the call site and never reach the scoring or layout
//! core.

use crate::config::FlowConfig;
use crate::report::pdf::PDF_FILE_NAME;
use crate::survey::contact::{ContactRecord, UniqueCode};
use crate::survey::domain::{Dimension, Role};
use crate::survey::scoring::DimensionSums;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ERROR_BODY_SNIPPET: usize = 200;

/// Logged when a peer-manager or subordinate enters a manager's code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantLog {
    pub action: &'static str,
    pub unique_id: String,
    pub first_name: String,
    pub role: &'static str,
    pub timestamp: String,
}

impl ParticipantLog {
    pub fn new(code: &UniqueCode, first_name: &str, role: Role, at: DateTime<Utc>) -> Self {
        Self {
            action: "log",
            unique_id: code.as_str().to_string(),
            first_name: first_name.to_string(),
            role: role.wire_key(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub action: &'static str,
    pub unique_id: String,
}

impl LookupRequest {
    pub fn new(code: &UniqueCode) -> Self {
        Self {
            action: "lookup",
            unique_id: code.as_str().to_string(),
        }
    }
}

/// Lookup result. `found: false` leaves the contact record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LookupMatch {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl LookupMatch {
    /// Copies looked-up fields onto the contact record. Only fields the
    /// endpoint actually returned overwrite what the respondent typed.
    pub fn apply_to(&self, contact: &mut ContactRecord) {
        if !self.found {
            return;
        }
        if let Some(name) = non_empty(&self.name) {
            contact.name = name;
        }
        if let Some(company) = non_empty(&self.company) {
            contact.company = company;
        }
        if let Some(email) = non_empty(&self.email) {
            contact.email = email;
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Full submission payload: the three dimension sums, the raw answers,
/// and an optional base64 document attachment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub title: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub sum_listening: u32,
    pub sum_feedback: u32,
    pub sum_goal: u32,
    pub answers_json: String,
    pub submitted_at: String,
    pub secret: String,
    pub has_pdf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_base64: Option<String>,
    pub file_name: String,
}

impl SubmissionRecord {
    pub fn new(
        title: &str,
        contact: &ContactRecord,
        sums: &DimensionSums,
        raw_answers: &[Option<u8>],
        pdf: Option<&[u8]>,
        at: DateTime<Utc>,
    ) -> Result<Self, FlowError> {
        let answers_json =
            serde_json::to_string(raw_answers).map_err(FlowError::SerializeAnswers)?;
        Ok(Self {
            title: title.to_string(),
            name: contact.name.clone(),
            company: contact.company.clone(),
            email: contact.email.clone(),
            sum_listening: sums.sum(Dimension::ActiveListening),
            sum_feedback: sums.sum(Dimension::Feedback),
            sum_goal: sums.sum(Dimension::GoalOrientation),
            answers_json,
            submitted_at: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            secret: contact
                .unique_code
                .as_ref()
                .map(|code| code.as_str().to_string())
                .unwrap_or_default(),
            has_pdf: pdf.is_some(),
            pdf_base64: pdf.map(|bytes| BASE64.encode(bytes)),
            file_name: PDF_FILE_NAME.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("no workflow endpoint configured for this operation")]
    NotConfigured,
    #[error("workflow endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("workflow endpoint returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("unable to serialize answers: {0}")]
    SerializeAnswers(#[source] serde_json::Error),
}

/// Seam between the survey flow and the external automation endpoint.
#[async_trait]
pub trait FlowGateway: Send + Sync {
    async fn log_participant(&self, entry: &ParticipantLog) -> Result<(), FlowError>;
    async fn lookup_manager(&self, request: &LookupRequest) -> Result<LookupMatch, FlowError>;
    async fn submit_record(&self, record: &SubmissionRecord) -> Result<(), FlowError>;
}

/// Production gateway: JSON POSTs with a bounded timeout, one attempt
/// per user action, no retries.
#[derive(Debug, Clone)]
pub struct HttpFlowGateway {
    client: reqwest::Client,
    log_url: Option<String>,
    lookup_url: Option<String>,
    submit_url: Option<String>,
}

impl HttpFlowGateway {
    pub fn from_config(config: &FlowConfig) -> Result<Self, FlowError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            log_url: config.log_url.clone(),
            lookup_url: config.lookup_url.clone(),
            submit_url: config.submit_url.clone(),
        })
    }

    async fn post<T: Serialize + Sync>(
        &self,
        url: &Option<String>,
        payload: &T,
    ) -> Result<reqwest::Response, FlowError> {
        let url = url.as_deref().ok_or(FlowError::NotConfigured)?;
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowError::Status {
                code: status.as_u16(),
                body: body.chars().take(ERROR_BODY_SNIPPET).collect(),
            });
        }
        debug!(%url, code = status.as_u16(), "workflow endpoint accepted payload");
        Ok(response)
    }
}

#[async_trait]
impl FlowGateway for HttpFlowGateway {
    async fn log_participant(&self, entry: &ParticipantLog) -> Result<(), FlowError> {
        self.post(&self.log_url, entry).await.map(|_| ())
    }

    async fn lookup_manager(&self, request: &LookupRequest) -> Result<LookupMatch, FlowError> {
        let response = self.post(&self.lookup_url, request).await?;
        Ok(response.json::<LookupMatch>().await?)
    }

    async fn submit_record(&self, record: &SubmissionRecord) -> Result<(), FlowError> {
        self.post(&self.submit_url, record).await.map(|_| ())
    }
}
