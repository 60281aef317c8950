use ledarskap::flow::FlowGateway;
use ledarskap::survey::contact::generate_token;
use ledarskap::survey::SurveySession;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Session identifiers are longer than the 8-character unique code;
/// they live in URLs, never get read aloud over the phone.
const SESSION_ID_LENGTH: usize = 16;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) sessions: InMemorySessionStore,
    pub(crate) flow: Arc<dyn FlowGateway>,
}

/// Process-local session store. Sessions are per-respondent, short
/// lived, and deliberately not persisted anywhere.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, SurveySession>>>,
}

impl InMemorySessionStore {
    pub(crate) fn insert(&self, session: SurveySession) -> String {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let mut id = generate_token(SESSION_ID_LENGTH);
        while guard.contains_key(&id) {
            id = generate_token(SESSION_ID_LENGTH);
        }
        guard.insert(id.clone(), session);
        id
    }

    /// Runs a closure against the stored session while holding the
    /// store lock, so read-modify-write per request stays atomic.
    pub(crate) fn with_session<R>(
        &self,
        id: &str,
        operate: impl FnOnce(&mut SurveySession) -> R,
    ) -> Option<R> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.get_mut(id).map(operate)
    }

    /// Cloned copy of the session, for read paths that outlive the lock
    /// (document rendering, flow callouts).
    pub(crate) fn snapshot(&self, id: &str) -> Option<SurveySession> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        guard.get(id).cloned()
    }
}
