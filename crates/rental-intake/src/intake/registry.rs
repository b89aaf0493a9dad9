use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::localization::Language;
use super::ports::{ApplicationGateway, PlacesProvider, Translator};
use super::session::{IntakeSession, SessionError, SessionView};
use super::submission::SubmissionOutcome;
use crate::config::IntakeConfig;

const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Identifier wrapper for open intake sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("intake-{id:06}"))
}

pub type SharedSession<T, P, G> = Arc<AsyncMutex<IntakeSession<T, P, G>>>;

struct SessionEntry<T, P, G> {
    session: SharedSession<T, P, G>,
    last_seen: Instant,
}

/// In-memory home of the sessions served over HTTP.
///
/// Operations that wait on a backend lock the session only to start and to
/// finish, so other requests for the same session are served meanwhile.
pub struct SessionRegistry<T, P, G> {
    translator: Arc<T>,
    places: Arc<P>,
    gateway: Arc<G>,
    config: IntakeConfig,
    sessions: Mutex<HashMap<SessionId, SessionEntry<T, P, G>>>,
}

impl<T, P, G> SessionRegistry<T, P, G>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    pub fn new(translator: Arc<T>, places: Arc<P>, gateway: Arc<G>, config: IntakeConfig) -> Self {
        Self {
            translator,
            places,
            gateway,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn open(&self) -> (SessionId, SharedSession<T, P, G>) {
        let session = IntakeSession::new(
            Arc::clone(&self.translator),
            Arc::clone(&self.places),
            Arc::clone(&self.gateway),
            &self.config,
        );
        let id = next_session_id();
        let shared = Arc::new(AsyncMutex::new(session));

        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                id.clone(),
                SessionEntry {
                    session: Arc::clone(&shared),
                    last_seen: Instant::now(),
                },
            );
        info!(session = %id.0, "intake session opened");

        (id, shared)
    }

    /// Looks up a session and marks it as recently used.
    pub fn get(&self, id: &SessionId) -> Result<SharedSession<T, P, G>, SessionError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.0.clone()))?;
        entry.last_seen = Instant::now();
        Ok(Arc::clone(&entry.session))
    }

    pub fn close(&self, id: &SessionId) -> Result<(), SessionError> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .map(|_| info!(session = %id.0, "intake session closed"))
            .ok_or_else(|| SessionError::NotFound(id.0.clone()))
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops sessions untouched for the configured idle TTL. Returns how many went.
    pub fn sweep_idle(&self) -> usize {
        let ttl = self.config.session_idle_ttl;
        if ttl.is_zero() {
            return 0;
        }

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "idle intake sessions expired");
        }
        removed
    }

    /// Runs [`SessionRegistry::sweep_idle`] periodically until the registry is dropped.
    ///
    /// Returns `None` when idle expiry is disabled.
    pub fn spawn_idle_sweeper(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let ttl = self.config.session_idle_ttl;
        if ttl.is_zero() {
            return None;
        }

        let registry = Arc::downgrade(self);
        let period = ttl.min(MAX_SWEEP_PERIOD);
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(registry) = registry.upgrade() else {
                    break;
                };
                registry.sweep_idle();
            }
        }))
    }

    /// Address search that releases the session while it waits on the network.
    ///
    /// With a debounce configured the search first sleeps, and is dropped if a
    /// newer keystroke arrived in the meantime. Results are applied only when
    /// still current.
    pub async fn search_address(
        &self,
        id: &SessionId,
        text: String,
    ) -> Result<SessionView, SessionError> {
        let session = self.get(id)?;
        let pending = session.lock().await.begin_address_search(text);

        if let Some(pending) = pending {
            let debounce = self.config.search_debounce;
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
                if !session.lock().await.is_search_current(pending.token()) {
                    debug!(session = %id.0, query = pending.query(), "address search superseded");
                    return Ok(session.lock().await.view());
                }
            }

            let completed = pending.resolve().await;
            session.lock().await.complete_address_search(completed);
        }

        let view = session.lock().await.view();
        Ok(view)
    }

    /// Switches the label language without holding the session during translation.
    pub async fn select_language(
        &self,
        id: &SessionId,
        language: Language,
    ) -> Result<SessionView, SessionError> {
        let session = self.get(id)?;
        let pending = session.lock().await.begin_language_change(language);

        if let Some(pending) = pending {
            let completed = pending.resolve().await;
            if !session.lock().await.complete_language_change(completed) {
                debug!(session = %id.0, language = language.code(), "language switch superseded");
            }
        }

        let view = session.lock().await.view();
        Ok(view)
    }

    pub async fn refresh_labels(&self, id: &SessionId) -> Result<SessionView, SessionError> {
        let session = self.get(id)?;
        let pending = session.lock().await.begin_label_refresh();

        if let Some(pending) = pending {
            let completed = pending.resolve().await;
            session.lock().await.complete_language_change(completed);
        }

        let view = session.lock().await.view();
        Ok(view)
    }

    /// Submits the session's form. The backend call runs on its own task so a
    /// dropped request cannot leave the submit pending.
    pub async fn submit(
        &self,
        id: &SessionId,
    ) -> Result<(SubmissionOutcome, SessionView), SessionError> {
        let session = self.get(id)?;
        let pending = session.lock().await.begin_submit();

        let outcome = match pending {
            Err(outcome) => outcome,
            Ok(pending) => {
                let shared = Arc::clone(&session);
                let task = tokio::spawn(async move {
                    let outcome = pending.resolve().await;
                    shared.lock().await.complete_submit(&outcome);
                    outcome
                });
                match task.await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        warn!(session = %id.0, error = %err, "submission task aborted");
                        let outcome = SubmissionOutcome::Failed {
                            reason: err.to_string(),
                        };
                        session.lock().await.complete_submit(&outcome);
                        outcome
                    }
                }
            }
        };

        let view = session.lock().await.view();
        Ok((outcome, view))
    }
}
