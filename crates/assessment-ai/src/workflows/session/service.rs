use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tokio::sync::Mutex as SessionLock;
use tracing::{info, warn};

use super::analysis::{AnalysisSession, ChatAnswer, GenerationError, SessionError};
use super::conversation::ConversationTurn;
use super::repository::{SessionId, SessionRecord, SessionStore, SessionStoreError};
use crate::config::ConfigError;
use crate::workflows::gateway::{CompletionGateway, GatewayError};
use crate::workflows::intake::{AssessmentImporter, InputError};
use crate::workflows::report::prompt::FOLLOW_UP_PROMPT_VERSION;
use crate::workflows::report::{
    ReportDocument, ReportParseError, ReportPromptBuilder, REPORT_PROMPT_VERSION,
};
use crate::workflows::scoring::{self, AssessmentScores};

/// Service composing the session store, the prompt builder and the AI gateway.
///
/// Without a gateway the scoring operations keep working and every AI-backed
/// call fails with a configuration error. Report generation and questions on
/// the same session run one at a time, from fetch to store update.
pub struct AnalysisService<G: ?Sized, S> {
    store: Arc<S>,
    gateway: Option<Arc<G>>,
    prompts: ReportPromptBuilder,
    locks: Mutex<HashMap<SessionId, Arc<SessionLock<()>>>>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

/// Successful report generation plus how long the model took.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub session_id: SessionId,
    pub report: ReportDocument,
    pub scores: AssessmentScores,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub answer: ChatAnswer,
    pub transcript: Vec<ConversationTurn>,
    pub elapsed: Duration,
}

impl<G, S> AnalysisService<G, S>
where
    G: CompletionGateway + ?Sized + 'static,
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, gateway: Option<Arc<G>>, prompts: ReportPromptBuilder) -> Self {
        Self {
            store,
            gateway,
            prompts,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.gateway.is_some()
    }

    /// Parse an upload and open a new, empty session for it.
    pub fn open<R: Read>(&self, csv: R) -> Result<SessionRecord, AnalysisServiceError> {
        let table = AssessmentImporter::from_reader(csv)?;
        let record = SessionRecord {
            id: next_session_id(),
            table,
            analysis: AnalysisSession::default(),
        };

        let stored = self.store.insert(record)?;
        info!(session = %stored.id.0, people = stored.table.people().len(), "session opened");
        Ok(stored)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, AnalysisServiceError> {
        let record = self
            .store
            .fetch(session_id)?
            .ok_or(SessionStoreError::NotFound)?;
        Ok(record)
    }

    /// Scoring only; never touches the gateway or the session's analysis.
    pub fn scores(
        &self,
        session_id: &SessionId,
        person: &str,
    ) -> Result<AssessmentScores, AnalysisServiceError> {
        let record = self.get(session_id)?;
        let row = record.table.find(person)?;
        Ok(scoring::analyze(row))
    }

    /// Reset the session and generate a fresh report for `person`.
    ///
    /// The reset is persisted before the gateway and person checks, so a
    /// rejected request still leaves the session empty.
    pub async fn generate_report(
        &self,
        session_id: &SessionId,
        person: &str,
        evaluation_date: NaiveDate,
    ) -> Result<ReportOutcome, AnalysisServiceError> {
        let lock = self.session_lock(session_id)?;
        let _guard = lock.lock().await;

        let mut record = self.get(session_id)?;
        record.analysis.reset();

        let prepared = self.gateway().and_then(|gateway| {
            let row = record.table.find(person)?.clone();
            Ok((gateway, row))
        });
        let (gateway, row) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                self.store.update(record)?;
                return Err(err);
            }
        };

        let started = Instant::now();
        let result = record
            .analysis
            .generate_report(&row, gateway.as_ref(), &self.prompts, evaluation_date)
            .await
            .cloned();
        let elapsed = started.elapsed();

        let outcome = match result {
            Ok(report) => {
                info!(
                    session = %session_id.0,
                    person = %row.name,
                    prompt_version = REPORT_PROMPT_VERSION,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "report generated"
                );
                let scores = record
                    .analysis
                    .scores()
                    .cloned()
                    .unwrap_or_else(|| scoring::analyze(&row));
                Ok(ReportOutcome {
                    session_id: session_id.clone(),
                    report,
                    scores,
                    elapsed,
                })
            }
            Err(err) => {
                warn!(
                    session = %session_id.0,
                    person = %row.name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %err,
                    "report generation failed"
                );
                Err(AnalysisServiceError::from(err))
            }
        };

        self.store.update(record)?;
        outcome
    }

    /// Ask a follow-up question against the session's current report.
    pub async fn ask(
        &self,
        session_id: &SessionId,
        question: &str,
    ) -> Result<ChatOutcome, AnalysisServiceError> {
        let gateway = self.gateway()?;
        let lock = self.session_lock(session_id)?;
        let _guard = lock.lock().await;

        let mut record = self.get(session_id)?;

        let started = Instant::now();
        let answer = record
            .analysis
            .ask(question, gateway.as_ref(), &self.prompts)
            .await?;
        let elapsed = started.elapsed();

        info!(
            session = %session_id.0,
            prompt_version = FOLLOW_UP_PROMPT_VERSION,
            elapsed_ms = elapsed.as_millis() as u64,
            failed = answer.error.is_some(),
            "follow-up answered"
        );

        let transcript = record.analysis.transcript().turns().to_vec();
        self.store.update(record)?;

        Ok(ChatOutcome {
            answer,
            transcript,
            elapsed,
        })
    }

    fn session_lock(
        &self,
        session_id: &SessionId,
    ) -> Result<Arc<SessionLock<()>>, AnalysisServiceError> {
        let mut locks = self.locks.lock().map_err(|_| {
            SessionStoreError::Unavailable("session lock table poisoned".to_string())
        })?;
        Ok(locks.entry(session_id.clone()).or_default().clone())
    }

    fn gateway(&self) -> Result<Arc<G>, AnalysisServiceError> {
        self.gateway
            .clone()
            .ok_or(AnalysisServiceError::Configuration(ConfigError::MissingApiKey))
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error(transparent)]
    Configuration(ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    ReportParse(#[from] ReportParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl From<GenerationError> for AnalysisServiceError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Gateway(err) => Self::Gateway(err),
            GenerationError::ReportParse(err) => Self::ReportParse(err),
        }
    }
}

impl From<ConfigError> for AnalysisServiceError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err)
    }
}
