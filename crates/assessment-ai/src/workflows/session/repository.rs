use super::analysis::AnalysisSession;
use crate::workflows::intake::AssessmentTable;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Everything owned by one session: its upload and its current analysis.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub table: AssessmentTable,
    pub analysis: AnalysisSession,
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, SessionStoreError>;
    fn update(&self, record: SessionRecord) -> Result<(), SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
