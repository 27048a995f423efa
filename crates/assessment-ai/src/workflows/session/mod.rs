//! Per-session analysis state: the uploaded table, the current report and the
//! follow-up conversation about it.
//!
//! Sessions never share state. Generating a report always starts from an empty
//! session, so a transcript only ever refers to the report it was opened with.

pub mod analysis;
pub mod conversation;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisSession, ChatAnswer, GenerationError, SessionError, SessionState};
pub use conversation::{ConversationTranscript, ConversationTurn, Role, GREETING};
pub use repository::{SessionId, SessionRecord, SessionStore, SessionStoreError};
pub use router::analysis_router;
pub use service::{AnalysisService, AnalysisServiceError, ChatOutcome, ReportOutcome};
pub use views::{ChatOutcomeView, ReportOutcomeView, SessionView};
