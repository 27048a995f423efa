use super::conversation::{failure_message, ConversationTranscript, ConversationTurn, GREETING};
use crate::workflows::gateway::{CompletionGateway, GatewayError};
use crate::workflows::intake::AssessmentRow;
use crate::workflows::report::prompt::EVALUATION_DATE_FORMAT;
use crate::workflows::report::{
    assemble, ReportDocument, ReportParseError, ReportPromptBuilder, ReportSection,
};
use crate::workflows::scoring::{self, AssessmentScores, DiscProfile};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    Active,
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Active => "Active",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    ReportParse(#[from] ReportParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no report has been generated for this session yet")]
    NoActiveReport,
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// Answer recorded for one question. `error` is set when the text is a failure notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAnswer {
    pub content: String,
    pub error: Option<GatewayError>,
}

/// Report, scores, selected row and transcript for one person's analysis.
///
/// Either everything is populated (Active) or nothing is (Empty).
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    report: Option<ReportDocument>,
    scores: Option<AssessmentScores>,
    row: Option<AssessmentRow>,
    transcript: ConversationTranscript,
}

impl AnalysisSession {
    pub fn state(&self) -> SessionState {
        if self.report.is_some() {
            SessionState::Active
        } else {
            SessionState::Empty
        }
    }

    pub fn report(&self) -> Option<&ReportDocument> {
        self.report.as_ref()
    }

    pub fn scores(&self) -> Option<&AssessmentScores> {
        self.scores.as_ref()
    }

    pub fn disc(&self) -> Option<&DiscProfile> {
        self.scores.as_ref().map(|scores| &scores.disc)
    }

    pub fn row(&self) -> Option<&AssessmentRow> {
        self.row.as_ref()
    }

    pub fn transcript(&self) -> &ConversationTranscript {
        &self.transcript
    }

    pub fn reset(&mut self) {
        self.report = None;
        self.scores = None;
        self.row = None;
        self.transcript.clear();
    }

    /// Clears the session, then fills it only if the model returned a usable report.
    pub async fn generate_report<G>(
        &mut self,
        row: &AssessmentRow,
        gateway: &G,
        prompts: &ReportPromptBuilder,
        evaluation_date: NaiveDate,
    ) -> Result<&ReportDocument, GenerationError>
    where
        G: CompletionGateway + ?Sized,
    {
        self.reset();

        let scores = scoring::analyze(row);
        if scores.is_empty() {
            warn!(person = %row.name, "row has no usable assessment metrics");
        }

        let prompt = prompts.build(&scores, evaluation_date);
        let raw = gateway.complete(&prompt).await?;
        let mut report = assemble(&raw)?;
        report.set(
            ReportSection::DataAvaliacao,
            evaluation_date.format(EVALUATION_DATE_FORMAT).to_string(),
        );

        self.transcript.push(ConversationTurn::assistant(GREETING));
        self.scores = Some(scores);
        self.row = Some(row.clone());
        Ok(self.report.insert(report))
    }

    /// Records the question and exactly one assistant turn, even when the gateway fails.
    pub async fn ask<G>(
        &mut self,
        question: &str,
        gateway: &G,
        prompts: &ReportPromptBuilder,
    ) -> Result<ChatAnswer, SessionError>
    where
        G: CompletionGateway + ?Sized,
    {
        let (Some(report), Some(row)) = (self.report.as_ref(), self.row.as_ref()) else {
            return Err(SessionError::NoActiveReport);
        };

        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        let prompt = prompts.build_follow_up(report, row, question);
        self.transcript.push(ConversationTurn::user(question));

        let answer = match gateway.complete(&prompt).await {
            Ok(content) => ChatAnswer {
                content,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "follow-up question failed");
                ChatAnswer {
                    content: failure_message(&err),
                    error: Some(err),
                }
            }
        };

        self.transcript
            .push(ConversationTurn::assistant(answer.content.clone()));
        Ok(answer)
    }
}
