use serde::Serialize;

use super::analysis::SessionState;
use super::conversation::ConversationTurn;
use super::repository::SessionRecord;
use super::service::{ChatOutcome, ReportOutcome};
use crate::workflows::report::ReportSectionView;
use crate::workflows::scoring::{AssessmentScoresView, DiscChartView};

#[derive(Debug, Clone, Serialize)]
pub struct RawCellView {
    pub column: String,
    pub value: String,
}

/// Snapshot of a session as shown to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub people: Vec<String>,
    pub state: SessionState,
    pub state_label: &'static str,
    pub selected_person: Option<String>,
    pub report: Vec<ReportSectionView>,
    pub scores: Option<AssessmentScoresView>,
    pub chart: Option<DiscChartView>,
    pub raw_row: Vec<RawCellView>,
    pub transcript: Vec<ConversationTurn>,
}

impl SessionRecord {
    pub fn view(&self) -> SessionView {
        let analysis = &self.analysis;
        let state = analysis.state();

        SessionView {
            session_id: self.id.0.clone(),
            people: self.table.people(),
            state,
            state_label: state.label(),
            selected_person: analysis.row().map(|row| row.name.clone()),
            report: analysis
                .report()
                .map(|report| report.views())
                .unwrap_or_default(),
            scores: analysis.scores().map(|scores| scores.view()),
            chart: analysis.disc().map(|disc| disc.chart()),
            raw_row: analysis
                .row()
                .map(|row| {
                    row.cells()
                        .map(|(column, value)| RawCellView {
                            column: column.to_string(),
                            value: value.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            transcript: analysis.transcript().turns().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcomeView {
    pub session_id: String,
    pub person: String,
    pub report: Vec<ReportSectionView>,
    pub scores: AssessmentScoresView,
    pub chart: DiscChartView,
    pub elapsed_ms: u64,
}

impl ReportOutcome {
    pub fn view(&self) -> ReportOutcomeView {
        ReportOutcomeView {
            session_id: self.session_id.0.clone(),
            person: self.scores.person.clone(),
            report: self.report.views(),
            scores: self.scores.view(),
            chart: self.scores.disc.chart(),
            elapsed_ms: self.elapsed.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcomeView {
    pub answer: String,
    pub failed: bool,
    pub transcript: Vec<ConversationTurn>,
    pub elapsed_ms: u64,
}

impl ChatOutcome {
    pub fn view(&self) -> ChatOutcomeView {
        ChatOutcomeView {
            answer: self.answer.content.clone(),
            failed: self.answer.error.is_some(),
            transcript: self.transcript.clone(),
            elapsed_ms: self.elapsed.as_millis() as u64,
        }
    }
}
