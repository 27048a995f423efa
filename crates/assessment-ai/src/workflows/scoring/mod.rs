//! Deterministic metrics derived from one assessment row.
//!
//! Nothing here performs I/O. Missing or non-numeric columns shrink the
//! result instead of failing it.

mod competencies;
mod disc;
pub mod domain;
mod motivators;
pub mod views;

pub use competencies::{compute_competencies, CompetencyScore, CompetencySummary};
pub use disc::{classify_effort, compute_disc_factors, DiscFactorResult, DiscProfile};
pub use domain::{Competency, DiscFactor, EffortLevel, Motivator};
pub use motivators::{compute_motivators, MotivatorScore, MotivatorSummary};
pub use views::{AssessmentScoresView, DiscChartView};

use crate::workflows::intake::AssessmentRow;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentScores {
    pub person: String,
    pub disc: DiscProfile,
    pub motivators: MotivatorSummary,
    pub competencies: CompetencySummary,
}

impl AssessmentScores {
    /// True when the row contributed no usable metric at all.
    pub fn is_empty(&self) -> bool {
        self.disc.is_empty()
            && self.motivators.passions.is_empty()
            && self.competencies.strengths.is_empty()
            && self.competencies.gaps.is_empty()
            && self.competencies.reliability.is_none()
    }
}

pub fn analyze(row: &AssessmentRow) -> AssessmentScores {
    AssessmentScores {
        person: row.name.clone(),
        disc: compute_disc_factors(row),
        motivators: compute_motivators(row),
        competencies: compute_competencies(row),
    }
}

/// Two decimals at most, trailing zeros dropped (`3`, `2.5`, `3.1`).
pub fn format_score(value: f64) -> String {
    let formatted = format!("{value:.2}");
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
