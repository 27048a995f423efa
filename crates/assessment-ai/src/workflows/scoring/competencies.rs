use super::domain::{Competency, RELIABILITY_COLUMN, STRENGTH_THRESHOLD};
use crate::workflows::intake::AssessmentRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompetencyScore {
    pub competency: Competency,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetencySummary {
    pub strengths: Vec<CompetencyScore>,
    pub gaps: Vec<CompetencyScore>,
    pub reliability: Option<f64>,
}

pub fn compute_competencies(row: &AssessmentRow) -> CompetencySummary {
    let mut summary = CompetencySummary {
        reliability: row.score(RELIABILITY_COLUMN),
        ..CompetencySummary::default()
    };

    for competency in Competency::ordered() {
        let Some(score) = row.score(competency.column()) else {
            continue;
        };

        let entry = CompetencyScore { competency, score };
        if score > STRENGTH_THRESHOLD {
            summary.strengths.push(entry);
        } else {
            summary.gaps.push(entry);
        }
    }

    summary
}
