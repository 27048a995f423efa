use super::disc::{DiscFactorResult, DiscProfile};
use super::domain::{DiscFactor, EffortLevel};
use super::AssessmentScores;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DiscFactorView {
    pub factor: DiscFactor,
    pub factor_label: &'static str,
    pub natural: f64,
    pub adapted: f64,
    pub adaptation: f64,
    pub effort: EffortLevel,
    pub effort_label: &'static str,
}

impl From<&DiscFactorResult> for DiscFactorView {
    fn from(result: &DiscFactorResult) -> Self {
        Self {
            factor: result.factor,
            factor_label: result.factor.label(),
            natural: result.natural,
            adapted: result.adapted,
            adaptation: result.adaptation,
            effort: result.effort,
            effort_label: result.effort.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntryView {
    pub label: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentScoresView {
    pub person: String,
    pub disc: Vec<DiscFactorView>,
    pub passions: Vec<ScoreEntryView>,
    pub strengths: Vec<ScoreEntryView>,
    pub gaps: Vec<ScoreEntryView>,
    pub reliability: Option<f64>,
}

impl AssessmentScores {
    pub fn view(&self) -> AssessmentScoresView {
        AssessmentScoresView {
            person: self.person.clone(),
            disc: self.disc.factors.iter().map(DiscFactorView::from).collect(),
            passions: self
                .motivators
                .passions
                .iter()
                .map(|entry| ScoreEntryView {
                    label: entry.motivator.label(),
                    score: entry.score,
                })
                .collect(),
            strengths: self
                .competencies
                .strengths
                .iter()
                .map(|entry| ScoreEntryView {
                    label: entry.competency.label(),
                    score: entry.score,
                })
                .collect(),
            gaps: self
                .competencies
                .gaps
                .iter()
                .map(|entry| ScoreEntryView {
                    label: entry.competency.label(),
                    score: entry.score,
                })
                .collect(),
            reliability: self.competencies.reliability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Grouped bars: one category per scored factor, one series per style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscChartView {
    pub categories: Vec<&'static str>,
    pub series: Vec<ChartSeries>,
}

impl DiscProfile {
    pub fn chart(&self) -> DiscChartView {
        DiscChartView {
            categories: self
                .factors
                .iter()
                .map(|result| result.factor.label())
                .collect(),
            series: vec![
                ChartSeries {
                    name: "Natural",
                    values: self.factors.iter().map(|result| result.natural).collect(),
                },
                ChartSeries {
                    name: "Adaptado",
                    values: self.factors.iter().map(|result| result.adapted).collect(),
                },
            ],
        }
    }
}
