use super::domain::{DiscFactor, EffortLevel};
use crate::workflows::intake::AssessmentRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscFactorResult {
    pub factor: DiscFactor,
    pub natural: f64,
    pub adapted: f64,
    pub adaptation: f64,
    pub effort: EffortLevel,
}

/// Factors that had both a natural and a work score, in DISC order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscProfile {
    pub factors: Vec<DiscFactorResult>,
}

impl DiscProfile {
    pub fn get(&self, factor: DiscFactor) -> Option<&DiscFactorResult> {
        self.factors.iter().find(|result| result.factor == factor)
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }
}

/// Band thresholds are inclusive upper bounds except the stress band, which starts at 3.0.
pub fn classify_effort(adaptation: f64) -> EffortLevel {
    if adaptation <= 1.0 {
        EffortLevel::Low
    } else if adaptation > 1.0 && adaptation <= 2.0 {
        EffortLevel::Moderate
    } else if adaptation > 2.0 && adaptation <= 2.9 {
        EffortLevel::ModeratelyHigh
    } else if adaptation >= 3.0 {
        EffortLevel::PotentialStress
    } else {
        EffortLevel::Undefined
    }
}

pub fn compute_disc_factors(row: &AssessmentRow) -> DiscProfile {
    let factors = DiscFactor::ordered()
        .into_iter()
        .filter_map(|factor| {
            let natural = row.score(factor.natural_column())?;
            let adapted = row.score(factor.work_column())?;
            let adaptation = (adapted - natural).abs();

            Some(DiscFactorResult {
                factor,
                natural,
                adapted,
                adaptation,
                effort: classify_effort(adaptation),
            })
        })
        .collect();

    DiscProfile { factors }
}
