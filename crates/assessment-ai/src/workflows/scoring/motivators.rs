use super::domain::{Motivator, PASSION_THRESHOLD};
use crate::workflows::intake::AssessmentRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotivatorScore {
    pub motivator: Motivator,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotivatorSummary {
    pub passions: Vec<MotivatorScore>,
}

pub fn compute_motivators(row: &AssessmentRow) -> MotivatorSummary {
    let passions = Motivator::ordered()
        .into_iter()
        .filter_map(|motivator| {
            row.score(motivator.column())
                .filter(|score| *score > PASSION_THRESHOLD)
                .map(|score| MotivatorScore { motivator, score })
        })
        .collect();

    MotivatorSummary { passions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_scores_above_seven_are_passions() {
        let row = AssessmentRow::new(
            "Ana",
            vec![
                ("Conhecimento e Descoberta:".to_string(), "7.0".to_string()),
                ("Estética:".to_string(), "7.01".to_string()),
                ("Liderança:".to_string(), "9".to_string()),
                ("Paz e Harmonia:".to_string(), "3".to_string()),
                ("Ajudar os Outros:".to_string(), "".to_string()),
            ],
        );

        let summary = compute_motivators(&row);
        let passions: Vec<Motivator> = summary
            .passions
            .iter()
            .map(|entry| entry.motivator)
            .collect();

        assert_eq!(passions, vec![Motivator::Aesthetics, Motivator::Leadership]);
        assert!(summary
            .passions
            .iter()
            .all(|entry| entry.score > PASSION_THRESHOLD));
    }

    #[test]
    fn labels_drop_the_export_colon() {
        for motivator in Motivator::ordered() {
            assert!(motivator.column().ends_with(':'));
            assert!(!motivator.label().ends_with(':'));
            assert_eq!(motivator.column().trim_end_matches(':'), motivator.label());
        }
    }
}
