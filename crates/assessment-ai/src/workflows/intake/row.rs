use serde::Serialize;

pub const NAME_COLUMN: &str = "Assessment Taker Name";

/// One individual's row as uploaded. Cells keep their original text and header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRow {
    pub name: String,
    cells: Vec<(String, String)>,
}

impl AssessmentRow {
    pub fn new(name: impl Into<String>, cells: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.iter().any(|(header, _)| header == column)
    }

    pub fn raw(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric cell lookup. Missing columns, blanks, text and non-finite values are all `None`.
    pub fn score(&self, column: &str) -> Option<f64> {
        self.raw(column).and_then(parse_score)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(header, value)| (header.as_str(), value.as_str()))
    }
}

fn parse_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|score| score.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AssessmentRow {
        AssessmentRow::new(
            "Ana",
            vec![
                ("Dominador Natural".to_string(), "5".to_string()),
                ("Dominador Work".to_string(), " 8.5 ".to_string()),
                ("Estética:".to_string(), "".to_string()),
                ("Liderança:".to_string(), "n/a".to_string()),
                ("Foco no Cliente".to_string(), "NaN".to_string()),
            ],
        )
    }

    #[test]
    fn score_parses_trimmed_numbers() {
        let row = row();
        assert_eq!(row.score("Dominador Natural"), Some(5.0));
        assert_eq!(row.score("Dominador Work"), Some(8.5));
    }

    #[test]
    fn score_treats_blank_text_and_nan_as_absent() {
        let row = row();
        assert!(row.has_column("Estética:"));
        assert_eq!(row.score("Estética:"), None);
        assert_eq!(row.score("Liderança:"), None);
        assert_eq!(row.score("Foco no Cliente"), None);
        assert_eq!(row.score("Missing Column"), None);
        assert!(!row.has_column("Missing Column"));
    }
}
