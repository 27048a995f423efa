mod parser;
mod row;

pub use row::{AssessmentRow, NAME_COLUMN};

use std::io::Read;
use std::path::Path;

/// Failures while reading an uploaded table or selecting a person from it.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read assessment export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid assessment CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column 'Assessment Taker Name' is missing")]
    MissingNameColumn,
    #[error("no assessment found for '{0}'")]
    PersonNotFound(String),
}

/// Rows of one upload, in file order.
#[derive(Debug, Clone, Default)]
pub struct AssessmentTable {
    rows: Vec<AssessmentRow>,
}

impl AssessmentTable {
    pub fn new(rows: Vec<AssessmentRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AssessmentRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct non-blank names in first-seen order.
    pub fn people(&self) -> Vec<String> {
        let mut people: Vec<String> = Vec::new();
        for row in &self.rows {
            if row.name.is_empty() || people.iter().any(|name| name == &row.name) {
                continue;
            }
            people.push(row.name.clone());
        }
        people
    }

    /// First row recorded for `person`.
    pub fn find(&self, person: &str) -> Result<&AssessmentRow, InputError> {
        let wanted = person.trim();
        self.rows
            .iter()
            .find(|row| !wanted.is_empty() && row.name == wanted)
            .ok_or_else(|| InputError::PersonNotFound(wanted.to_string()))
    }
}

pub struct AssessmentImporter;

impl AssessmentImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AssessmentTable, InputError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<AssessmentTable, InputError> {
        let rows = parser::parse_rows(reader)?;
        tracing::debug!(rows = rows.len(), "assessment table parsed");
        Ok(AssessmentTable::new(rows))
    }
}
