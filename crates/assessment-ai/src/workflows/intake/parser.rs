use super::row::{AssessmentRow, NAME_COLUMN};
use super::InputError;
use std::io::Read;

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<AssessmentRow>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    let name_index = headers
        .iter()
        .position(|header| header == NAME_COLUMN)
        .ok_or(InputError::MissingNameColumn)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let name = record.get(name_index).unwrap_or_default().trim().to_string();

        let cells = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != name_index)
            .filter_map(|(index, header)| {
                record
                    .get(index)
                    .map(|value| (header.clone(), value.to_string()))
            })
            .collect();

        rows.push(AssessmentRow::new(name, cells));
    }

    Ok(rows)
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
pub(crate) fn normalize_header_for_tests(raw: &str) -> String {
    normalize_header(raw)
}
