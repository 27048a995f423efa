use super::sections::ReportSection;
use serde::Serialize;
use serde_json::{Map, Value};

/// Text used for any section the model left out.
pub const MISSING_SECTION_FALLBACK: &str = "Not available.";

/// A complete report: every section is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    sections: Vec<(ReportSection, String)>,
}

impl ReportDocument {
    pub fn get(&self, section: ReportSection) -> &str {
        self.sections
            .iter()
            .find(|(candidate, _)| *candidate == section)
            .map(|(_, content)| content.as_str())
            .unwrap_or(MISSING_SECTION_FALLBACK)
    }

    pub(crate) fn set(&mut self, section: ReportSection, content: impl Into<String>) {
        if let Some((_, existing)) = self
            .sections
            .iter_mut()
            .find(|(candidate, _)| *candidate == section)
        {
            *existing = content.into();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReportSection, &str)> {
        self.sections
            .iter()
            .map(|(section, content)| (*section, content.as_str()))
    }

    /// Key/content object in the response schema shape.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(section, content)| (section.key().to_string(), Value::String(content.into())))
            .collect();
        Value::Object(map)
    }

    pub fn views(&self) -> Vec<ReportSectionView> {
        self.iter()
            .map(|(section, content)| ReportSectionView {
                key: section.key(),
                label: section.label(),
                content: content.to_string(),
            })
            .collect()
    }

    /// Markdown-ish rendering with one heading per section.
    pub fn render_labeled(&self) -> String {
        let mut rendered = String::new();
        for (index, (section, content)) in self.iter().enumerate() {
            if index > 0 {
                rendered.push('\n');
            }
            rendered.push_str(&format!("### {}. {}\n{}\n", index + 1, section.label(), content));
        }
        rendered
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSectionView {
    pub key: &'static str,
    pub label: &'static str,
    pub content: String,
}

/// The model reply could not be read as a report object; `raw` is the untouched reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("AI response is not a valid report object: {reason}")]
pub struct ReportParseError {
    pub raw: String,
    pub reason: String,
}

pub fn assemble(raw: &str) -> Result<ReportDocument, ReportParseError> {
    let payload = strip_code_fence(raw);

    let value: Value = serde_json::from_str(payload).map_err(|err| ReportParseError {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    let Value::Object(object) = value else {
        return Err(ReportParseError {
            raw: raw.to_string(),
            reason: "expected a JSON object".to_string(),
        });
    };

    let sections = ReportSection::ordered()
        .into_iter()
        .map(|section| {
            let content = object
                .get(section.key())
                .and_then(section_text)
                .unwrap_or_else(|| MISSING_SECTION_FALLBACK.to_string());
            (section, content)
        })
        .collect();

    Ok(ReportDocument { sections })
}

fn section_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => format!("- {text}"),
                    other => format!("- {other}"),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => Some(other.to_string()),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let mut payload = raw.trim();

    if let Some(rest) = payload.strip_prefix("```") {
        payload = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
    }
    if let Some(rest) = payload.trim_end().strip_suffix("```") {
        payload = rest;
    }

    payload.trim()
}
