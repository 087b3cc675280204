//! Rendering stored answers as strings
use chrono::format::{Item, StrftimeItems};
use forms_core::{format_number, AnswerValue, DateValue, EngineConfig};
use serde_json::Value;

/// Shown for an answer row that carries nothing displayable
pub const NO_ANSWER: &str = "No answer";

const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// chrono `strftime` format for dates
    pub date_format: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl SummaryOptions {
    /// Use `format` for dates. An invalid format keeps the default.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        if !StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            self.date_format = format;
        }
        self
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::default().with_date_format(config.date_display_format.clone())
    }
}

/// Values a categorical answer contributes to its histogram
pub fn categorical_values(value: &AnswerValue) -> Vec<String> {
    match value {
        AnswerValue::Json(Value::Array(items)) => items.iter().map(json_item_text).collect(),
        AnswerValue::Text(text) if !text.is_empty() => vec![text.clone()],
        AnswerValue::Number(n) => vec![format_number(*n)],
        _ => Vec::new(),
    }
}

/// One display string per answer, JSON kept as JSON
pub fn display_text(value: &AnswerValue, options: &SummaryOptions) -> String {
    match value {
        AnswerValue::Text(text) if !text.is_empty() => text.clone(),
        AnswerValue::Date(date) => display_date(date, options),
        AnswerValue::Number(n) => format_number(*n),
        AnswerValue::Json(json) => json.to_string(),
        AnswerValue::Text(_) | AnswerValue::Skipped => NO_ANSWER.to_string(),
    }
}

/// Like `display_text`, but lists read as `a, b`
pub(crate) fn display_answer(value: &AnswerValue, options: &SummaryOptions) -> String {
    match value {
        AnswerValue::Json(Value::Array(items)) => items
            .iter()
            .map(json_item_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => display_text(other, options),
    }
}

fn display_date(date: &DateValue, options: &SummaryOptions) -> String {
    match date {
        DateValue::Parsed(dt) => dt.format(&options.date_format).to_string(),
        DateValue::Unparseable(raw) => raw.clone(),
    }
}

fn json_item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
