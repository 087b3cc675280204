//! Answer Encoder
//!
//! Maps one raw value to the storage slot its question type calls for.
//! Encoding never fails: values that cannot be stored faithfully are either
//! written as an empty (`Skipped`) row or kept verbatim, and the problem is
//! surfaced as an `EncodingAnomaly` next to the answers. A question whose key
//! is absent from the raw answers gets no row at all.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use forms_core::{
    format_number, Answer, AnswerValue, DateValue, FormDefinition, QuestionType, RawAnswers,
    RawValue,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Naive date-time layouts tried after RFC 3339, interpreted as UTC
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Something about a raw value the encoder could not store as given
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncodingAnomaly {
    /// A multi-select answer that was not an array; stored empty
    #[serde(rename_all = "camelCase")]
    NonArraySelection { question_id: String },

    /// A rating that does not coerce to a number; stored empty
    #[serde(rename_all = "camelCase")]
    NonNumericRating { question_id: String, input: String },

    /// A date that did not parse; stored verbatim
    #[serde(rename_all = "camelCase")]
    InvalidDate { question_id: String, input: String },

    /// File upload answers are not persisted
    #[serde(rename_all = "camelCase")]
    FileUploadNotPersisted { question_id: String },
}

impl EncodingAnomaly {
    pub fn question_id(&self) -> &str {
        match self {
            EncodingAnomaly::NonArraySelection { question_id }
            | EncodingAnomaly::NonNumericRating { question_id, .. }
            | EncodingAnomaly::InvalidDate { question_id, .. }
            | EncodingAnomaly::FileUploadNotPersisted { question_id } => question_id,
        }
    }
}

impl fmt::Display for EncodingAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodingAnomaly::NonArraySelection { question_id } => {
                write!(f, "{}: selection is not a list, skipped", question_id)
            }
            EncodingAnomaly::NonNumericRating { question_id, input } => {
                write!(f, "{}: rating {} is not a number, skipped", question_id, input)
            }
            EncodingAnomaly::InvalidDate { question_id, input } => {
                write!(f, "{}: unparseable date {} kept as text", question_id, input)
            }
            EncodingAnomaly::FileUploadNotPersisted { question_id } => {
                write!(f, "{}: file upload answers are not stored", question_id)
            }
        }
    }
}

/// Outcome of encoding one raw value
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// `AnswerValue::Skipped` when the value fills no slot
    pub value: AnswerValue,
    pub anomaly: Option<EncodingAnomaly>,
}

impl Encoded {
    fn stored(value: AnswerValue) -> Self {
        Self {
            value,
            anomaly: None,
        }
    }

    fn skipped() -> Self {
        Self::stored(AnswerValue::Skipped)
    }

    fn flagged(value: AnswerValue, anomaly: EncodingAnomaly) -> Self {
        Self {
            value,
            anomaly: Some(anomaly),
        }
    }
}

/// Encoded answers of one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    pub answers: Vec<Answer>,
    pub anomalies: Vec<EncodingAnomaly>,
}

pub fn encode(question_id: &str, question_type: QuestionType, raw: &RawValue) -> Encoded {
    if raw.is_null() {
        return Encoded::skipped();
    }

    match question_type {
        QuestionType::ShortAnswer
        | QuestionType::LongAnswer
        | QuestionType::MultipleChoice
        | QuestionType::Time
        | QuestionType::NameSelect
        | QuestionType::NimSelect
        | QuestionType::CourseSelect
        | QuestionType::EventSelect => Encoded::stored(AnswerValue::Text(to_text(raw))),

        QuestionType::MultipleSelect => match raw {
            RawValue::Array(_) => Encoded::stored(AnswerValue::Json(raw.to_json())),
            _ => Encoded::flagged(
                AnswerValue::Skipped,
                EncodingAnomaly::NonArraySelection {
                    question_id: question_id.to_string(),
                },
            ),
        },

        QuestionType::Rating => {
            let n = raw.coerce_number();
            if n.is_nan() {
                Encoded::flagged(
                    AnswerValue::Skipped,
                    EncodingAnomaly::NonNumericRating {
                        question_id: question_id.to_string(),
                        input: to_text(raw),
                    },
                )
            } else {
                Encoded::stored(AnswerValue::Number(n))
            }
        }

        QuestionType::Date => match to_date(raw) {
            Some(DateValue::Unparseable(input)) => Encoded::flagged(
                AnswerValue::Date(DateValue::Unparseable(input.clone())),
                EncodingAnomaly::InvalidDate {
                    question_id: question_id.to_string(),
                    input,
                },
            ),
            Some(parsed) => Encoded::stored(AnswerValue::Date(parsed)),
            None => Encoded::skipped(),
        },

        QuestionType::FileUpload => Encoded::flagged(
            AnswerValue::Skipped,
            EncodingAnomaly::FileUploadNotPersisted {
                question_id: question_id.to_string(),
            },
        ),
    }
}

/// Encode every answered question of `form`, in form order.
///
/// A present key always yields one row, `Skipped` if nothing was storable;
/// an absent key yields none. Keys that name no question of the form are
/// dropped.
pub fn encode_all(form: &FormDefinition, raw: &RawAnswers) -> Encoding {
    let mut encoding = Encoding::default();

    for question in &form.questions {
        let Some(value) = raw.get(&question.id) else {
            continue;
        };
        let encoded = encode(&question.id, question.question_type(), value);
        if let Some(anomaly) = encoded.anomaly {
            warn!(form_id = %form.id, anomaly = %anomaly, "answer encoding anomaly");
            encoding.anomalies.push(anomaly);
        }
        encoding
            .answers
            .push(Answer::new(question.id.clone(), encoded.value));
    }

    let dropped = raw.keys().filter(|k| form.question(k).is_none()).count();
    if dropped > 0 {
        debug!(form_id = %form.id, dropped, "ignored answers to unknown questions");
    }

    encoding
}

/// Parse a date string: RFC 3339, then naive date-time, then `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn to_text(raw: &RawValue) -> String {
    match raw {
        RawValue::String(s) => s.clone(),
        RawValue::Number(n) => format_number(*n),
        RawValue::Bool(b) => b.to_string(),
        other => other.to_json().to_string(),
    }
}

/// Only dates and strings are read as dates; other shapes store nothing
fn to_date(raw: &RawValue) -> Option<DateValue> {
    match raw {
        RawValue::Date(dt) => Some(DateValue::Parsed(*dt)),
        RawValue::String(s) => Some(match parse_date(s) {
            Some(dt) => DateValue::Parsed(dt),
            None => DateValue::Unparseable(s.clone()),
        }),
        _ => None,
    }
}
