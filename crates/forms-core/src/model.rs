//! Data Model: FormDefinition, Question, Settings, Submission, Answer
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// QUESTION TYPES
// ============================================================================

/// Closed set of question types.
///
/// The type drives the settings shape, the required-value rule, the storage
/// slot of an answer and the aggregation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    ShortAnswer,
    LongAnswer,
    MultipleChoice,
    MultipleSelect,
    Rating,
    Date,
    Time,
    FileUpload,
    NameSelect,
    NimSelect,
    CourseSelect,
    EventSelect,
}

impl QuestionType {
    /// Every question type, in builder display order
    pub const ALL: [QuestionType; 12] = [
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
        QuestionType::MultipleChoice,
        QuestionType::MultipleSelect,
        QuestionType::Rating,
        QuestionType::Date,
        QuestionType::Time,
        QuestionType::FileUpload,
        QuestionType::NameSelect,
        QuestionType::NimSelect,
        QuestionType::CourseSelect,
        QuestionType::EventSelect,
    ];

    /// Wire tag of the type (ex: "MULTIPLE_SELECT")
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::LongAnswer => "LONG_ANSWER",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::MultipleSelect => "MULTIPLE_SELECT",
            QuestionType::Rating => "RATING",
            QuestionType::Date => "DATE",
            QuestionType::Time => "TIME",
            QuestionType::FileUpload => "FILE_UPLOAD",
            QuestionType::NameSelect => "NAME_SELECT",
            QuestionType::NimSelect => "NIM_SELECT",
            QuestionType::CourseSelect => "COURSE_SELECT",
            QuestionType::EventSelect => "EVENT_SELECT",
        }
    }

    /// Types whose settings carry a list of options
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::MultipleSelect)
    }

    /// Types summarized as a histogram rather than a list of texts
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::MultipleSelect | QuestionType::Rating
        )
    }

    /// Types resolved against an external directory
    pub fn is_selector(&self) -> bool {
        matches!(
            self,
            QuestionType::NameSelect
                | QuestionType::NimSelect
                | QuestionType::CourseSelect
                | QuestionType::EventSelect
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Type-specific configuration of a question, keyed by the question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Settings {
    ShortAnswer(TextSettings),
    LongAnswer(TextSettings),
    MultipleChoice(ChoiceSettings),
    MultipleSelect(ChoiceSettings),
    Rating(RatingSettings),
    Date,
    Time,
    FileUpload(FileUploadSettings),
    NameSelect,
    NimSelect,
    CourseSelect,
    EventSelect,
}

impl Settings {
    /// The question type these settings belong to
    pub fn question_type(&self) -> QuestionType {
        match self {
            Settings::ShortAnswer(_) => QuestionType::ShortAnswer,
            Settings::LongAnswer(_) => QuestionType::LongAnswer,
            Settings::MultipleChoice(_) => QuestionType::MultipleChoice,
            Settings::MultipleSelect(_) => QuestionType::MultipleSelect,
            Settings::Rating(_) => QuestionType::Rating,
            Settings::Date => QuestionType::Date,
            Settings::Time => QuestionType::Time,
            Settings::FileUpload(_) => QuestionType::FileUpload,
            Settings::NameSelect => QuestionType::NameSelect,
            Settings::NimSelect => QuestionType::NimSelect,
            Settings::CourseSelect => QuestionType::CourseSelect,
            Settings::EventSelect => QuestionType::EventSelect,
        }
    }

    /// Options of a choice question
    pub fn choices(&self) -> Option<&ChoiceSettings> {
        match self {
            Settings::MultipleChoice(c) | Settings::MultipleSelect(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable options of a choice question
    pub fn choices_mut(&mut self) -> Option<&mut ChoiceSettings> {
        match self {
            Settings::MultipleChoice(c) | Settings::MultipleSelect(c) => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSettings {
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSettings {
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub allow_other: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
    pub value: String,
}

impl ChoiceOption {
    /// Create an option with a fresh id
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSettings {
    /// Upper bound of the scale (1..=scale)
    pub scale: u8,
    pub icon: RatingIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingIcon {
    Star,
    Heart,
    Thumb,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadSettings {
    pub max_files: u8,
    /// MIME types accepted; empty means any type
    #[serde(default)]
    pub allowed_file_types: Vec<String>,
}

// ============================================================================
// QUESTIONS & FORMS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Position in the form; recomputed from the array index on save
    #[serde(default)]
    pub order: u32,
    pub settings: Settings,
}

impl Question {
    /// Create a non-required question with a fresh id
    pub fn new(title: impl Into<String>, settings: Settings) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            required: false,
            order: 0,
            settings,
        }
    }

    /// Override the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn question_type(&self) -> QuestionType {
        self.settings.question_type()
    }
}

/// Where a form is listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormKind {
    #[default]
    Normal,
    /// Also exposed through the hotline discovery listing
    Hotline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: FormKind,
    pub is_published: bool,
    pub is_active: bool,
    pub allow_multiple_submissions: bool,
    pub require_auth: bool,
    pub collect_email: bool,
    pub show_progress_bar: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormDefinition {
    /// Create an unpublished draft with the builder's default policy flags
    pub fn draft(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            kind: FormKind::Normal,
            is_published: false,
            is_active: true,
            allow_multiple_submissions: false,
            require_auth: true,
            collect_email: true,
            show_progress_bar: true,
            questions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_index(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }

    pub fn publish(&mut self) {
        self.is_published = true;
        self.touch();
    }

    pub fn unpublish(&mut self) {
        self.is_published = false;
        self.touch();
    }

    /// Whether the form shows up in the hotline discovery listing
    pub fn is_hotline_listed(&self) -> bool {
        self.kind == FormKind::Hotline && self.is_published && self.is_active
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// SUBMISSIONS & ANSWERS
// ============================================================================

/// One accepted response to a form. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub form_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<Answer>,
}

impl Submission {
    pub fn new(form_id: impl Into<String>, submitter_id: Option<String>, answers: Vec<Answer>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            form_id: form_id.into(),
            submitter_id,
            submitted_at: Utc::now(),
            answers,
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            question_id: question_id.into(),
            value,
        }
    }
}

/// The single storage slot an answer occupies, fixed at encode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "value", rename_all = "camelCase")]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    Date(DateValue),
    Json(serde_json::Value),
    Skipped,
}

impl AnswerValue {
    pub fn is_skipped(&self) -> bool {
        matches!(self, AnswerValue::Skipped)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            AnswerValue::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// A stored date. Strings that failed to parse are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Parsed(DateTime<Utc>),
    Unparseable(String),
}

impl DateValue {
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            DateValue::Parsed(dt) => Some(dt),
            DateValue::Unparseable(_) => None,
        }
    }
}
