//! Unified Error Model
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormsError {
    /// One or more required questions were left unanswered
    #[error("VALIDATION/{0}")]
    Validation(FieldErrors),

    /// The identity may not submit to this form
    #[error("GATE/{0}")]
    Gate(GateError),

    /// Form or submission id does not resolve
    #[error("NOTFOUND/{0}")]
    NotFound(String),

    /// The form definition cannot be saved or edited as requested
    #[error("DEFINITION/{0}")]
    Definition(DefinitionErrors),

    #[error("STORE/{0}")]
    Store(#[from] StoreError),
}

impl FormsError {
    /// Stable code surfaced to callers
    pub fn code(&self) -> &'static str {
        match self {
            FormsError::Validation(_) => "VALIDATION_ERROR",
            FormsError::Gate(gate) => gate.code(),
            FormsError::NotFound(_) => "NOT_FOUND",
            FormsError::Definition(_) => "INVALID_DEFINITION",
            FormsError::Store(_) => "OPERATION_FAILED",
        }
    }

    pub fn not_found(what: &str, id: &str) -> Self {
        FormsError::NotFound(format!("{} {}", what, id))
    }
}

impl From<FieldErrors> for FormsError {
    fn from(errors: FieldErrors) -> Self {
        FormsError::Validation(errors)
    }
}

impl From<GateError> for FormsError {
    fn from(error: GateError) -> Self {
        FormsError::Gate(error)
    }
}

impl From<DefinitionErrors> for FormsError {
    fn from(errors: DefinitionErrors) -> Self {
        FormsError::Definition(errors)
    }
}

impl From<DefinitionError> for FormsError {
    fn from(error: DefinitionError) -> Self {
        FormsError::Definition(DefinitionErrors(vec![error]))
    }
}

pub type Result<T> = std::result::Result<T, FormsError>;

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// A validation failure scoped to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub question_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question_id: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            question_id: question_id.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.iter().any(|e| e.question_id == question_id)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ids: Vec<&str> = self.0.iter().map(|e| e.question_id.as_str()).collect();
        write!(f, "{} field(s) invalid: {}", self.0.len(), ids.join(", "))
    }
}

// ============================================================================
// GATE ERRORS
// ============================================================================

/// Why a submit attempt was refused before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateError {
    #[error("sign in to submit this form")]
    Unauthenticated,
    #[error("you have already responded to this form")]
    AlreadySubmitted,
    #[error("this form is not accepting responses")]
    FormClosed,
}

impl GateError {
    pub fn code(&self) -> &'static str {
        match self {
            GateError::Unauthenticated => "UNAUTHENTICATED",
            GateError::AlreadySubmitted => "ALREADY_SUBMITTED",
            GateError::FormClosed => "FORM_CLOSED",
        }
    }
}

// ============================================================================
// DEFINITION ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefinitionError {
    #[error("form title is empty")]
    EmptyFormTitle,
    #[error("question {question_id} has an empty title")]
    EmptyQuestionTitle { question_id: String },
    #[error("question id {question_id} is used more than once")]
    DuplicateQuestionId { question_id: String },
    #[error("question {question_id} needs at least one option with text")]
    MissingChoiceOption { question_id: String },
    #[error("question {question_id} allows {max_files} files (expected 1..=10)")]
    FileLimitOutOfRange { question_id: String, max_files: u8 },
    #[error("question {question_id} lists invalid file type {mime}")]
    InvalidMimeType { question_id: String, mime: String },
    #[error("question index {index} out of range (form has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionErrors(pub Vec<DefinitionError>);

impl DefinitionErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DefinitionError> {
        self.0.iter()
    }
}

impl fmt::Display for DefinitionErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}
