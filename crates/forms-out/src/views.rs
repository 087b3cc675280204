//! Response views: one submission at a time, or one question at a time
use crate::display::{display_answer, SummaryOptions};
use chrono::{DateTime, Utc};
use forms_core::{AnswerValue, Question, QuestionType, Submission};
use serde::Serialize;
use std::collections::HashMap;

pub const ANONYMOUS_LABEL: &str = "Anonymous";
pub const SKIPPED_LABEL: &str = "Skipped";
pub const UNKNOWN_QUESTION_LABEL: &str = "Unknown question";

// ============================================================================
// SUBMITTER DIRECTORY
// ============================================================================

/// Resolves submitter ids to the names shown next to their responses
pub trait SubmitterDirectory: Send + Sync {
    fn label(&self, submitter_id: &str) -> Option<String>;
}

/// Resolves nothing; views fall back to the raw submitter id
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectory;

impl SubmitterDirectory for NoDirectory {
    fn label(&self, _submitter_id: &str) -> Option<String> {
        None
    }
}

impl SubmitterDirectory for HashMap<String, String> {
    fn label(&self, submitter_id: &str) -> Option<String> {
        self.get(submitter_id).cloned()
    }
}

fn submitter_label(submitter_id: Option<&str>, directory: &dyn SubmitterDirectory) -> String {
    match submitter_id {
        Some(id) => directory.label(id).unwrap_or_else(|| id.to_string()),
        None => ANONYMOUS_LABEL.to_string(),
    }
}

// ============================================================================
// PER-SUBMISSION VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub question_id: String,
    pub title: String,
    /// `None` for answers to questions no longer on the form
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    /// The stored value, untouched; `None` when the submission has no row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AnswerValue>,
    pub display: String,
}

impl AnswerView {
    /// True when the question was never answered (no row at all)
    pub fn is_skipped(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub submission_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    pub submitter_label: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerView>,
}

/// Every question of the form with this submission's answer, in form order.
/// A question with no row reads "Skipped"; a row with no value reads
/// "No answer". Answers to unknown question ids follow at the end.
pub fn submission_view(
    questions: &[Question],
    submission: &Submission,
    directory: &dyn SubmitterDirectory,
    options: &SummaryOptions,
) -> SubmissionView {
    let mut answers: Vec<AnswerView> = questions
        .iter()
        .map(|question| {
            let value = submission
                .answer_for(&question.id)
                .map(|a| a.value.clone());
            let display = match &value {
                Some(v) => display_answer(v, options),
                None => SKIPPED_LABEL.to_string(),
            };
            AnswerView {
                question_id: question.id.clone(),
                title: question.title.clone(),
                question_type: Some(question.question_type()),
                value,
                display,
            }
        })
        .collect();

    for answer in &submission.answers {
        if questions.iter().any(|q| q.id == answer.question_id) {
            continue;
        }
        answers.push(AnswerView {
            question_id: answer.question_id.clone(),
            title: UNKNOWN_QUESTION_LABEL.to_string(),
            question_type: None,
            value: Some(answer.value.clone()),
            display: display_answer(&answer.value, options),
        });
    }

    SubmissionView {
        submission_id: submission.id.clone(),
        submitter_id: submission.submitter_id.clone(),
        submitter_label: submitter_label(submission.submitter_id.as_deref(), directory),
        submitted_at: submission.submitted_at,
        answers,
    }
}

// ============================================================================
// PER-QUESTION VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub submission_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    pub submitter_label: String,
    pub submitted_at: DateTime<Utc>,
    pub value: AnswerValue,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponses {
    pub question_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub responses: Vec<ResponseEntry>,
}

/// Every submission with a row for `question_id`, empty rows included.
/// `None` if the question is not one of `questions`.
pub fn question_responses(
    questions: &[Question],
    submissions: &[Submission],
    question_id: &str,
    directory: &dyn SubmitterDirectory,
    options: &SummaryOptions,
) -> Option<QuestionResponses> {
    let question = questions.iter().find(|q| q.id == question_id)?;

    let responses = submissions
        .iter()
        .filter_map(|submission| {
            let answer = submission.answer_for(question_id)?;
            Some(ResponseEntry {
                submission_id: submission.id.clone(),
                submitter_id: submission.submitter_id.clone(),
                submitter_label: submitter_label(submission.submitter_id.as_deref(), directory),
                submitted_at: submission.submitted_at,
                value: answer.value.clone(),
                display: display_answer(&answer.value, options),
            })
        })
        .collect();

    Some(QuestionResponses {
        question_id: question.id.clone(),
        title: question.title.clone(),
        question_type: question.question_type(),
        responses,
    })
}

// ============================================================================
// RESPONSE DECK
// ============================================================================

/// One step of the deck, as shown by a pager
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckPosition {
    pub index: usize,
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub response: SubmissionView,
}

/// Index-based navigation over submission views
#[derive(Debug, Clone, Default)]
pub struct ResponseDeck {
    views: Vec<SubmissionView>,
    cursor: usize,
}

impl ResponseDeck {
    pub fn new(views: Vec<SubmissionView>) -> Self {
        Self { views, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SubmissionView> {
        self.views.get(index)
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&SubmissionView> {
        self.views.get(self.cursor)
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.views.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0 && !self.views.is_empty()
    }

    /// Move forward; stays on the last view at the end
    pub fn next(&mut self) -> Option<&SubmissionView> {
        if self.has_next() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Move back; stays on the first view at the start
    pub fn previous(&mut self) -> Option<&SubmissionView> {
        if self.has_previous() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Jump to `index`; out of range leaves the cursor where it was
    pub fn seek(&mut self, index: usize) -> Option<&SubmissionView> {
        if index < self.views.len() {
            self.cursor = index;
            self.current()
        } else {
            None
        }
    }

    pub fn position(&self) -> Option<DeckPosition> {
        self.current().map(|response| DeckPosition {
            index: self.cursor,
            total: self.views.len(),
            has_previous: self.has_previous(),
            has_next: self.has_next(),
            response: response.clone(),
        })
    }
}
