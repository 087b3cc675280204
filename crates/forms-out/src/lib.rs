//! Forms Out: turning stored submissions into something readable
//!
//! Three read models are built here, all pure functions over a form's
//! questions and its submissions:
//!
//! - per-question summaries (histograms for categorical types, lists of
//!   display strings for everything else)
//! - per-submission views, paged through with a `ResponseDeck`
//! - per-question response lists
//!
//! # Example
//!
//! ```ignore
//! use forms_out::{build_summary, SummaryOptions};
//!
//! for summary in build_summary(&form.questions, &submissions, &SummaryOptions::default()) {
//!     println!("{}: {} answers", summary.title, summary.total_answers);
//! }
//! ```

pub mod display;
pub mod summary;
pub mod views;

pub use display::{categorical_values, display_text, SummaryOptions, NO_ANSWER};
pub use summary::{build_summary, QuestionSummary, SummaryBody};
pub use views::{
    question_responses, submission_view, AnswerView, DeckPosition, NoDirectory, QuestionResponses,
    ResponseDeck, ResponseEntry, SubmissionView, SubmitterDirectory, ANONYMOUS_LABEL,
    SKIPPED_LABEL, UNKNOWN_QUESTION_LABEL,
};
