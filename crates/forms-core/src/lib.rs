//! Forms Core: data model, errors, configuration and the persistence contract
//!
//! Every other crate of the forms engine builds on the types defined here.
//! The question type is a closed enum and the settings of a question are a
//! tagged union keyed by that same type, so the shape of a question's
//! settings can never disagree with its type.

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod raw;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use context::{Identity, Role};
pub use error::{
    DefinitionError, DefinitionErrors, FieldError, FieldErrors, FormsError, GateError, Result,
};
pub use model::{
    Answer, AnswerValue, ChoiceOption, ChoiceSettings, DateValue, FileUploadSettings,
    FormDefinition, FormKind, Question, QuestionType, RatingIcon, RatingSettings, Settings,
    Submission, TextSettings,
};
pub use raw::{format_number, RawAnswers, RawValue};
pub use store::{FormStore, HotlinePage, InMemoryFormStore, StoreError, StoreResult};

/// Message attached to every missing required answer
pub const REQUIRED_MESSAGE: &str = "This field is required.";
