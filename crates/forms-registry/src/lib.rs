//! Forms Registry: question type catalog and form editing
//!
//! The registry is the single place that knows, per question type, what its
//! settings look like, what a fresh question of that type starts with, and
//! when a raw value counts as "answered". The editor builds on it to add,
//! retype, move and remove questions, and to normalize a form before save.

pub mod definition;
pub mod editor;
pub mod registry;

pub use definition::{is_valid_mime_type, normalize_order, validate_definition, MAX_FILES_LIMIT};
pub use editor::{
    add_question, change_question_type, create_draft, prepare_for_save, remove_question,
    reorder_questions,
};
pub use registry::{
    default_settings_of, descriptor, descriptors, is_required_satisfied, settings_shape_of,
    SettingsSchema, SettingsShape, TypeDescriptor,
};
