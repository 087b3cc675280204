//! Form builder operations
//!
//! Everything here mutates a `FormDefinition` in place. Nothing is persisted
//! until the caller hands the result of `prepare_for_save` to a store.

use crate::definition::{normalize_order, validate_definition};
use crate::registry::default_settings_of;
use forms_core::{DefinitionError, DefinitionErrors, FormDefinition, Question, QuestionType};

pub fn create_draft(title: impl Into<String>) -> FormDefinition {
    FormDefinition::draft(title)
}

/// Append an untitled, non-required question with the type's default settings
pub fn add_question(form: &mut FormDefinition, question_type: QuestionType) -> &Question {
    let mut question = Question::new("", default_settings_of(question_type));
    question.order = form.questions.len() as u32;
    form.questions.push(question);
    form.touch();
    &form.questions[form.questions.len() - 1]
}

/// Switch a question to another type.
///
/// Settings are reset to the new type's defaults on every call, including
/// when `new_type` is the current type; the previous settings are dropped.
pub fn change_question_type(
    form: &mut FormDefinition,
    index: usize,
    new_type: QuestionType,
) -> Result<(), DefinitionError> {
    let len = form.questions.len();
    let question = form
        .questions
        .get_mut(index)
        .ok_or(DefinitionError::IndexOutOfRange { index, len })?;

    question.settings = default_settings_of(new_type);
    form.touch();
    Ok(())
}

/// Move the question at `from` so it ends up at `to`
pub fn reorder_questions(
    form: &mut FormDefinition,
    from: usize,
    to: usize,
) -> Result<(), DefinitionError> {
    let len = form.questions.len();
    if from >= len {
        return Err(DefinitionError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(DefinitionError::IndexOutOfRange { index: to, len });
    }

    let question = form.questions.remove(from);
    form.questions.insert(to, question);
    form.touch();
    Ok(())
}

pub fn remove_question(form: &mut FormDefinition, index: usize) -> Result<Question, DefinitionError> {
    let len = form.questions.len();
    if index >= len {
        return Err(DefinitionError::IndexOutOfRange { index, len });
    }
    let removed = form.questions.remove(index);
    form.touch();
    Ok(removed)
}

/// Recompute `order` from array position, then run every save-time check
pub fn prepare_for_save(form: &mut FormDefinition) -> Result<(), DefinitionErrors> {
    normalize_order(form);
    validate_definition(form)
}
