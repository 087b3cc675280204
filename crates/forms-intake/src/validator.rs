//! Required-answer validation
use forms_core::{FieldErrors, FormDefinition, QuestionType, RawAnswers, REQUIRED_MESSAGE};
use forms_registry::is_required_satisfied;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredField {
    pub question_id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

/// The required questions of a form, in form order.
///
/// Optional questions are never checked: whatever arrives for them goes
/// straight to the encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationContract {
    pub required: Vec<RequiredField>,
}

impl ValidationContract {
    pub fn for_form(form: &FormDefinition) -> Self {
        let required = form
            .questions
            .iter()
            .filter(|q| q.required)
            .map(|q| RequiredField {
                question_id: q.id.clone(),
                question_type: q.question_type(),
            })
            .collect();
        Self { required }
    }

    /// Check every required field, reporting all that fail
    pub fn check(&self, raw: &RawAnswers) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in &self.required {
            let satisfied = raw
                .get(&field.question_id)
                .map(|value| is_required_satisfied(field.question_type, value))
                .unwrap_or(false);
            if !satisfied {
                errors.push(field.question_id.clone(), REQUIRED_MESSAGE);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn validate(form: &FormDefinition, raw: &RawAnswers) -> Result<(), FieldErrors> {
    ValidationContract::for_form(form).check(raw)
}
