//! Save-time checks on a form definition.
use forms_core::{DefinitionError, DefinitionErrors, FormDefinition, Settings};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Most files a single upload question may accept
pub const MAX_FILES_LIMIT: u8 = 10;

lazy_static! {
    /// `type/subtype`, subtype may be `*`
    static ref MIME_TYPE: Regex = Regex::new(
        r"^(?i)[a-z0-9][a-z0-9!#$&^_.+-]*/(\*|[a-z0-9][a-z0-9!#$&^_.+-]*)$"
    ).unwrap();
}

pub fn is_valid_mime_type(mime: &str) -> bool {
    MIME_TYPE.is_match(mime)
}

/// Set every question's `order` to its array position
pub fn normalize_order(form: &mut FormDefinition) {
    for (index, question) in form.questions.iter_mut().enumerate() {
        question.order = index as u32;
    }
}

/// Collect every violation instead of stopping at the first
pub fn validate_definition(form: &FormDefinition) -> Result<(), DefinitionErrors> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push(DefinitionError::EmptyFormTitle);
    }

    let mut seen = HashSet::new();
    for question in &form.questions {
        if !seen.insert(question.id.as_str()) {
            errors.push(DefinitionError::DuplicateQuestionId {
                question_id: question.id.clone(),
            });
        }

        if question.title.trim().is_empty() {
            errors.push(DefinitionError::EmptyQuestionTitle {
                question_id: question.id.clone(),
            });
        }

        match &question.settings {
            Settings::MultipleChoice(choices) | Settings::MultipleSelect(choices) => {
                if !choices.options.iter().any(|o| !o.text.trim().is_empty()) {
                    errors.push(DefinitionError::MissingChoiceOption {
                        question_id: question.id.clone(),
                    });
                }
            }
            Settings::FileUpload(upload) => {
                if upload.max_files == 0 || upload.max_files > MAX_FILES_LIMIT {
                    errors.push(DefinitionError::FileLimitOutOfRange {
                        question_id: question.id.clone(),
                        max_files: upload.max_files,
                    });
                }
                for mime in &upload.allowed_file_types {
                    if !is_valid_mime_type(mime) {
                        errors.push(DefinitionError::InvalidMimeType {
                            question_id: question.id.clone(),
                            mime: mime.clone(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DefinitionErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_core::{ChoiceOption, ChoiceSettings, FileUploadSettings, Question, TextSettings};

    fn text_question(title: &str) -> Question {
        Question::new(title, Settings::ShortAnswer(TextSettings::default()))
    }

    #[test]
    fn test_mime_types() {
        assert!(is_valid_mime_type("application/pdf"));
        assert!(is_valid_mime_type(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
        assert!(is_valid_mime_type("application/x-7z-compressed"));
        assert!(is_valid_mime_type("image/*"));
        assert!(!is_valid_mime_type("pdf"));
        assert!(!is_valid_mime_type("image/"));
        assert!(!is_valid_mime_type("image/png; charset"));
    }

    #[test]
    fn test_valid_form_passes() {
        let mut form = FormDefinition::draft("Open House");
        form.questions.push(text_question("Name"));
        form.questions.push(Question::new(
            "Shirt size",
            Settings::MultipleChoice(ChoiceSettings {
                options: vec![ChoiceOption::new("M", "m"), ChoiceOption::new("", "option_2")],
                allow_other: false,
            }),
        ));
        assert!(validate_definition(&form).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut form = FormDefinition::draft("  ");
        form.questions.push(text_question("").with_id("q1"));
        form.questions.push(text_question("Dup").with_id("q1"));
        form.questions.push(
            Question::new(
                "Pick",
                Settings::MultipleSelect(ChoiceSettings {
                    options: vec![ChoiceOption::new(" ", "option_1")],
                    allow_other: true,
                }),
            )
            .with_id("q2"),
        );
        form.questions.push(
            Question::new(
                "CV",
                Settings::FileUpload(FileUploadSettings {
                    max_files: 11,
                    allowed_file_types: vec!["pdf".to_string()],
                }),
            )
            .with_id("q3"),
        );

        let errors = validate_definition(&form).unwrap_err();
        let errors: Vec<_> = errors.iter().cloned().collect();
        assert!(errors.contains(&DefinitionError::EmptyFormTitle));
        assert!(errors.contains(&DefinitionError::EmptyQuestionTitle {
            question_id: "q1".into()
        }));
        assert!(errors.contains(&DefinitionError::DuplicateQuestionId {
            question_id: "q1".into()
        }));
        assert!(errors.contains(&DefinitionError::MissingChoiceOption {
            question_id: "q2".into()
        }));
        assert!(errors.contains(&DefinitionError::FileLimitOutOfRange {
            question_id: "q3".into(),
            max_files: 11
        }));
        assert!(errors.contains(&DefinitionError::InvalidMimeType {
            question_id: "q3".into(),
            mime: "pdf".into()
        }));
    }

    #[test]
    fn test_normalize_order_overrides_stale_values() {
        let mut form = FormDefinition::draft("Form");
        for (i, stale) in [7u32, 7, 2].iter().enumerate() {
            let mut q = text_question(&format!("Q{}", i));
            q.order = *stale;
            form.questions.push(q);
        }
        normalize_order(&mut form);
        let orders: Vec<u32> = form.questions.iter().map(|q| q.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}
