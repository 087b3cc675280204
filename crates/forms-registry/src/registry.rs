//! Question Type Registry
//!
//! Static catalog, one exhaustive match per concern. Adding a variant to
//! `QuestionType` fails to compile here until every table handles it.

use forms_core::{
    ChoiceOption, ChoiceSettings, FileUploadSettings, QuestionType, RatingIcon, RatingSettings,
    RawValue, Settings, TextSettings,
};
use serde::Serialize;

/// Shape of the settings record a question type carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettingsShape {
    /// `{ placeholder }`
    Text,
    /// `{ options: [{id, text, value}], allowOther }`
    Choice,
    /// `{ scale, icon }`
    Rating,
    /// `{ maxFiles, allowedFileTypes }`
    FileUpload,
    /// Carries no configuration (date and time pickers)
    Empty,
    /// Resolved against an external directory; no settings at all
    Unset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSchema {
    pub shape: SettingsShape,
    pub fields: &'static [&'static str],
}

/// Builder-facing description of a question type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub label: &'static str,
    pub settings: SettingsSchema,
}

pub fn settings_shape_of(question_type: QuestionType) -> SettingsSchema {
    match question_type {
        QuestionType::ShortAnswer | QuestionType::LongAnswer => SettingsSchema {
            shape: SettingsShape::Text,
            fields: &["placeholder"],
        },
        QuestionType::MultipleChoice | QuestionType::MultipleSelect => SettingsSchema {
            shape: SettingsShape::Choice,
            fields: &["options", "allowOther"],
        },
        QuestionType::Rating => SettingsSchema {
            shape: SettingsShape::Rating,
            fields: &["scale", "icon"],
        },
        QuestionType::FileUpload => SettingsSchema {
            shape: SettingsShape::FileUpload,
            fields: &["maxFiles", "allowedFileTypes"],
        },
        QuestionType::Date | QuestionType::Time => SettingsSchema {
            shape: SettingsShape::Empty,
            fields: &[],
        },
        QuestionType::NameSelect
        | QuestionType::NimSelect
        | QuestionType::CourseSelect
        | QuestionType::EventSelect => SettingsSchema {
            shape: SettingsShape::Unset,
            fields: &[],
        },
    }
}

/// Settings a question starts with, and is reset to on a type change
pub fn default_settings_of(question_type: QuestionType) -> Settings {
    match question_type {
        QuestionType::ShortAnswer => Settings::ShortAnswer(TextSettings::default()),
        QuestionType::LongAnswer => Settings::LongAnswer(TextSettings::default()),
        QuestionType::MultipleChoice => Settings::MultipleChoice(default_choices()),
        QuestionType::MultipleSelect => Settings::MultipleSelect(default_choices()),
        QuestionType::Rating => Settings::Rating(RatingSettings {
            scale: 5,
            icon: RatingIcon::Star,
        }),
        QuestionType::Date => Settings::Date,
        QuestionType::Time => Settings::Time,
        QuestionType::FileUpload => Settings::FileUpload(FileUploadSettings {
            max_files: 1,
            allowed_file_types: Vec::new(),
        }),
        QuestionType::NameSelect => Settings::NameSelect,
        QuestionType::NimSelect => Settings::NimSelect,
        QuestionType::CourseSelect => Settings::CourseSelect,
        QuestionType::EventSelect => Settings::EventSelect,
    }
}

fn default_choices() -> ChoiceSettings {
    ChoiceSettings {
        options: vec![ChoiceOption::new("", "option_1"), ChoiceOption::new("", "option_2")],
        allow_other: false,
    }
}

/// Whether `raw` answers a required question of the given type.
pub fn is_required_satisfied(question_type: QuestionType, raw: &RawValue) -> bool {
    match question_type {
        QuestionType::Rating => is_present(raw) && !raw.coerce_number().is_nan(),
        // FILE_UPLOAD has no override: any present value passes
        QuestionType::ShortAnswer
        | QuestionType::LongAnswer
        | QuestionType::MultipleChoice
        | QuestionType::MultipleSelect
        | QuestionType::Date
        | QuestionType::Time
        | QuestionType::FileUpload
        | QuestionType::NameSelect
        | QuestionType::NimSelect
        | QuestionType::CourseSelect
        | QuestionType::EventSelect => is_present(raw),
    }
}

fn is_present(raw: &RawValue) -> bool {
    match raw {
        RawValue::Null => false,
        RawValue::String(s) => !s.trim().is_empty(),
        RawValue::Array(items) => !items.is_empty(),
        RawValue::Number(n) => !n.is_nan(),
        RawValue::Bool(_) | RawValue::Date(_) | RawValue::Object(_) => true,
    }
}

pub fn descriptor(question_type: QuestionType) -> TypeDescriptor {
    let label = match question_type {
        QuestionType::ShortAnswer => "Short Answer",
        QuestionType::LongAnswer => "Paragraph",
        QuestionType::MultipleChoice => "Multiple Choice",
        QuestionType::MultipleSelect => "Checkboxes",
        QuestionType::Rating => "Rating",
        QuestionType::Date => "Date",
        QuestionType::Time => "Time",
        QuestionType::FileUpload => "File Upload",
        QuestionType::NameSelect => "Member Name",
        QuestionType::NimSelect => "Student ID (NIM)",
        QuestionType::CourseSelect => "Course",
        QuestionType::EventSelect => "Event",
    };
    TypeDescriptor {
        question_type,
        label,
        settings: settings_shape_of(question_type),
    }
}

/// Every type, in builder display order
pub fn descriptors() -> Vec<TypeDescriptor> {
    QuestionType::ALL.iter().copied().map(descriptor).collect()
}
