//! Per-question summaries
use crate::display::{categorical_values, display_text, SummaryOptions};
use forms_core::{Answer, Question, QuestionType, Submission};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryBody {
    /// Count per distinct value; no ordering is implied
    Distribution(HashMap<String, u64>),
    /// One display string per answer row, in submission order
    Text(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub question_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub total_answers: usize,
    pub body: SummaryBody,
}

impl QuestionSummary {
    /// Distribution entries, most frequent first, ties by value
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let SummaryBody::Distribution(counts) = &self.body else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Summarize every question over `submissions`. Pure: the same inputs
/// always give the same summaries.
pub fn build_summary(
    questions: &[Question],
    submissions: &[Submission],
    options: &SummaryOptions,
) -> Vec<QuestionSummary> {
    questions
        .iter()
        .map(|question| summarize(question, submissions, options))
        .collect()
}

fn summarize(question: &Question, submissions: &[Submission], options: &SummaryOptions) -> QuestionSummary {
    let answers: Vec<&Answer> = submissions
        .iter()
        .flat_map(|s| s.answers.iter())
        .filter(|a| a.question_id == question.id)
        .collect();

    let question_type = question.question_type();
    let body = if question_type.is_categorical() {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for value in answers.iter().flat_map(|a| categorical_values(&a.value)) {
            *counts.entry(value).or_insert(0) += 1;
        }
        SummaryBody::Distribution(counts)
    } else {
        SummaryBody::Text(
            answers
                .iter()
                .map(|a| display_text(&a.value, options))
                .collect(),
        )
    };

    QuestionSummary {
        question_id: question.id.clone(),
        title: question.title.clone(),
        question_type,
        total_answers: answers.len(),
        body,
    }
}
