//! Persistence contract and an in-memory implementation
//!
//! The engine only suspends at this boundary. The store, not the submission
//! gate, is the authority on "at most one submission per submitter" for forms
//! that disallow multiple submissions.

use crate::model::{FormDefinition, Submission};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// One page of the hotline listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotlinePage {
    pub forms: Vec<FormDefinition>,
    /// Id of the first form of the next page
    pub next_cursor: Option<String>,
}

#[async_trait]
pub trait FormStore: Send + Sync {
    async fn load_form(&self, id: &str) -> StoreResult<Option<FormDefinition>>;

    /// Insert or replace a form, questions included
    async fn save_form(&self, form: FormDefinition) -> StoreResult<FormDefinition>;

    /// Delete a form and every submission to it
    async fn delete_form(&self, id: &str) -> StoreResult<()>;

    /// Persist a submission with all of its answers, or nothing
    async fn create_submission(&self, submission: Submission) -> StoreResult<Submission>;

    async fn find_submission(
        &self,
        form_id: &str,
        submitter_id: &str,
    ) -> StoreResult<Option<Submission>>;

    /// Submissions in the order they were accepted
    async fn list_submissions(
        &self,
        form_id: &str,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<Submission>>;

    async fn count_submissions(&self, form_id: &str) -> StoreResult<usize>;

    /// Published, active hotline forms, newest first
    async fn list_hotline_forms(
        &self,
        limit: usize,
        cursor: Option<&str>,
    ) -> StoreResult<HotlinePage>;
}

#[derive(Default)]
struct State {
    forms: HashMap<String, FormDefinition>,
    submissions: Vec<Submission>,
}

/// In-memory store (for tests and single-node development)
pub struct InMemoryFormStore {
    state: RwLock<State>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for InMemoryFormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn load_form(&self, id: &str) -> StoreResult<Option<FormDefinition>> {
        Ok(self.state.read().forms.get(id).cloned())
    }

    async fn save_form(&self, form: FormDefinition) -> StoreResult<FormDefinition> {
        self.state.write().forms.insert(form.id.clone(), form.clone());
        Ok(form)
    }

    async fn delete_form(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state.write();
        if state.forms.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("form {}", id)));
        }
        state.submissions.retain(|s| s.form_id != id);
        Ok(())
    }

    async fn create_submission(&self, submission: Submission) -> StoreResult<Submission> {
        let mut state = self.state.write();
        let form = state
            .forms
            .get(&submission.form_id)
            .ok_or_else(|| StoreError::NotFound(format!("form {}", submission.form_id)))?;

        // Unique (form_id, submitter_id) for single-submission forms
        if !form.allow_multiple_submissions {
            if let Some(submitter) = &submission.submitter_id {
                let duplicate = state.submissions.iter().any(|s| {
                    s.form_id == submission.form_id && s.submitter_id.as_ref() == Some(submitter)
                });
                if duplicate {
                    return Err(StoreError::Conflict(format!(
                        "submission by {} to form {}",
                        submitter, submission.form_id
                    )));
                }
            }
        }

        state.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn find_submission(
        &self,
        form_id: &str,
        submitter_id: &str,
    ) -> StoreResult<Option<Submission>> {
        Ok(self
            .state
            .read()
            .submissions
            .iter()
            .find(|s| s.form_id == form_id && s.submitter_id.as_deref() == Some(submitter_id))
            .cloned())
    }

    async fn list_submissions(
        &self,
        form_id: &str,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<Submission>> {
        Ok(self
            .state
            .read()
            .submissions
            .iter()
            .filter(|s| s.form_id == form_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_submissions(&self, form_id: &str) -> StoreResult<usize> {
        Ok(self
            .state
            .read()
            .submissions
            .iter()
            .filter(|s| s.form_id == form_id)
            .count())
    }

    async fn list_hotline_forms(
        &self,
        limit: usize,
        cursor: Option<&str>,
    ) -> StoreResult<HotlinePage> {
        let state = self.state.read();
        let mut listed: Vec<&FormDefinition> =
            state.forms.values().filter(|f| f.is_hotline_listed()).collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let start = match cursor {
            Some(id) => match listed.iter().position(|f| f.id == id) {
                Some(pos) => pos,
                None => {
                    return Ok(HotlinePage {
                        forms: Vec::new(),
                        next_cursor: None,
                    })
                }
            },
            None => 0,
        };

        let forms: Vec<FormDefinition> =
            listed.iter().skip(start).take(limit).map(|f| (*f).clone()).collect();
        let next_cursor = listed.get(start + limit).map(|f| f.id.clone());

        Ok(HotlinePage { forms, next_cursor })
    }
}
