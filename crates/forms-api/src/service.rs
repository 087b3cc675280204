//! Form Service
//!
//! The only component that talks to the store. A submit goes gate, then
//! validation, then encoding, then one `create_submission` call; any failure
//! before the last step leaves the store untouched.
//!
//! The gate audit log holds the final eligibility outcome of each submit:
//! a gate rejection, a duplicate refused by the store, or an accepted and
//! persisted submission. Submits that fail validation leave no entry.

use forms_core::{
    EngineConfig, FormDefinition, FormStore, FormsError, GateError, HotlinePage, Identity,
    QuestionType, RawAnswers, Result, StoreError, Submission,
};
use forms_intake::{encode_all, validate, EncodingAnomaly};
use forms_out::{
    DeckPosition, NoDirectory, QuestionResponses, QuestionSummary, ResponseDeck, SubmissionView,
    SubmitterDirectory, SummaryOptions,
};
use forms_policy::{GateAuditEntry, GateAuditLog, GateAuditStats, GateVerdict, SubmissionGate};
use forms_registry::{editor, normalize_order, prepare_for_save};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// What a successful submit returns
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub submission: Submission,
    pub anomalies: Vec<EncodingAnomaly>,
}

/// Whether an identity may still respond to a form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatus {
    pub form_id: String,
    pub accepting: bool,
    pub has_submitted: bool,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<GateError>,
}

/// One page of per-submission views
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePage {
    pub total: usize,
    pub offset: usize,
    pub responses: Vec<SubmissionView>,
}

pub struct FormService {
    store: Arc<dyn FormStore>,
    gate: SubmissionGate,
    audit: Mutex<GateAuditLog>,
    directory: Arc<dyn SubmitterDirectory>,
    summary_options: SummaryOptions,
    config: EngineConfig,
}

impl FormService {
    pub fn new(store: Arc<dyn FormStore>, config: EngineConfig) -> Self {
        Self {
            store,
            gate: SubmissionGate::new(),
            audit: Mutex::new(GateAuditLog::with_max_entries(config.audit_max_entries)),
            directory: Arc::new(NoDirectory),
            summary_options: SummaryOptions::from_config(&config),
            config,
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn SubmitterDirectory>) -> Self {
        self.directory = directory;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // FORMS
    // ========================================================================

    pub async fn load_form(&self, form_id: &str) -> Result<FormDefinition> {
        self.store
            .load_form(form_id)
            .await?
            .ok_or_else(|| FormsError::not_found("form", form_id))
    }

    pub async fn create_form(&self, title: &str) -> Result<FormDefinition> {
        let mut form = editor::create_draft(title);
        prepare_for_save(&mut form)?;
        let form = self.store.save_form(form).await?;
        info!(form_id = %form.id, "form created");
        Ok(form)
    }

    /// Replace a stored definition. Order is renumbered and every save-time
    /// check runs; the stored creation time is kept.
    pub async fn save_form(&self, mut form: FormDefinition) -> Result<FormDefinition> {
        let existing = self.load_form(&form.id).await?;
        form.created_at = existing.created_at;
        prepare_for_save(&mut form)?;
        form.touch();
        Ok(self.store.save_form(form).await?)
    }

    pub async fn delete_form(&self, form_id: &str) -> Result<()> {
        self.store.delete_form(form_id).await.map_err(|e| match e {
            StoreError::NotFound(_) => FormsError::not_found("form", form_id),
            other => FormsError::Store(other),
        })?;
        info!(form_id, "form deleted");
        Ok(())
    }

    /// Publishing runs the save-time checks; unpublishing never fails them
    pub async fn set_published(&self, form_id: &str, published: bool) -> Result<FormDefinition> {
        let mut form = self.load_form(form_id).await?;
        if published {
            form.publish();
            prepare_for_save(&mut form)?;
        } else {
            form.unpublish();
        }
        Ok(self.store.save_form(form).await?)
    }

    pub async fn hotline_forms(&self, cursor: Option<&str>) -> Result<HotlinePage> {
        Ok(self
            .store
            .list_hotline_forms(self.config.hotline_page_size, cursor)
            .await?)
    }

    // ========================================================================
    // EDITOR
    // ========================================================================

    pub async fn add_question(
        &self,
        form_id: &str,
        question_type: QuestionType,
        title: Option<String>,
        required: bool,
    ) -> Result<FormDefinition> {
        self.edit(form_id, |form| {
            editor::add_question(form, question_type);
            if let Some(question) = form.questions.last_mut() {
                question.title = title.unwrap_or_default();
                question.required = required;
            }
            Ok(())
        })
        .await
    }

    pub async fn remove_question(&self, form_id: &str, question_id: &str) -> Result<FormDefinition> {
        self.edit(form_id, |form| {
            let index = question_index(form, question_id)?;
            editor::remove_question(form, index)?;
            Ok(())
        })
        .await
    }

    pub async fn reorder_questions(&self, form_id: &str, from: usize, to: usize) -> Result<FormDefinition> {
        self.edit(form_id, |form| Ok(editor::reorder_questions(form, from, to)?))
            .await
    }

    pub async fn change_question_type(
        &self,
        form_id: &str,
        question_id: &str,
        question_type: QuestionType,
    ) -> Result<FormDefinition> {
        self.edit(form_id, |form| {
            let index = question_index(form, question_id)?;
            Ok(editor::change_question_type(form, index, question_type)?)
        })
        .await
    }

    /// Apply one editor step and persist it. Drafts may pass through
    /// incomplete states; a published form must stay valid after every edit.
    async fn edit<F>(&self, form_id: &str, apply: F) -> Result<FormDefinition>
    where
        F: FnOnce(&mut FormDefinition) -> Result<()>,
    {
        let mut form = self.load_form(form_id).await?;
        apply(&mut form)?;
        if form.is_published {
            prepare_for_save(&mut form)?;
        } else {
            normalize_order(&mut form);
        }
        Ok(self.store.save_form(form).await?)
    }

    // ========================================================================
    // SUBMISSIONS
    // ========================================================================

    pub async fn validate_and_submit(
        &self,
        form_id: &str,
        identity: &Identity,
        raw: RawAnswers,
    ) -> Result<SubmitReceipt> {
        let form = self.load_form(form_id).await?;

        let prior_exists = self.prior_exists(&form, identity).await?;
        let verdict = self.gate.evaluate(&form, identity, prior_exists);
        if let Some(reason) = verdict.rejection() {
            self.audit.lock().record(&form.id, identity, verdict);
            return Err(reason.into());
        }

        validate(&form, &raw)?;
        let encoding = encode_all(&form, &raw);

        let submission = Submission::new(
            form.id.clone(),
            identity.submitter_id.clone(),
            encoding.answers,
        );
        let submission = match self.store.create_submission(submission).await {
            Ok(submission) => submission,
            Err(StoreError::Conflict(detail)) => {
                warn!(form_id, %detail, "duplicate submission caught by store");
                let rejected = GateVerdict::Reject(GateError::AlreadySubmitted);
                self.audit.lock().record(&form.id, identity, rejected);
                return Err(GateError::AlreadySubmitted.into());
            }
            Err(StoreError::NotFound(_)) => return Err(FormsError::not_found("form", form_id)),
            Err(other) => return Err(FormsError::Store(other)),
        };
        self.audit
            .lock()
            .record(&form.id, identity, GateVerdict::Accept);

        info!(
            form_id,
            submission_id = %submission.id,
            answers = submission.answers.len(),
            anomalies = encoding.anomalies.len(),
            "submission accepted"
        );
        Ok(SubmitReceipt {
            submission,
            anomalies: encoding.anomalies,
        })
    }

    pub async fn submission_status(&self, form_id: &str, identity: &Identity) -> Result<SubmissionStatus> {
        let form = self.load_form(form_id).await?;
        let has_submitted = match identity.submitter_id() {
            Some(submitter) => self.store.find_submission(&form.id, submitter).await?.is_some(),
            None => false,
        };
        let prior_exists = self.prior_exists(&form, identity).await?;
        let verdict = self.gate.evaluate(&form, identity, prior_exists);

        Ok(SubmissionStatus {
            form_id: form.id,
            accepting: form.is_active,
            has_submitted,
            can_submit: verdict.is_accepted(),
            reason: verdict.rejection(),
        })
    }

    async fn prior_exists(&self, form: &FormDefinition, identity: &Identity) -> Result<bool> {
        match self.gate.prior_lookup(form, identity) {
            Some(submitter) => Ok(self.store.find_submission(&form.id, submitter).await?.is_some()),
            None => Ok(false),
        }
    }

    pub async fn count_submissions(&self, form_id: &str) -> Result<usize> {
        let form = self.load_form(form_id).await?;
        Ok(self.store.count_submissions(&form.id).await?)
    }

    pub fn audit_stats(&self) -> GateAuditStats {
        self.audit.lock().stats()
    }

    pub fn audit_entries(&self, form_id: &str) -> Vec<GateAuditEntry> {
        self.audit
            .lock()
            .entries_for_form(form_id)
            .into_iter()
            .cloned()
            .collect()
    }

    // ========================================================================
    // RESPONSES
    // ========================================================================

    async fn all_submissions(&self, form_id: &str) -> Result<Vec<Submission>> {
        let total = self.store.count_submissions(form_id).await?;
        Ok(self.store.list_submissions(form_id, total, 0).await?)
    }

    pub async fn build_summary(&self, form_id: &str) -> Result<Vec<QuestionSummary>> {
        let form = self.load_form(form_id).await?;
        let submissions = self.all_submissions(&form.id).await?;
        Ok(forms_out::build_summary(
            &form.questions,
            &submissions,
            &self.summary_options,
        ))
    }

    pub async fn submission_views(
        &self,
        form_id: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<ResponsePage> {
        let form = self.load_form(form_id).await?;
        let total = self.store.count_submissions(&form.id).await?;
        let submissions = self
            .store
            .list_submissions(&form.id, self.config.page_size(limit), offset)
            .await?;

        let responses = submissions
            .iter()
            .map(|s| {
                forms_out::submission_view(
                    &form.questions,
                    s,
                    self.directory.as_ref(),
                    &self.summary_options,
                )
            })
            .collect();
        Ok(ResponsePage {
            total,
            offset,
            responses,
        })
    }

    /// Every submission view of a form, for paging one at a time
    pub async fn response_deck(&self, form_id: &str) -> Result<ResponseDeck> {
        let form = self.load_form(form_id).await?;
        let submissions = self.all_submissions(&form.id).await?;
        let views = submissions
            .iter()
            .map(|s| {
                forms_out::submission_view(
                    &form.questions,
                    s,
                    self.directory.as_ref(),
                    &self.summary_options,
                )
            })
            .collect();
        Ok(ResponseDeck::new(views))
    }

    pub async fn response_at(&self, form_id: &str, index: usize) -> Result<DeckPosition> {
        let mut deck = self.response_deck(form_id).await?;
        deck.seek(index)
            .ok_or_else(|| FormsError::not_found("response", &index.to_string()))?;
        deck.position()
            .ok_or_else(|| FormsError::not_found("response", &index.to_string()))
    }

    pub async fn question_responses(&self, form_id: &str, question_id: &str) -> Result<QuestionResponses> {
        let form = self.load_form(form_id).await?;
        let submissions = self.all_submissions(&form.id).await?;
        forms_out::question_responses(
            &form.questions,
            &submissions,
            question_id,
            self.directory.as_ref(),
            &self.summary_options,
        )
        .ok_or_else(|| FormsError::not_found("question", question_id))
    }
}

fn question_index(form: &FormDefinition, question_id: &str) -> Result<usize> {
    form.question_index(question_id)
        .ok_or_else(|| FormsError::not_found("question", question_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use forms_core::{AnswerValue, InMemoryFormStore, RawValue, StoreResult, REQUIRED_MESSAGE};
    use forms_out::SummaryBody;
    use serde_json::json;
    use std::collections::HashMap;

    /// In-memory store whose prior-submission lookup always misses, as when
    /// two first-time submits read before either one is written
    #[derive(Default)]
    struct StaleReadStore(InMemoryFormStore);

    #[async_trait]
    impl FormStore for StaleReadStore {
        async fn load_form(&self, id: &str) -> StoreResult<Option<FormDefinition>> {
            self.0.load_form(id).await
        }

        async fn save_form(&self, form: FormDefinition) -> StoreResult<FormDefinition> {
            self.0.save_form(form).await
        }

        async fn delete_form(&self, id: &str) -> StoreResult<()> {
            self.0.delete_form(id).await
        }

        async fn create_submission(&self, submission: Submission) -> StoreResult<Submission> {
            self.0.create_submission(submission).await
        }

        async fn find_submission(&self, _form_id: &str, _submitter_id: &str) -> StoreResult<Option<Submission>> {
            Ok(None)
        }

        async fn list_submissions(&self, form_id: &str, limit: usize, offset: usize) -> StoreResult<Vec<Submission>> {
            self.0.list_submissions(form_id, limit, offset).await
        }

        async fn count_submissions(&self, form_id: &str) -> StoreResult<usize> {
            self.0.count_submissions(form_id).await
        }

        async fn list_hotline_forms(&self, limit: usize, cursor: Option<&str>) -> StoreResult<HotlinePage> {
            self.0.list_hotline_forms(limit, cursor).await
        }
    }

    fn service() -> FormService {
        FormService::new(Arc::new(InMemoryFormStore::new()), EngineConfig::default())
    }

    async fn feedback_form(service: &FormService) -> FormDefinition {
        let form = service.create_form("Committee Feedback").await.unwrap();
        service
            .add_question(&form.id, QuestionType::ShortAnswer, Some("Name".into()), true)
            .await
            .unwrap();
        let form = service
            .add_question(&form.id, QuestionType::Rating, Some("Score".into()), false)
            .await
            .unwrap();
        service.set_published(&form.id, true).await.unwrap()
    }

    fn answers(pairs: &[(&str, RawValue)]) -> RawAnswers {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn test_second_submission_rejected() {
        let service = service();
        let form = feedback_form(&service).await;
        let name_id = form.questions[0].id.clone();
        let identity = Identity::member("u1");
        let raw = answers(&[(name_id.as_str(), RawValue::from("Dewi"))]);

        service.validate_and_submit(&form.id, &identity, raw.clone()).await.unwrap();
        let err = service
            .validate_and_submit(&form.id, &identity, raw)
            .await
            .unwrap_err();

        assert!(matches!(err, FormsError::Gate(GateError::AlreadySubmitted)));
        assert_eq!(service.count_submissions(&form.id).await.unwrap(), 1);
        assert_eq!(service.audit_stats().already_submitted, 1);
    }

    #[tokio::test]
    async fn test_store_conflict_maps_to_already_submitted() {
        let service = FormService::new(Arc::new(StaleReadStore::default()), EngineConfig::default());
        let form = feedback_form(&service).await;
        let name_id = form.questions[0].id.clone();
        let identity = Identity::member("u1");
        let raw = answers(&[(name_id.as_str(), RawValue::from("Dewi"))]);

        service.validate_and_submit(&form.id, &identity, raw.clone()).await.unwrap();
        let err = service
            .validate_and_submit(&form.id, &identity, raw)
            .await
            .unwrap_err();

        assert!(matches!(err, FormsError::Gate(GateError::AlreadySubmitted)));
        assert_eq!(service.count_submissions(&form.id).await.unwrap(), 1);

        let stats = service.audit_stats();
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.already_submitted, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_first_submits_store_one() {
        for store in [
            Arc::new(InMemoryFormStore::new()) as Arc<dyn FormStore>,
            Arc::new(StaleReadStore::default()) as Arc<dyn FormStore>,
        ] {
            let service = Arc::new(FormService::new(store, EngineConfig::default()));
            let form = feedback_form(&service).await;
            let name_id = form.questions[0].id.clone();
            let raw = answers(&[(name_id.as_str(), RawValue::from("Dewi"))]);

            let submit = |service: Arc<FormService>, form_id: String, raw: RawAnswers| {
                tokio::spawn(async move {
                    service
                        .validate_and_submit(&form_id, &Identity::member("u1"), raw)
                        .await
                })
            };
            let (first, second) = tokio::join!(
                submit(service.clone(), form.id.clone(), raw.clone()),
                submit(service.clone(), form.id.clone(), raw),
            );
            let results = [first.unwrap(), second.unwrap()];

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            let err = results.into_iter().find_map(|r| r.err()).unwrap();
            assert!(matches!(err, FormsError::Gate(GateError::AlreadySubmitted)));
            assert_eq!(service.count_submissions(&form.id).await.unwrap(), 1);
            assert_eq!(service.audit_stats().accepted, 1);
        }
    }

    #[tokio::test]
    async fn test_invalid_submit_not_audited_as_accepted() {
        let service = service();
        let form = feedback_form(&service).await;
        let name_id = form.questions[0].id.clone();

        let err = service
            .validate_and_submit(&form.id, &Identity::member("u1"), answers(&[]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(service.audit_stats().total, 0);

        service
            .validate_and_submit(
                &form.id,
                &Identity::member("u1"),
                answers(&[(name_id.as_str(), RawValue::from("Dewi"))]),
            )
            .await
            .unwrap();
        let stats = service.audit_stats();
        assert_eq!((stats.total, stats.accepted, stats.rejected), (1, 1, 0));
    }

    #[tokio::test]
    async fn test_empty_answers_read_as_no_answer() {
        let service = service();
        let form = service.create_form("Open Mic").await.unwrap();
        service
            .add_question(&form.id, QuestionType::ShortAnswer, Some("Note".into()), false)
            .await
            .unwrap();
        service
            .add_question(&form.id, QuestionType::MultipleSelect, Some("Pick".into()), false)
            .await
            .unwrap();
        let form = service
            .add_question(&form.id, QuestionType::Date, Some("When".into()), false)
            .await
            .unwrap();
        let ids: Vec<String> = form.questions.iter().map(|q| q.id.clone()).collect();

        let receipt = service
            .validate_and_submit(
                &form.id,
                &Identity::member("u1"),
                answers(&[(ids[0].as_str(), RawValue::Null), (ids[1].as_str(), RawValue::from("a"))]),
            )
            .await
            .unwrap();
        assert_eq!(receipt.submission.answers.len(), 2);
        assert!(receipt.submission.answers.iter().all(|a| a.value.is_skipped()));

        let page = service.submission_views(&form.id, None, 0).await.unwrap();
        let displays: Vec<&str> = page.responses[0].answers.iter().map(|a| a.display.as_str()).collect();
        assert_eq!(displays, vec!["No answer", "No answer", "Skipped"]);

        let summary = service.build_summary(&form.id).await.unwrap();
        assert_eq!(summary[0].total_answers, 1);
        assert_eq!(summary[0].body, SummaryBody::Text(vec!["No answer".to_string()]));
        assert_eq!(summary[2].total_answers, 0);
    }

    #[tokio::test]
    async fn test_multi_select_round_trip() {
        let service = service();
        let form = service.create_form("Workshop Sign-up").await.unwrap();
        let form = service
            .add_question(&form.id, QuestionType::MultipleSelect, Some("Sessions".into()), true)
            .await
            .unwrap();
        let sessions_id = form.questions[0].id.clone();

        service
            .validate_and_submit(
                &form.id,
                &Identity::member("u4"),
                answers(&[(sessions_id.as_str(), RawValue::from(vec!["a", "b"]))]),
            )
            .await
            .unwrap();

        let page = service.submission_views(&form.id, None, 0).await.unwrap();
        let answer = &page.responses[0].answers[0];
        assert_eq!(answer.value, Some(AnswerValue::Json(json!(["a", "b"]))));
        assert_eq!(answer.display, "a, b");
    }

    #[tokio::test]
    async fn test_missing_required_creates_nothing() {
        let service = service();
        let form = feedback_form(&service).await;
        let name_id = form.questions[0].id.clone();

        for raw in [
            answers(&[]),
            answers(&[(name_id.as_str(), RawValue::from(""))]),
            answers(&[(name_id.as_str(), RawValue::Array(vec![]))]),
        ] {
            let err = service
                .validate_and_submit(&form.id, &Identity::member("u1"), raw)
                .await
                .unwrap_err();
            let FormsError::Validation(fields) = err else {
                panic!("expected a validation error");
            };
            assert!(fields.contains(&name_id));
            assert!(fields.iter().all(|f| f.message == REQUIRED_MESSAGE));
        }
        assert_eq!(service.count_submissions(&form.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_form() {
        let service = service();
        let mut form = feedback_form(&service).await;
        form.is_active = false;
        let form = service.save_form(form).await.unwrap();

        let err = service
            .validate_and_submit(&form.id, &Identity::member("u1"), answers(&[]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "FORM_CLOSED");
    }

    #[tokio::test]
    async fn test_submission_status() {
        let service = service();
        let form = feedback_form(&service).await;
        let name_id = form.questions[0].id.clone();
        let identity = Identity::member("u9");

        let before = service.submission_status(&form.id, &identity).await.unwrap();
        assert!(before.can_submit && !before.has_submitted);

        service
            .validate_and_submit(&form.id, &identity, answers(&[(name_id.as_str(), RawValue::from("Budi"))]))
            .await
            .unwrap();

        let after = service.submission_status(&form.id, &identity).await.unwrap();
        assert!(after.has_submitted);
        assert!(!after.can_submit);
        assert_eq!(after.reason, Some(GateError::AlreadySubmitted));

        let anonymous = service.submission_status(&form.id, &Identity::anonymous()).await.unwrap();
        assert_eq!(anonymous.reason, Some(GateError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_publishing_invalid_form_fails() {
        let service = service();
        let form = service.create_form("Draft").await.unwrap();
        service
            .add_question(&form.id, QuestionType::MultipleChoice, Some("Pick".into()), false)
            .await
            .unwrap();

        let err = service.set_published(&form.id, true).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_DEFINITION");
        assert!(!service.load_form(&form.id).await.unwrap().is_published);
    }

    #[tokio::test]
    async fn test_editor_round_trip() {
        let service = service();
        let form = service.create_form("Draft").await.unwrap();
        for title in ["Q1", "Q2", "Q3"] {
            service
                .add_question(&form.id, QuestionType::ShortAnswer, Some(title.into()), false)
                .await
                .unwrap();
        }
        let form = service.reorder_questions(&form.id, 0, 2).await.unwrap();
        let titles: Vec<&str> = form.questions.iter().map(|q| q.title.as_str()).collect();
        let orders: Vec<u32> = form.questions.iter().map(|q| q.order).collect();
        assert_eq!(titles, vec!["Q2", "Q3", "Q1"]);
        assert_eq!(orders, vec![0, 1, 2]);

        let q1 = form.questions[2].id.clone();
        let form = service
            .change_question_type(&form.id, &q1, QuestionType::Date)
            .await
            .unwrap();
        assert_eq!(form.questions[2].question_type(), QuestionType::Date);

        let form = service.remove_question(&form.id, &q1).await.unwrap();
        assert_eq!(form.questions.len(), 2);

        let err = service.remove_question(&form.id, &q1).await.unwrap_err();
        assert!(matches!(err, FormsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_views_use_directory() {
        let directory: HashMap<String, String> = [("u1".to_string(), "Dewi Lestari".to_string())].into();
        let service = service().with_directory(Arc::new(directory));
        let form = feedback_form(&service).await;
        let name_id = form.questions[0].id.clone();
        let score_id = form.questions[1].id.clone();

        service
            .validate_and_submit(
                &form.id,
                &Identity::member("u1"),
                answers(&[(name_id.as_str(), RawValue::from("Dewi")), (score_id.as_str(), RawValue::from(4i64))]),
            )
            .await
            .unwrap();

        let page = service.submission_views(&form.id, None, 0).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.responses[0].submitter_label, "Dewi Lestari");

        let position = service.response_at(&form.id, 0).await.unwrap();
        assert!(!position.has_next);
        assert!(service.response_at(&form.id, 1).await.is_err());

        let responses = service.question_responses(&form.id, &score_id).await.unwrap();
        assert_eq!(responses.responses[0].display, "4");

        let summary = service.build_summary(&form.id).await.unwrap();
        assert_eq!(summary[1].ranked(), vec![("4", 1)]);
    }

    #[tokio::test]
    async fn test_unknown_form() {
        let service = service();
        let err = service
            .validate_and_submit("nope", &Identity::member("u1"), answers(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::NotFound(_)));
        assert!(matches!(service.delete_form("nope").await, Err(FormsError::NotFound(_))));
    }
}
