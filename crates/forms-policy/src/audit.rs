//! Gate decision audit trail
//!
//! Keeps the most recent gate decisions in memory, oldest dropped first.

use crate::gate::GateVerdict;
use chrono::{DateTime, Utc};
use forms_core::{GateError, Identity, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateAuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub form_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_id: Option<String>,
    pub role: Role,
    pub verdict: GateVerdict,
}

impl GateAuditEntry {
    pub fn new(form_id: impl Into<String>, identity: &Identity, verdict: GateVerdict) -> Self {
        Self {
            id: format!("gate_{}", Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            form_id: form_id.into(),
            submitter_id: identity.submitter_id.clone(),
            role: identity.role,
            verdict,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateAuditStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub unauthenticated: usize,
    pub already_submitted: usize,
    pub form_closed: usize,
    pub acceptance_rate: f64,
}

pub struct GateAuditLog {
    entries: Vec<GateAuditEntry>,
    max_entries: usize,
}

impl GateAuditLog {
    pub fn new() -> Self {
        Self::with_max_entries(10_000)
    }

    pub fn with_max_entries(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max,
        }
    }

    pub fn log(&mut self, entry: GateAuditEntry) {
        self.entries.push(entry);

        if self.entries.len() > self.max_entries {
            let drain_count = self.entries.len() - self.max_entries;
            self.entries.drain(0..drain_count);
        }
    }

    /// Record one decision and return the entry id
    pub fn record(&mut self, form_id: &str, identity: &Identity, verdict: GateVerdict) -> String {
        let entry = GateAuditEntry::new(form_id, identity, verdict);
        let id = entry.id.clone();
        self.log(entry);
        id
    }

    pub fn entries(&self) -> &[GateAuditEntry] {
        &self.entries
    }

    pub fn entries_for_form(&self, form_id: &str) -> Vec<&GateAuditEntry> {
        self.entries.iter().filter(|e| e.form_id == form_id).collect()
    }

    pub fn rejected_entries(&self) -> Vec<&GateAuditEntry> {
        self.entries
            .iter()
            .filter(|e| !e.verdict.is_accepted())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export as JSON Lines
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .filter_map(|e| serde_json::to_string(e).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stats(&self) -> GateAuditStats {
        let mut stats = GateAuditStats {
            total: self.entries.len(),
            ..Default::default()
        };
        for entry in &self.entries {
            match entry.verdict.rejection() {
                None => stats.accepted += 1,
                Some(reason) => {
                    stats.rejected += 1;
                    match reason {
                        GateError::Unauthenticated => stats.unauthenticated += 1,
                        GateError::AlreadySubmitted => stats.already_submitted += 1,
                        GateError::FormClosed => stats.form_closed += 1,
                    }
                }
            }
        }
        stats.acceptance_rate = if stats.total > 0 {
            stats.accepted as f64 / stats.total as f64
        } else {
            0.0
        };
        stats
    }
}

impl Default for GateAuditLog {
    fn default() -> Self {
        Self::new()
    }
}
