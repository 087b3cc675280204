//! Identity: who is submitting, as resolved by the session layer
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// A resolved identity. The engine never authenticates; it only reads this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub submitter_id: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn member(submitter_id: impl Into<String>) -> Self {
        Self {
            submitter_id: Some(submitter_id.into()),
            role: Role::Member,
        }
    }

    pub fn admin(submitter_id: impl Into<String>) -> Self {
        Self {
            submitter_id: Some(submitter_id.into()),
            role: Role::Admin,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.submitter_id.is_some()
    }

    pub fn submitter_id(&self) -> Option<&str> {
        self.submitter_id.as_deref()
    }
}
