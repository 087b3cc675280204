//! Submission Gate
//!
//! Decides whether an identity may submit to a form. The checks run in a
//! fixed order and the first failing one wins.

use forms_core::{FormDefinition, GateError, Identity};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Terminal outcome of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateVerdict {
    Accept,
    Reject(GateError),
}

impl GateVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateVerdict::Accept)
    }

    pub fn rejection(&self) -> Option<GateError> {
        match self {
            GateVerdict::Accept => None,
            GateVerdict::Reject(reason) => Some(*reason),
        }
    }

    pub fn into_result(self) -> Result<(), GateError> {
        match self {
            GateVerdict::Accept => Ok(()),
            GateVerdict::Reject(reason) => Err(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionGate;

impl SubmissionGate {
    pub fn new() -> Self {
        Self
    }

    /// Submitter whose prior submissions must be looked up before `evaluate`.
    ///
    /// `None` when the form allows multiple submissions or the identity is
    /// anonymous: there is nothing to key the lookup on.
    pub fn prior_lookup<'a>(&self, form: &FormDefinition, identity: &'a Identity) -> Option<&'a str> {
        if form.allow_multiple_submissions {
            return None;
        }
        identity.submitter_id()
    }

    /// Decide for one attempt. `prior_exists` is the result of the lookup
    /// named by `prior_lookup` and is ignored when no lookup applies.
    pub fn evaluate(
        &self,
        form: &FormDefinition,
        identity: &Identity,
        prior_exists: bool,
    ) -> GateVerdict {
        let verdict = if !form.is_active {
            GateVerdict::Reject(GateError::FormClosed)
        } else if form.require_auth && !identity.is_authenticated() {
            GateVerdict::Reject(GateError::Unauthenticated)
        } else if prior_exists && self.prior_lookup(form, identity).is_some() {
            GateVerdict::Reject(GateError::AlreadySubmitted)
        } else {
            GateVerdict::Accept
        };

        if let GateVerdict::Reject(reason) = verdict {
            debug!(form_id = %form.id, code = reason.code(), "submission gate rejected");
        }
        verdict
    }
}
