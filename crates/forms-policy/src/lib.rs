//! Forms Policy: who may submit, and a record of every decision
//!
//! ```text
//! (form, identity) → is_active? → require_auth? → prior submission? → Verdict
//!                        ↓             ↓                 ↓                ↓
//!                   FORM_CLOSED  UNAUTHENTICATED  ALREADY_SUBMITTED   ACCEPT
//!                        └─────────────┴─────────────────┴────────────────┘
//!                                              ↓
//!                                        GateAuditLog
//! ```
//!
//! # Example
//!
//! ```
//! use forms_core::{FormDefinition, GateError, Identity};
//! use forms_policy::{GateVerdict, SubmissionGate};
//!
//! let form = FormDefinition::draft("Feedback");
//! let gate = SubmissionGate::new();
//!
//! let verdict = gate.evaluate(&form, &Identity::anonymous(), false);
//! assert_eq!(verdict, GateVerdict::Reject(GateError::Unauthenticated));
//! ```

pub mod audit;
pub mod gate;

pub use audit::{GateAuditEntry, GateAuditLog, GateAuditStats};
pub use gate::{GateVerdict, SubmissionGate};
