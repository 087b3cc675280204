//! Forms Intake: from raw answers to storable ones
//!
//! A submit request carries a loose map of question id to raw value. The
//! validator decides whether the required questions are answered, and the
//! encoder turns each raw value into the single storage slot its question
//! type calls for.
//!
//! # Example
//!
//! ```ignore
//! use forms_intake::{encode_all, validate};
//!
//! validate(&form, &raw)?;
//! let encoding = encode_all(&form, &raw);
//! for anomaly in &encoding.anomalies {
//!     println!("{}", anomaly);
//! }
//! ```

pub mod encoder;
pub mod validator;

pub use encoder::{encode, encode_all, parse_date, Encoded, Encoding, EncodingAnomaly};
pub use validator::{validate, RequiredField, ValidationContract};
