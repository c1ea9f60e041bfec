//! Submission lifecycle for Matrix analyses.
//!
//! [`SubmissionForm`] is the synchronous state machine; [`SubmissionRunner`]
//! drives it against a [`Backend`](matrix_client::Backend).

pub mod error;
pub mod form;
pub mod preview;
pub mod runner;

pub use error::{Result, SubmitError};
pub use form::{Applied, Effect, Phase, Submission, SubmissionForm};
pub use preview::generate_preview;
pub use runner::{SubmissionRunner, execute};
