//! # NephroGuide Core
//!
//! Renal decision support for NephroGuide.
//!
//! This crate contains the pure decision logic and its projections:
//! - [`RuleEngine`]: maps one [`PatientRecord`] to an [`Assessment`]
//! - [`Summary`]: plain-text patient summary for display or export
//! - [`OutputFormat`]: text, YAML and JSON renderings of an assessment
//!
//! **No I/O**: reading form documents from disk, configuration and logging setup belong in the
//! `nephroguide` binary. Form parsing lives in `nephro-record`.

pub mod assessment;
pub mod constants;
pub mod error;
pub mod output;
pub mod rules;
pub mod summary;

pub use assessment::Assessment;
pub use error::{CoreError, CoreResult};
pub use output::OutputFormat;
pub use rules::{EgfrStage, Rule, RuleEngine};
pub use summary::Summary;

pub use nephro_record::PatientRecord;

/// Evaluate a patient record. Shorthand for [`RuleEngine::evaluate`].
pub fn evaluate(record: &PatientRecord) -> Assessment {
    RuleEngine::evaluate(record)
}
