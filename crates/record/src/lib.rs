//! Patient record boundary for NephroGuide.
//!
//! This crate owns the structured [`PatientRecord`] the rule engine consumes, and the form
//! document format a clinician's input arrives in:
//! - YAML form documents (JSON is accepted as the YAML subset it is)
//!
//! This crate focuses on:
//! - the domain model (typed, validated, absent values explicit)
//! - strict serialisation/deserialisation of the form wire model
//! - translation from raw form text into typed values
//!
//! No clinical decisions are made here. Rules live in `nephro-core`.

pub mod form;
pub mod imaging;
pub mod patient;

// Re-export facades
pub use form::Form;

// Re-export public domain-level types
pub use imaging::ImagingFinding;
pub use patient::{
    Gender, Labs, Location, MedicalHistory, PatientRecord, PhysicalExam, Profile, Symptoms,
};

pub use nephro_types::{Measurement, NonEmptyText};

/// Errors returned by the `nephro-record` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`RecordError`].
pub type RecordResult<T> = Result<T, RecordError>;
