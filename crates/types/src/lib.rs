//! Validated primitive types shared across the NephroGuide crates.
//!
//! - [`NonEmptyText`]: trimmed free text that is guaranteed non-empty.
//! - [`Measurement`]: a finite numeric value, the only way a lab or vital enters the rule engine.

mod measurement;
mod text;

pub use measurement::{Measurement, MeasurementError};
pub use text::{NonEmptyText, TextError};
