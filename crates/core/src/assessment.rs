//! Assessment output and the draft the rules write into.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::NO_SPECIFIC_DIAGNOSIS;

/// Result of evaluating one patient record.
///
/// `diagnosis` is always non-empty. The three lists keep the order in which rules fired and
/// may contain the same line more than once when two rules give the same advice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub diagnosis: String,
    pub recommendations: Vec<String>,
    pub medications: Vec<String>,
    pub warnings: Vec<String>,
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diagnosis: {}", self.diagnosis)?;
        write_list(f, "Recommendations", &self.recommendations)?;
        write_list(f, "Medications", &self.medications)?;
        write_list(f, "Warnings", &self.warnings)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    if items.is_empty() {
        return writeln!(f, "- None");
    }
    for item in items {
        writeln!(f, "- {item}")?;
    }
    Ok(())
}

/// Accumulator used while the rules run.
///
/// The diagnosis is the only value that can change once written: hard rules overwrite it,
/// imaging rules only fill it in. Everything else is append-only.
#[derive(Debug, Default)]
pub(crate) struct Draft {
    diagnosis: Option<&'static str>,
    recommendations: Vec<String>,
    medications: Vec<String>,
    warnings: Vec<String>,
}

impl Draft {
    pub(crate) fn diagnose(&mut self, diagnosis: &'static str) {
        self.diagnosis = Some(diagnosis);
    }

    pub(crate) fn diagnose_if_unset(&mut self, diagnosis: &'static str) {
        self.diagnosis.get_or_insert(diagnosis);
    }

    pub(crate) fn has_diagnosis(&self) -> bool {
        self.diagnosis.is_some()
    }

    pub(crate) fn recommend(&mut self, items: &[&str]) {
        self.recommendations.extend(items.iter().map(|s| (*s).to_owned()));
    }

    pub(crate) fn prescribe(&mut self, medication: &str) {
        self.medications.push(medication.to_owned());
    }

    pub(crate) fn warn(&mut self, warning: &str) {
        self.warnings.push(warning.to_owned());
    }

    pub(crate) fn finish(self) -> Assessment {
        Assessment {
            diagnosis: self.diagnosis.unwrap_or(NO_SPECIFIC_DIAGNOSIS).to_owned(),
            recommendations: self.recommendations,
            medications: self.medications,
            warnings: self.warnings,
        }
    }
}
