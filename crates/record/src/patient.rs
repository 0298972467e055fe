//! Domain-level patient record.
//!
//! A [`PatientRecord`] is built once per evaluation from the clinician's form input and is
//! never mutated afterwards. Every numeric field is an `Option<Measurement>`: a value that
//! was not entered, or could not be read as a finite number, is `None` and never stands in
//! as zero.
//!
//! Only a handful of fields drive decisions (eGFR, potassium, haemoglobin, ACR, 24 h urine
//! protein, the diabetes/hypertension flags, edema and the imaging finding). The rest is
//! carried so the summary can show the whole picture.

use nephro_types::{Measurement, NonEmptyText};

use crate::ImagingFinding;

/// Complete structured input for one assessment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientRecord {
    pub profile: Profile,
    pub history: MedicalHistory,
    pub symptoms: Symptoms,
    pub physical_exam: PhysicalExam,
    pub labs: Labs,
    /// Renal ultrasound finding, if one was selected.
    pub imaging: Option<ImagingFinding>,
}

/// Demographics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub name: Option<NonEmptyText>,
    /// Age in years.
    pub age: Option<Measurement>,
    pub gender: Option<Gender>,
    pub location: Option<Location>,
}

/// Administrative gender as offered on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        [Gender::Male, Gender::Female, Gender::Other]
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
    }
}

/// Where the patient lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Rural,
    Urban,
}

impl Location {
    pub fn label(self) -> &'static str {
        match self {
            Location::Rural => "Rural",
            Location::Urban => "Urban",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        [Location::Rural, Location::Urban]
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(s.trim()))
    }
}

/// Past medical history.
///
/// `diabetes` and `hypertension` feed the rules; everything else is context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MedicalHistory {
    pub diabetes: bool,
    pub hypertension: bool,
    /// Free text, e.g. "10 years".
    pub diabetes_duration: Option<NonEmptyText>,
    pub hypertension_duration: Option<NonEmptyText>,
    pub nsaid_use: bool,
    pub past_stone_disease: bool,
    pub family_ckd: bool,
    pub tb: bool,
    pub hiv: bool,
    pub hepatitis: bool,
}

/// Presenting symptoms. `edema` feeds the nephrotic rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Symptoms {
    pub edema: bool,
    pub fatigue: bool,
    pub nausea: bool,
    pub vomiting: bool,
    pub breathlessness: bool,
    pub decreased_urine_output: bool,
    pub flank_pain: bool,
    pub hematuria: bool,
}

/// Bedside examination.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicalExam {
    /// Systolic blood pressure, mmHg.
    pub sbp: Option<Measurement>,
    /// Diastolic blood pressure, mmHg.
    pub dbp: Option<Measurement>,
    /// Body weight, kg.
    pub weight: Option<Measurement>,
    /// Clinician's volume assessment, e.g. "Euvolemic".
    pub volume_status: Option<NonEmptyText>,
}

/// Laboratory results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Labs {
    /// Serum creatinine, mg/dL.
    pub creatinine: Option<Measurement>,
    /// Estimated GFR, mL/min/1.73m².
    pub egfr: Option<Measurement>,
    /// Serum potassium, mmol/L.
    pub potassium: Option<Measurement>,
    /// Haemoglobin, g/dL.
    pub hemoglobin: Option<Measurement>,
    /// Dipstick protein grade, e.g. "2+".
    pub urinalysis_protein: Option<NonEmptyText>,
    /// Dipstick blood grade.
    pub urinalysis_blood: Option<NonEmptyText>,
    /// Urine albumin-to-creatinine ratio, mg/g.
    pub acr: Option<Measurement>,
    /// Spot urine protein-to-creatinine ratio, mg/g.
    pub spot_protein_creatinine: Option<Measurement>,
    /// 24 hour urine protein, mg/day.
    pub urine_protein_24h: Option<Measurement>,
}

impl Labs {
    /// True when no lab value at all was provided.
    pub fn is_empty(&self) -> bool {
        self == &Labs::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_has_nothing_provided() {
        let record = PatientRecord::default();
        assert!(record.labs.is_empty());
        assert!(record.imaging.is_none());
        assert!(!record.history.diabetes);
        assert!(!record.symptoms.edema);
    }

    #[test]
    fn labs_with_any_value_are_not_empty() {
        let labs = Labs {
            potassium: Measurement::new(4.1).ok(),
            ..Default::default()
        };
        assert!(!labs.is_empty());
    }

    #[test]
    fn gender_and_location_labels_parse_case_insensitively() {
        assert_eq!(Gender::from_label("female"), Some(Gender::Female));
        assert_eq!(Gender::from_label(" Other "), Some(Gender::Other));
        assert_eq!(Gender::from_label("unknown"), None);
        assert_eq!(Location::from_label("URBAN"), Some(Location::Urban));
        assert_eq!(Location::from_label(""), None);
    }
}
