//! Form document wire model and translation helpers.
//!
//! A form document is the clinician's input, section by section, exactly as the intake form
//! collects it. Field names follow the form (`physicalExam`, `urineProtein24h`, ...).
//!
//! Responsibilities:
//! - Define a strict wire model for serialisation/deserialisation
//! - Translate raw form text into typed [`PatientRecord`] values
//! - Render a [`PatientRecord`] back into the same wire shape
//!
//! Notes:
//! - Every section and every field is optional; missing means "not provided"
//! - Numeric fields accept numbers or text. Text that is blank, not a number, or not finite
//!   becomes an absent value (logged at `warn`), never zero and never an error
//! - Unknown keys and wrongly typed values are rejected

use crate::{
    Gender, ImagingFinding, Labs, Location, MedicalHistory, PatientRecord, PhysicalExam, Profile,
    RecordError, RecordResult, Symptoms,
};
use nephro_types::{Measurement, MeasurementError, NonEmptyText};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public Form operations
// ============================================================================

/// Form document operations.
///
/// This is a zero-sized type used for namespacing form-related operations.
/// All methods are associated functions.
pub struct Form;

impl Form {
    /// Parse a form document from YAML (or JSON) text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `labs.egfr`)
    /// to the failing field when the document does not match the wire schema.
    ///
    /// A blank document is a valid form with nothing filled in.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if:
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - any field has an unexpected type,
    /// - `gender` or `location` is not one of the offered choices.
    pub fn parse(text: &str) -> RecordResult<PatientRecord> {
        if text.trim().is_empty() {
            return Ok(PatientRecord::default());
        }

        let deserializer = serde_yaml::Deserializer::from_str(text);

        let wire = match serde_path_to_error::deserialize::<_, FormWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(RecordError::Translation(format!(
                    "Form schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Render a patient record as a YAML form document.
    ///
    /// Absent values and unset flags are omitted, so a default record renders as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if serialisation fails.
    pub fn render(record: &PatientRecord) -> RecordResult<String> {
        let wire = domain_to_wire(record);
        Ok(serde_yaml::to_string(&wire)?)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// A form value as typed by the clinician: either already a number, or text.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

/// Wire representation of a whole form document.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct FormWire {
    #[serde(default, skip_serializing_if = "is_default")]
    profile: ProfileWire,

    #[serde(default, skip_serializing_if = "is_default")]
    history: HistoryWire,

    #[serde(default, skip_serializing_if = "is_default")]
    symptoms: SymptomsWire,

    #[serde(default, skip_serializing_if = "is_default")]
    physical_exam: PhysicalExamWire,

    #[serde(default, skip_serializing_if = "is_default")]
    labs: LabsWire,

    #[serde(default, skip_serializing_if = "is_default")]
    imaging: ImagingWire,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ProfileWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct HistoryWire {
    #[serde(default, skip_serializing_if = "is_false")]
    diabetes: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    hypertension: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    diabetes_duration: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    hypertension_duration: Option<RawValue>,

    #[serde(default, skip_serializing_if = "is_false")]
    nsaid_use: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    past_stone_disease: bool,

    #[serde(rename = "familyCKD", default, skip_serializing_if = "is_false")]
    family_ckd: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    tb: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    hiv: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    hepatitis: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct SymptomsWire {
    #[serde(default, skip_serializing_if = "is_false")]
    edema: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    fatigue: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    nausea: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    vomiting: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    breathlessness: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    decreased_urine_output: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    flank_pain: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    hematuria: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct PhysicalExamWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sbp: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    dbp: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume_status: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct LabsWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creatinine: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    egfr: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    potassium: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    hemoglobin: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    urinalysis_protein: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    urinalysis_blood: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    acr: Option<RawValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    spot_protein_creatinine: Option<RawValue>,

    #[serde(rename = "urineProtein24h", default, skip_serializing_if = "Option::is_none")]
    urine_protein_24h: Option<RawValue>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct ImagingWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ultrasound_findings: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Read a numeric field. Blank is silently absent; anything else unreadable is absent with a
/// warning naming the field.
fn measurement(field: &'static str, raw: Option<RawValue>) -> Option<Measurement> {
    let parsed = match raw? {
        RawValue::Number(n) => Measurement::new(n),
        RawValue::Text(t) => Measurement::parse(&t),
    };

    match parsed {
        Ok(m) => Some(m),
        Err(MeasurementError::Empty) => None,
        Err(err) => {
            tracing::warn!(field, %err, "discarding unreadable form value");
            None
        }
    }
}

fn text(raw: Option<RawValue>) -> Option<NonEmptyText> {
    match raw? {
        RawValue::Number(n) => NonEmptyText::optional(n.to_string()),
        RawValue::Text(t) => NonEmptyText::optional(t),
    }
}

/// Keep a choice field only when something was selected.
fn selected(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

fn gender(raw: Option<String>) -> RecordResult<Option<Gender>> {
    selected(raw)
        .map(|s| {
            Gender::from_label(&s).ok_or_else(|| {
                RecordError::InvalidInput(format!("unknown gender '{}'", s.trim()))
            })
        })
        .transpose()
}

fn location(raw: Option<String>) -> RecordResult<Option<Location>> {
    selected(raw)
        .map(|s| {
            Location::from_label(&s).ok_or_else(|| {
                RecordError::InvalidInput(format!("unknown location '{}'", s.trim()))
            })
        })
        .transpose()
}

fn imaging(raw: Option<String>) -> Option<ImagingFinding> {
    let s = selected(raw)?;
    match ImagingFinding::from_label(&s) {
        Some(finding) => Some(finding),
        None => {
            tracing::warn!(finding = %s.trim(), "unrecognised ultrasound finding, recording as Other");
            Some(ImagingFinding::Other)
        }
    }
}

fn number_to_wire(value: Option<Measurement>) -> Option<RawValue> {
    value.map(|m| RawValue::Number(m.value()))
}

fn text_to_wire(value: &Option<NonEmptyText>) -> Option<RawValue> {
    value.as_ref().map(|t| RawValue::Text(t.as_str().to_owned()))
}

/// Convert wire format to the domain record.
fn wire_to_domain(wire: FormWire) -> RecordResult<PatientRecord> {
    let FormWire {
        profile,
        history,
        symptoms,
        physical_exam,
        labs,
        imaging: imaging_wire,
    } = wire;

    Ok(PatientRecord {
        profile: Profile {
            name: profile.name.and_then(NonEmptyText::optional),
            age: measurement("profile.age", profile.age),
            gender: gender(profile.gender)?,
            location: location(profile.location)?,
        },
        history: MedicalHistory {
            diabetes: history.diabetes,
            hypertension: history.hypertension,
            diabetes_duration: text(history.diabetes_duration),
            hypertension_duration: text(history.hypertension_duration),
            nsaid_use: history.nsaid_use,
            past_stone_disease: history.past_stone_disease,
            family_ckd: history.family_ckd,
            tb: history.tb,
            hiv: history.hiv,
            hepatitis: history.hepatitis,
        },
        symptoms: Symptoms {
            edema: symptoms.edema,
            fatigue: symptoms.fatigue,
            nausea: symptoms.nausea,
            vomiting: symptoms.vomiting,
            breathlessness: symptoms.breathlessness,
            decreased_urine_output: symptoms.decreased_urine_output,
            flank_pain: symptoms.flank_pain,
            hematuria: symptoms.hematuria,
        },
        physical_exam: PhysicalExam {
            sbp: measurement("physicalExam.sbp", physical_exam.sbp),
            dbp: measurement("physicalExam.dbp", physical_exam.dbp),
            weight: measurement("physicalExam.weight", physical_exam.weight),
            volume_status: physical_exam.volume_status.and_then(NonEmptyText::optional),
        },
        labs: Labs {
            creatinine: measurement("labs.creatinine", labs.creatinine),
            egfr: measurement("labs.egfr", labs.egfr),
            potassium: measurement("labs.potassium", labs.potassium),
            hemoglobin: measurement("labs.hemoglobin", labs.hemoglobin),
            urinalysis_protein: text(labs.urinalysis_protein),
            urinalysis_blood: text(labs.urinalysis_blood),
            acr: measurement("labs.acr", labs.acr),
            spot_protein_creatinine: measurement(
                "labs.spotProteinCreatinine",
                labs.spot_protein_creatinine,
            ),
            urine_protein_24h: measurement("labs.urineProtein24h", labs.urine_protein_24h),
        },
        imaging: imaging(imaging_wire.ultrasound_findings),
    })
}

/// Convert the domain record to wire format.
fn domain_to_wire(record: &PatientRecord) -> FormWire {
    let PatientRecord {
        profile,
        history,
        symptoms,
        physical_exam,
        labs,
        imaging,
    } = record;

    FormWire {
        profile: ProfileWire {
            name: profile.name.as_ref().map(|n| n.as_str().to_owned()),
            age: number_to_wire(profile.age),
            gender: profile.gender.map(|g| g.label().to_owned()),
            location: profile.location.map(|l| l.label().to_owned()),
        },
        history: HistoryWire {
            diabetes: history.diabetes,
            hypertension: history.hypertension,
            diabetes_duration: text_to_wire(&history.diabetes_duration),
            hypertension_duration: text_to_wire(&history.hypertension_duration),
            nsaid_use: history.nsaid_use,
            past_stone_disease: history.past_stone_disease,
            family_ckd: history.family_ckd,
            tb: history.tb,
            hiv: history.hiv,
            hepatitis: history.hepatitis,
        },
        symptoms: SymptomsWire {
            edema: symptoms.edema,
            fatigue: symptoms.fatigue,
            nausea: symptoms.nausea,
            vomiting: symptoms.vomiting,
            breathlessness: symptoms.breathlessness,
            decreased_urine_output: symptoms.decreased_urine_output,
            flank_pain: symptoms.flank_pain,
            hematuria: symptoms.hematuria,
        },
        physical_exam: PhysicalExamWire {
            sbp: number_to_wire(physical_exam.sbp),
            dbp: number_to_wire(physical_exam.dbp),
            weight: number_to_wire(physical_exam.weight),
            volume_status: physical_exam
                .volume_status
                .as_ref()
                .map(|v| v.as_str().to_owned()),
        },
        labs: LabsWire {
            creatinine: number_to_wire(labs.creatinine),
            egfr: number_to_wire(labs.egfr),
            potassium: number_to_wire(labs.potassium),
            hemoglobin: number_to_wire(labs.hemoglobin),
            urinalysis_protein: text_to_wire(&labs.urinalysis_protein),
            urinalysis_blood: text_to_wire(&labs.urinalysis_blood),
            acr: number_to_wire(labs.acr),
            spot_protein_creatinine: number_to_wire(labs.spot_protein_creatinine),
            urine_protein_24h: number_to_wire(labs.urine_protein_24h),
        },
        imaging: ImagingWire {
            ultrasound_findings: imaging.map(|f| f.label().to_owned()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_FORM: &str = r#"profile:
  name: Jane Doe
  age: "58"
  gender: Female
  location: Rural

history:
  diabetes: true
  hypertension: true
  diabetesDuration: 12 years
  familyCKD: true

symptoms:
  edema: true
  fatigue: true

physicalExam:
  sbp: 148
  dbp: "92"
  volumeStatus: Hypervolemic

labs:
  creatinine: "1.9"
  egfr: "41"
  potassium: 5.8
  hemoglobin: "9.6"
  urinalysisProtein: 3+
  acr: "310"
  urineProtein24h: "4200"

imaging:
  ultrasoundFindings: Increased echogenicity
"#;

    fn m(value: f64) -> Option<Measurement> {
        Measurement::new(value).ok()
    }

    #[test]
    fn parses_full_form() {
        let record = Form::parse(FULL_FORM).expect("parse form");

        assert_eq!(record.profile.name.as_ref().map(|n| n.as_str()), Some("Jane Doe"));
        assert_eq!(record.profile.age, m(58.0));
        assert_eq!(record.profile.gender, Some(Gender::Female));
        assert_eq!(record.profile.location, Some(Location::Rural));

        assert!(record.history.diabetes);
        assert!(record.history.hypertension);
        assert!(record.history.family_ckd);
        assert!(!record.history.hiv);
        assert_eq!(
            record.history.diabetes_duration.as_ref().map(|d| d.as_str()),
            Some("12 years")
        );

        assert!(record.symptoms.edema);
        assert!(!record.symptoms.hematuria);

        assert_eq!(record.physical_exam.sbp, m(148.0));
        assert_eq!(record.physical_exam.dbp, m(92.0));

        assert_eq!(record.labs.egfr, m(41.0));
        assert_eq!(record.labs.potassium, m(5.8));
        assert_eq!(record.labs.urine_protein_24h, m(4200.0));
        assert_eq!(
            record.labs.urinalysis_protein.as_ref().map(|p| p.as_str()),
            Some("3+")
        );
        assert!(record.labs.spot_protein_creatinine.is_none());

        assert_eq!(record.imaging, Some(ImagingFinding::IncreasedEchogenicity));
    }

    #[test]
    fn round_trips_full_form() {
        let record = Form::parse(FULL_FORM).expect("parse form");
        let output = Form::render(&record).expect("render form");
        let reparsed = Form::parse(&output).expect("reparse form");
        assert_eq!(record, reparsed);
    }

    #[test]
    fn blank_document_is_an_empty_form() {
        let record = Form::parse("  \n").expect("blank form");
        assert_eq!(record, PatientRecord::default());
    }

    #[test]
    fn accepts_json_documents() {
        let input = r#"{"labs": {"egfr": "95"}, "symptoms": {"edema": false}}"#;
        let record = Form::parse(input).expect("parse json form");
        assert_eq!(record.labs.egfr, m(95.0));
    }

    #[test]
    fn blank_and_unreadable_numbers_are_absent() {
        let input = r#"labs:
  egfr: ""
  potassium: "high"
  hemoglobin: .nan
  acr: "  "
"#;

        let record = Form::parse(input).expect("unreadable values are not errors");
        assert!(record.labs.egfr.is_none());
        assert!(record.labs.potassium.is_none());
        assert!(record.labs.hemoglobin.is_none());
        assert!(record.labs.acr.is_none());
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"labs:
  egfr: "50"
  serumSodium: "140"
"#;

        let err = Form::parse(input).expect_err("should reject unknown key");
        match err {
            RecordError::Translation(msg) => {
                assert!(msg.contains("labs"));
                assert!(msg.contains("serumSodium"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_wrong_types() {
        let input = r#"history:
  diabetes: "sometimes"
"#;

        let err = Form::parse(input).expect_err("should reject wrong type");
        match err {
            RecordError::Translation(msg) => {
                assert!(msg.contains("history.diabetes"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_gender() {
        let input = r#"profile:
  gender: Martian
"#;

        let err = Form::parse(input).expect_err("should reject unknown gender");
        assert!(matches!(err, RecordError::InvalidInput(msg) if msg.contains("Martian")));
    }

    #[test]
    fn empty_choice_fields_are_absent() {
        let input = r#"profile:
  gender: ""
  location: ""
imaging:
  ultrasoundFindings: ""
"#;

        let record = Form::parse(input).expect("empty selections");
        assert!(record.profile.gender.is_none());
        assert!(record.profile.location.is_none());
        assert!(record.imaging.is_none());
    }

    #[test]
    fn unrecognised_imaging_becomes_other() {
        let input = r#"imaging:
  ultrasoundFindings: Horseshoe kidney
"#;

        let record = Form::parse(input).expect("parse form");
        assert_eq!(record.imaging, Some(ImagingFinding::Other));
    }

    #[test]
    fn renders_default_record_without_sections() {
        let yaml = Form::render(&PatientRecord::default()).expect("render empty");
        assert!(!yaml.contains("labs"));
        assert!(!yaml.contains("history"));
        assert_eq!(Form::parse(&yaml).expect("reparse"), PatientRecord::default());
    }

    #[test]
    fn renders_wire_field_names() {
        let record = PatientRecord {
            history: MedicalHistory {
                family_ckd: true,
                ..Default::default()
            },
            labs: Labs {
                urine_protein_24h: m(3600.0),
                ..Default::default()
            },
            imaging: Some(ImagingFinding::Hydronephrosis),
            ..Default::default()
        };

        let yaml = Form::render(&record).expect("render form");
        assert!(yaml.contains("familyCKD: true"));
        assert!(yaml.contains("urineProtein24h: 3600"));
        assert!(yaml.contains("ultrasoundFindings: Hydronephrosis"));
    }

    #[test]
    fn yaml_errors_convert_to_invalid_yaml() {
        let yaml_err = serde_yaml::from_str::<u32>("not a number").expect_err("not a u32");
        let err = RecordError::from(yaml_err);
        assert!(matches!(err, RecordError::InvalidYaml(_)));
        assert!(err.to_string().starts_with("invalid YAML:"));
    }
}
