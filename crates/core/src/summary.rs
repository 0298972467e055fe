//! Plain-text patient summary.
//!
//! A read-only projection of a [`PatientRecord`] (and optionally its [`Assessment`]) for
//! display or export. Field labels come from explicit per-section lists so the layout does
//! not depend on struct field names.

use nephro_record::PatientRecord;
use nephro_types::{Measurement, NonEmptyText};

use crate::Assessment;

/// Summary operations.
///
/// This is a zero-sized type used for namespacing summary rendering.
pub struct Summary;

impl Summary {
    /// Render the summary as plain text.
    ///
    /// Empty sections print a placeholder rather than disappearing, so the reader can tell
    /// "nothing recorded" apart from "section missing".
    pub fn render(record: &PatientRecord, assessment: Option<&Assessment>) -> String {
        let imaging = record.imaging.map(|f| f.label()).unwrap_or(NOT_PROVIDED);
        let mut sections = vec![
            section("Patient Profile", profile_lines(record), None),
            section("Medical History", history_lines(record), Some("No significant history")),
            section("Symptoms", symptom_lines(record), Some("No reported symptoms")),
            section(
                "Physical Exam",
                exam_lines(record),
                Some("No examination findings recorded"),
            ),
            section("Lab Results", lab_lines(record), Some("No lab results entered")),
            section("Imaging", vec![format!("Ultrasound Findings: {imaging}")], None),
        ];

        if let Some(assessment) = assessment {
            sections.push(format!("Assessment\n{assessment}"));
        }

        let mut out = sections.join("\n");
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

const NOT_PROVIDED: &str = "Not provided";

fn section(title: &str, lines: Vec<String>, empty: Option<&str>) -> String {
    let body = match (lines.is_empty(), empty) {
        (true, Some(placeholder)) => placeholder.to_owned(),
        _ => lines.join("\n"),
    };
    format!("{title}\n{body}\n")
}

fn labelled_text(label: &str, value: Option<&NonEmptyText>) -> Option<String> {
    value.map(|v| format!("{label}: {v}"))
}

fn labelled_number(label: &str, value: Option<Measurement>, unit: &str) -> Option<String> {
    value.map(|v| format!("{label}: {v} {unit}"))
}

fn flags(items: &[(&str, bool)]) -> Vec<String> {
    items
        .iter()
        .filter(|(_, set)| *set)
        .map(|(label, _)| (*label).to_owned())
        .collect()
}

fn profile_lines(record: &PatientRecord) -> Vec<String> {
    let p = &record.profile;
    vec![
        format!(
            "Name: {}",
            p.name.as_ref().map(NonEmptyText::as_str).unwrap_or(NOT_PROVIDED)
        ),
        format!(
            "Age: {}",
            p.age.map(|a| a.to_string()).as_deref().unwrap_or(NOT_PROVIDED)
        ),
        format!("Gender: {}", p.gender.map(|g| g.label()).unwrap_or(NOT_PROVIDED)),
        format!("Location: {}", p.location.map(|l| l.label()).unwrap_or(NOT_PROVIDED)),
    ]
}

fn history_lines(record: &PatientRecord) -> Vec<String> {
    let h = &record.history;
    let mut lines = flags(&[("Diabetes", h.diabetes), ("Hypertension", h.hypertension)]);
    lines.extend(labelled_text("Diabetes Duration", h.diabetes_duration.as_ref()));
    lines.extend(labelled_text("Hypertension Duration", h.hypertension_duration.as_ref()));
    lines.extend(flags(&[
        ("NSAID Use", h.nsaid_use),
        ("Past Stone Disease", h.past_stone_disease),
        ("Family History of CKD", h.family_ckd),
        ("Tuberculosis", h.tb),
        ("HIV", h.hiv),
        ("Hepatitis", h.hepatitis),
    ]));
    lines
}

fn symptom_lines(record: &PatientRecord) -> Vec<String> {
    let s = &record.symptoms;
    flags(&[
        ("Edema", s.edema),
        ("Fatigue", s.fatigue),
        ("Nausea", s.nausea),
        ("Vomiting", s.vomiting),
        ("Breathlessness", s.breathlessness),
        ("Decreased Urine Output", s.decreased_urine_output),
        ("Flank Pain", s.flank_pain),
        ("Hematuria", s.hematuria),
    ])
}

fn exam_lines(record: &PatientRecord) -> Vec<String> {
    let e = &record.physical_exam;
    [
        labelled_number("Systolic BP", e.sbp, "mmHg"),
        labelled_number("Diastolic BP", e.dbp, "mmHg"),
        labelled_number("Weight", e.weight, "kg"),
        labelled_text("Volume Status", e.volume_status.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn lab_lines(record: &PatientRecord) -> Vec<String> {
    let l = &record.labs;
    if l.is_empty() {
        return Vec::new();
    }
    [
        labelled_number("Creatinine", l.creatinine, "mg/dL"),
        labelled_number("eGFR", l.egfr, "mL/min/1.73m²"),
        labelled_number("Potassium", l.potassium, "mmol/L"),
        labelled_number("Hemoglobin", l.hemoglobin, "g/dL"),
        labelled_text("Urinalysis Protein", l.urinalysis_protein.as_ref()),
        labelled_text("Urinalysis Blood", l.urinalysis_blood.as_ref()),
        labelled_number("ACR", l.acr, "mg/g"),
        labelled_number("Spot Protein/Creatinine", l.spot_protein_creatinine, "mg/g"),
        labelled_number("24h Urine Protein", l.urine_protein_24h, "mg/day"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleEngine;
    use nephro_record::{Gender, ImagingFinding, Labs, MedicalHistory, Profile, Symptoms};

    fn m(value: f64) -> Option<Measurement> {
        Measurement::new(value).ok()
    }

    #[test]
    fn empty_record_prints_placeholders() {
        let text = Summary::render(&PatientRecord::default(), None);

        assert!(text.contains("Patient Profile\nName: Not provided\n"));
        assert!(text.contains("Medical History\nNo significant history\n"));
        assert!(text.contains("Symptoms\nNo reported symptoms\n"));
        assert!(text.contains("Lab Results\nNo lab results entered\n"));
        assert!(text.contains("Ultrasound Findings: Not provided"));
        assert!(!text.contains("Assessment"));
    }

    #[test]
    fn lists_only_what_was_recorded() {
        let record = PatientRecord {
            profile: Profile {
                name: NonEmptyText::optional("Amina Yusuf"),
                age: m(64.0),
                gender: Some(Gender::Female),
                location: None,
            },
            history: MedicalHistory {
                hypertension: true,
                hypertension_duration: NonEmptyText::optional("8 years"),
                ..Default::default()
            },
            symptoms: Symptoms {
                flank_pain: true,
                ..Default::default()
            },
            labs: Labs {
                egfr: m(52.5),
                potassium: m(4.6),
                ..Default::default()
            },
            imaging: Some(ImagingFinding::ObstructiveCalculi),
            ..Default::default()
        };

        let text = Summary::render(&record, None);

        assert!(text.contains("Name: Amina Yusuf\nAge: 64\nGender: Female\nLocation: Not provided"));
        assert!(text.contains("Medical History\nHypertension\nHypertension Duration: 8 years\n"));
        assert!(!text.contains("Diabetes"));
        assert!(text.contains("Symptoms\nFlank Pain\n"));
        assert!(text.contains("eGFR: 52.5 mL/min/1.73m²\nPotassium: 4.6 mmol/L\n"));
        assert!(!text.contains("Creatinine"));
        assert!(text.contains("Ultrasound Findings: Obstructive calculi"));
    }

    #[test]
    fn text_only_labs_are_listed() {
        let record = PatientRecord {
            labs: Labs {
                urinalysis_blood: NonEmptyText::optional("2+"),
                ..Default::default()
            },
            ..Default::default()
        };

        let text = Summary::render(&record, None);
        assert!(text.contains("Lab Results\nUrinalysis Blood: 2+\n"));
        assert!(!text.contains("No lab results entered"));
    }

    #[test]
    fn appends_assessment_when_given() {
        let record = PatientRecord {
            labs: Labs {
                egfr: m(95.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let assessment = RuleEngine::evaluate(&record);

        let text = Summary::render(&record, Some(&assessment));

        assert!(text.contains("Assessment\nDiagnosis: Normal Kidney Function\n"));
        assert!(text.contains("Medications:\n- Avoid NSAIDs\n"));
        assert!(text.ends_with('\n'));
    }
}
