//! Renal rule engine.
//!
//! [`RuleEngine::evaluate`] runs every [`Rule`] in [`Rule::ORDER`] against one
//! [`PatientRecord`] and returns a fresh [`Assessment`].
//!
//! Precedence:
//! - eGFR staging and the three disease rules overwrite the diagnosis; the last one to fire wins
//! - imaging rules only set the diagnosis while it is still empty
//! - the fallback fills in a diagnosis when nothing else did
//!
//! Recommendations, medications and warnings accumulate in firing order and are never removed.
//!
//! A comparison against an absent lab value is false. A rule that needs a value the clinician
//! did not provide simply does not fire.

use std::fmt;

use nephro_record::{ImagingFinding, PatientRecord};
use nephro_types::Measurement;

use crate::assessment::{Assessment, Draft};
use crate::constants::*;

/// A single rule of the engine, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    EgfrStaging,
    NephroticSyndrome,
    DiabeticKidneyDisease,
    HypertensiveNephrosclerosis,
    Hyperkalemia,
    AnemiaOfCkd,
    AvoidNsaids,
    Imaging,
    Fallback,
}

impl Rule {
    /// The canonical evaluation order. Later rules may overwrite the diagnosis of earlier ones.
    pub const ORDER: [Rule; 9] = [
        Rule::EgfrStaging,
        Rule::NephroticSyndrome,
        Rule::DiabeticKidneyDisease,
        Rule::HypertensiveNephrosclerosis,
        Rule::Hyperkalemia,
        Rule::AnemiaOfCkd,
        Rule::AvoidNsaids,
        Rule::Imaging,
        Rule::Fallback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::EgfrStaging => "egfr-staging",
            Rule::NephroticSyndrome => "nephrotic-syndrome",
            Rule::DiabeticKidneyDisease => "diabetic-kidney-disease",
            Rule::HypertensiveNephrosclerosis => "hypertensive-nephrosclerosis",
            Rule::Hyperkalemia => "hyperkalemia",
            Rule::AnemiaOfCkd => "anemia-of-ckd",
            Rule::AvoidNsaids => "avoid-nsaids",
            Rule::Imaging => "imaging",
            Rule::Fallback => "fallback",
        }
    }

    /// One-line description of what the rule looks at.
    pub fn description(self) -> &'static str {
        match self {
            Rule::EgfrStaging => "Stage kidney function from eGFR",
            Rule::NephroticSyndrome => "24h urine protein > 3500 mg with edema",
            Rule::DiabeticKidneyDisease => {
                "Diabetes, eGFR < 60 and albuminuria (ACR > 30 or 24h protein > 150)"
            }
            Rule::HypertensiveNephrosclerosis => {
                "Hypertension, eGFR < 60 and 24h urine protein < 1000 mg"
            }
            Rule::Hyperkalemia => "Potassium > 5.5 mmol/L",
            Rule::AnemiaOfCkd => "Hemoglobin < 10 g/dL with eGFR < 45",
            Rule::AvoidNsaids => "Always advise against NSAIDs",
            Rule::Imaging => "Ultrasound findings, only when no diagnosis yet",
            Rule::Fallback => "Default diagnosis when nothing else applies",
        }
    }

    /// Apply the rule to `record`, returning whether it fired.
    fn apply(self, record: &PatientRecord, draft: &mut Draft) -> bool {
        match self {
            Rule::EgfrStaging => egfr_staging(record, draft),
            Rule::NephroticSyndrome => nephrotic_syndrome(record, draft),
            Rule::DiabeticKidneyDisease => diabetic_kidney_disease(record, draft),
            Rule::HypertensiveNephrosclerosis => hypertensive_nephrosclerosis(record, draft),
            Rule::Hyperkalemia => hyperkalemia(record, draft),
            Rule::AnemiaOfCkd => anemia_of_ckd(record, draft),
            Rule::AvoidNsaids => {
                draft.prescribe(AVOID_NSAIDS);
                true
            }
            Rule::Imaging => imaging(record, draft),
            Rule::Fallback => fallback(draft),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stateless evaluator for patient records.
///
/// This is a zero-sized type; it holds no configuration and no state between calls, so it can
/// be shared freely across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate a patient record.
    ///
    /// The same record always yields the same assessment. The record is not modified and no
    /// I/O is performed.
    pub fn evaluate(record: &PatientRecord) -> Assessment {
        let mut draft = Draft::default();

        for rule in Rule::ORDER {
            if rule.apply(record, &mut draft) {
                tracing::debug!(rule = rule.name(), "rule fired");
            }
        }

        draft.finish()
    }
}

/// CKD staging by eGFR (mL/min/1.73m²).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EgfrStage {
    /// >= 90
    Normal,
    /// 60 to < 90
    Stage2,
    /// 45 to < 60
    Stage3a,
    /// 30 to < 45
    Stage3b,
    /// 15 to < 30
    Stage4,
    /// < 15
    Stage5,
}

impl EgfrStage {
    pub fn from_egfr(egfr: Measurement) -> Self {
        let egfr = egfr.value();
        if egfr >= 90.0 {
            EgfrStage::Normal
        } else if egfr >= 60.0 {
            EgfrStage::Stage2
        } else if egfr >= 45.0 {
            EgfrStage::Stage3a
        } else if egfr >= 30.0 {
            EgfrStage::Stage3b
        } else if egfr >= 15.0 {
            EgfrStage::Stage4
        } else {
            EgfrStage::Stage5
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EgfrStage::Normal => NORMAL_KIDNEY_FUNCTION,
            EgfrStage::Stage2 => MILDLY_REDUCED_FUNCTION,
            EgfrStage::Stage3a => CKD_STAGE_3A,
            EgfrStage::Stage3b => CKD_STAGE_3B,
            EgfrStage::Stage4 => CKD_STAGE_4,
            EgfrStage::Stage5 => CKD_STAGE_5,
        }
    }
}

// ============================================================================
// Absent-aware comparisons
// ============================================================================

fn below(value: Option<Measurement>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

fn above(value: Option<Measurement>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn at_least(value: Option<Measurement>, threshold: f64) -> bool {
    value.is_some_and(|v| v >= threshold)
}

fn at_most(value: Option<Measurement>, threshold: f64) -> bool {
    value.is_some_and(|v| v <= threshold)
}

// ============================================================================
// Rules
// ============================================================================

fn egfr_staging(record: &PatientRecord, draft: &mut Draft) -> bool {
    let Some(egfr) = record.labs.egfr else {
        return false;
    };

    draft.diagnose(EgfrStage::from_egfr(egfr).label());

    if egfr.value() < 60.0 {
        draft.recommend(&[
            "Regular eGFR monitoring every 3–6 months",
            "Avoid nephrotoxins",
            "Assess blood pressure control",
        ]);
    }
    true
}

fn nephrotic_syndrome(record: &PatientRecord, draft: &mut Draft) -> bool {
    if !(above(record.labs.urine_protein_24h, 3500.0) && record.symptoms.edema) {
        return false;
    }

    draft.diagnose(NEPHROTIC_SYNDROME);
    draft.recommend(&[
        "Check serum albumin",
        "Consider renal biopsy if unexplained",
        "Manage edema with diuretics",
    ]);
    draft.prescribe(LOOP_DIURETIC);
    true
}

fn diabetic_kidney_disease(record: &PatientRecord, draft: &mut Draft) -> bool {
    let labs = &record.labs;
    let albuminuria = above(labs.acr, 30.0) || above(labs.urine_protein_24h, 150.0);
    if !(record.history.diabetes && below(labs.egfr, 60.0) && albuminuria) {
        return false;
    }

    draft.diagnose(DIABETIC_KIDNEY_DISEASE);
    draft.recommend(&[
        "Tight glucose control",
        "Annual ACR monitoring",
        "Eye screening for retinopathy",
    ]);

    // Neither branch fires when eGFR < 30 with normal potassium, or potassium is absent.
    if at_least(labs.egfr, 30.0) && at_most(labs.potassium, POTASSIUM_UPPER_LIMIT) {
        draft.prescribe(ACEI_ARB);
    } else if above(labs.potassium, POTASSIUM_UPPER_LIMIT) {
        draft.warn(AVOID_ACEI_ARB_HYPERKALEMIA);
    }
    true
}

fn hypertensive_nephrosclerosis(record: &PatientRecord, draft: &mut Draft) -> bool {
    let labs = &record.labs;
    if !(record.history.hypertension
        && below(labs.egfr, 60.0)
        && below(labs.urine_protein_24h, 1000.0))
    {
        return false;
    }

    draft.diagnose(HYPERTENSIVE_NEPHROSCLEROSIS);
    draft.recommend(&["Optimize BP to <130/80", "Regular urinalysis monitoring"]);
    draft.prescribe(ACEI_ARB);
    true
}

fn hyperkalemia(record: &PatientRecord, draft: &mut Draft) -> bool {
    if !above(record.labs.potassium, POTASSIUM_UPPER_LIMIT) {
        return false;
    }

    draft.warn(HYPERKALEMIA_DETECTED);
    draft.prescribe(POTASSIUM_BINDERS);
    true
}

fn anemia_of_ckd(record: &PatientRecord, draft: &mut Draft) -> bool {
    if !(below(record.labs.hemoglobin, 10.0) && below(record.labs.egfr, 45.0)) {
        return false;
    }

    draft.recommend(&[
        "Check iron studies",
        "Consider erythropoiesis-stimulating agents if iron replete",
    ]);
    true
}

fn imaging(record: &PatientRecord, draft: &mut Draft) -> bool {
    let Some(finding) = record.imaging else {
        return false;
    };

    match finding {
        ImagingFinding::IncreasedEchogenicity | ImagingFinding::SmallShrunkenKidneys => {
            draft.diagnose_if_unset(ULTRASOUND_CKD);
            draft.recommend(&["Correlate with eGFR and proteinuria trends"]);
        }
        ImagingFinding::Hydronephrosis => {
            draft.diagnose_if_unset(OBSTRUCTIVE_UROPATHY);
            draft.recommend(&[
                "Consider further imaging (CT/IVP)",
                "Assess for urinary obstruction",
            ]);
        }
        ImagingFinding::Asymmetry => {
            draft.recommend(&["Evaluate for renovascular disease (renal artery Doppler)"]);
        }
        ImagingFinding::CysticDisease => {
            draft.diagnose_if_unset(POLYCYSTIC_KIDNEY_DISEASE);
            draft.recommend(&["Screen family members and monitor blood pressure"]);
        }
        ImagingFinding::ObstructiveCalculi => {
            draft.diagnose_if_unset(OBSTRUCTIVE_NEPHROPATHY);
            draft.recommend(&[
                "Urology referral for stone management",
                "Stone analysis and metabolic workup",
            ]);
        }
        ImagingFinding::NormalKidneys | ImagingFinding::Other => return false,
    }
    true
}

fn fallback(draft: &mut Draft) -> bool {
    if draft.has_diagnosis() {
        return false;
    }

    draft.diagnose(NO_SPECIFIC_DIAGNOSIS);
    draft.recommend(&[
        "Consider repeating labs",
        "Refer to nephrologist if abnormalities persist",
    ]);
    true
}
