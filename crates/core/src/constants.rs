//! Clinical text emitted by the rule engine.
//!
//! Diagnoses, medications and warnings are collected here so the rules and the tests agree on
//! the exact wording. Recommendations stay next to the rule that gives them.

/// eGFR >= 90.
pub const NORMAL_KIDNEY_FUNCTION: &str = "Normal Kidney Function";

/// 60 <= eGFR < 90.
pub const MILDLY_REDUCED_FUNCTION: &str = "Mildly Reduced Function (Stage 2)";

/// 45 <= eGFR < 60.
pub const CKD_STAGE_3A: &str = "CKD Stage 3a";

/// 30 <= eGFR < 45.
pub const CKD_STAGE_3B: &str = "CKD Stage 3b";

/// 15 <= eGFR < 30.
pub const CKD_STAGE_4: &str = "CKD Stage 4";

/// eGFR < 15.
pub const CKD_STAGE_5: &str = "CKD Stage 5 (ESRD)";

pub const NEPHROTIC_SYNDROME: &str = "Possible Nephrotic Syndrome";
pub const DIABETIC_KIDNEY_DISEASE: &str = "Likely Diabetic Kidney Disease";
pub const HYPERTENSIVE_NEPHROSCLEROSIS: &str = "Possible Hypertensive Nephrosclerosis";

pub const ULTRASOUND_CKD: &str = "Chronic Kidney Disease (Ultrasound suggestive)";
pub const OBSTRUCTIVE_UROPATHY: &str = "Possible Obstructive Uropathy";
pub const POLYCYSTIC_KIDNEY_DISEASE: &str = "Possible Polycystic Kidney Disease";
pub const OBSTRUCTIVE_NEPHROPATHY: &str = "Possible Obstructive Nephropathy (Stones)";

/// Diagnosis given when no rule could name a condition.
pub const NO_SPECIFIC_DIAGNOSIS: &str = "No specific renal diagnosis determined";

pub const LOOP_DIURETIC: &str = "Loop diuretic for edema";
pub const ACEI_ARB: &str = "ACEi/ARB if potassium normal";
pub const POTASSIUM_BINDERS: &str = "Consider potassium binders if persistent";

/// Appended on every evaluation.
pub const AVOID_NSAIDS: &str = "Avoid NSAIDs";

pub const AVOID_ACEI_ARB_HYPERKALEMIA: &str = "Avoid ACEi/ARB due to hyperkalemia risk";
pub const HYPERKALEMIA_DETECTED: &str =
    "Hyperkalemia detected: recommend dietary K+ restriction and review medications";

/// Potassium above this (mmol/L) is hyperkalemia.
pub const POTASSIUM_UPPER_LIMIT: f64 = 5.5;
