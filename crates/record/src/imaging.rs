//! Renal ultrasound findings.
//!
//! The form offers a fixed list of findings. The labels below are the canonical text shown to
//! clinicians and written to form documents.

use std::fmt;

/// A single ultrasound finding selected on the imaging section of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImagingFinding {
    NormalKidneys,
    IncreasedEchogenicity,
    SmallShrunkenKidneys,
    /// One kidney visibly smaller than the other.
    Asymmetry,
    Hydronephrosis,
    CysticDisease,
    ObstructiveCalculi,
    /// Anything not covered by the fixed list. Carries no rule effect.
    Other,
}

impl ImagingFinding {
    /// Every finding, in the order the form lists them.
    pub const ALL: [ImagingFinding; 8] = [
        ImagingFinding::NormalKidneys,
        ImagingFinding::IncreasedEchogenicity,
        ImagingFinding::SmallShrunkenKidneys,
        ImagingFinding::Asymmetry,
        ImagingFinding::Hydronephrosis,
        ImagingFinding::CysticDisease,
        ImagingFinding::ObstructiveCalculi,
        ImagingFinding::Other,
    ];

    /// Canonical form label.
    pub fn label(self) -> &'static str {
        match self {
            ImagingFinding::NormalKidneys => "Normal kidneys",
            ImagingFinding::IncreasedEchogenicity => "Increased echogenicity",
            ImagingFinding::SmallShrunkenKidneys => "Small shrunken kidneys",
            ImagingFinding::Asymmetry => "Asymmetry (one small)",
            ImagingFinding::Hydronephrosis => "Hydronephrosis",
            ImagingFinding::CysticDisease => "Cystic disease",
            ImagingFinding::ObstructiveCalculi => "Obstructive calculi",
            ImagingFinding::Other => "Other",
        }
    }

    /// Parse a form label. Matching ignores surrounding whitespace and ASCII case.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|finding| finding.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ImagingFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for finding in ImagingFinding::ALL {
            assert_eq!(ImagingFinding::from_label(finding.label()), Some(finding));
        }
    }

    #[test]
    fn from_label_is_lenient_about_case_and_whitespace() {
        assert_eq!(
            ImagingFinding::from_label("  hydronephrosis "),
            Some(ImagingFinding::Hydronephrosis)
        );
        assert_eq!(
            ImagingFinding::from_label("ASYMMETRY (ONE SMALL)"),
            Some(ImagingFinding::Asymmetry)
        );
    }

    #[test]
    fn from_label_rejects_unknown_text() {
        assert_eq!(ImagingFinding::from_label("Horseshoe kidney"), None);
        assert_eq!(ImagingFinding::from_label(""), None);
    }
}
