//! Statute sections of the Legal Metrology Act 2009 that matter most for
//! e-commerce listings. Display-only reference data.

use serde::Serialize;

/// One section of the Act with a one-line summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatuteSection {
    /// Section label, e.g. "Section 11".
    pub section: &'static str,
    /// What the section governs.
    pub summary: &'static str,
}

/// Sections most frequently engaged by online product listings.
pub const CRITICAL_SECTIONS: &[StatuteSection] = &[
    StatuteSection {
        section: "Section 11",
        summary: "Prohibition of non-standard units in pricing and advertising",
    },
    StatuteSection {
        section: "Section 18",
        summary: "Pre-packaged commodity declaration requirements",
    },
    StatuteSection {
        section: "Section 25",
        summary: "Penalty for using non-standard weights/measures",
    },
    StatuteSection {
        section: "Section 30",
        summary: "Penalty for fraudulent transactions",
    },
    StatuteSection {
        section: "Section 36",
        summary: "Penalty for non-compliant packaging",
    },
    StatuteSection {
        section: "Section 41",
        summary: "Penalty for false information/returns",
    },
];
