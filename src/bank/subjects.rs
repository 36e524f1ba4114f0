pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
}

pub const SUBJECTS: &[Subject] = &[
    Subject {
        id: "fon",
        name: "Fundamentals of Nursing",
    },
    Subject {
        id: "msn",
        name: "Medical-Surgical Nursing",
    },
    Subject {
        id: "pharma",
        name: "Pharmacology",
    },
    Subject {
        id: "obg",
        name: "OB-GYN & Midwifery",
    },
    Subject {
        id: "peds",
        name: "Pediatric Nursing",
    },
    Subject {
        id: "chn",
        name: "Community Health",
    },
    Subject {
        id: "psych",
        name: "Psychiatric Nursing",
    },
];

/// Find a catalogue subject by short id or full name, ignoring case.
pub fn find(query: &str) -> Option<&'static Subject> {
    let query = query.trim();
    SUBJECTS
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(query) || s.name.eq_ignore_ascii_case(query))
}

/// Canonical name for a user-supplied subject; unknown names pass through as-is.
pub fn canonical_name(query: &str) -> String {
    find(query)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| query.trim().to_string())
}
