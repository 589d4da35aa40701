//! Feature derivation from free-text job titles
//!
//! Titles are matched against ordered keyword tables. Matching is a plain
//! substring test on the upper-cased title, and the first rule with any
//! matching keyword decides the outcome. Rule order therefore carries the
//! precedence: "AHLI MUDA" is tested before "AHLI MADYA", and a title such
//! as "PELAKSANA ... MUDA" is Functional-Expertise because the MUDA rule
//! comes first.

use crate::models::JobCategory;

/// One row of a keyword table
#[derive(Debug, Clone, Copy)]
pub struct TitleRule<T: 'static> {
    pub keywords: &'static [&'static str],
    pub outcome: T,
}

/// Outcome when no category rule matches
pub const DEFAULT_CATEGORY: (JobCategory, u32) = (JobCategory::Other, 58);

/// Seniority when no level rule matches
pub const DEFAULT_SENIORITY: f64 = 0.2;

/// Job category and statutory retirement age, in precedence order
pub const CATEGORY_RULES: &[TitleRule<(JobCategory, u32)>] = &[
    TitleRule {
        keywords: &["AHLI MUDA", "MUDA", "KEPALA PUSKESMAS"],
        outcome: (JobCategory::FunctionalExpertise, 58),
    },
    TitleRule {
        keywords: &["AHLI MADYA"],
        outcome: (JobCategory::FunctionalExpertise, 60),
    },
    TitleRule {
        keywords: &["AHLI UTAMA", "DOKTER SPESIALIS"],
        outcome: (JobCategory::FunctionalExpertise, 65),
    },
    TitleRule {
        keywords: &[
            "TERAMPIL",
            "PENYELIA",
            "ADMINISTRASI",
            "PELAKSANA",
            "PEREKAYASA",
            "PEMULA",
            "VERIFIKATOR PAJAK",
            "PENGELOLA KEUANGAN",
            "PENGEMUDI AMBULANCE",
            "PEREKAM MEDIS",
        ],
        outcome: (JobCategory::FunctionalSkill, 58),
    },
    TitleRule {
        keywords: &["AHLI PERTAMA", "PERTAMA"],
        outcome: (JobCategory::FunctionalExpertise, 58),
    },
];

/// Seniority level, in precedence order
pub const SENIORITY_RULES: &[TitleRule<f64>] = &[
    TitleRule {
        keywords: &["AHLI UTAMA", "UTAMA"],
        outcome: 4.0,
    },
    TitleRule {
        keywords: &["AHLI MADYA"],
        outcome: 3.0,
    },
    TitleRule {
        keywords: &["AHLI MUDA", "MUDA"],
        outcome: 2.0,
    },
    TitleRule {
        keywords: &["AHLI PERTAMA", "PERTAMA"],
        outcome: 1.0,
    },
    TitleRule {
        keywords: &["PENYELIA"],
        outcome: 0.9,
    },
    TitleRule {
        keywords: &["MAHIR", "LANJUTAN/MAHIR"],
        outcome: 0.7,
    },
    TitleRule {
        keywords: &[
            "TERAMPIL",
            "PELAKSANA/TERAMPIL",
            "TERAMPIL/PELAKSANA",
            "LANJUTAN",
            "PELAKSANA LANJUTAN",
        ],
        outcome: 0.5,
    },
    TitleRule {
        keywords: &["PEMULA"],
        outcome: 0.3,
    },
];

/// Tier names shown next to each seniority level
pub const SENIORITY_LEGEND: &[(f64, &str)] = &[
    (4.0, "AHLI UTAMA"),
    (3.0, "AHLI MADYA"),
    (2.0, "AHLI MUDA"),
    (1.0, "AHLI PERTAMA"),
    (0.9, "PENYELIA"),
    (0.7, "MAHIR"),
    (0.5, "TERAMPIL"),
    (0.3, "PEMULA"),
    (0.2, "LAINNYA"),
];

/// Outcome of the first rule with a keyword contained in `title`
///
/// `title` must already be upper case.
#[must_use]
pub fn first_match<T: Copy>(rules: &[TitleRule<T>], title: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|rule| rule.outcome)
}

/// Job category and retirement age for a title
#[must_use]
pub fn classify_title(title: &str) -> (JobCategory, u32) {
    first_match(CATEGORY_RULES, &title.to_uppercase()).unwrap_or(DEFAULT_CATEGORY)
}

/// Seniority level for a title
#[must_use]
pub fn seniority_score(title: &str) -> f64 {
    first_match(SENIORITY_RULES, &title.to_uppercase()).unwrap_or(DEFAULT_SENIORITY)
}

/// Tier name for a seniority level
#[must_use]
pub fn seniority_tier(level: f64) -> Option<&'static str> {
    SENIORITY_LEGEND
        .iter()
        .find(|(value, _)| (value - level).abs() < f64::EPSILON)
        .map(|(_, name)| *name)
}
