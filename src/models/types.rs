//! Common enumerations shared by the roster models and analytics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender as recorded in the `JK` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    /// `LAKI-LAKI`
    Male,
    /// `PEREMPUAN`
    Female,
    /// Blank or unrecognised
    Unknown,
}

impl Gender {
    /// Spelling used in the sheet
    #[must_use]
    pub const fn sheet_label(self) -> &'static str {
        match self {
            Self::Male => "LAKI-LAKI",
            Self::Female => "PEREMPUAN",
            Self::Unknown => "",
        }
    }
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "LAKI-LAKI" | "LAKI LAKI" | "L" | "PRIA" => Self::Male,
            "PEREMPUAN" | "P" | "WANITA" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

/// Job category inferred from the job title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobCategory {
    /// Expertise-track functional positions (ahli)
    FunctionalExpertise,
    /// Skill-track functional and administrative positions (terampil)
    FunctionalSkill,
    /// Anything the title rules do not recognise
    Other,
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FunctionalExpertise => "Functional-Expertise",
            Self::FunctionalSkill => "Functional-Skill",
            Self::Other => "Other",
        })
    }
}

/// Retirement readiness band, ordered from soonest to latest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadinessBand {
    /// Cluster with the lowest mean remaining service years
    RetiringSoon,
    /// Middle cluster
    MidTerm,
    /// Cluster with the highest mean remaining service years
    LongHorizon,
    /// Too few classifiable employees to cluster
    InsufficientData,
}

impl ReadinessBand {
    /// Bands in ascending order of remaining service years
    pub const ORDERED: [Self; 3] = [Self::RetiringSoon, Self::MidTerm, Self::LongHorizon];

    /// Every band, the sentinel last
    pub const ALL: [Self; 4] = [
        Self::RetiringSoon,
        Self::MidTerm,
        Self::LongHorizon,
        Self::InsufficientData,
    ];

    /// Parse a band name as printed by `Display`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "retiring-soon" => Some(Self::RetiringSoon),
            "mid-term" => Some(Self::MidTerm),
            "long-horizon" => Some(Self::LongHorizon),
            "insufficient-data" => Some(Self::InsufficientData),
            _ => None,
        }
    }
}

impl fmt::Display for ReadinessBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RetiringSoon => "Retiring-Soon",
            Self::MidTerm => "Mid-Term",
            Self::LongHorizon => "Long-Horizon",
            Self::InsufficientData => "Insufficient-Data",
        })
    }
}

/// Age bracket used by the dashboard pie and the unit heatmap
///
/// Brackets are right-closed: 25 is `<25`, 26 is `26-30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    UpTo25,
    From26To30,
    From31To35,
    From36To40,
    From41To45,
    From46To50,
    From51To55,
    From56To60,
    Over60,
}

impl AgeBand {
    /// All brackets in ascending order
    pub const ALL: [Self; 9] = [
        Self::UpTo25,
        Self::From26To30,
        Self::From31To35,
        Self::From36To40,
        Self::From41To45,
        Self::From46To50,
        Self::From51To55,
        Self::From56To60,
        Self::Over60,
    ];

    /// Bracket for an age; 0 and anything above 150 fall outside every bracket
    #[must_use]
    pub const fn from_age(age: u32) -> Option<Self> {
        match age {
            1..=25 => Some(Self::UpTo25),
            26..=30 => Some(Self::From26To30),
            31..=35 => Some(Self::From31To35),
            36..=40 => Some(Self::From36To40),
            41..=45 => Some(Self::From41To45),
            46..=50 => Some(Self::From46To50),
            51..=55 => Some(Self::From51To55),
            56..=60 => Some(Self::From56To60),
            61..=150 => Some(Self::Over60),
            _ => None,
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UpTo25 => "<25",
            Self::From26To30 => "26-30",
            Self::From31To35 => "31-35",
            Self::From36To40 => "36-40",
            Self::From41To45 => "41-45",
            Self::From46To50 => "46-50",
            Self::From51To55 => "51-55",
            Self::From56To60 => "56-60",
            Self::Over60 => ">60",
        })
    }
}
