//! Fixed catalogs the form selects from: education levels and their grades,
//! pedagogical practices, graduate dimensions and session mood tags.
//!
//! Every catalog value serializes to its Indonesian display label, which is
//! also what the generation prompt and the rendered document show.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Education level (jenjang)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    SD,
    SMP,
    SMA,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 3] = [EducationLevel::SD, EducationLevel::SMP, EducationLevel::SMA];

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::SD => "SD",
            EducationLevel::SMP => "SMP",
            EducationLevel::SMA => "SMA",
        }
    }

    /// Grades selectable for this level, in display order.
    pub fn grades(self) -> &'static [&'static str] {
        match self {
            EducationLevel::SD => &["Kelas 1", "Kelas 2", "Kelas 3", "Kelas 4", "Kelas 5", "Kelas 6"],
            EducationLevel::SMP => &["Kelas 7", "Kelas 8", "Kelas 9"],
            EducationLevel::SMA => &["Kelas 10", "Kelas 11", "Kelas 12"],
        }
    }

    /// First grade of the level; the grade a level change resets to.
    pub fn first_grade(self) -> &'static str {
        self.grades()[0]
    }

    pub fn has_grade(self, grade: &str) -> bool {
        self.grades().iter().any(|g| *g == grade)
    }
}

/// Teaching methodology applied to one session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PedagogicalPractice {
    #[default]
    #[serde(rename = "Inkuiri-Discovery")]
    Inquiry,
    #[serde(rename = "PjBL")]
    PjBL,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    #[serde(rename = "Game Based Learning")]
    GameBased,
    #[serde(rename = "Station Learning")]
    StationLearning,
}

impl PedagogicalPractice {
    pub const ALL: [PedagogicalPractice; 5] = [
        PedagogicalPractice::Inquiry,
        PedagogicalPractice::PjBL,
        PedagogicalPractice::ProblemSolving,
        PedagogicalPractice::GameBased,
        PedagogicalPractice::StationLearning,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PedagogicalPractice::Inquiry => "Inkuiri-Discovery",
            PedagogicalPractice::PjBL => "PjBL",
            PedagogicalPractice::ProblemSolving => "Problem Solving",
            PedagogicalPractice::GameBased => "Game Based Learning",
            PedagogicalPractice::StationLearning => "Station Learning",
        }
    }

    fn variant_name(self) -> &'static str {
        match self {
            PedagogicalPractice::Inquiry => "Inquiry",
            PedagogicalPractice::PjBL => "PjBL",
            PedagogicalPractice::ProblemSolving => "ProblemSolving",
            PedagogicalPractice::GameBased => "GameBased",
            PedagogicalPractice::StationLearning => "StationLearning",
        }
    }
}

/// Holistic learner-outcome category (dimensi profil lulusan).
/// Ordering follows catalog position so selections list deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GraduateDimension {
    #[serde(rename = "Keimanan & Ketakwaan")]
    Faith,
    #[serde(rename = "Kewargaan")]
    Citizenship,
    #[serde(rename = "Penalaran Kritis")]
    CriticalReasoning,
    #[serde(rename = "Kreativitas")]
    Creativity,
    #[serde(rename = "Kolaborasi")]
    Collaboration,
    #[serde(rename = "Kemandirian")]
    Independence,
    #[serde(rename = "Kesehatan")]
    Health,
    #[serde(rename = "Komunikasi")]
    Communication,
}

impl GraduateDimension {
    pub const ALL: [GraduateDimension; 8] = [
        GraduateDimension::Faith,
        GraduateDimension::Citizenship,
        GraduateDimension::CriticalReasoning,
        GraduateDimension::Creativity,
        GraduateDimension::Collaboration,
        GraduateDimension::Independence,
        GraduateDimension::Health,
        GraduateDimension::Communication,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GraduateDimension::Faith => "Keimanan & Ketakwaan",
            GraduateDimension::Citizenship => "Kewargaan",
            GraduateDimension::CriticalReasoning => "Penalaran Kritis",
            GraduateDimension::Creativity => "Kreativitas",
            GraduateDimension::Collaboration => "Kolaborasi",
            GraduateDimension::Independence => "Kemandirian",
            GraduateDimension::Health => "Kesehatan",
            GraduateDimension::Communication => "Komunikasi",
        }
    }

    fn variant_name(self) -> &'static str {
        match self {
            GraduateDimension::Faith => "Faith",
            GraduateDimension::Citizenship => "Citizenship",
            GraduateDimension::CriticalReasoning => "CriticalReasoning",
            GraduateDimension::Creativity => "Creativity",
            GraduateDimension::Collaboration => "Collaboration",
            GraduateDimension::Independence => "Independence",
            GraduateDimension::Health => "Health",
            GraduateDimension::Communication => "Communication",
        }
    }
}

/// Intended tenor of a session, as tagged by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTag {
    Berkesadaran,
    Bermakna,
    Menggembirakan,
}

impl MoodTag {
    pub const ALL: [MoodTag; 3] = [MoodTag::Berkesadaran, MoodTag::Bermakna, MoodTag::Menggembirakan];

    pub fn label(self) -> &'static str {
        match self {
            MoodTag::Berkesadaran => "berkesadaran",
            MoodTag::Bermakna => "bermakna",
            MoodTag::Menggembirakan => "menggembirakan",
        }
    }

    /// Lenient match of a model-produced tag (case and surrounding space ignored).
    pub fn parse(tag: &str) -> Option<MoodTag> {
        let tag = tag.trim();
        MoodTag::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(tag))
    }
}

/// Error for a label that matches no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub catalog: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a known {}", self.value, self.catalog)
    }
}

impl std::error::Error for UnknownOption {}

fn lookup<T: Copy>(
    all: &[T],
    input: &str,
    catalog: &'static str,
    names: impl Fn(T) -> [&'static str; 2],
) -> Result<T, UnknownOption> {
    let needle = input.trim();
    all.iter()
        .copied()
        .find(|item| names(*item).iter().any(|n| n.eq_ignore_ascii_case(needle)))
        .ok_or_else(|| UnknownOption {
            catalog,
            value: input.to_string(),
        })
}

impl FromStr for EducationLevel {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "education level", |l| [l.label(), l.label()])
    }
}

impl FromStr for PedagogicalPractice {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "pedagogical practice", |p| {
            [p.label(), p.variant_name()]
        })
    }
}

impl FromStr for GraduateDimension {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, "graduate dimension", |d| {
            [d.label(), d.variant_name()]
        })
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PedagogicalPractice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for GraduateDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
