use serde::{Deserialize, Serialize};

use super::grade::GradeBand;

/// Competition program an event belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    #[default]
    V5rc,
    Viqrc,
    Vexu,
    Vairc,
    Adc,
}

/// Static labels and cache partitions for a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramProfile {
    pub label: &'static str,
    pub short_label: &'static str,
    pub programming_label: &'static str,
    pub driver_label: &'static str,
    pub grades: &'static [GradeBand],
}

static V5RC: ProgramProfile = ProgramProfile {
    label: "VEX V5 Robotics Competition",
    short_label: "V5RC",
    programming_label: "Programming",
    driver_label: "Driver",
    grades: &[GradeBand::MiddleSchool, GradeBand::HighSchool],
};

static VIQRC: ProgramProfile = ProgramProfile {
    label: "VEX IQ Robotics Competition",
    short_label: "VIQRC",
    programming_label: "Autonomous Coding",
    driver_label: "Driver",
    grades: &[GradeBand::ElementarySchool, GradeBand::MiddleSchool],
};

static VEXU: ProgramProfile = ProgramProfile {
    label: "VEX U Robotics Competition",
    short_label: "VEXU",
    programming_label: "Programming",
    driver_label: "Driver",
    grades: &[GradeBand::College],
};

static VAIRC: ProgramProfile = ProgramProfile {
    label: "VEX AI Robotics Competition",
    short_label: "VAIRC",
    programming_label: "Programming",
    driver_label: "Driver",
    grades: &[GradeBand::HighSchool, GradeBand::College],
};

static ADC: ProgramProfile = ProgramProfile {
    label: "Aerial Drone Competition",
    short_label: "ADC",
    programming_label: "Autonomous Flight",
    driver_label: "Piloting",
    grades: &[GradeBand::MiddleSchool, GradeBand::HighSchool],
};

impl ProgramCategory {
    pub fn ordered() -> [ProgramCategory; 5] {
        [
            ProgramCategory::V5rc,
            ProgramCategory::Viqrc,
            ProgramCategory::Vexu,
            ProgramCategory::Vairc,
            ProgramCategory::Adc,
        ]
    }

    pub fn profile(&self) -> &'static ProgramProfile {
        match self {
            ProgramCategory::V5rc => &V5RC,
            ProgramCategory::Viqrc => &VIQRC,
            ProgramCategory::Vexu => &VEXU,
            ProgramCategory::Vairc => &VAIRC,
            ProgramCategory::Adc => &ADC,
        }
    }

    pub fn label(&self) -> &'static str {
        self.profile().label
    }

    /// Accepts either the short code ("V5RC") or the full program name.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ordered().into_iter().find(|program| {
            let profile = program.profile();
            profile.short_label.eq_ignore_ascii_case(trimmed)
                || profile.label.eq_ignore_ascii_case(trimmed)
        })
    }
}
