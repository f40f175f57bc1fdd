use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::Team;

pub const MIDDLE_SCHOOL: &str = "Middle School";

/// Grade levels published by the results service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    ElementarySchool,
    MiddleSchool,
    HighSchool,
    College,
    Other,
}

impl GradeBand {
    pub fn label(&self) -> &'static str {
        match self {
            GradeBand::ElementarySchool => "Elementary School",
            GradeBand::MiddleSchool => MIDDLE_SCHOOL,
            GradeBand::HighSchool => "High School",
            GradeBand::College => "College",
            GradeBand::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "elementary school" | "elementary" => GradeBand::ElementarySchool,
            "middle school" | "middle" => GradeBand::MiddleSchool,
            "high school" | "high" => GradeBand::HighSchool,
            "college" | "university" => GradeBand::College,
            _ => GradeBand::Other,
        }
    }
}

/// How teams are pooled when an award is split by grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionPolicy {
    /// "Middle School" versus every other grade value.
    #[default]
    Binary,
    /// One pool per recognised grade band.
    PerBand,
}

impl PartitionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "binary" => Some(Self::Binary),
            "per-band" | "per_band" | "perband" => Some(Self::PerBand),
            _ => None,
        }
    }
}

/// Eligibility pool a team lands in for a grade-split award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradePartition {
    MiddleSchool,
    NotMiddleSchool,
    Band(GradeBand),
}

impl GradePartition {
    pub fn label(&self) -> &'static str {
        match self {
            GradePartition::MiddleSchool => MIDDLE_SCHOOL,
            GradePartition::NotMiddleSchool => "Not Middle School",
            GradePartition::Band(band) => band.label(),
        }
    }
}

impl fmt::Display for GradePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeClassifier {
    policy: PartitionPolicy,
}

impl GradeClassifier {
    pub fn new(policy: PartitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PartitionPolicy {
        self.policy
    }

    pub fn grade_of<'a>(&self, team: &'a Team) -> &'a str {
        &team.grade
    }

    pub fn partition_of(&self, grade: &str) -> GradePartition {
        match self.policy {
            PartitionPolicy::Binary if grade == MIDDLE_SCHOOL => GradePartition::MiddleSchool,
            PartitionPolicy::Binary => GradePartition::NotMiddleSchool,
            PartitionPolicy::PerBand => GradePartition::Band(GradeBand::parse(grade)),
        }
    }

    pub fn partition_of_team(&self, team: &Team) -> GradePartition {
        self.partition_of(self.grade_of(team))
    }

    pub fn matches_band(&self, team: &Team, band: GradePartition) -> bool {
        self.partition_of_team(team) == band
    }
}
