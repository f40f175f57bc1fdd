use serde::Serialize;

use crate::awards::cutoff::{cutoff, Threshold};
use crate::awards::domain::{AwardCategory, TeamRef};
use crate::awards::grade::GradePartition;

/// Individual rule evaluated for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    QualifierRank,
    SkillsRank,
    ProgrammingScore,
    DriverScore,
}

/// Why a team missed one criterion, phrased for the eligibility screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IneligibilityReason {
    QualifierNotRanked {
        cutoff: u32,
    },
    QualifierOutsideCutoff {
        position: u32,
        cutoff: u32,
    },
    SkillsNotRanked {
        cutoff: u32,
    },
    SkillsOutsideCutoff {
        position: u32,
        cutoff: u32,
    },
    NoProgrammingAttempts {
        label: &'static str,
    },
    ProgrammingScoreZero {
        label: &'static str,
        score: u32,
        attempts: u32,
    },
    NoDriverScore {
        label: &'static str,
    },
    NoData,
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::QualifierNotRanked { cutoff } => {
                format!("Qualifier Ranking: Not ranked (cutoff: {cutoff})")
            }
            IneligibilityReason::QualifierOutsideCutoff { position, cutoff } => {
                format!("Qualifier Ranking: {position} (cutoff: {cutoff})")
            }
            IneligibilityReason::SkillsNotRanked { cutoff } => {
                format!("Skills Ranking: Not ranked (cutoff: {cutoff})")
            }
            IneligibilityReason::SkillsOutsideCutoff { position, cutoff } => {
                format!("Skills Ranking: {position} (cutoff: {cutoff})")
            }
            IneligibilityReason::NoProgrammingAttempts { label } => {
                format!("No {} attempts", label.to_lowercase())
            }
            IneligibilityReason::ProgrammingScoreZero {
                label,
                score,
                attempts,
            } => format!("{label} score: {score} (attempts: {attempts})"),
            IneligibilityReason::NoDriverScore { label } => {
                format!("No {} score", label.to_lowercase())
            }
            IneligibilityReason::NoData => "No ranking or skills data available".to_string(),
        }
    }
}

/// One entry of the decision trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionCheck {
    pub criterion: Criterion,
    pub passed: bool,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<IneligibilityReason>,
}

impl CriterionCheck {
    pub(crate) fn pass(criterion: Criterion, notes: String) -> Self {
        Self {
            criterion,
            passed: true,
            notes,
            failure: None,
        }
    }

    pub(crate) fn fail(criterion: Criterion, reason: IneligibilityReason) -> Self {
        Self {
            criterion,
            passed: false,
            notes: reason.summary(),
            failure: Some(reason),
        }
    }
}

/// Inputs the verdict was decided on, kept for display next to the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerdictSnapshot {
    pub qualifier_rank: Option<u32>,
    pub qualifier_cutoff: u32,
    pub skills_rank: Option<u32>,
    pub skills_cutoff: u32,
    pub programming_score: u32,
    pub programming_attempts: u32,
    pub driver_score: u32,
    pub driver_attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<GradePartition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_skills_rank: Option<u32>,
}

impl VerdictSnapshot {
    pub(crate) fn empty(threshold: Threshold) -> Self {
        let empty_cutoff = cutoff(0, threshold);
        Self {
            qualifier_rank: None,
            qualifier_cutoff: empty_cutoff,
            skills_rank: None,
            skills_cutoff: empty_cutoff,
            programming_score: 0,
            programming_attempts: 0,
            driver_score: 0,
            driver_attempts: 0,
            partition: None,
            world_skills_rank: None,
        }
    }
}

/// Eligibility determination for one team and one award category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityVerdict {
    pub team: TeamRef,
    pub category: AwardCategory,
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub trail: Vec<CriterionCheck>,
    pub snapshot: VerdictSnapshot,
}

impl EligibilityVerdict {
    /// Reasons are exactly the failed checks, in trail order.
    pub(crate) fn from_trail(
        team: TeamRef,
        category: AwardCategory,
        trail: Vec<CriterionCheck>,
        snapshot: VerdictSnapshot,
    ) -> Self {
        let reasons: Vec<String> = trail
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.notes.clone())
            .collect();

        Self {
            team,
            category,
            eligible: reasons.is_empty(),
            reasons,
            trail,
            snapshot,
        }
    }

    pub(crate) fn not_evaluated(
        team: TeamRef,
        category: AwardCategory,
        snapshot: VerdictSnapshot,
    ) -> Self {
        Self {
            team,
            category,
            eligible: false,
            reasons: vec![IneligibilityReason::NoData.summary()],
            trail: Vec::new(),
            snapshot,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &IneligibilityReason> {
        self.trail.iter().filter_map(|check| check.failure.as_ref())
    }
}
