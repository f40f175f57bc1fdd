use crate::awards::domain::{SkillsRanking, TeamId};
use crate::awards::program::ProgramProfile;

use super::verdict::{Criterion, CriterionCheck, IneligibilityReason};
use super::EvaluationPool;

pub(crate) fn qualifier_rank(team_id: TeamId, pool: &EvaluationPool) -> CriterionCheck {
    let cutoff = pool.qualifier_cutoff;
    match pool.qualifier.position(team_id) {
        None => CriterionCheck::fail(
            Criterion::QualifierRank,
            IneligibilityReason::QualifierNotRanked { cutoff },
        ),
        Some(position) if position > cutoff => CriterionCheck::fail(
            Criterion::QualifierRank,
            IneligibilityReason::QualifierOutsideCutoff { position, cutoff },
        ),
        Some(position) => CriterionCheck::pass(
            Criterion::QualifierRank,
            format!("Qualifier Ranking: {position} (cutoff: {cutoff})"),
        ),
    }
}

pub(crate) fn skills_rank(team_id: TeamId, pool: &EvaluationPool) -> CriterionCheck {
    let cutoff = pool.skills_cutoff;
    match pool.skills.position(team_id) {
        None => CriterionCheck::fail(
            Criterion::SkillsRank,
            IneligibilityReason::SkillsNotRanked { cutoff },
        ),
        Some(position) if position > cutoff => CriterionCheck::fail(
            Criterion::SkillsRank,
            IneligibilityReason::SkillsOutsideCutoff { position, cutoff },
        ),
        Some(position) => CriterionCheck::pass(
            Criterion::SkillsRank,
            format!("Skills Ranking: {position} (cutoff: {cutoff})"),
        ),
    }
}

pub(crate) fn programming_score(
    entry: Option<&SkillsRanking>,
    profile: &ProgramProfile,
) -> CriterionCheck {
    let label = profile.programming_label;
    let run = entry.map(|entry| entry.programming).unwrap_or_default();

    if run.attempts == 0 {
        CriterionCheck::fail(
            Criterion::ProgrammingScore,
            IneligibilityReason::NoProgrammingAttempts { label },
        )
    } else if run.score == 0 {
        CriterionCheck::fail(
            Criterion::ProgrammingScore,
            IneligibilityReason::ProgrammingScoreZero {
                label,
                score: run.score,
                attempts: run.attempts,
            },
        )
    } else {
        CriterionCheck::pass(
            Criterion::ProgrammingScore,
            format!("{label} score: {} (attempts: {})", run.score, run.attempts),
        )
    }
}

pub(crate) fn driver_score(
    entry: Option<&SkillsRanking>,
    profile: &ProgramProfile,
) -> CriterionCheck {
    let label = profile.driver_label;
    let run = entry.map(|entry| entry.driver).unwrap_or_default();

    if run.score == 0 {
        CriterionCheck::fail(
            Criterion::DriverScore,
            IneligibilityReason::NoDriverScore { label },
        )
    } else {
        CriterionCheck::pass(
            Criterion::DriverScore,
            format!("{label} score: {} (attempts: {})", run.score, run.attempts),
        )
    }
}
