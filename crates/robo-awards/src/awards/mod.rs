//! Award eligibility for robotics competition divisions.
//!
//! Ranking and skills tables are borrowed read-only; every evaluation allocates fresh
//! verdicts, so the engine can run concurrently across divisions without coordination.

pub mod aggregate;
pub mod batch;
pub mod cutoff;
pub mod domain;
pub mod engine;
pub mod evaluation;
pub mod grade;
pub mod mode;
pub mod program;
pub mod roster;
pub mod router;
pub mod tables;
pub mod world_skills;

#[cfg(test)]
mod tests;

pub use aggregate::{EligibilityReport, ResultAggregator};
pub use batch::{evaluate_batch, BatchError, BatchOutcome, DivisionJob, DivisionKey};
pub use cutoff::{cutoff, Threshold, ThresholdError};
pub use domain::{
    AwardCategory, AwardDescriptor, ChallengeScore, DivisionDataset, DivisionRef,
    QualifierRanking, SkillsRanking, Team, TeamId, TeamLocation, TeamRef,
};
pub use engine::{EligibilityEngine, PreparedDivision};
pub use evaluation::{
    AwardRules, Criterion, CriterionCheck, EligibilityConfig, EligibilityEvaluator,
    EligibilityVerdict, EvaluationPool, IneligibilityReason, VerdictSnapshot,
};
pub use grade::{GradeBand, GradeClassifier, GradePartition, PartitionPolicy};
pub use mode::{AwardMode, AwardModeResolver, ResolvedAward};
pub use program::{ProgramCategory, ProgramProfile};
pub use roster::Roster;
pub use router::eligibility_router;
pub use tables::{RankingTable, Ranked, SkillsTable, Standings};
pub use world_skills::{
    CacheKey, SharedWorldSkills, WorldSkillsCache, WorldSkillsError, WorldSkillsSnapshot,
    WorldSkillsSource,
};
