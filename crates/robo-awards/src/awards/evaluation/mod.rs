mod config;
mod rules;
mod verdict;

pub use config::{AwardRules, EligibilityConfig};
pub use verdict::{
    Criterion, CriterionCheck, EligibilityVerdict, IneligibilityReason, VerdictSnapshot,
};

use super::cutoff::cutoff;
use super::domain::{AwardCategory, Team, TeamRef};
use super::grade::{GradeClassifier, GradePartition};
use super::mode::AwardMode;
use super::program::{ProgramCategory, ProgramProfile};
use super::roster::Roster;
use super::tables::{RankingTable, SkillsTable, Standings};

/// Standings and cutoffs for one eligibility pool (a whole division, or one grade of it).
#[derive(Debug, Clone)]
pub struct EvaluationPool {
    pub partition: Option<GradePartition>,
    pub qualifier: Standings,
    pub qualifier_cutoff: u32,
    pub skills: Standings,
    pub skills_cutoff: u32,
}

/// Applies one award category's rules to teams. Holds no per-run state.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator {
    category: AwardCategory,
    rules: AwardRules,
    profile: &'static ProgramProfile,
    classifier: GradeClassifier,
}

impl EligibilityEvaluator {
    pub fn new(
        category: AwardCategory,
        config: &EligibilityConfig,
        program: ProgramCategory,
    ) -> Self {
        Self {
            category,
            rules: config.rules_for(category),
            profile: program.profile(),
            classifier: GradeClassifier::new(config.partition_policy),
        }
    }

    pub fn category(&self) -> AwardCategory {
        self.category
    }

    pub fn rules(&self) -> AwardRules {
        self.rules
    }

    pub fn classifier(&self) -> GradeClassifier {
        self.classifier
    }

    /// Pool a team is measured against: the whole division when combined, its own grade
    /// partition when split.
    pub fn partition_for(&self, team: &Team, mode: AwardMode) -> Option<GradePartition> {
        match mode {
            AwardMode::Combined => None,
            AwardMode::Split => Some(self.classifier.partition_of_team(team)),
        }
    }

    pub fn pool(
        &self,
        qualifiers: &RankingTable,
        skills: &SkillsTable,
        roster: &Roster,
        partition: Option<GradePartition>,
    ) -> EvaluationPool {
        let include = |team: &TeamRef| match partition {
            None => true,
            Some(wanted) => self.classifier.partition_of(roster.grade_of(team)) == wanted,
        };

        let qualifier = qualifiers.standings(include);
        let skills = skills.standings(include);
        let threshold = self.rules.threshold;

        EvaluationPool {
            partition,
            qualifier_cutoff: cutoff(qualifier.population(), threshold),
            skills_cutoff: cutoff(skills.population(), threshold),
            qualifier,
            skills,
        }
    }

    /// Evaluates a single team, deriving its pool from the tables on the spot.
    pub fn evaluate(
        &self,
        team: &Team,
        qualifiers: &RankingTable,
        skills: &SkillsTable,
        mode: AwardMode,
        roster: &Roster,
    ) -> EligibilityVerdict {
        if qualifiers.is_empty() || skills.is_empty() {
            return self.not_evaluated(team);
        }

        let pool = self.pool(qualifiers, skills, roster, self.partition_for(team, mode));
        self.evaluate_in_pool(team, skills, &pool)
    }

    /// Runs every applicable criterion; failures accumulate rather than short-circuit.
    pub fn evaluate_in_pool(
        &self,
        team: &Team,
        skills: &SkillsTable,
        pool: &EvaluationPool,
    ) -> EligibilityVerdict {
        let entry = skills.get(team.id);

        let mut trail = vec![
            rules::qualifier_rank(team.id, pool),
            rules::skills_rank(team.id, pool),
            rules::programming_score(entry, self.profile),
        ];
        if self.rules.require_driver_score {
            trail.push(rules::driver_score(entry, self.profile));
        }

        let programming = entry.map(|entry| entry.programming).unwrap_or_default();
        let driver = entry.map(|entry| entry.driver).unwrap_or_default();
        let snapshot = VerdictSnapshot {
            qualifier_rank: pool.qualifier.position(team.id),
            qualifier_cutoff: pool.qualifier_cutoff,
            skills_rank: pool.skills.position(team.id),
            skills_cutoff: pool.skills_cutoff,
            programming_score: programming.score,
            programming_attempts: programming.attempts,
            driver_score: driver.score,
            driver_attempts: driver.attempts,
            partition: pool.partition,
            world_skills_rank: None,
        };

        EligibilityVerdict::from_trail(team.to_ref(), self.category, trail, snapshot)
    }

    pub fn not_evaluated(&self, team: &Team) -> EligibilityVerdict {
        EligibilityVerdict::not_evaluated(
            team.to_ref(),
            self.category,
            VerdictSnapshot::empty(self.rules.threshold),
        )
    }
}
