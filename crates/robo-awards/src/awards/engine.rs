use std::collections::BTreeMap;

use tracing::{debug, info};

use super::aggregate::{EligibilityReport, ResultAggregator};
use super::domain::{AwardCategory, AwardDescriptor, DivisionDataset, DivisionRef, Team};
use super::evaluation::{EligibilityConfig, EligibilityEvaluator, EvaluationPool};
use super::grade::{GradeBand, GradePartition};
use super::mode::AwardModeResolver;
use super::program::ProgramCategory;
use super::roster::Roster;
use super::tables::{RankingTable, SkillsTable};
use super::world_skills::{CacheKey, SharedWorldSkills};

/// Tables and roster for one division, built once and shared by every award category.
#[derive(Debug, Clone)]
pub struct PreparedDivision {
    pub program: ProgramCategory,
    pub division: DivisionRef,
    pub awards: Vec<AwardDescriptor>,
    pub qualifiers: RankingTable,
    pub skills: SkillsTable,
    pub roster: Roster,
}

impl PreparedDivision {
    pub fn new(dataset: &DivisionDataset) -> Self {
        let qualifiers = RankingTable::new(dataset.rankings.clone());
        let skills = SkillsTable::new(dataset.skills.clone());
        let roster = Roster::assemble(&dataset.teams, &qualifiers);

        Self {
            program: dataset.program,
            division: dataset.division.clone(),
            awards: dataset.awards.clone(),
            qualifiers,
            skills,
            roster,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.qualifiers.is_empty() && !self.skills.is_empty()
    }
}

/// Entry point computing award eligibility for whole divisions.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
    world_skills: Option<SharedWorldSkills>,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self {
            config,
            world_skills: None,
        }
    }

    /// Attaches a world skills cache so verdict snapshots carry each team's season rank.
    pub fn with_world_skills(mut self, cache: SharedWorldSkills) -> Self {
        self.world_skills = Some(cache);
        self
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Reports for every award category, in category order.
    pub fn evaluate(&self, dataset: &DivisionDataset) -> Vec<EligibilityReport> {
        let division = PreparedDivision::new(dataset);
        AwardCategory::ordered()
            .into_iter()
            .map(|category| self.evaluate_prepared(&division, category))
            .collect()
    }

    pub fn evaluate_category(
        &self,
        dataset: &DivisionDataset,
        category: AwardCategory,
    ) -> EligibilityReport {
        self.evaluate_prepared(&PreparedDivision::new(dataset), category)
    }

    pub fn evaluate_prepared(
        &self,
        division: &PreparedDivision,
        category: AwardCategory,
    ) -> EligibilityReport {
        let award = AwardModeResolver::inspect(&division.awards, category);
        let evaluator = EligibilityEvaluator::new(category, &self.config, division.program);
        let teams = division.roster.teams();

        debug!(
            event_id = division.division.event_id,
            division_id = division.division.division_id,
            category = category.label(),
            mode = award.mode.label(),
            offered = award.offered,
            "resolved award mode"
        );

        if !division.has_data() {
            info!(
                event_id = division.division.event_id,
                division_id = division.division.division_id,
                category = category.label(),
                "no ranking or skills data; reporting teams as not evaluated"
            );
            let verdicts = teams
                .iter()
                .map(|team| evaluator.not_evaluated(team))
                .collect();
            return ResultAggregator::aggregate(&award, Vec::new(), teams, verdicts);
        }

        let mut pools: BTreeMap<Option<GradePartition>, EvaluationPool> = BTreeMap::new();
        let mut verdicts = Vec::with_capacity(teams.len());

        for team in teams {
            let partition = evaluator.partition_for(team, award.mode);
            let pool = pools.entry(partition).or_insert_with(|| {
                evaluator.pool(
                    &division.qualifiers,
                    &division.skills,
                    &division.roster,
                    partition,
                )
            });

            let mut verdict = evaluator.evaluate_in_pool(team, &division.skills, pool);
            verdict.snapshot.world_skills_rank = self.world_skills_rank(division.program, team);
            verdicts.push(verdict);
        }

        let partitions = pools.keys().flatten().copied().collect();
        let report = ResultAggregator::aggregate(&award, partitions, teams, verdicts);

        info!(
            event_id = division.division.event_id,
            division_id = division.division.division_id,
            category = category.label(),
            mode = award.mode.label(),
            eligible = report.eligible.len(),
            ineligible = report.ineligible.len(),
            "division evaluated"
        );

        report
    }

    fn world_skills_rank(&self, program: ProgramCategory, team: &Team) -> Option<u32> {
        let cache = self.world_skills.as_ref()?;
        let key = CacheKey::new(program, GradeBand::parse(&team.grade));
        let guard = cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.rank_of(key, team.id)
    }
}
