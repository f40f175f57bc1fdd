use std::collections::HashMap;

use serde::Serialize;

use super::domain::{AwardCategory, Team, TeamId};
use super::evaluation::{CriterionCheck, EligibilityVerdict, IneligibilityReason, VerdictSnapshot};
use super::grade::GradePartition;
use super::mode::{AwardMode, ResolvedAward};

/// Eligible and ineligible teams for one award category, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub category: AwardCategory,
    pub mode: AwardMode,
    pub award_offered: bool,
    pub award_titles: Vec<String>,
    pub partitions: Vec<GradePartition>,
    pub eligible: Vec<Team>,
    pub ineligible: Vec<Team>,
    pub reasons_by_team: HashMap<TeamId, Vec<String>>,
    pub precomputed_by_team: HashMap<TeamId, VerdictSnapshot>,
    pub trail_by_team: HashMap<TeamId, Vec<CriterionCheck>>,
}

impl EligibilityReport {
    pub fn is_eligible(&self, team_id: TeamId) -> bool {
        self.eligible.iter().any(|team| team.id == team_id)
    }

    pub fn reasons(&self, team_id: TeamId) -> &[String] {
        self.reasons_by_team
            .get(&team_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn precomputed(&self, team_id: TeamId) -> Option<&VerdictSnapshot> {
        self.precomputed_by_team.get(&team_id)
    }

    /// Eligible teams ordered by qualifier position, ties kept in roster order.
    pub fn eligible_by_rank(&self) -> Vec<&Team> {
        let mut ordered: Vec<&Team> = self.eligible.iter().collect();
        ordered.sort_by_key(|team| {
            self.precomputed(team.id)
                .and_then(|snapshot| snapshot.qualifier_rank)
                .unwrap_or(u32::MAX)
        });
        ordered
    }
}

pub struct ResultAggregator;

impl ResultAggregator {
    /// Partitions `teams` by verdict, preserving the given team order in both lists.
    ///
    /// A team without a verdict is reported ineligible as not evaluated.
    pub fn aggregate(
        award: &ResolvedAward,
        partitions: Vec<GradePartition>,
        teams: &[Team],
        verdicts: Vec<EligibilityVerdict>,
    ) -> EligibilityReport {
        let mut by_team: HashMap<TeamId, EligibilityVerdict> = verdicts
            .into_iter()
            .map(|verdict| (verdict.team.id, verdict))
            .collect();

        let mut report = EligibilityReport {
            category: award.category,
            mode: award.mode,
            award_offered: award.offered,
            award_titles: award.titles.clone(),
            partitions,
            eligible: Vec::new(),
            ineligible: Vec::new(),
            reasons_by_team: HashMap::with_capacity(teams.len()),
            precomputed_by_team: HashMap::with_capacity(teams.len()),
            trail_by_team: HashMap::with_capacity(teams.len()),
        };

        for team in teams {
            let Some(verdict) = by_team.remove(&team.id) else {
                report.ineligible.push(team.clone());
                report
                    .reasons_by_team
                    .insert(team.id, vec![IneligibilityReason::NoData.summary()]);
                continue;
            };

            if verdict.eligible {
                report.eligible.push(team.clone());
            } else {
                report.ineligible.push(team.clone());
            }
            report.reasons_by_team.insert(team.id, verdict.reasons);
            report.precomputed_by_team.insert(team.id, verdict.snapshot);
            report.trail_by_team.insert(team.id, verdict.trail);
        }

        report
    }
}
