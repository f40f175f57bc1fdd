use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::domain::{QualifierRanking, SkillsRanking, TeamId, TeamRef};

/// Shared view over ranking records so standings can be derived generically.
pub trait Ranked {
    fn team(&self) -> &TeamRef;
    fn rank(&self) -> u32;
}

impl Ranked for QualifierRanking {
    fn team(&self) -> &TeamRef {
        &self.team
    }

    fn rank(&self) -> u32 {
        self.rank
    }
}

impl Ranked for SkillsRanking {
    fn team(&self) -> &TeamRef {
        &self.team
    }

    fn rank(&self) -> u32 {
        self.rank
    }
}

fn keep_first_per_team<T: Ranked>(entries: Vec<T>, table: &'static str) -> Vec<T> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let team = entry.team();
            let fresh = seen.insert(team.id);
            if !fresh {
                warn!(
                    table,
                    team_id = %team.id,
                    team_number = %team.number,
                    "dropping duplicate ranking entry"
                );
            }
            fresh
        })
        .collect()
}

/// 1-based positions after a stable ascending sort by rank.
///
/// Equal ranks keep their original table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    order: Vec<TeamId>,
    positions: HashMap<TeamId, u32>,
}

impl Standings {
    fn from_ranked<'a, T, I>(entries: I) -> Self
    where
        T: Ranked + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut ordered: Vec<&T> = entries.into_iter().collect();
        ordered.sort_by_key(|entry| entry.rank());

        let order: Vec<TeamId> = ordered.iter().map(|entry| entry.team().id).collect();
        let positions = order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index as u32 + 1))
            .collect();

        Self { order, positions }
    }

    pub fn position(&self, team_id: TeamId) -> Option<u32> {
        self.positions.get(&team_id).copied()
    }

    pub fn population(&self) -> usize {
        self.order.len()
    }

    pub fn ordered(&self) -> &[TeamId] {
        &self.order
    }
}

/// Qualification standings for one division.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingTable {
    entries: Vec<QualifierRanking>,
}

impl RankingTable {
    pub fn new(entries: Vec<QualifierRanking>) -> Self {
        Self {
            entries: keep_first_per_team(entries, "qualifier"),
        }
    }

    pub fn entries(&self) -> &[QualifierRanking] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, team_id: TeamId) -> Option<&QualifierRanking> {
        self.entries.iter().find(|entry| entry.team.id == team_id)
    }

    pub fn standings<F>(&self, include: F) -> Standings
    where
        F: Fn(&TeamRef) -> bool,
    {
        Standings::from_ranked(self.entries.iter().filter(|entry| include(&entry.team)))
    }
}

/// Skills standings for one event. Rank 0 entries are kept for their scores but never ranked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsTable {
    entries: Vec<SkillsRanking>,
}

impl SkillsTable {
    pub fn new(entries: Vec<SkillsRanking>) -> Self {
        Self {
            entries: keep_first_per_team(entries, "skills"),
        }
    }

    pub fn entries(&self) -> &[SkillsRanking] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, team_id: TeamId) -> Option<&SkillsRanking> {
        self.entries.iter().find(|entry| entry.team.id == team_id)
    }

    pub fn standings<F>(&self, include: F) -> Standings
    where
        F: Fn(&TeamRef) -> bool,
    {
        Standings::from_ranked(
            self.entries
                .iter()
                .filter(|entry| entry.is_ranked() && include(&entry.team)),
        )
    }
}
