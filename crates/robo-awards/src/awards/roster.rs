use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::domain::{Team, TeamId, TeamRef};
use super::tables::RankingTable;

/// Teams evaluated for a division: the event roster followed by any team that only
/// appears in the division's qualifier rankings. Skills standings cover the whole event,
/// so a skills-only team counts toward the skills population but is never evaluated here.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: Vec<Team>,
    index: HashMap<TeamId, usize>,
    synthesized: HashSet<TeamId>,
}

impl Roster {
    pub fn assemble(teams: &[Team], qualifiers: &RankingTable) -> Self {
        let mut roster = Self::default();

        for team in teams {
            roster.push(team.clone());
        }

        for team_ref in qualifiers.entries().iter().map(|entry| &entry.team) {
            if roster.index.contains_key(&team_ref.id) {
                continue;
            }
            debug!(
                team_id = %team_ref.id,
                team_number = %team_ref.number,
                "qualifier-ranked team missing from roster"
            );
            roster.synthesized.insert(team_ref.id);
            roster.push(Team::from_ref(team_ref));
        }

        roster
    }

    fn push(&mut self, team: Team) {
        if self.index.contains_key(&team.id) {
            return;
        }
        self.index.insert(team.id, self.teams.len());
        self.teams.push(team);
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, team_id: TeamId) -> Option<&Team> {
        self.index.get(&team_id).map(|position| &self.teams[*position])
    }

    /// True when the team was only known through a ranking record.
    pub fn is_synthesized(&self, team_id: TeamId) -> bool {
        self.synthesized.contains(&team_id)
    }

    pub fn grade_of<'a>(&'a self, team: &'a TeamRef) -> &'a str {
        match self.get(team.id) {
            Some(known) => &known.grade,
            None => team.grade.as_deref().unwrap_or(""),
        }
    }
}
