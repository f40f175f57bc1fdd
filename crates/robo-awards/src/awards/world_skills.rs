use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{SkillsRanking, TeamId};
use super::grade::GradeBand;
use super::program::ProgramCategory;

/// Season-wide skills partition: one program, one grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub program: ProgramCategory,
    pub grade: GradeBand,
}

impl CacheKey {
    pub fn new(program: ProgramCategory, grade: GradeBand) -> Self {
        Self { program, grade }
    }

    /// Every partition the program publishes world skills standings for.
    pub fn all_for(program: ProgramCategory) -> Vec<CacheKey> {
        program
            .profile()
            .grades
            .iter()
            .map(|grade| CacheKey::new(program, *grade))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldSkillsSnapshot {
    pub entries: Vec<SkillsRanking>,
    pub refreshed_at: DateTime<Utc>,
    #[serde(skip)]
    index: HashMap<TeamId, usize>,
}

impl WorldSkillsSnapshot {
    fn new(entries: Vec<SkillsRanking>, refreshed_at: DateTime<Utc>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            index.entry(entry.team.id).or_insert(position);
        }

        Self {
            entries,
            refreshed_at,
            index,
        }
    }

    pub fn get(&self, team_id: TeamId) -> Option<&SkillsRanking> {
        self.index.get(&team_id).map(|position| &self.entries[*position])
    }
}

/// Upstream provider of world skills standings (results API adapter, fixtures in tests).
pub trait WorldSkillsSource: Send + Sync {
    fn fetch(&self, key: CacheKey) -> Result<Vec<SkillsRanking>, WorldSkillsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WorldSkillsError {
    #[error("world skills source unavailable: {0}")]
    Unavailable(String),
    #[error("world skills for {program:?} / {grade:?} have not been loaded")]
    NotCached {
        program: ProgramCategory,
        grade: GradeBand,
    },
}

/// World skills standings keyed by (program, grade), filled by explicit refreshes.
#[derive(Debug, Clone, Default)]
pub struct WorldSkillsCache {
    snapshots: HashMap<CacheKey, WorldSkillsSnapshot>,
}

pub type SharedWorldSkills = Arc<RwLock<WorldSkillsCache>>;

impl WorldSkillsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedWorldSkills {
        Arc::new(RwLock::new(self))
    }

    /// Reloads every partition of `program`. Nothing is replaced unless all fetches succeed.
    pub fn refresh<S>(
        &mut self,
        program: ProgramCategory,
        source: &S,
    ) -> Result<usize, WorldSkillsError>
    where
        S: WorldSkillsSource + ?Sized,
    {
        let mut fetched = Vec::new();
        for key in CacheKey::all_for(program) {
            fetched.push((key, source.fetch(key)?));
        }

        let refreshed_at = Utc::now();
        let mut loaded = 0;
        for (key, entries) in fetched {
            loaded += entries.len();
            self.snapshots
                .insert(key, WorldSkillsSnapshot::new(entries, refreshed_at));
        }

        info!(
            program = program.profile().short_label,
            loaded,
            "world skills cache refreshed"
        );
        Ok(loaded)
    }

    pub fn insert(&mut self, key: CacheKey, entries: Vec<SkillsRanking>) {
        self.snapshots
            .insert(key, WorldSkillsSnapshot::new(entries, Utc::now()));
    }

    pub fn snapshot(&self, key: CacheKey) -> Result<&WorldSkillsSnapshot, WorldSkillsError> {
        self.snapshots.get(&key).ok_or(WorldSkillsError::NotCached {
            program: key.program,
            grade: key.grade,
        })
    }

    pub fn lookup(&self, key: CacheKey, team_id: TeamId) -> Option<&SkillsRanking> {
        self.snapshots.get(&key).and_then(|snapshot| snapshot.get(team_id))
    }

    pub fn rank_of(&self, key: CacheKey, team_id: TeamId) -> Option<u32> {
        self.lookup(key, team_id)
            .map(|entry| entry.rank)
            .filter(|rank| *rank > 0)
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self.snapshots.keys().copied().collect();
        keys.sort();
        keys
    }
}
