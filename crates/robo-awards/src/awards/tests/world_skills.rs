use std::collections::HashMap;

use super::common::*;

use crate::awards::domain::{AwardCategory, SkillsRanking, TeamId};
use crate::awards::grade::GradeBand;
use crate::awards::program::ProgramCategory;
use crate::awards::world_skills::{
    CacheKey, WorldSkillsCache, WorldSkillsError, WorldSkillsSource,
};

struct FixtureSource {
    standings: HashMap<CacheKey, Vec<SkillsRanking>>,
}

impl WorldSkillsSource for FixtureSource {
    fn fetch(&self, key: CacheKey) -> Result<Vec<SkillsRanking>, WorldSkillsError> {
        self.standings
            .get(&key)
            .cloned()
            .ok_or_else(|| WorldSkillsError::Unavailable(format!("{key:?}")))
    }
}

fn v5rc_source() -> FixtureSource {
    let middle = CacheKey::new(ProgramCategory::V5rc, GradeBand::MiddleSchool);
    let high = CacheKey::new(ProgramCategory::V5rc, GradeBand::HighSchool);

    FixtureSource {
        standings: HashMap::from([
            (middle, vec![skills(3, 12, 90, 110), skills(6, 40, 70, 90)]),
            (
                high,
                vec![skills(1, 5, 120, 140), skills(2, 0, 0, 30), skills(4, 77, 20, 40)],
            ),
        ]),
    }
}

#[test]
fn refresh_loads_every_grade_of_the_program() {
    let mut cache = WorldSkillsCache::new();

    let loaded = cache
        .refresh(ProgramCategory::V5rc, &v5rc_source())
        .expect("refresh succeeds");

    assert_eq!(loaded, 5);
    assert_eq!(
        cache.keys(),
        vec![
            CacheKey::new(ProgramCategory::V5rc, GradeBand::MiddleSchool),
            CacheKey::new(ProgramCategory::V5rc, GradeBand::HighSchool),
        ]
    );
    let high = CacheKey::new(ProgramCategory::V5rc, GradeBand::HighSchool);
    assert_eq!(cache.rank_of(high, TeamId(1)), Some(5));
    assert_eq!(cache.rank_of(high, TeamId(2)), None);
    assert!(cache.lookup(high, TeamId(2)).is_some());
}

#[test]
fn failed_refresh_keeps_previous_snapshots() {
    let mut cache = WorldSkillsCache::new();
    let middle = CacheKey::new(ProgramCategory::V5rc, GradeBand::MiddleSchool);
    cache.insert(middle, vec![skills(9, 1, 10, 10)]);

    let mut partial = v5rc_source();
    partial
        .standings
        .remove(&CacheKey::new(ProgramCategory::V5rc, GradeBand::HighSchool));

    let err = cache
        .refresh(ProgramCategory::V5rc, &partial)
        .expect_err("missing grade fails the refresh");

    assert!(matches!(err, WorldSkillsError::Unavailable(_)));
    assert_eq!(cache.rank_of(middle, TeamId(9)), Some(1));
    assert_eq!(cache.rank_of(middle, TeamId(3)), None);
}

#[test]
fn snapshot_reports_unloaded_partitions() {
    let cache = WorldSkillsCache::new();

    let err = cache
        .snapshot(CacheKey::new(ProgramCategory::Viqrc, GradeBand::ElementarySchool))
        .expect_err("nothing loaded");

    assert!(matches!(
        err,
        WorldSkillsError::NotCached {
            program: ProgramCategory::Viqrc,
            grade: GradeBand::ElementarySchool,
        }
    ));
}

#[test]
fn engine_attaches_world_skills_rank_to_snapshots() {
    let mut cache = WorldSkillsCache::new();
    cache
        .refresh(ProgramCategory::V5rc, &v5rc_source())
        .expect("refresh succeeds");
    let engine = engine().with_world_skills(cache.shared());

    let report = engine.evaluate_category(&split_dataset(), AwardCategory::Excellence);

    let rank_of = |id: u32| {
        report
            .precomputed(TeamId(id))
            .and_then(|snapshot| snapshot.world_skills_rank)
    };
    assert_eq!(rank_of(3), Some(12));
    assert_eq!(rank_of(1), Some(5));
    assert_eq!(rank_of(2), None);
    assert_eq!(rank_of(5), None);

    let without_cache = super::common::engine()
        .evaluate_category(&split_dataset(), AwardCategory::Excellence);
    assert_eq!(ids(&report.eligible), ids(&without_cache.eligible));
}
