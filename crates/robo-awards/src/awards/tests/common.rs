use axum::response::Response;
use serde_json::Value;

use crate::awards::domain::{
    AwardDescriptor, ChallengeScore, DivisionDataset, DivisionRef, QualifierRanking,
    SkillsRanking, Team, TeamId, TeamRef,
};
use crate::awards::engine::EligibilityEngine;
use crate::awards::evaluation::EligibilityConfig;
use crate::awards::grade::MIDDLE_SCHOOL;
use crate::awards::program::ProgramCategory;

pub(super) const HIGH_SCHOOL: &str = "High School";

pub(super) fn team(id: u32, grade: &str) -> Team {
    Team::new(TeamId(id), format!("{id}A"), grade)
}

pub(super) fn team_ref(id: u32) -> TeamRef {
    TeamRef::new(TeamId(id), format!("{id}A"))
}

pub(super) fn ranking(id: u32, rank: u32) -> QualifierRanking {
    QualifierRanking::new(team_ref(id), rank)
}

pub(super) fn skills(id: u32, rank: u32, programming: u32, driver: u32) -> SkillsRanking {
    SkillsRanking::new(
        team_ref(id),
        rank,
        ChallengeScore::new(programming, u32::from(programming > 0) * 3),
        ChallengeScore::new(driver, u32::from(driver > 0) * 3),
    )
}

pub(super) fn division(event_id: u32, division_id: u32) -> DivisionRef {
    DivisionRef {
        event_id,
        event_name: format!("Event {event_id}"),
        division_id,
        division_name: format!("Division {division_id}"),
    }
}

/// Ten high-school teams ranked 1-10 in qualifiers. Skills order puts team 6 third,
/// so teams 1-4 are the only ones inside both top halves.
pub(super) fn scenario_a_dataset() -> DivisionDataset {
    let skills_order = [1, 2, 6, 3, 4, 5, 7, 8, 9, 10];

    DivisionDataset {
        program: ProgramCategory::V5rc,
        division: division(100, 1),
        teams: (1..=10).map(|id| team(id, HIGH_SCHOOL)).collect(),
        rankings: (1..=10).map(|id| ranking(id, id)).collect(),
        skills: skills_order
            .iter()
            .zip(1..)
            .map(|(id, rank)| skills(*id, rank, 40, 60))
            .collect(),
        awards: vec![
            AwardDescriptor::new("Excellence Award", 1),
            AwardDescriptor::new("All-Around Champion", 2),
        ],
    }
}

/// Twenty teams where every third id is middle school, ranked by id in both tables.
pub(super) fn split_dataset() -> DivisionDataset {
    let grade_for = |id: u32| if id % 3 == 0 { MIDDLE_SCHOOL } else { HIGH_SCHOOL };

    DivisionDataset {
        program: ProgramCategory::V5rc,
        division: division(200, 1),
        teams: (1..=20).map(|id| team(id, grade_for(id))).collect(),
        rankings: (1..=20).map(|id| ranking(id, id)).collect(),
        skills: (1..=20).map(|id| skills(id, id, 30, 50)).collect(),
        awards: vec![
            AwardDescriptor::new("Excellence Award - Middle School", 1),
            AwardDescriptor::new("Excellence Award - High School", 2),
            AwardDescriptor::new("All-Around Champion - Middle School", 3),
            AwardDescriptor::new("All-Around Champion - High School", 4),
        ],
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::default())
}

pub(super) fn ids(teams: &[Team]) -> Vec<u32> {
    teams.iter().map(|team| team.id.0).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}
