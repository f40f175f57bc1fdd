use std::fmt;

use serde::{Deserialize, Serialize};

use super::program::ProgramCategory;

/// Identifier assigned to a team by the competition results service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimal identity carried by ranking and skills records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default)]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl TeamRef {
    pub fn new(id: TeamId, number: impl Into<String>) -> Self {
        Self {
            id,
            number: number.into(),
            grade: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Roster entry for a team registered at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub location: TeamLocation,
}

impl Team {
    pub fn new(id: TeamId, number: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            id,
            number: number.into(),
            name: None,
            organization: None,
            grade: grade.into(),
            location: TeamLocation::default(),
        }
    }

    /// Builds a placeholder roster entry from the identity a ranking record carries.
    pub fn from_ref(team: &TeamRef) -> Self {
        Self::new(team.id, team.number.clone(), team.grade.clone().unwrap_or_default())
    }

    pub fn to_ref(&self) -> TeamRef {
        TeamRef {
            id: self.id,
            number: self.number.clone(),
            grade: (!self.grade.is_empty()).then(|| self.grade.clone()),
        }
    }
}

/// Qualification match standing for one team in one division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifierRanking {
    pub team: TeamRef,
    pub rank: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub wp: u32,
    #[serde(default)]
    pub ap: u32,
    #[serde(default)]
    pub sp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
}

impl QualifierRanking {
    pub fn new(team: TeamRef, rank: u32) -> Self {
        Self {
            team,
            rank,
            wins: 0,
            losses: 0,
            ties: 0,
            wp: 0,
            ap: 0,
            sp: 0,
            high_score: None,
            average_points: None,
            total_points: None,
        }
    }

    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Best score and number of runs for one skills challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeScore {
    pub score: u32,
    pub attempts: u32,
}

impl ChallengeScore {
    pub fn new(score: u32, attempts: u32) -> Self {
        Self { score, attempts }
    }
}

/// Combined skills standing for one team at an event. A rank of 0 means unranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsRanking {
    pub team: TeamRef,
    pub rank: u32,
    #[serde(default)]
    pub programming: ChallengeScore,
    #[serde(default)]
    pub driver: ChallengeScore,
}

impl SkillsRanking {
    pub fn new(
        team: TeamRef,
        rank: u32,
        programming: ChallengeScore,
        driver: ChallengeScore,
    ) -> Self {
        Self {
            team,
            rank,
            programming,
            driver,
        }
    }

    pub fn combined_score(&self) -> u32 {
        self.programming.score.saturating_add(self.driver.score)
    }

    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }
}

/// Award offered at a division, as published by the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardDescriptor {
    pub title: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_id: Option<u32>,
}

impl AwardDescriptor {
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            title: title.into(),
            order,
            division_id: None,
        }
    }
}

/// Capstone awards whose eligibility is computed from rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardCategory {
    AllAround,
    Excellence,
}

impl AwardCategory {
    pub fn ordered() -> [AwardCategory; 2] {
        [AwardCategory::AllAround, AwardCategory::Excellence]
    }

    /// Substring identifying this category inside an award title.
    pub fn marker(&self) -> &'static str {
        match self {
            AwardCategory::AllAround => "All-Around Champion",
            AwardCategory::Excellence => "Excellence Award",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AwardCategory::AllAround => "All-Around Champion",
            AwardCategory::Excellence => "Excellence",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "all_around" | "allaround" | "all_around_champion" => Some(Self::AllAround),
            "excellence" | "excellence_award" => Some(Self::Excellence),
            _ => None,
        }
    }
}

/// Event/division identity attached to a dataset for logging and batch keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionRef {
    #[serde(default)]
    pub event_id: u32,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub division_id: u32,
    #[serde(default)]
    pub division_name: String,
}

/// Already-fetched inputs for one division of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionDataset {
    #[serde(default)]
    pub program: ProgramCategory,
    #[serde(default)]
    pub division: DivisionRef,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub rankings: Vec<QualifierRanking>,
    #[serde(default)]
    pub skills: Vec<SkillsRanking>,
    #[serde(default)]
    pub awards: Vec<AwardDescriptor>,
}
