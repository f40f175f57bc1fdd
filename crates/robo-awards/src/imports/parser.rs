use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::awards::domain::{
    ChallengeScore, QualifierRanking, SkillsRanking, Team, TeamId, TeamLocation, TeamRef,
};

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}

pub(crate) fn parse_teams<R: Read>(source: R) -> Result<Vec<Team>, csv::Error> {
    let mut teams = Vec::new();
    for row in reader(source).deserialize::<TeamRow>() {
        teams.push(row?.into_team());
    }
    Ok(teams)
}

pub(crate) fn parse_rankings<R: Read>(source: R) -> Result<Vec<QualifierRanking>, csv::Error> {
    let mut rankings = Vec::new();
    for row in reader(source).deserialize::<RankingRow>() {
        rankings.push(row?.into_ranking());
    }
    Ok(rankings)
}

pub(crate) fn parse_skills<R: Read>(source: R) -> Result<Vec<SkillsRanking>, csv::Error> {
    let mut skills = Vec::new();
    for row in reader(source).deserialize::<SkillsRow>() {
        skills.push(row?.into_skills());
    }
    Ok(skills)
}

#[derive(Debug, Deserialize)]
struct TeamRow {
    #[serde(rename = "Team ID")]
    id: u32,
    #[serde(rename = "Number")]
    number: String,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(
        rename = "Organization",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    organization: Option<String>,
    #[serde(rename = "Grade", default)]
    grade: String,
    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "Region", default, deserialize_with = "empty_string_as_none")]
    region: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
}

impl TeamRow {
    fn into_team(self) -> Team {
        Team {
            id: TeamId(self.id),
            number: self.number,
            name: self.name,
            organization: self.organization,
            grade: self.grade,
            location: TeamLocation {
                city: self.city,
                region: self.region,
                country: self.country,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RankingRow {
    #[serde(rename = "Team ID")]
    id: u32,
    #[serde(rename = "Number", default)]
    number: String,
    #[serde(rename = "Rank")]
    rank: u32,
    #[serde(rename = "Wins", default)]
    wins: Option<u32>,
    #[serde(rename = "Losses", default)]
    losses: Option<u32>,
    #[serde(rename = "Ties", default)]
    ties: Option<u32>,
    #[serde(rename = "WP", default)]
    wp: Option<u32>,
    #[serde(rename = "AP", default)]
    ap: Option<u32>,
    #[serde(rename = "SP", default)]
    sp: Option<u32>,
    #[serde(rename = "High Score", default)]
    high_score: Option<i32>,
    #[serde(rename = "Average Points", default)]
    average_points: Option<f64>,
    #[serde(rename = "Total Points", default)]
    total_points: Option<u32>,
}

impl RankingRow {
    fn into_ranking(self) -> QualifierRanking {
        QualifierRanking {
            team: TeamRef::new(TeamId(self.id), self.number),
            rank: self.rank,
            wins: self.wins.unwrap_or(0),
            losses: self.losses.unwrap_or(0),
            ties: self.ties.unwrap_or(0),
            wp: self.wp.unwrap_or(0),
            ap: self.ap.unwrap_or(0),
            sp: self.sp.unwrap_or(0),
            high_score: self.high_score,
            average_points: self.average_points,
            total_points: self.total_points,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SkillsRow {
    #[serde(rename = "Team ID")]
    id: u32,
    #[serde(rename = "Number", default)]
    number: String,
    #[serde(rename = "Rank", default)]
    rank: Option<u32>,
    #[serde(rename = "Programming Score", default)]
    programming_score: Option<u32>,
    #[serde(rename = "Programming Attempts", default)]
    programming_attempts: Option<u32>,
    #[serde(rename = "Driver Score", default)]
    driver_score: Option<u32>,
    #[serde(rename = "Driver Attempts", default)]
    driver_attempts: Option<u32>,
}

impl SkillsRow {
    fn into_skills(self) -> SkillsRanking {
        SkillsRanking::new(
            TeamRef::new(TeamId(self.id), self.number),
            self.rank.unwrap_or(0),
            ChallengeScore::new(
                self.programming_score.unwrap_or(0),
                self.programming_attempts.unwrap_or(0),
            ),
            ChallengeScore::new(
                self.driver_score.unwrap_or(0),
                self.driver_attempts.unwrap_or(0),
            ),
        )
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
