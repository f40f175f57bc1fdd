//! Builds division datasets from the CSV exports event partners keep offline.
//!
//! Three files describe a division: `teams.csv`, `rankings.csv` and `skills.csv`. Headers
//! follow the results service's export (`Team ID`, `Number`, `Grade`, `Rank`, ...). Blank
//! numeric cells read as zero; blank text cells read as absent.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::awards::domain::{AwardDescriptor, DivisionDataset, DivisionRef};
use crate::awards::program::ProgramCategory;

#[derive(Debug, Error)]
pub enum DatasetImportError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },
}

/// Locations of the three CSV exports for one division.
#[derive(Debug, Clone)]
pub struct CsvSources {
    pub teams: PathBuf,
    pub rankings: PathBuf,
    pub skills: PathBuf,
}

impl CsvSources {
    /// Conventional file names inside one export directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            teams: dir.join("teams.csv"),
            rankings: dir.join("rankings.csv"),
            skills: dir.join("skills.csv"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetImporter {
    program: ProgramCategory,
    division: DivisionRef,
    awards: Vec<AwardDescriptor>,
}

impl DatasetImporter {
    pub fn new(program: ProgramCategory) -> Self {
        Self {
            program,
            ..Self::default()
        }
    }

    pub fn with_division(mut self, division: DivisionRef) -> Self {
        self.division = division;
        self
    }

    /// Award titles in publication order; CSV exports do not carry them.
    pub fn with_awards<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.awards = titles
            .into_iter()
            .enumerate()
            .map(|(order, title)| AwardDescriptor::new(title, order as u32))
            .collect();
        self
    }

    pub fn import_paths(
        &self,
        sources: &CsvSources,
    ) -> Result<DivisionDataset, DatasetImportError> {
        let teams = open(&sources.teams)?;
        let rankings = open(&sources.rankings)?;
        let skills = open(&sources.skills)?;
        self.import_readers(teams, rankings, skills)
    }

    pub fn import_readers<T, R, S>(
        &self,
        teams: T,
        rankings: R,
        skills: S,
    ) -> Result<DivisionDataset, DatasetImportError>
    where
        T: Read,
        R: Read,
        S: Read,
    {
        let teams = parser::parse_teams(teams).map_err(|source| DatasetImportError::Csv {
            file: "teams",
            source,
        })?;
        let rankings =
            parser::parse_rankings(rankings).map_err(|source| DatasetImportError::Csv {
                file: "rankings",
                source,
            })?;
        let skills = parser::parse_skills(skills).map_err(|source| DatasetImportError::Csv {
            file: "skills",
            source,
        })?;

        info!(
            program = self.program.profile().short_label,
            teams = teams.len(),
            rankings = rankings.len(),
            skills = skills.len(),
            "division dataset imported"
        );

        Ok(DivisionDataset {
            program: self.program,
            division: self.division.clone(),
            teams,
            rankings,
            skills,
            awards: self.awards.clone(),
        })
    }
}

fn open(path: &Path) -> Result<File, DatasetImportError> {
    File::open(path).map_err(|source| DatasetImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awards::domain::TeamId;

    const TEAMS: &str = "\
Team ID,Number,Name,Organization,Grade,City,Region,Country
101,1001A,Gearheads,North Middle,Middle School,Austin,Texas,United States
102, 2002B ,Torque,,High School,,,
";

    const RANKINGS: &str = "\
Team ID,Number,Rank,Wins,Losses,Ties,WP,AP,SP,High Score,Average Points,Total Points
102,2002B,1,6,0,0,12,40,300,88,61.5,369
101,1001A,2,4,2,0,8,20,250,,,
";

    const SKILLS: &str = "\
Team ID,Number,Rank,Programming Score,Programming Attempts,Driver Score,Driver Attempts
101,1001A,1,45,3,80,3
102,2002B,,,,60,1
";

    #[test]
    fn imports_all_three_exports() {
        let dataset = DatasetImporter::new(ProgramCategory::V5rc)
            .with_awards(["Excellence Award", "Tournament Champions"])
            .import_readers(TEAMS.as_bytes(), RANKINGS.as_bytes(), SKILLS.as_bytes())
            .expect("fixture parses");

        assert_eq!(dataset.teams.len(), 2);
        assert_eq!(dataset.teams[0].grade, "Middle School");
        assert_eq!(dataset.teams[0].location.city.as_deref(), Some("Austin"));
        assert_eq!(dataset.teams[1].number, "2002B");
        assert!(dataset.teams[1].organization.is_none());

        assert_eq!(dataset.rankings[0].team.id, TeamId(102));
        assert_eq!(dataset.rankings[0].record(), "6-0-0");
        assert_eq!(dataset.rankings[1].high_score, None);

        assert_eq!(dataset.skills[0].programming.attempts, 3);
        assert_eq!(dataset.skills[1].rank, 0);
        assert_eq!(dataset.skills[1].programming.score, 0);
        assert_eq!(dataset.skills[1].driver.score, 60);

        assert_eq!(dataset.awards[1].title, "Tournament Champions");
        assert_eq!(dataset.awards[1].order, 1);
    }

    #[test]
    fn reports_which_file_failed() {
        let bad_rankings = "Team ID,Number,Rank\n101,1001A,first\n";
        let err = DatasetImporter::default()
            .import_readers(TEAMS.as_bytes(), bad_rankings.as_bytes(), SKILLS.as_bytes())
            .expect_err("non-numeric rank is rejected");

        assert!(matches!(err, DatasetImportError::Csv { file: "rankings", .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let sources = CsvSources::in_dir("/definitely/not/here");
        let err = DatasetImporter::default()
            .import_paths(&sources)
            .expect_err("missing directory");

        match err {
            DatasetImportError::Io { path, .. } => assert!(path.ends_with("teams.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
