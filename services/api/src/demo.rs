use crate::infra::{load_dataset, parse_category, parse_program};
use clap::Args;
use robo_awards::awards::{
    AwardCategory, AwardDescriptor, ChallengeScore, DivisionDataset, DivisionRef,
    EligibilityEngine, EligibilityReport, ProgramCategory, QualifierRanking, SkillsRanking, Team,
    TeamId, TeamRef,
};
use robo_awards::config::AppConfig;
use robo_awards::error::AppError;
use robo_awards::imports::{CsvSources, DatasetImporter};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// JSON division dataset (program, teams, rankings, skills, awards)
    #[arg(long, conflicts_with = "csv_dir")]
    pub(crate) dataset: Option<PathBuf>,
    /// Directory holding teams.csv, rankings.csv and skills.csv exports
    #[arg(long)]
    pub(crate) csv_dir: Option<PathBuf>,
    /// Award title offered at the division (repeat for each award, CSV input only)
    #[arg(long = "award")]
    pub(crate) awards: Vec<String>,
    /// Program for CSV input (defaults to APP_PROGRAM)
    #[arg(long, value_parser = parse_program)]
    pub(crate) program: Option<ProgramCategory>,
    /// Only evaluate one award category (all-around or excellence)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<AwardCategory>,
    /// Print the reports as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of synthetic teams in the division
    #[arg(long, default_value_t = 24)]
    pub(crate) teams: u32,
    /// Offer both awards separately for middle and high school
    #[arg(long)]
    pub(crate) split: bool,
    /// Only evaluate one award category (all-around or excellence)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<AwardCategory>,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            teams: 24,
            split: false,
            category: None,
        }
    }
}

pub(crate) fn run_evaluation(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        dataset,
        csv_dir,
        awards,
        program,
        category,
        json,
    } = args;

    let config = AppConfig::load()?;
    let dataset = match (dataset, csv_dir) {
        (Some(path), _) => load_dataset(&path)?,
        (None, Some(dir)) => DatasetImporter::new(program.unwrap_or(config.program))
            .with_awards(awards)
            .import_paths(&CsvSources::in_dir(dir))?,
        (None, None) => {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "either --dataset or --csv-dir is required",
            )))
        }
    };

    let engine = EligibilityEngine::new(config.eligibility);
    let reports = evaluate(&engine, &dataset, category);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        render_reports(&dataset, &reports);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        teams,
        split,
        category,
    } = args;

    let dataset = synthetic_division(teams, split);
    let engine = EligibilityEngine::default();
    let reports = evaluate(&engine, &dataset, category);

    println!("Award eligibility demo");
    render_reports(&dataset, &reports);
    Ok(())
}

fn evaluate(
    engine: &EligibilityEngine,
    dataset: &DivisionDataset,
    category: Option<AwardCategory>,
) -> Vec<EligibilityReport> {
    match category {
        Some(category) => vec![engine.evaluate_category(dataset, category)],
        None => engine.evaluate(dataset),
    }
}

/// Deterministic division: grades alternate, qualifier and skills orders disagree slightly,
/// and a handful of teams skip a skills challenge so every failure reason shows up.
pub(crate) fn synthetic_division(team_count: u32, split: bool) -> DivisionDataset {
    let team_count = team_count.max(2);
    let number = |id: u32| format!("{}{}", 1_000 + id, ['A', 'B', 'C', 'D'][(id % 4) as usize]);
    let grade = |id: u32| {
        if id % 3 == 0 {
            "Middle School"
        } else {
            "High School"
        }
    };

    let teams = (1..=team_count)
        .map(|id| Team::new(TeamId(id), number(id), grade(id)))
        .collect();
    let rankings = (1..=team_count)
        .filter(|id| id % 11 != 0)
        .map(|id| QualifierRanking::new(TeamRef::new(TeamId(id), number(id)), id))
        .collect();
    let skills = (1..=team_count)
        .map(|id| {
            let skills_rank = if id % 2 == 0 { id - 1 } else { id + 1 };
            let programming = if id % 7 == 0 {
                ChallengeScore::new(0, 0)
            } else {
                ChallengeScore::new(200u32.saturating_sub(id).max(1), 3)
            };
            let driver = if id % 5 == 0 {
                ChallengeScore::new(0, 2)
            } else {
                ChallengeScore::new(300u32.saturating_sub(id).max(1), 3)
            };
            SkillsRanking::new(
                TeamRef::new(TeamId(id), number(id)),
                skills_rank.min(team_count),
                programming,
                driver,
            )
        })
        .collect();

    let titles: &[&str] = if split {
        &[
            "Excellence Award - Middle School",
            "Excellence Award - High School",
            "All-Around Champion - Middle School",
            "All-Around Champion - High School",
        ]
    } else {
        &["Excellence Award", "All-Around Champion"]
    };

    DivisionDataset {
        program: ProgramCategory::V5rc,
        division: DivisionRef {
            event_id: 1,
            event_name: "Demo Invitational".to_string(),
            division_id: 1,
            division_name: "Division 1".to_string(),
        },
        teams,
        rankings,
        skills,
        awards: titles
            .iter()
            .zip(1..)
            .map(|(title, order)| AwardDescriptor::new(*title, order))
            .collect(),
    }
}

pub(crate) fn render_reports(dataset: &DivisionDataset, reports: &[EligibilityReport]) {
    let division = &dataset.division;
    if !division.event_name.is_empty() {
        println!("{} / {}", division.event_name, division.division_name);
    }
    println!(
        "{} | {} teams | {} qualifier rankings | {} skills rankings",
        dataset.program.label(),
        dataset.teams.len(),
        dataset.rankings.len(),
        dataset.skills.len()
    );

    for report in reports {
        println!(
            "\n{} ({}{})",
            report.category.label(),
            report.mode.label(),
            if report.award_offered {
                ""
            } else {
                ", not offered"
            }
        );
        if !report.partitions.is_empty() {
            let pools: Vec<&str> = report
                .partitions
                .iter()
                .map(|partition| partition.label())
                .collect();
            println!("Pools: {}", pools.join(", "));
        }

        if report.eligible.is_empty() {
            println!("Eligible: none");
        } else {
            println!("Eligible");
            for team in report.eligible_by_rank() {
                let snapshot = report.precomputed(team.id);
                let qualifier = snapshot
                    .and_then(|snapshot| snapshot.qualifier_rank)
                    .map(|rank| rank.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let skills = snapshot
                    .and_then(|snapshot| snapshot.skills_rank)
                    .map(|rank| rank.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  - {} [{}] qualifier #{} | skills #{}",
                    team.number,
                    display_grade(team),
                    qualifier,
                    skills
                );
            }
        }

        if !report.ineligible.is_empty() {
            println!("Ineligible");
            for team in &report.ineligible {
                println!(
                    "  - {} [{}]: {}",
                    team.number,
                    display_grade(team),
                    report.reasons(team.id).join("; ")
                );
            }
        }
    }
}

fn display_grade(team: &Team) -> &str {
    if team.grade.is_empty() {
        "unknown grade"
    } else {
        &team.grade
    }
}
