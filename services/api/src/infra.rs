use metrics_exporter_prometheus::PrometheusHandle;
use robo_awards::awards::{
    AwardCategory, CacheKey, DivisionDataset, EligibilityEngine, GradeBand, ProgramCategory,
    SharedWorldSkills, SkillsRanking, WorldSkillsError, WorldSkillsSource,
};
use robo_awards::error::AppError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<EligibilityEngine>,
    pub(crate) world_skills: SharedWorldSkills,
    pub(crate) program: ProgramCategory,
}

/// World skills standings read from a JSON export: `{ "middle_school": [...], ... }`.
#[derive(Debug, Clone)]
pub(crate) struct FileWorldSkillsSource {
    program: ProgramCategory,
    standings: HashMap<GradeBand, Vec<SkillsRanking>>,
}

impl FileWorldSkillsSource {
    pub(crate) fn new(
        program: ProgramCategory,
        standings: HashMap<GradeBand, Vec<SkillsRanking>>,
    ) -> Self {
        Self { program, standings }
    }

    pub(crate) fn from_path(program: ProgramCategory, path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let standings = serde_json::from_str(&raw)?;
        Ok(Self::new(program, standings))
    }
}

impl WorldSkillsSource for FileWorldSkillsSource {
    fn fetch(&self, key: CacheKey) -> Result<Vec<SkillsRanking>, WorldSkillsError> {
        if key.program != self.program {
            return Err(WorldSkillsError::Unavailable(format!(
                "export only covers {}",
                self.program.label()
            )));
        }

        Ok(self.standings.get(&key.grade).cloned().unwrap_or_default())
    }
}

pub(crate) fn load_dataset(path: &Path) -> Result<DivisionDataset, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_category(raw: &str) -> Result<AwardCategory, String> {
    AwardCategory::parse(raw).ok_or_else(|| {
        format!("unknown award category '{raw}' (expected all-around or excellence)")
    })
}

pub(crate) fn parse_program(raw: &str) -> Result<ProgramCategory, String> {
    ProgramCategory::parse(raw).ok_or_else(|| format!("unknown program '{raw}'"))
}

/// Accepts path-friendly grade names such as `middle_school` or `high-school`.
pub(crate) fn parse_grade(raw: &str) -> GradeBand {
    GradeBand::parse(&raw.replace(['_', '-'], " "))
}
