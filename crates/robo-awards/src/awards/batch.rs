use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::{JoinError, JoinSet};
use tracing::{error, warn};

use super::aggregate::EligibilityReport;
use super::domain::{AwardCategory, DivisionDataset};
use super::engine::EligibilityEngine;

/// Identifies one independent unit of batch work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DivisionKey {
    pub event_id: u32,
    pub division_id: u32,
    pub category: AwardCategory,
}

impl fmt::Display for DivisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "event {} division {} ({})",
            self.event_id,
            self.division_id,
            self.category.label()
        )
    }
}

#[derive(Debug, Clone)]
pub struct DivisionJob {
    pub key: DivisionKey,
    pub dataset: Arc<DivisionDataset>,
}

impl DivisionJob {
    /// One job per award category for the dataset's division.
    pub fn for_dataset(dataset: Arc<DivisionDataset>) -> Vec<DivisionJob> {
        AwardCategory::ordered()
            .into_iter()
            .map(|category| DivisionJob {
                key: DivisionKey {
                    event_id: dataset.division.event_id,
                    division_id: dataset.division.division_id,
                    category,
                },
                dataset: dataset.clone(),
            })
            .collect()
    }

    /// First key shared by two jobs. Datasets that omit their division all key as event 0
    /// division 0, so a batch mixing them would return outcomes nobody can tell apart.
    pub fn duplicate_key(jobs: &[DivisionJob]) -> Option<DivisionKey> {
        let mut seen = HashSet::with_capacity(jobs.len());
        jobs.iter()
            .map(|job| job.key)
            .find(|key| !seen.insert(*key))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("evaluation for {key} did not complete: {source}")]
    Join {
        key: DivisionKey,
        #[source]
        source: JoinError,
    },
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub key: DivisionKey,
    pub result: Result<EligibilityReport, BatchError>,
}

/// Evaluates every job on the blocking pool. Jobs share nothing mutable, so a failure in one
/// never affects another. Outcomes are sorted by key, which callers keep unique with
/// [`DivisionJob::duplicate_key`]. Dropping the future stops waiting but does not cancel
/// evaluations already running on the blocking pool.
pub async fn evaluate_batch(
    engine: Arc<EligibilityEngine>,
    jobs: Vec<DivisionJob>,
) -> Vec<BatchOutcome> {
    let mut tasks = JoinSet::new();

    for job in jobs {
        let engine = engine.clone();
        tasks.spawn(async move {
            let DivisionJob { key, dataset } = job;
            let result = tokio::task::spawn_blocking(move || {
                engine.evaluate_category(&dataset, key.category)
            })
            .await
            .map_err(|source| BatchError::Join { key, source });
            BatchOutcome { key, result }
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => {
                if let Err(err) = &outcome.result {
                    warn!(key = %outcome.key, error = %err, "batch evaluation job failed");
                }
                outcomes.push(outcome);
            }
            Err(err) => error!(error = %err, "batch evaluation task aborted"),
        }
    }

    outcomes.sort_by_key(|outcome| outcome.key);
    outcomes
}
