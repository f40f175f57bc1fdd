use serde::{Deserialize, Serialize};

use crate::awards::cutoff::Threshold;
use crate::awards::domain::AwardCategory;
use crate::awards::grade::PartitionPolicy;

/// Criteria applied for one award category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRules {
    pub threshold: Threshold,
    pub require_driver_score: bool,
}

/// Rule table for every award category plus the grade pooling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub all_around: AwardRules,
    pub excellence: AwardRules,
    #[serde(default)]
    pub partition_policy: PartitionPolicy,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            all_around: AwardRules {
                threshold: Threshold::ALL_AROUND,
                require_driver_score: true,
            },
            excellence: AwardRules {
                threshold: Threshold::EXCELLENCE,
                require_driver_score: false,
            },
            partition_policy: PartitionPolicy::Binary,
        }
    }
}

impl EligibilityConfig {
    pub fn rules_for(&self, category: AwardCategory) -> AwardRules {
        match category {
            AwardCategory::AllAround => self.all_around,
            AwardCategory::Excellence => self.excellence,
        }
    }
}
