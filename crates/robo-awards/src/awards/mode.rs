use serde::{Deserialize, Serialize};

use super::domain::{AwardCategory, AwardDescriptor};

const MIDDLE_MARKER: &str = "Middle";
const HIGH_MARKER: &str = "High";

/// Whether a category is issued once per division or once per grade pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardMode {
    #[default]
    Combined,
    Split,
}

impl AwardMode {
    pub fn label(&self) -> &'static str {
        match self {
            AwardMode::Combined => "combined",
            AwardMode::Split => "split by grade",
        }
    }
}

/// Outcome of inspecting a division's award list for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAward {
    pub category: AwardCategory,
    pub mode: AwardMode,
    pub offered: bool,
    pub titles: Vec<String>,
}

pub struct AwardModeResolver;

impl AwardModeResolver {
    /// Split only when both a middle-school and a high-school award of the category exist.
    /// Anything else, including an empty or free-form award list, resolves to combined.
    pub fn resolve(awards: &[AwardDescriptor], category: AwardCategory) -> AwardMode {
        Self::inspect(awards, category).mode
    }

    pub fn inspect(awards: &[AwardDescriptor], category: AwardCategory) -> ResolvedAward {
        let mut matching: Vec<&AwardDescriptor> = awards
            .iter()
            .filter(|award| award.title.contains(category.marker()))
            .collect();
        matching.sort_by_key(|award| award.order);

        let has_middle = matching
            .iter()
            .any(|award| award.title.contains(MIDDLE_MARKER));
        let has_high = matching
            .iter()
            .any(|award| award.title.contains(HIGH_MARKER));

        let mode = if has_middle && has_high {
            AwardMode::Split
        } else {
            AwardMode::Combined
        };

        ResolvedAward {
            category,
            mode,
            offered: !matching.is_empty(),
            titles: matching.iter().map(|award| award.title.clone()).collect(),
        }
    }
}
