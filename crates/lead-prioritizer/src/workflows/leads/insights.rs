use serde::{Deserialize, Serialize};

const HIGH_FIT_FLOOR: u8 = 75;
const MEDIUM_FIT_FLOOR: u8 = 50;

const HIGH_FIT_NARRATIVE: &str =
    "HIGH FIT: Major scale + clear operational pain. Target fast AI integration for ROI.";
const LOW_FIT_NARRATIVE: &str = "LOW FIT: Minimal visible opportunity. Reassess in future.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitTier {
    High,
    Medium,
    Low,
}

impl FitTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH FIT",
            Self::Medium => "MEDIUM FIT",
            Self::Low => "LOW FIT",
        }
    }

    pub const fn for_composite(composite: u8) -> Self {
        if composite >= HIGH_FIT_FLOOR {
            Self::High
        } else if composite >= MEDIUM_FIT_FLOOR {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadInsight {
    pub tier: FitTier,
    pub narrative: String,
}

/// Derives the fit tier and narrative from already computed scores.
pub fn classify(composite: u8, pain: u8) -> LeadInsight {
    let tier = FitTier::for_composite(composite);
    let narrative = match tier {
        FitTier::High => HIGH_FIT_NARRATIVE.to_string(),
        FitTier::Medium => format!(
            "MEDIUM FIT: Some transformation headroom. Focus on pain point ({pain}/50)."
        ),
        FitTier::Low => LOW_FIT_NARRATIVE.to_string(),
    };

    LeadInsight { tier, narrative }
}
