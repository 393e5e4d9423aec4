use serde::{Deserialize, Serialize};

/// Traffic boundaries and ceilings applied by the scoring rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Basic websites only signal pain below this traffic (exclusive).
    pub small_site_traffic_ceiling: u64,
    /// Traffic strictly above this earns the growth readiness tier.
    pub growth_traffic_floor: u64,
    /// Traffic strictly above this earns the scale readiness tier.
    pub scale_traffic_floor: u64,
    pub pain_cap: u8,
    pub readiness_cap: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            small_site_traffic_ceiling: 5_000,
            growth_traffic_floor: 10_000,
            scale_traffic_floor: 100_000,
            pain_cap: 50,
            readiness_cap: 50,
        }
    }
}
