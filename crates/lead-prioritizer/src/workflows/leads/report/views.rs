use super::super::dataset::ScoredLead;
use super::super::insights::FitTier;
use super::super::scoring::ScoreComponent;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: FitTier,
    pub tier_label: &'static str,
    pub count: usize,
}

/// Histogram bucket covering `lower..=upper` composite points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub lower: u8,
    pub upper: u8,
    pub count: usize,
}

/// Table row as shown to users, with the column set of the lead table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRowView {
    pub composite_score: u8,
    pub company: String,
    pub website: String,
    pub insight: String,
    pub estimated_traffic: u64,
    pub tech_stack: String,
    pub contact: String,
    pub email: String,
    pub company_size: String,
    pub funding_stage: String,
}

impl From<&ScoredLead> for LeadRowView {
    fn from(scored: &ScoredLead) -> Self {
        let lead = scored.lead();
        Self {
            composite_score: scored.composite(),
            company: lead.company.clone(),
            website: lead.website.clone(),
            insight: scored.insight().narrative.clone(),
            estimated_traffic: lead.estimated_traffic,
            tech_stack: lead.tech_stack.to_string(),
            contact: lead.contact_name.clone(),
            email: lead.email.clone(),
            company_size: lead.company_size.to_string(),
            funding_stage: lead.funding_stage.to_string(),
        }
    }
}

/// Per-company breakdown of how the composite score was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadBreakdownView {
    pub company: String,
    pub website: String,
    pub email: String,
    pub pain_score: u8,
    pub readiness_score: u8,
    pub composite_score: u8,
    pub tier: FitTier,
    pub tier_label: &'static str,
    pub strategy: String,
    pub components: Vec<ScoreComponent>,
}

impl From<&ScoredLead> for LeadBreakdownView {
    fn from(scored: &ScoredLead) -> Self {
        let lead = scored.lead();
        Self {
            company: lead.company.clone(),
            website: lead.website.clone(),
            email: lead.email.clone(),
            pain_score: scored.pain(),
            readiness_score: scored.readiness(),
            composite_score: scored.composite(),
            tier: scored.tier(),
            tier_label: scored.tier().label(),
            strategy: scored.insight().narrative.clone(),
            components: scored.score().components.clone(),
        }
    }
}
