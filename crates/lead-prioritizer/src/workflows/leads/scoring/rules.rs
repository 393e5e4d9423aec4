use super::super::domain::TagList;
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreDimension, ScoreSignal};

const MANUAL_PROCESS_TERMS: &[&str] = &["manual", "spreadsheet"];
const LEGACY_SYSTEM_TERMS: &[&str] = &["old CMS", "legacy ERP"];
const BASIC_WEB_TERM: &str = "basic website";
const CRM_TERMS: &[&str] = &["Salesforce", "Hubspot"];
const ANALYTICS_TERM: &str = "Google Analytics";

const MANUAL_PROCESS_POINTS: u8 = 15;
const LEGACY_SYSTEM_POINTS: u8 = 10;
const BASIC_WEB_POINTS: u8 = 15;
const SCALE_TRAFFIC_POINTS: u8 = 35;
const GROWTH_TRAFFIC_POINTS: u8 = 25;
const CRM_POINTS: u8 = 15;
const ANALYTICS_POINTS: u8 = 5;

/// The only inputs the scoring rules are allowed to look at.
#[derive(Debug, Clone, Copy)]
pub struct LeadSignals<'a> {
    pub tech_stack: &'a TagList,
    pub keywords: &'a TagList,
    pub estimated_traffic: u64,
}

pub(crate) struct RuleTally {
    pub components: Vec<ScoreComponent>,
    pub pain: u8,
    pub readiness: u8,
}

pub(crate) fn score_signals(signals: &LeadSignals<'_>, config: &ScoringConfig) -> RuleTally {
    let mut components = Vec::new();
    let traffic = signals.estimated_traffic;

    if signals.keywords.contains_any(MANUAL_PROCESS_TERMS) {
        components.push(ScoreComponent::pain(
            ScoreSignal::ManualProcesses,
            MANUAL_PROCESS_POINTS,
            "keywords mention manual or spreadsheet-driven work".to_string(),
        ));
    }

    if signals.tech_stack.contains_any(LEGACY_SYSTEM_TERMS) {
        components.push(ScoreComponent::pain(
            ScoreSignal::LegacySystems,
            LEGACY_SYSTEM_POINTS,
            "tech stack relies on an old CMS or legacy ERP".to_string(),
        ));
    }

    if signals.tech_stack.contains(BASIC_WEB_TERM) && traffic < config.small_site_traffic_ceiling
    {
        components.push(ScoreComponent::pain(
            ScoreSignal::BasicWebPresence,
            BASIC_WEB_POINTS,
            format!(
                "basic website with {traffic} visits (below {})",
                config.small_site_traffic_ceiling
            ),
        ));
    }

    if traffic > config.scale_traffic_floor {
        components.push(ScoreComponent::readiness(
            ScoreSignal::TrafficScale,
            SCALE_TRAFFIC_POINTS,
            format!(
                "{traffic} visits exceeds scale tier {}",
                config.scale_traffic_floor
            ),
        ));
    } else if traffic > config.growth_traffic_floor {
        components.push(ScoreComponent::readiness(
            ScoreSignal::TrafficScale,
            GROWTH_TRAFFIC_POINTS,
            format!(
                "{traffic} visits exceeds growth tier {}",
                config.growth_traffic_floor
            ),
        ));
    }

    if signals.tech_stack.contains_any(CRM_TERMS) {
        components.push(ScoreComponent::readiness(
            ScoreSignal::CrmAdoption,
            CRM_POINTS,
            "CRM platform already in place".to_string(),
        ));
    } else if signals.tech_stack.contains(ANALYTICS_TERM) {
        components.push(ScoreComponent::readiness(
            ScoreSignal::AnalyticsAdoption,
            ANALYTICS_POINTS,
            "web analytics in place without a CRM".to_string(),
        ));
    }

    let pain = capped_total(&components, ScoreDimension::Pain, config.pain_cap);
    let readiness = capped_total(&components, ScoreDimension::Readiness, config.readiness_cap);

    RuleTally {
        components,
        pain,
        readiness,
    }
}

fn capped_total(components: &[ScoreComponent], dimension: ScoreDimension, cap: u8) -> u8 {
    let total: u32 = components
        .iter()
        .filter(|component| component.dimension == dimension)
        .map(|component| u32::from(component.points))
        .sum();
    total.min(u32::from(cap)) as u8
}
