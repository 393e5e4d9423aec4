mod config;
mod rules;

pub use config::ScoringConfig;
pub use rules::LeadSignals;

use super::dataset::ScoredLead;
use super::domain::{LeadRecord, LeadSubmission, LeadValidationError};
use super::insights::classify;
use serde::{Deserialize, Serialize};

const MAX_SUBSCORE: u8 = 50;

/// Stateless calculator mapping lead signals to pain, readiness, and composite scores.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        // Caps above 50 would let the composite escape 0..=100.
        let config = ScoringConfig {
            pain_cap: config.pain_cap.min(MAX_SUBSCORE),
            readiness_cap: config.readiness_cap.min(MAX_SUBSCORE),
            ..config
        };
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score_signals(&self, signals: LeadSignals<'_>) -> LeadScore {
        let tally = rules::score_signals(&signals, &self.config);
        LeadScore {
            pain: tally.pain,
            readiness: tally.readiness,
            composite: tally.pain + tally.readiness,
            components: tally.components,
        }
    }

    pub fn score(&self, record: &LeadRecord) -> LeadScore {
        self.score_signals(LeadSignals {
            tech_stack: &record.tech_stack,
            keywords: &record.keywords,
            estimated_traffic: record.estimated_traffic,
        })
    }

    /// Scores and classifies a validated record. The derived fields are fixed from here on.
    pub fn evaluate(&self, record: LeadRecord) -> ScoredLead {
        let score = self.score(&record);
        let insight = classify(score.composite, score.pain);
        ScoredLead::new(record, score, insight)
    }

    pub fn score_submission(
        &self,
        submission: LeadSubmission,
    ) -> Result<ScoredLead, LeadValidationError> {
        let record = LeadRecord::from_submission(submission)?;
        Ok(self.evaluate(record))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    Pain,
    Readiness,
}

impl ScoreDimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pain => "Pain Point",
            Self::Readiness => "Readiness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSignal {
    ManualProcesses,
    LegacySystems,
    BasicWebPresence,
    TrafficScale,
    CrmAdoption,
    AnalyticsAdoption,
}

impl ScoreSignal {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ManualProcesses => "Manual processes",
            Self::LegacySystems => "Legacy systems",
            Self::BasicWebPresence => "Basic web presence",
            Self::TrafficScale => "Traffic scale",
            Self::CrmAdoption => "CRM adoption",
            Self::AnalyticsAdoption => "Analytics adoption",
        }
    }
}

/// One rule that fired, kept so the breakdown view can explain a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub signal: ScoreSignal,
    pub dimension: ScoreDimension,
    pub points: u8,
    pub notes: String,
}

impl ScoreComponent {
    fn pain(signal: ScoreSignal, points: u8, notes: String) -> Self {
        Self {
            signal,
            dimension: ScoreDimension::Pain,
            points,
            notes,
        }
    }

    fn readiness(signal: ScoreSignal, points: u8, notes: String) -> Self {
        Self {
            signal,
            dimension: ScoreDimension::Readiness,
            points,
            notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub pain: u8,
    pub readiness: u8,
    pub composite: u8,
    pub components: Vec<ScoreComponent>,
}
