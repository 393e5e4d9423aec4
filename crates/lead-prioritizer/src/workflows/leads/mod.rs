//! Lead prioritization workflow: validate company records, score them for AI
//! transformation fit, classify, filter, and export the shortlist.

pub mod dataset;
pub mod domain;
pub mod export;
pub mod filter;
pub mod generator;
pub mod import;
pub mod insights;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;

pub use dataset::{sort_by_composite, FilterOptions, ScoredDataset, ScoredLead};
pub use domain::{
    CompanySize, FundingStage, LeadField, LeadRecord, LeadSubmission, LeadValidationError,
    TagList,
};
pub use export::{
    export, parse_csv_export, to_csv, to_json, ExportError, ExportFormat, ExportRecord,
    UnknownExportFormat,
};
pub use filter::{FilterError, LeadFilter};
pub use generator::SyntheticLeadGenerator;
pub use import::{CsvLeadSource, LeadCsvImporter, LeadImportError, LeadSource};
pub use insights::{classify, FitTier, LeadInsight};
pub use report::views::{CategoryCount, LeadBreakdownView, LeadRowView, ScoreBucket, TierCount};
pub use report::LeadReport;
pub use router::lead_router;
pub use scoring::{
    LeadScore, LeadSignals, ScoreComponent, ScoreDimension, ScoreSignal, ScoringConfig,
    ScoringEngine,
};
pub use service::{ExportPayload, LeadSearchResult, LeadService, LeadServiceError};
