use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::dataset::{sort_by_composite, FilterOptions, ScoredDataset, ScoredLead};
use super::domain::{LeadSubmission, LeadValidationError};
use super::export::{export, ExportError, ExportFormat};
use super::filter::{FilterError, LeadFilter};
use super::import::{LeadImportError, LeadSource};
use super::report::views::{LeadBreakdownView, LeadRowView};
use super::report::LeadReport;
use super::scoring::ScoringEngine;

/// Facade over one immutable scored dataset. Every call re-runs the pure pipeline.
#[derive(Debug, Clone)]
pub struct LeadService {
    engine: ScoringEngine,
    dataset: Arc<ScoredDataset>,
}

impl LeadService {
    pub fn new(engine: ScoringEngine, dataset: ScoredDataset) -> Self {
        Self {
            engine,
            dataset: Arc::new(dataset),
        }
    }

    pub fn from_source<S: LeadSource + ?Sized>(
        engine: ScoringEngine,
        source: &S,
    ) -> Result<Self, LeadImportError> {
        let records = source.load()?;
        let dataset = ScoredDataset::from_records(&engine, records);
        info!(leads = dataset.len(), "lead dataset ready");
        Ok(Self::new(engine, dataset))
    }

    pub fn dataset(&self) -> &ScoredDataset {
        &self.dataset
    }

    pub fn options(&self) -> FilterOptions {
        self.dataset.filter_options()
    }

    pub fn search(&self, filter: &LeadFilter) -> Result<LeadSearchResult, LeadServiceError> {
        filter.validate()?;
        let filtered = self.dataset.filter(filter);
        let report = LeadReport::build(&filtered, self.dataset.len());
        let leads = filtered.into_iter().map(LeadRowView::from).collect();

        Ok(LeadSearchResult { leads, report })
    }

    pub fn breakdown(&self, company: &str) -> Option<LeadBreakdownView> {
        self.dataset.find(company).map(LeadBreakdownView::from)
    }

    pub fn export(
        &self,
        filter: &LeadFilter,
        format: ExportFormat,
    ) -> Result<ExportPayload, LeadServiceError> {
        filter.validate()?;
        let filtered = self.dataset.filter(filter);
        let rows = filtered.len();
        let body = export(filtered, format)?;
        info!(%format, rows, "exported filtered leads");

        Ok(ExportPayload {
            format,
            file_name: format.file_name(),
            rows,
            body,
        })
    }

    /// Scores ad-hoc submissions without touching the held dataset. Fails on the first
    /// invalid submission.
    pub fn score(
        &self,
        submissions: Vec<LeadSubmission>,
    ) -> Result<Vec<ScoredLead>, LeadServiceError> {
        let mut scored = submissions
            .into_iter()
            .enumerate()
            .map(|(index, submission)| {
                self.engine
                    .score_submission(submission)
                    .map_err(|source| LeadServiceError::Validation { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_composite(&mut scored);
        Ok(scored)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadSearchResult {
    pub leads: Vec<LeadRowView>,
    pub report: LeadReport,
}

#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub format: ExportFormat,
    pub file_name: String,
    pub rows: usize,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("invalid filter: {0}")]
    Filter(#[from] FilterError),
    #[error("submission {index} is invalid: {source}")]
    Validation {
        index: usize,
        #[source]
        source: LeadValidationError,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::domain::LeadField;
    use crate::workflows::leads::generator::SyntheticLeadGenerator;

    fn service() -> LeadService {
        LeadService::from_source(
            ScoringEngine::default(),
            &SyntheticLeadGenerator::new(80, 42),
        )
        .expect("synthetic source loads")
    }

    fn submission(company: &str, tech_stack: &str, traffic: i64) -> LeadSubmission {
        LeadSubmission {
            company: Some(company.to_string()),
            tech_stack: Some(tech_stack.to_string()),
            estimated_traffic: Some(traffic),
            company_size: Some("10-50".to_string()),
            funding_stage: Some("Seed".to_string()),
            ..LeadSubmission::default()
        }
    }

    #[test]
    fn search_reports_shown_and_total() {
        let service = service();
        let result = service
            .search(&LeadFilter::with_min_score(50))
            .expect("search succeeds");

        assert_eq!(result.report.total, 80);
        assert_eq!(result.report.shown, result.leads.len());
        assert!(result.leads.iter().all(|row| row.composite_score >= 50));
    }

    #[test]
    fn search_rejects_invalid_threshold() {
        let error = service()
            .search(&LeadFilter::with_min_score(120))
            .expect_err("threshold above 100");
        assert!(matches!(error, LeadServiceError::Filter(_)));
    }

    #[test]
    fn breakdown_finds_top_lead() {
        let service = service();
        let top = service.dataset().leads()[0].company().to_string();
        let view = service.breakdown(&top).expect("top lead present");
        assert_eq!(view.company, top);
        assert_eq!(
            view.composite_score,
            view.pain_score + view.readiness_score
        );
        assert!(service.breakdown("Unknown Holdings Inc").is_none());
    }

    #[test]
    fn export_counts_rows() {
        let service = service();
        let filter = LeadFilter::with_min_score(75);
        let expected = service.dataset().filter(&filter).len();
        let payload = service
            .export(&filter, ExportFormat::Json)
            .expect("export succeeds");

        assert_eq!(payload.rows, expected);
        assert_eq!(payload.file_name, "filtered_leads.json");
        let value: serde_json::Value = serde_json::from_slice(&payload.body).expect("json body");
        assert_eq!(value.as_array().map(Vec::len), Some(expected));
    }

    #[test]
    fn score_sorts_submissions_descending() {
        let scored = service()
            .score(vec![
                submission("Small Co", "basic website", 100),
                submission("Big Co", "Salesforce", 500_000),
            ])
            .expect("valid submissions");

        assert_eq!(scored[0].company(), "Big Co");
        assert_eq!(scored[0].composite(), 50);
        assert_eq!(scored[1].composite(), 15);
    }

    #[test]
    fn score_reports_index_of_invalid_submission() {
        let error = service()
            .score(vec![
                submission("Fine Co", "", 10),
                submission("Broken Co", "", -1),
            ])
            .expect_err("negative traffic");

        match error {
            LeadServiceError::Validation { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.field(), LeadField::EstimatedTraffic);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
