use lead_prioritizer::config::LeadsConfig;
use lead_prioritizer::workflows::leads::{
    CompanySize, CsvLeadSource, ExportFormat, FundingStage, LeadImportError, LeadService,
    LeadSource, ScoringEngine, SyntheticLeadGenerator,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Scores the configured dataset once: the CSV source when one is set, otherwise the
/// seeded generator.
pub(crate) fn lead_service(config: &LeadsConfig) -> Result<LeadService, LeadImportError> {
    let source: Box<dyn LeadSource> = match &config.source_csv {
        Some(path) => Box::new(CsvLeadSource::new(path)),
        None => Box::new(SyntheticLeadGenerator::new(config.dataset_size, config.seed)),
    };

    LeadService::from_source(ScoringEngine::default(), source.as_ref())
}

pub(crate) fn parse_company_size(raw: &str) -> Result<CompanySize, String> {
    if raw.trim().is_empty() {
        return Err("company size cannot be blank".to_string());
    }
    Ok(CompanySize::parse(raw))
}

pub(crate) fn parse_funding_stage(raw: &str) -> Result<FundingStage, String> {
    if raw.trim().is_empty() {
        return Err("funding stage cannot be blank".to_string());
    }
    Ok(FundingStage::parse(raw))
}

pub(crate) fn parse_export_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}

pub(crate) fn infer_export_format(path: &Path) -> Option<ExportFormat> {
    let guess = mime_guess::from_path(path).first()?;
    if guess.subtype() == mime_guess::mime::CSV {
        Some(ExportFormat::Csv)
    } else if guess.subtype() == mime_guess::mime::JSON {
        Some(ExportFormat::Json)
    } else {
        None
    }
}

/// An explicit `--format` wins, then the output extension, then CSV.
pub(crate) fn resolve_export_format(
    explicit: Option<ExportFormat>,
    output: Option<&Path>,
) -> ExportFormat {
    explicit
        .or_else(|| output.and_then(infer_export_format))
        .unwrap_or(ExportFormat::Csv)
}
