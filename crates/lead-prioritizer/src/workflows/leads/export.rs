use super::dataset::ScoredLead;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to flush export buffer: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> mime::Mime {
        match self {
            Self::Csv => mime::TEXT_CSV_UTF_8,
            Self::Json => mime::APPLICATION_JSON,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn file_name(self) -> String {
        format!("filtered_leads.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported export format '{0}' (expected csv or json)")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(UnknownExportFormat(other.to_string())),
        }
    }
}

/// One exported row. Column names match the import reader so exports can be re-ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Tech Stack")]
    pub tech_stack: String,
    #[serde(rename = "Estimated Traffic")]
    pub estimated_traffic: u64,
    #[serde(rename = "Keywords")]
    pub keywords: String,
    #[serde(rename = "Contact Name")]
    pub contact_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Company Size")]
    pub company_size: String,
    #[serde(rename = "Funding Stage")]
    pub funding_stage: String,
    #[serde(rename = "CAIS")]
    pub composite_score: u8,
    #[serde(rename = "Fit Tier")]
    pub fit_tier: String,
    #[serde(rename = "AI-Actionable Insight")]
    pub insight: String,
    #[serde(rename = "Pain Point Score")]
    pub pain_score: u8,
    #[serde(rename = "Readiness Score")]
    pub readiness_score: u8,
}

impl From<&ScoredLead> for ExportRecord {
    fn from(scored: &ScoredLead) -> Self {
        let lead = scored.lead();
        Self {
            company: lead.company.clone(),
            website: lead.website.clone(),
            tech_stack: lead.tech_stack.to_string(),
            estimated_traffic: lead.estimated_traffic,
            keywords: lead.keywords.to_string(),
            contact_name: lead.contact_name.clone(),
            email: lead.email.clone(),
            company_size: lead.company_size.to_string(),
            funding_stage: lead.funding_stage.to_string(),
            composite_score: scored.composite(),
            fit_tier: scored.tier().label().to_string(),
            insight: scored.insight().narrative.clone(),
            pain_score: scored.pain(),
            readiness_score: scored.readiness(),
        }
    }
}

pub fn export_records<'a, I>(leads: I) -> Vec<ExportRecord>
where
    I: IntoIterator<Item = &'a ScoredLead>,
{
    leads.into_iter().map(ExportRecord::from).collect()
}

pub fn export<'a, I>(leads: I, format: ExportFormat) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a ScoredLead>,
{
    match format {
        ExportFormat::Csv => to_csv(leads),
        ExportFormat::Json => to_json(leads),
    }
}

/// Writes a header row followed by one row per lead, even when there are no leads.
pub fn to_csv<'a, I>(leads: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a ScoredLead>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in export_records(leads) {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

pub fn to_json<'a, I>(leads: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a ScoredLead>,
{
    Ok(serde_json::to_vec(&export_records(leads))?)
}

pub fn parse_csv_export<R: Read>(reader: R) -> Result<Vec<ExportRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.deserialize().collect()
}

const CSV_HEADERS: [&str; 14] = [
    "Company",
    "Website",
    "Tech Stack",
    "Estimated Traffic",
    "Keywords",
    "Contact Name",
    "Email",
    "Company Size",
    "Funding Stage",
    "CAIS",
    "Fit Tier",
    "AI-Actionable Insight",
    "Pain Point Score",
    "Readiness Score",
];
