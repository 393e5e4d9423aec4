mod parser;

use super::domain::{LeadRecord, LeadValidationError};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Anything that can hand the pipeline a batch of validated leads.
pub trait LeadSource {
    fn load(&self) -> Result<Vec<LeadRecord>, LeadImportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: LeadValidationError,
    },
}

pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LeadRecord>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Stops at the first row that fails validation.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadRecord>, LeadImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let record = row
                .submission
                .and_then(LeadRecord::from_submission)
                .map_err(|source| LeadImportError::InvalidRow {
                    row: row.line,
                    source,
                })?;
            records.push(record);
        }

        Ok(records)
    }
}

/// CSV file on disk, re-read on every load.
#[derive(Debug, Clone)]
pub struct CsvLeadSource {
    path: PathBuf,
}

impl CsvLeadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeadSource for CsvLeadSource {
    fn load(&self) -> Result<Vec<LeadRecord>, LeadImportError> {
        let records = LeadCsvImporter::from_path(&self.path)?;
        info!(path = %self.path.display(), leads = records.len(), "imported leads from csv");
        Ok(records)
    }
}
