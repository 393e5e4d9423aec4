use super::super::domain::{LeadField, LeadSubmission, LeadValidationError};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) struct LeadRow {
    pub(crate) line: usize,
    pub(crate) submission: Result<LeadSubmission, LeadValidationError>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<LeadRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<CsvLeadRow>().enumerate() {
        let row = record?;
        rows.push(LeadRow {
            line: index + 1,
            submission: row.into_submission(),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CsvLeadRow {
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(
        rename = "Tech Stack",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    tech_stack: Option<String>,
    #[serde(
        rename = "Estimated Traffic",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    estimated_traffic: Option<String>,
    #[serde(rename = "Keywords", default, deserialize_with = "empty_string_as_none")]
    keywords: Option<String>,
    #[serde(
        rename = "Contact Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    contact_name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(
        rename = "Company Size",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    company_size: Option<String>,
    #[serde(
        rename = "Funding Stage",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    funding_stage: Option<String>,
}

impl CsvLeadRow {
    fn into_submission(self) -> Result<LeadSubmission, LeadValidationError> {
        let estimated_traffic = self
            .estimated_traffic
            .map(|raw| parse_traffic(&raw))
            .transpose()?;

        Ok(LeadSubmission {
            company: self.company,
            website: self.website,
            tech_stack: self.tech_stack,
            keywords: self.keywords,
            estimated_traffic,
            contact_name: self.contact_name,
            email: self.email,
            company_size: self.company_size,
            funding_stage: self.funding_stage,
        })
    }
}

fn parse_traffic(raw: &str) -> Result<i64, LeadValidationError> {
    let cleaned: String = raw.chars().filter(|c| *c != '_' && *c != ',').collect();
    cleaned
        .trim()
        .parse::<i64>()
        .map_err(|_| LeadValidationError::InvalidNumber {
            field: LeadField::EstimatedTraffic,
            value: raw.to_string(),
        })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_traffic_for_tests(raw: &str) -> Result<i64, LeadValidationError> {
    parse_traffic(raw)
}
