use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw lead as delivered by a data source, before validation.
///
/// Every field is optional so that a missing column surfaces as a
/// [`LeadValidationError`] naming the field instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub estimated_traffic: Option<i64>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub funding_stage: Option<String>,
}

/// Field identifiers used when reporting validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Company,
    EstimatedTraffic,
    CompanySize,
    FundingStage,
}

impl LeadField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::EstimatedTraffic => "Estimated Traffic",
            Self::CompanySize => "Company Size",
            Self::FundingStage => "Funding Stage",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadValidationError {
    #[error("missing required field '{0}'")]
    MissingField(LeadField),
    #[error("field '{field}' must be non-negative (found {value})")]
    NegativeValue { field: LeadField, value: i64 },
    #[error("field '{field}' must be an integer (found '{value}')")]
    InvalidNumber { field: LeadField, value: String },
}

impl LeadValidationError {
    pub fn field(&self) -> LeadField {
        match self {
            Self::MissingField(field)
            | Self::NegativeValue { field, .. }
            | Self::InvalidNumber { field, .. } => *field,
        }
    }
}

/// Comma separated free-text tags (tech stack descriptors, keyword phrases).
///
/// Matching is case-sensitive substring containment over the tags joined with `", "`,
/// so `"manual"` matches both `"manual reporting"` and `"manually updated"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
    text: String,
}

impl TagList {
    pub fn parse(raw: &str) -> Self {
        let tags: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        Self::from_tags(tags)
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags
            .into_iter()
            .map(Into::into)
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        let text = tags.join(", ");
        Self { tags, text }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.text.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.contains(needle))
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for TagList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Bucketed headcount. Values outside the known buckets are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
    Enterprise,
    Other(String),
}

impl CompanySize {
    pub fn ordered() -> [Self; 4] {
        [Self::Small, Self::Medium, Self::Large, Self::Enterprise]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Small => "10-50",
            Self::Medium => "51-200",
            Self::Large => "201-500",
            Self::Enterprise => "500+",
            Self::Other(value) => value,
        }
    }

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|known| known.label() == trimmed)
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for CompanySize {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CompanySize> for String {
    fn from(value: CompanySize) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Funding stage of the company. Values outside the known stages are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FundingStage {
    Seed,
    SeriesA,
    SeriesB,
    Growth,
    Bootstrapped,
    Other(String),
}

impl FundingStage {
    pub fn ordered() -> [Self; 5] {
        [
            Self::Seed,
            Self::SeriesA,
            Self::SeriesB,
            Self::Growth,
            Self::Bootstrapped,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Seed => "Seed",
            Self::SeriesA => "Series A",
            Self::SeriesB => "Series B",
            Self::Growth => "Growth",
            Self::Bootstrapped => "Bootstrapped",
            Self::Other(value) => value,
        }
    }

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|known| known.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for FundingStage {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FundingStage> for String {
    fn from(value: FundingStage) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for FundingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated company record ready for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    pub company: String,
    pub website: String,
    pub tech_stack: TagList,
    pub keywords: TagList,
    pub estimated_traffic: u64,
    pub contact_name: String,
    pub email: String,
    pub company_size: CompanySize,
    pub funding_stage: FundingStage,
}

impl LeadRecord {
    pub fn from_submission(submission: LeadSubmission) -> Result<Self, LeadValidationError> {
        let company = required_text(submission.company, LeadField::Company)?;

        let estimated_traffic = match submission.estimated_traffic {
            Some(value) if value < 0 => {
                return Err(LeadValidationError::NegativeValue {
                    field: LeadField::EstimatedTraffic,
                    value,
                })
            }
            Some(value) => value as u64,
            None => return Err(LeadValidationError::MissingField(LeadField::EstimatedTraffic)),
        };

        let company_size =
            CompanySize::parse(&required_text(submission.company_size, LeadField::CompanySize)?);
        let funding_stage = FundingStage::parse(&required_text(
            submission.funding_stage,
            LeadField::FundingStage,
        )?);

        Ok(Self {
            company,
            website: optional_text(submission.website),
            tech_stack: TagList::parse(submission.tech_stack.as_deref().unwrap_or_default()),
            keywords: TagList::parse(submission.keywords.as_deref().unwrap_or_default()),
            estimated_traffic,
            contact_name: optional_text(submission.contact_name),
            email: optional_text(submission.email),
            company_size,
            funding_stage,
        })
    }
}

impl TryFrom<LeadSubmission> for LeadRecord {
    type Error = LeadValidationError;

    fn try_from(value: LeadSubmission) -> Result<Self, Self::Error> {
        Self::from_submission(value)
    }
}

fn required_text(value: Option<String>, field: LeadField) -> Result<String, LeadValidationError> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(LeadValidationError::MissingField(field))
}

fn optional_text(value: Option<String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}
