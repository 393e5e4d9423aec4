use super::dataset::ScoredLead;
use super::domain::{CompanySize, FundingStage};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_COMPOSITE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("minimum score {0} is outside 0..=100")]
    MinScoreOutOfRange(u8),
}

/// Filter dimensions combined with AND. Within a dimension any listed value matches,
/// and an empty list places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub min_score: u8,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub company_sizes: Vec<CompanySize>,
    #[serde(default)]
    pub funding_stages: Vec<FundingStage>,
}

impl LeadFilter {
    pub fn with_min_score(min_score: u8) -> Self {
        Self {
            min_score,
            ..Self::default()
        }
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn company_sizes<I>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = CompanySize>,
    {
        self.company_sizes.extend(sizes);
        self
    }

    pub fn funding_stages<I>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = FundingStage>,
    {
        self.funding_stages.extend(stages);
        self
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.min_score > MAX_COMPOSITE {
            return Err(FilterError::MinScoreOutOfRange(self.min_score));
        }
        Ok(())
    }

    pub fn matches(&self, lead: &ScoredLead) -> bool {
        if lead.composite() < self.min_score {
            return false;
        }

        let needles: Vec<&str> = self
            .keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        if !needles.is_empty() && !lead.lead().keywords.contains_any(&needles) {
            return false;
        }

        if !self.company_sizes.is_empty()
            && !self.company_sizes.contains(&lead.lead().company_size)
        {
            return false;
        }

        if !self.funding_stages.is_empty()
            && !self.funding_stages.contains(&lead.lead().funding_stage)
        {
            return false;
        }

        true
    }

    /// Keeps matching leads in their incoming order.
    pub fn apply<'a, I>(&self, leads: I) -> Vec<&'a ScoredLead>
    where
        I: IntoIterator<Item = &'a ScoredLead>,
    {
        let mut considered = 0usize;
        let matched: Vec<&ScoredLead> = leads
            .into_iter()
            .inspect(|_| considered += 1)
            .filter(|lead| self.matches(lead))
            .collect();

        debug!(
            considered,
            matched = matched.len(),
            min_score = self.min_score,
            "applied lead filter"
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::domain::{LeadRecord, LeadSubmission};
    use crate::workflows::leads::scoring::ScoringEngine;

    fn lead(company: &str, keywords: &str, size: &str, funding: &str, traffic: i64) -> ScoredLead {
        let record = LeadRecord::from_submission(LeadSubmission {
            company: Some(company.to_string()),
            tech_stack: Some("Salesforce, modern stack".to_string()),
            keywords: Some(keywords.to_string()),
            estimated_traffic: Some(traffic),
            company_size: Some(size.to_string()),
            funding_stage: Some(funding.to_string()),
            ..LeadSubmission::default()
        })
        .expect("valid record");
        ScoringEngine::default().evaluate(record)
    }

    fn sample() -> Vec<ScoredLead> {
        vec![
            // 15 + 35 + 15 = 65
            lead("Apex Labs", "manual reporting, high growth", "51-200", "Seed", 150_000),
            // 0 + 25 + 15 = 40
            lead("Nova Corp", "B2C, digital marketing", "500+", "Growth", 20_000),
            // 15 + 0 + 15 = 30
            lead("Iron Retail", "spreadsheet accounting", "10-50", "Bootstrapped", 500),
        ]
    }

    fn companies(leads: Vec<&ScoredLead>) -> Vec<&str> {
        leads.into_iter().map(ScoredLead::company).collect()
    }

    #[test]
    fn empty_filter_passes_everything_through() {
        let leads = sample();
        let filtered = LeadFilter::default().apply(&leads);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn min_score_is_inclusive() {
        let leads = sample();
        assert_eq!(
            companies(LeadFilter::with_min_score(40).apply(&leads)),
            vec!["Apex Labs", "Nova Corp"]
        );
        assert_eq!(
            companies(LeadFilter::with_min_score(41).apply(&leads)),
            vec!["Apex Labs"]
        );
    }

    #[test]
    fn keywords_match_any_substring() {
        let leads = sample();
        let filter = LeadFilter::default().keywords(["manual", "spreadsheet"]);
        assert_eq!(
            companies(filter.apply(&leads)),
            vec!["Apex Labs", "Iron Retail"]
        );
    }

    #[test]
    fn blank_keywords_are_ignored() {
        let leads = sample();
        let filter = LeadFilter::default().keywords(["", "   "]);
        assert_eq!(filter.apply(&leads).len(), 3);
    }

    #[test]
    fn categorical_dimensions_use_membership() {
        let leads = sample();
        let filter = LeadFilter::default()
            .company_sizes([CompanySize::Enterprise, CompanySize::Small])
            .funding_stages([FundingStage::Growth]);
        assert_eq!(companies(filter.apply(&leads)), vec!["Nova Corp"]);
    }

    #[test]
    fn unknown_categories_can_be_selected() {
        let mut leads = sample();
        leads.push(lead("Verde Group", "local service", "1000+", "Pre-Seed", 100));

        let filter = LeadFilter::default()
            .company_sizes([CompanySize::parse("1000+")])
            .funding_stages([FundingStage::parse("Pre-Seed")]);
        assert_eq!(companies(filter.apply(&leads)), vec!["Verde Group"]);
    }

    #[test]
    fn no_matches_is_an_empty_result() {
        let leads = sample();
        assert!(LeadFilter::with_min_score(100).apply(&leads).is_empty());
    }

    #[test]
    fn validate_rejects_scores_above_one_hundred() {
        assert!(LeadFilter::with_min_score(100).validate().is_ok());
        assert_eq!(
            LeadFilter::with_min_score(101).validate(),
            Err(FilterError::MinScoreOutOfRange(101))
        );
    }

    #[test]
    fn filter_deserializes_with_defaults() {
        let filter: LeadFilter =
            serde_json::from_str(r#"{"company_sizes": ["500+"], "funding_stages": ["Series A"]}"#)
                .expect("deserialize filter");
        assert_eq!(filter.min_score, 0);
        assert!(filter.keywords.is_empty());
        assert_eq!(filter.company_sizes, vec![CompanySize::Enterprise]);
        assert_eq!(filter.funding_stages, vec![FundingStage::SeriesA]);
    }
}
