use super::domain::{CompanySize, FundingStage, LeadRecord};
use super::filter::LeadFilter;
use super::insights::{FitTier, LeadInsight};
use super::scoring::{LeadScore, ScoringEngine};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// A lead together with its derived scores. Only the scoring engine constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredLead {
    lead: LeadRecord,
    score: LeadScore,
    insight: LeadInsight,
}

impl ScoredLead {
    pub(crate) fn new(lead: LeadRecord, score: LeadScore, insight: LeadInsight) -> Self {
        Self {
            lead,
            score,
            insight,
        }
    }

    pub fn lead(&self) -> &LeadRecord {
        &self.lead
    }

    pub fn score(&self) -> &LeadScore {
        &self.score
    }

    pub fn insight(&self) -> &LeadInsight {
        &self.insight
    }

    pub fn company(&self) -> &str {
        &self.lead.company
    }

    pub fn composite(&self) -> u8 {
        self.score.composite
    }

    pub fn pain(&self) -> u8 {
        self.score.pain
    }

    pub fn readiness(&self) -> u8 {
        self.score.readiness
    }

    pub fn tier(&self) -> FitTier {
        self.insight.tier
    }

    pub fn into_lead(self) -> LeadRecord {
        self.lead
    }
}

/// Orders leads by composite score, highest first. Ties keep their incoming order.
pub fn sort_by_composite(leads: &mut [ScoredLead]) {
    leads.sort_by(|left, right| right.composite().cmp(&left.composite()));
}

/// Immutable, scored and sorted collection produced by one processing pass.
#[derive(Debug, Clone, Default)]
pub struct ScoredDataset {
    leads: Vec<ScoredLead>,
}

impl ScoredDataset {
    pub fn from_records<I>(engine: &ScoringEngine, records: I) -> Self
    where
        I: IntoIterator<Item = LeadRecord>,
    {
        let mut leads: Vec<ScoredLead> = records
            .into_iter()
            .map(|record| engine.evaluate(record))
            .collect();
        sort_by_composite(&mut leads);

        debug!(leads = leads.len(), "scored lead dataset");
        Self { leads }
    }

    pub fn leads(&self) -> &[ScoredLead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn filter(&self, filter: &LeadFilter) -> Vec<&ScoredLead> {
        filter.apply(&self.leads)
    }

    pub fn find(&self, company: &str) -> Option<&ScoredLead> {
        self.leads.iter().find(|lead| lead.company() == company)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_leads(&self.leads)
    }
}

/// Values present in the data that a filter can choose from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub keywords: Vec<String>,
    pub company_sizes: Vec<CompanySize>,
    pub funding_stages: Vec<FundingStage>,
}

impl FilterOptions {
    pub fn from_leads(leads: &[ScoredLead]) -> Self {
        let keywords: BTreeSet<&str> = leads
            .iter()
            .flat_map(|lead| lead.lead().keywords.tags())
            .map(String::as_str)
            .collect();

        let sizes: Vec<&CompanySize> =
            leads.iter().map(|lead| &lead.lead().company_size).collect();
        let stages: Vec<&FundingStage> =
            leads.iter().map(|lead| &lead.lead().funding_stage).collect();

        Self {
            keywords: keywords.into_iter().map(str::to_string).collect(),
            company_sizes: present_in_order(&CompanySize::ordered(), &sizes),
            funding_stages: present_in_order(&FundingStage::ordered(), &stages),
        }
    }
}

/// Known categories in canonical order, then any unknown ones sorted by label.
pub(crate) fn present_in_order<T>(known: &[T], present: &[&T]) -> Vec<T>
where
    T: Clone + Ord,
{
    let mut ordered: Vec<T> = known
        .iter()
        .filter(|value| present.contains(value))
        .cloned()
        .collect();

    let extras: BTreeSet<&T> = present
        .iter()
        .copied()
        .filter(|value| !known.contains(*value))
        .collect();
    ordered.extend(extras.into_iter().cloned());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::domain::LeadSubmission;

    fn record(company: &str, tech_stack: &str, traffic: i64, size: &str) -> LeadRecord {
        LeadRecord::from_submission(LeadSubmission {
            company: Some(company.to_string()),
            tech_stack: Some(tech_stack.to_string()),
            keywords: Some("manual reporting, B2B sales focused".to_string()),
            estimated_traffic: Some(traffic),
            company_size: Some(size.to_string()),
            funding_stage: Some("Seed".to_string()),
            ..LeadSubmission::default()
        })
        .expect("valid record")
    }

    #[test]
    fn dataset_is_sorted_descending_and_stable() {
        let engine = ScoringEngine::default();
        let dataset = ScoredDataset::from_records(
            &engine,
            vec![
                record("Low Co", "", 100, "10-50"),
                record("Tie One", "Salesforce", 50_000, "51-200"),
                record("Top Co", "Salesforce", 200_000, "500+"),
                record("Tie Two", "Hubspot", 60_000, "51-200"),
            ],
        );

        let order: Vec<&str> = dataset.leads().iter().map(ScoredLead::company).collect();
        assert_eq!(order, vec!["Top Co", "Tie One", "Tie Two", "Low Co"]);
        assert_eq!(dataset.leads()[0].composite(), 65);
    }

    #[test]
    fn find_returns_matching_company() {
        let engine = ScoringEngine::default();
        let dataset =
            ScoredDataset::from_records(&engine, vec![record("Nova Labs", "", 10, "10-50")]);

        assert!(dataset.find("Nova Labs").is_some());
        assert!(dataset.find("nova labs").is_none());
    }

    #[test]
    fn filter_options_reflect_present_values() {
        let engine = ScoringEngine::default();
        let dataset = ScoredDataset::from_records(
            &engine,
            vec![
                record("A", "", 10, "500+"),
                record("B", "", 10, "1000+"),
                record("C", "", 10, "10-50"),
            ],
        );

        let options = dataset.filter_options();
        assert_eq!(
            options.company_sizes,
            vec![
                CompanySize::Small,
                CompanySize::Enterprise,
                CompanySize::Other("1000+".to_string()),
            ]
        );
        assert_eq!(options.funding_stages, vec![FundingStage::Seed]);
        assert_eq!(
            options.keywords,
            vec!["B2B sales focused".to_string(), "manual reporting".to_string()]
        );
    }
}
