use super::super::dataset::{present_in_order, ScoredLead};
use super::super::domain::{CompanySize, FundingStage};
use super::super::insights::FitTier;
use super::views::{CategoryCount, ScoreBucket, TierCount};
use serde::Serialize;
use std::collections::BTreeMap;

const BUCKET_WIDTH: u8 = 5;
const BUCKET_COUNT: u8 = 20;

/// Read-only aggregation over a filtered subset of leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadReport {
    pub shown: usize,
    pub total: usize,
    pub tier_counts: Vec<TierCount>,
    pub company_size_counts: Vec<CategoryCount>,
    pub funding_stage_counts: Vec<CategoryCount>,
    pub score_histogram: Vec<ScoreBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_composite: Option<f32>,
}

impl LeadReport {
    pub fn build(filtered: &[&ScoredLead], total: usize) -> Self {
        let tier_counts = FitTier::ordered()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                tier_label: tier.label(),
                count: filtered.iter().filter(|lead| lead.tier() == tier).count(),
            })
            .collect();

        let sizes: Vec<&CompanySize> = filtered
            .iter()
            .map(|lead| &lead.lead().company_size)
            .collect();
        let stages: Vec<&FundingStage> = filtered
            .iter()
            .map(|lead| &lead.lead().funding_stage)
            .collect();

        let average_composite = if filtered.is_empty() {
            None
        } else {
            let sum: u32 = filtered
                .iter()
                .map(|lead| u32::from(lead.composite()))
                .sum();
            Some(sum as f32 / filtered.len() as f32)
        };

        Self {
            shown: filtered.len(),
            total,
            tier_counts,
            company_size_counts: count_categories(&CompanySize::ordered(), &sizes),
            funding_stage_counts: count_categories(&FundingStage::ordered(), &stages),
            score_histogram: histogram(filtered),
            average_composite,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shown == 0
    }
}

fn count_categories<T>(known: &[T], present: &[&T]) -> Vec<CategoryCount>
where
    T: Clone + Ord + ToString,
{
    let mut counts: BTreeMap<&T, usize> = BTreeMap::new();
    for value in present {
        *counts.entry(*value).or_default() += 1;
    }

    present_in_order(known, present)
        .into_iter()
        .map(|value| CategoryCount {
            label: value.to_string(),
            count: counts.get(&value).copied().unwrap_or_default(),
        })
        .collect()
}

fn histogram(filtered: &[&ScoredLead]) -> Vec<ScoreBucket> {
    let mut buckets: Vec<ScoreBucket> = (0..BUCKET_COUNT)
        .map(|index| {
            let lower = index * BUCKET_WIDTH;
            let upper = if index + 1 == BUCKET_COUNT {
                100
            } else {
                lower + BUCKET_WIDTH - 1
            };
            ScoreBucket {
                lower,
                upper,
                count: 0,
            }
        })
        .collect();

    for lead in filtered {
        let index = usize::from((lead.composite() / BUCKET_WIDTH).min(BUCKET_COUNT - 1));
        buckets[index].count += 1;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::domain::{LeadRecord, LeadSubmission};
    use crate::workflows::leads::scoring::ScoringEngine;

    fn lead(tech_stack: &str, keywords: &str, traffic: i64, size: &str, funding: &str) -> ScoredLead {
        let record = LeadRecord::from_submission(LeadSubmission {
            company: Some("Prime Labs".to_string()),
            tech_stack: Some(tech_stack.to_string()),
            keywords: Some(keywords.to_string()),
            estimated_traffic: Some(traffic),
            company_size: Some(size.to_string()),
            funding_stage: Some(funding.to_string()),
            ..LeadSubmission::default()
        })
        .expect("valid record");
        ScoringEngine::default().evaluate(record)
    }

    #[test]
    fn report_counts_tiers_and_categories() {
        let leads = [
            // 15 + 10 + 35 + 15 = 75
            lead("legacy ERP, Salesforce", "manual reporting", 200_000, "500+", "Growth"),
            // 0 + 35 + 15 = 50
            lead("Salesforce", "AI", 150_000, "500+", "Seed"),
            // 0
            lead("", "", 100, "1-9", "Seed"),
        ];
        let filtered: Vec<&ScoredLead> = leads.iter().collect();
        let report = LeadReport::build(&filtered, 10);

        assert_eq!(report.shown, 3);
        assert_eq!(report.total, 10);
        let tiers: Vec<usize> = report.tier_counts.iter().map(|entry| entry.count).collect();
        assert_eq!(tiers, vec![1, 1, 1]);

        assert_eq!(
            report.company_size_counts,
            vec![
                CategoryCount {
                    label: "500+".to_string(),
                    count: 2
                },
                CategoryCount {
                    label: "1-9".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(report.funding_stage_counts[0].label, "Seed");
        assert_eq!(report.funding_stage_counts[0].count, 2);
        assert_eq!(report.average_composite, Some(125.0 / 3.0));
    }

    #[test]
    fn histogram_places_boundaries_in_expected_buckets() {
        let leads = [
            lead("Salesforce", "manual", 200_000, "10-50", "Seed"),
            lead("", "", 0, "10-50", "Seed"),
            lead("Google Analytics", "", 0, "10-50", "Seed"),
        ];
        let filtered: Vec<&ScoredLead> = leads.iter().collect();
        let report = LeadReport::build(&filtered, 3);

        assert_eq!(report.score_histogram.len(), 20);
        assert_eq!(report.score_histogram[0].count, 1);
        assert_eq!(report.score_histogram[1].count, 1);
        assert_eq!(report.score_histogram[13].count, 1);
        assert_eq!(report.score_histogram[19].lower, 95);
        assert_eq!(report.score_histogram[19].upper, 100);
    }

    #[test]
    fn empty_subset_is_a_valid_report() {
        let report = LeadReport::build(&[], 150);
        assert!(report.is_empty());
        assert_eq!(report.total, 150);
        assert!(report.company_size_counts.is_empty());
        assert!(report.average_composite.is_none());
        assert!(report.score_histogram.iter().all(|bucket| bucket.count == 0));
    }
}
