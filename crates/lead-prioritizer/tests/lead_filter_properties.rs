/// Property-based tests for the scoring and filter invariants
use lead_prioritizer::workflows::leads::{
    CompanySize, FundingStage, LeadFilter, LeadSignals, ScoredDataset, ScoringEngine,
    SyntheticLeadGenerator, TagList,
};
use proptest::prelude::*;

const TECH_FRAGMENTS: &[&str] = &[
    "old CMS",
    "legacy ERP",
    "basic website",
    "Salesforce",
    "Hubspot",
    "HubSpot",
    "Google Analytics",
    "modern stack",
    "Shopify",
];

const KEYWORD_FRAGMENTS: &[&str] = &[
    "manual reporting",
    "spreadsheet accounting",
    "high growth",
    "digital transformation",
    "manually updated",
    "B2B sales focused",
];

fn tag_text(fragments: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::subsequence(fragments, 0..=fragments.len()).prop_map(|parts| parts.join(", "))
}

fn dataset(seed: u64) -> ScoredDataset {
    let records = SyntheticLeadGenerator::new(60, seed).generate();
    ScoredDataset::from_records(&ScoringEngine::default(), records)
}

fn companies(leads: &[&lead_prioritizer::workflows::leads::ScoredLead]) -> Vec<String> {
    leads.iter().map(|lead| lead.company().to_string()).collect()
}

// Property: scores always stay within their bounds
proptest! {
    #[test]
    fn scores_are_bounded(
        tech in tag_text(TECH_FRAGMENTS),
        keywords in tag_text(KEYWORD_FRAGMENTS),
        traffic in 0u64..1_000_000u64,
    ) {
        let tech = TagList::parse(&tech);
        let keywords = TagList::parse(&keywords);
        let score = ScoringEngine::default().score_signals(LeadSignals {
            tech_stack: &tech,
            keywords: &keywords,
            estimated_traffic: traffic,
        });

        prop_assert!(score.pain <= 50);
        prop_assert!(score.readiness <= 50);
        prop_assert_eq!(score.composite, score.pain + score.readiness);
        prop_assert!(score.composite <= 100);
    }

    #[test]
    fn scoring_is_deterministic(
        tech in tag_text(TECH_FRAGMENTS),
        keywords in tag_text(KEYWORD_FRAGMENTS),
        traffic in 0u64..1_000_000u64,
    ) {
        let tech = TagList::parse(&tech);
        let keywords = TagList::parse(&keywords);
        let signals = LeadSignals {
            tech_stack: &tech,
            keywords: &keywords,
            estimated_traffic: traffic,
        };

        let engine = ScoringEngine::default();
        prop_assert_eq!(engine.score_signals(signals), engine.score_signals(signals));
    }
}

// Property: filtering is idempotent and monotone
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn filtering_is_idempotent(seed in 0u64..500, min_score in 0u8..=100u8) {
        let dataset = dataset(seed);
        let filter = LeadFilter::with_min_score(min_score).keywords(["manual"]);

        let once = filter.apply(dataset.leads());
        let twice = filter.apply(once.iter().copied());
        prop_assert_eq!(companies(&once), companies(&twice));
    }

    #[test]
    fn raising_threshold_never_grows_result(
        seed in 0u64..500,
        low in 0u8..=100u8,
        bump in 0u8..=100u8,
    ) {
        let dataset = dataset(seed);
        let high = low.saturating_add(bump).min(100);

        let loose = dataset.filter(&LeadFilter::with_min_score(low)).len();
        let strict = dataset.filter(&LeadFilter::with_min_score(high)).len();
        prop_assert!(strict <= loose);
    }

    #[test]
    fn adding_constraints_never_grows_result(seed in 0u64..500, min_score in 0u8..=100u8) {
        let dataset = dataset(seed);
        let base = LeadFilter::with_min_score(min_score);
        let base_len = dataset.filter(&base).len();

        let with_size = base.clone().company_sizes([CompanySize::Medium]);
        let with_funding = with_size.clone().funding_stages([FundingStage::Seed]);
        let with_keyword = with_funding.clone().keywords(["spreadsheet"]);

        let size_len = dataset.filter(&with_size).len();
        let funding_len = dataset.filter(&with_funding).len();
        let keyword_len = dataset.filter(&with_keyword).len();

        prop_assert!(size_len <= base_len);
        prop_assert!(funding_len <= size_len);
        prop_assert!(keyword_len <= funding_len);
    }

    #[test]
    fn filtered_results_keep_descending_order(seed in 0u64..500, min_score in 0u8..=100u8) {
        let dataset = dataset(seed);
        let filtered = dataset.filter(&LeadFilter::with_min_score(min_score));

        prop_assert!(filtered.iter().all(|lead| lead.composite() >= min_score));
        prop_assert!(filtered
            .windows(2)
            .all(|pair| pair[0].composite() >= pair[1].composite()));
    }
}

#[test]
fn traffic_boundaries_fall_to_the_lower_tier() {
    let empty = TagList::default();
    let readiness = |traffic| {
        ScoringEngine::default()
            .score_signals(LeadSignals {
                tech_stack: &empty,
                keywords: &empty,
                estimated_traffic: traffic,
            })
            .readiness
    };

    assert_eq!(readiness(10_000), 0);
    assert_eq!(readiness(10_001), 25);
    assert_eq!(readiness(100_000), 25);
    assert_eq!(readiness(100_001), 35);
}
