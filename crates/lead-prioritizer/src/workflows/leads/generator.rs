use super::domain::{CompanySize, FundingStage, LeadRecord, TagList};
use super::import::{LeadImportError, LeadSource};
use crate::config::{DEFAULT_DATASET_SEED, DEFAULT_DATASET_SIZE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const PREFIXES: &[&str] = &[
    "Stream", "Summit", "Quick", "Pioneer", "BlueRidge", "Global", "Apex", "Nova", "Eco", "Data",
    "Prime", "Zenith", "Verde", "Iron", "Digital",
];

const SUFFIXES: &[&str] = &[
    "Tech",
    "Analytics",
    "Solutions",
    "Holdings",
    "Consulting",
    "Labs",
    "Makers",
    "Services",
    "Systems",
    "Group",
    "Ventures",
    "Corp",
    "Logistics",
    "Retail",
    "Software",
];

const TECH_STACKS: &[&str] = &[
    "old CMS, custom billing, Google Analytics",
    "legacy ERP, no CRM, basic website",
    "modern stack, Salesforce, custom BI",
    "Excel-based, old CMS, minimal tech",
    "basic website, local tools",
    "Salesforce, modern stack, Tableau",
    "modern stack, custom billing, HubSpot",
    "Shopify, Google Analytics",
    "SharePoint, SAP, no modern BI",
    "Custom Python backend, AWS, Redis",
    "MERN stack, no dedicated marketing automation",
    "G Suite only, no formal project management tool",
];

const TRAFFIC_RANGES: &[(u64, u64)] = &[(100, 5_000), (10_000, 90_000), (100_000, 500_000)];

const KEYWORD_PHRASES: &[&str] = &[
    "manual reporting, high growth",
    "spreadsheet accounting, complex logistics",
    "digital transformation, AI-ready",
    "outdated processes, high volume",
    "local service, simple",
    "AI, market leader, scale",
    "custom needs, fast scaling",
    "B2C, digital marketing",
    "complex data, manual reporting",
    "B2B sales focused",
    "high compliance needs",
    "global supply chain",
];

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Alex", "Sarah", "Mike", "Emily", "Chris", "Pat", "Jamie",
];

const LAST_INITIALS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];

const TLDS: &[&str] = &[".com", ".net", ".io"];

/// Seeded demo data source. The same seed and count always yield the same leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticLeadGenerator {
    count: usize,
    seed: u64,
}

impl Default for SyntheticLeadGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_SIZE, DEFAULT_DATASET_SEED)
    }
}

impl SyntheticLeadGenerator {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }

    pub fn generate(&self) -> Vec<LeadRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.count).map(|_| synthetic_lead(&mut rng)).collect()
    }
}

impl LeadSource for SyntheticLeadGenerator {
    fn load(&self) -> Result<Vec<LeadRecord>, LeadImportError> {
        Ok(self.generate())
    }
}

fn pick<'a, R: Rng>(rng: &mut R, values: &'a [&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn synthetic_lead<R: Rng>(rng: &mut R) -> LeadRecord {
    let company = format!("{} {}", pick(rng, PREFIXES), pick(rng, SUFFIXES));
    let website = format!(
        "{}{}",
        company.to_lowercase().replace(' ', "").replace('g', "x"),
        pick(rng, TLDS)
    );
    let tech_stack = TagList::parse(pick(rng, TECH_STACKS));

    let (low, high) = TRAFFIC_RANGES
        .choose(rng)
        .copied()
        .unwrap_or(TRAFFIC_RANGES[0]);
    let estimated_traffic = rng.gen_range(low..=high);

    let phrase_count = rng.gen_range(2..=4);
    let phrases: Vec<&str> = KEYWORD_PHRASES
        .choose_multiple(rng, phrase_count)
        .copied()
        .collect();
    let keywords = TagList::parse(&phrases.join(", "));

    let first = pick(rng, FIRST_NAMES);
    let last = LAST_INITIALS.choose(rng).copied().unwrap_or('A');
    let website_stem = website.split('.').next().unwrap_or_default();
    let email = format!(
        "{}_{}@{}.com",
        first.to_lowercase(),
        last.to_ascii_lowercase(),
        website_stem
    );

    let company_size = CompanySize::ordered()
        .choose(rng)
        .cloned()
        .unwrap_or(CompanySize::Small);
    let funding_stage = FundingStage::ordered()
        .choose(rng)
        .cloned()
        .unwrap_or(FundingStage::Seed);

    LeadRecord {
        company,
        website,
        tech_stack,
        keywords,
        estimated_traffic,
        contact_name: format!("{first} {last}."),
        email,
        company_size,
        funding_stage,
    }
}
