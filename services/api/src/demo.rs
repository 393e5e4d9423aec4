use crate::infra::{
    lead_service, parse_company_size, parse_export_format, parse_funding_stage,
    resolve_export_format,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use lead_prioritizer::config::{AppConfig, LeadsConfig};
use lead_prioritizer::error::AppError;
use lead_prioritizer::workflows::leads::{
    CategoryCount, CompanySize, ExportFormat, FundingStage, LeadBreakdownView, LeadFilter,
    LeadReport, LeadSearchResult, LeadService, ScoreBucket,
};
use std::path::PathBuf;

const NO_MATCHES: &str = "No leads match current filters. Try relaxing your criteria.";
const HISTOGRAM_WIDTH: usize = 30;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DatasetArgs {
    /// CSV file of leads to score instead of the generated dataset
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Number of synthetic leads to generate (defaults to LEADS_DATASET_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) count: Option<u64>,
    /// Seed for the synthetic generator (defaults to LEADS_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl DatasetArgs {
    fn apply(&self, config: &mut LeadsConfig) {
        if let Some(input) = &self.input {
            config.source_csv = Some(input.clone());
        }
        if let Some(count) = self.count {
            config.dataset_size = count as usize;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Minimum CAIS score, 0-100 (defaults to LEADS_MIN_SCORE)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) min_score: Option<u8>,
    /// Keyword a lead must mention; repeat to accept any of several
    #[arg(long = "keyword")]
    pub(crate) keywords: Vec<String>,
    /// Company size to keep, e.g. 51-200; repeatable
    #[arg(long = "size", value_parser = parse_company_size)]
    pub(crate) sizes: Vec<CompanySize>,
    /// Funding stage to keep, e.g. "Series A"; repeatable
    #[arg(long = "funding", value_parser = parse_funding_stage)]
    pub(crate) funding: Vec<FundingStage>,
}

impl FilterArgs {
    fn to_filter(&self, default_min_score: u8) -> LeadFilter {
        LeadFilter::with_min_score(self.min_score.unwrap_or(default_min_score))
            .keywords(self.keywords.iter().cloned())
            .company_sizes(self.sizes.iter().cloned())
            .funding_stages(self.funding.iter().cloned())
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct LeadListArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Print at most this many rows of the lead table
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct LeadInspectArgs {
    /// Company name exactly as shown in the lead table
    pub(crate) company: String,
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LeadExportArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Export format (csv or json). Inferred from --output when omitted.
    #[arg(long, value_parser = parse_export_format)]
    pub(crate) format: Option<ExportFormat>,
    /// Destination file (defaults to filtered_leads.<format> in the working directory)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Rows of the lead table to print
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

fn load_leads(args: &DatasetArgs) -> Result<(LeadService, LeadsConfig), AppError> {
    let mut config = AppConfig::load()?.leads;
    args.apply(&mut config);
    let service = lead_service(&config)?;
    Ok((service, config))
}

pub(crate) fn run_lead_list(args: LeadListArgs) -> Result<(), AppError> {
    let (service, config) = load_leads(&args.dataset)?;
    let filter = args.filter.to_filter(config.default_min_score);
    let result = service.search(&filter)?;

    render_lead_table(&result, args.limit);
    if !result.leads.is_empty() {
        render_report(&result.report);
    }
    Ok(())
}

pub(crate) fn run_lead_inspect(args: LeadInspectArgs) -> Result<(), AppError> {
    let (service, _) = load_leads(&args.dataset)?;
    match service.breakdown(&args.company) {
        Some(view) => render_breakdown(&view),
        None => println!("No lead named '{}' in the current dataset.", args.company),
    }
    Ok(())
}

pub(crate) fn run_lead_export(args: LeadExportArgs) -> Result<(), AppError> {
    let (service, config) = load_leads(&args.dataset)?;
    let filter = args.filter.to_filter(config.default_min_score);
    let format = resolve_export_format(args.format, args.output.as_deref());

    let payload = service.export(&filter, format)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&payload.file_name));
    std::fs::write(&output, &payload.body)?;

    println!(
        "Exported {} leads as {} to {}",
        payload.rows,
        payload.format,
        output.display()
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (service, config) = load_leads(&args.dataset)?;
    let today = Local::now().date_naive();

    println!("{}", demo_heading(today));
    let filter = LeadFilter::with_min_score(config.default_min_score);
    let result = service.search(&filter)?;
    render_lead_table(&result, Some(args.limit));

    let top = service
        .dataset()
        .leads()
        .first()
        .and_then(|lead| service.breakdown(lead.company()));
    if let Some(view) = top {
        println!();
        render_breakdown(&view);
    }

    if !result.leads.is_empty() {
        render_report(&result.report);
    }

    let options = service.options();
    println!(
        "\nFilter options: {} keywords | sizes {} | funding {}",
        options.keywords.len(),
        join_labels(options.company_sizes.iter().map(CompanySize::label)),
        join_labels(options.funding_stages.iter().map(FundingStage::label))
    );
    Ok(())
}

fn demo_heading(today: NaiveDate) -> String {
    format!(
        "Post-acquisition AI lead prioritizer demo ({})",
        today.format("%Y-%m-%d")
    )
}

fn render_lead_table(result: &LeadSearchResult, limit: Option<usize>) {
    println!(
        "Showing {} / {} Qualified Leads",
        result.report.shown, result.report.total
    );

    if result.leads.is_empty() {
        println!("{NO_MATCHES}");
        return;
    }

    println!(
        "{:>4}  {:<26} {:<26} {:>8}  {:<12} {:<8}  AI-Actionable Insight",
        "CAIS", "Company", "Website", "Traffic", "Size", "Funding"
    );
    let limit = limit.unwrap_or(result.leads.len());
    for row in result.leads.iter().take(limit) {
        println!(
            "{:>4}  {:<26} {:<26} {:>8}  {:<12} {:<8}  {}",
            row.composite_score,
            row.company,
            row.website,
            row.estimated_traffic,
            row.company_size,
            row.funding_stage,
            row.insight
        );
    }
    if result.leads.len() > limit {
        println!("... {} more", result.leads.len() - limit);
    }
}

fn render_breakdown(view: &LeadBreakdownView) {
    println!("Lead Scoring Breakdown: {}", view.company);
    println!("  Website: {} | Email: {}", view.website, view.email);
    println!("  Pain Point (0-50): {}", view.pain_score);
    println!("  Readiness (0-50): {}", view.readiness_score);
    println!("  Total CAIS (0-100): {}", view.composite_score);
    if view.components.is_empty() {
        println!("  Signals: none detected");
    } else {
        println!("  Signals:");
        for component in &view.components {
            println!(
                "    - {} [{}] +{}: {}",
                component.signal.label(),
                component.dimension.label(),
                component.points,
                component.notes
            );
        }
    }
    println!("  AI Strategy: {}", view.strategy);
}

fn render_report(report: &LeadReport) {
    println!("\nFit tiers");
    for tier in &report.tier_counts {
        println!("  {:<11} {}", tier.tier_label, tier.count);
    }

    println!("\nLeads by company size");
    render_categories(&report.company_size_counts);

    println!("\nLeads by funding stage");
    render_categories(&report.funding_stage_counts);

    if let Some(average) = report.average_composite {
        println!("\nAverage CAIS: {average:.1}");
    }

    println!("\nCAIS distribution");
    let peak = report
        .score_histogram
        .iter()
        .map(|bucket| bucket.count)
        .max()
        .unwrap_or_default();
    for bucket in report.score_histogram.iter().filter(|bucket| bucket.count > 0) {
        println!(
            "  {:>3}-{:<3} {} {}",
            bucket.lower,
            bucket.upper,
            histogram_bar(bucket, peak),
            bucket.count
        );
    }
}

fn render_categories(counts: &[CategoryCount]) {
    for entry in counts {
        println!("  {:<14} {}", entry.label, entry.count);
    }
}

fn histogram_bar(bucket: &ScoreBucket, peak: usize) -> String {
    if peak == 0 || bucket.count == 0 {
        return String::new();
    }
    let width = (bucket.count * HISTOGRAM_WIDTH).div_ceil(peak);
    "#".repeat(width)
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(count: usize) -> ScoreBucket {
        ScoreBucket {
            lower: 50,
            upper: 54,
            count,
        }
    }

    #[test]
    fn histogram_bars_scale_to_peak() {
        assert_eq!(histogram_bar(&bucket(10), 10).len(), HISTOGRAM_WIDTH);
        assert_eq!(histogram_bar(&bucket(5), 10).len(), HISTOGRAM_WIDTH / 2);
        assert_eq!(histogram_bar(&bucket(1), 90).len(), 1);
        assert!(histogram_bar(&bucket(0), 10).is_empty());
    }

    #[test]
    fn filter_args_fall_back_to_configured_threshold() {
        let args = FilterArgs {
            keywords: vec!["manual".to_string()],
            sizes: vec![CompanySize::Medium],
            ..FilterArgs::default()
        };
        let filter = args.to_filter(75);
        assert_eq!(filter.min_score, 75);
        assert_eq!(filter.keywords, vec!["manual".to_string()]);
        assert_eq!(filter.company_sizes, vec![CompanySize::Medium]);
        assert!(filter.funding_stages.is_empty());

        let explicit = FilterArgs {
            min_score: Some(20),
            ..FilterArgs::default()
        };
        assert_eq!(explicit.to_filter(75).min_score, 20);
    }

    #[test]
    fn dataset_args_override_config() {
        let mut config = LeadsConfig::default();
        DatasetArgs {
            input: Some(PathBuf::from("leads.csv")),
            count: Some(20),
            seed: Some(7),
        }
        .apply(&mut config);

        assert_eq!(config.source_csv, Some(PathBuf::from("leads.csv")));
        assert_eq!(config.dataset_size, 20);
        assert_eq!(config.seed, 7);
        assert_eq!(config.default_min_score, 75);
    }

    #[test]
    fn demo_heading_includes_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
        assert!(demo_heading(date).ends_with("(2025-03-14)"));
    }
}
