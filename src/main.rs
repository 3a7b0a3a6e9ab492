use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::json;
use site_analysis::loader::parse_date;
use site_analysis::report::export::write_report;
use site_analysis::{
    AnalysisConfig, ReportBuilder, compute_minimum_resources, group_by_date, load_cases,
    load_scheduled_sites, simulate_capacity,
};
use std::path::PathBuf;
use std::time::Instant;

/// Minimum sites-of-service analysis for anesthesia case logs
#[derive(Debug, Parser)]
#[command(name = "site-analysis", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze every day of a case export and write the report
    Analyze(AnalyzeArgs),
    /// Partition a single day and print the assignment as JSON
    Day(DayArgs),
}

#[derive(Debug, Args)]
struct RunOptions {
    /// JSON case export
    #[arg(long)]
    cases: PathBuf,
    /// JSON analysis configuration
    #[arg(long, env = "SITE_ANALYSIS_CONFIG")]
    config: Option<PathBuf>,
    /// Pre-case buffer in minutes (overrides the configuration)
    #[arg(long)]
    pre: Option<i64>,
    /// Post-case buffer in minutes (overrides the configuration)
    #[arg(long)]
    post: Option<i64>,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    run: RunOptions,
    /// JSON map of date to manually scheduled sites
    #[arg(long)]
    scheduled: Option<PathBuf>,
    /// What-if capacities (overrides the configuration)
    #[arg(long = "capacity")]
    capacities: Vec<usize>,
    /// Output directory
    #[arg(long, default_value = "report")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct DayArgs {
    #[command(flatten)]
    run: RunOptions,
    /// Date to partition (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Also run the what-if simulation with this many sites
    #[arg(long)]
    capacity: Option<usize>,
}

fn load_config(run: &RunOptions) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &run.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(pre) = run.pre {
        config.pre_buffer_mins = pre;
    }
    if let Some(post) = run.post {
        config.post_buffer_mins = post;
    }
    Ok(config)
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.run)?;
    if !args.capacities.is_empty() {
        config.whatif_capacities = args.capacities;
    }
    config.validate()?;
    info!("{config}");

    let (cases, load_report) = load_cases(&args.run.cases, config.exclude_labor_delivery)
        .with_context(|| format!("Failed to load cases from {}", args.run.cases.display()))?;

    let mut builder = ReportBuilder::new()
        .with_config(config.clone())
        .with_load_report(load_report);
    if let Some(path) = &args.scheduled {
        builder = builder.with_scheduled_sites(load_scheduled_sites(path)?);
    }

    let report = builder.build(&cases)?;
    let written = write_report(&report, &config.whatif_capacities, &args.out)?;

    info!(
        "Average minimum sites {:.1}, peak {}, {} of {} weekdays at or above {} sites",
        report.summary.avg_min_sites_needed,
        report.summary.max_min_sites_needed,
        report.summary.days_needing_contract_or_more,
        report.summary.total_weekdays,
        config.contract_sites
    );
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn day(args: DayArgs) -> anyhow::Result<()> {
    let config = load_config(&args.run)?;
    let buffers = config.buffers()?;
    let date: NaiveDate = parse_date(&args.date)?;

    let (cases, _) = load_cases(&args.run.cases, config.exclude_labor_delivery)?;
    let mut by_date = group_by_date(&cases);
    let Some(day_cases) = by_date.remove(&date) else {
        bail!("No cases found on {date}");
    };

    let (daily, assignment) = compute_minimum_resources(&day_cases, &buffers)?;
    let whatif = args
        .capacity
        .map(|capacity| simulate_capacity(&day_cases, &buffers, capacity))
        .transpose()?;

    let output = json!({
        "daily": daily,
        "assignment": assignment,
        "whatif": whatif,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Command::Analyze(args) => analyze(args)?,
        Command::Day(args) => day(args)?,
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
