// src/main.rs
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockout_sim::analysis::{ReportRequest, ScenarioReport, SimulationReport, SimulationRunner};
use stockout_sim::config::{SimulationConfig, BEST_CASE};
use stockout_sim::file::{ConfigSource, FileManager};

const HISTOGRAM_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "stockout-sim", version, about = "Monte Carlo stockout risk under demand scenarios")]
struct Cli {
    /// Configuration file (RON). Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enables debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulates one scenario, then compares all registered scenarios.
    Run(RunArgs),
    /// Lists registered scenarios.
    Scenarios,
    /// Writes a starter configuration file.
    Init {
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[arg(long, default_value = BEST_CASE)]
    scenario: String,
    #[arg(long)]
    iterations: Option<usize>,
    #[arg(long)]
    comparison_iterations: Option<usize>,
    #[arg(long, allow_hyphen_values = true)]
    stock_level: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Simulates total demand over this many days instead of a single period.
    #[arg(long)]
    days: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Prints a text histogram per scenario.
    #[arg(long)]
    histogram: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Ron,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let files = FileManager::new();
    match cli.command {
        Commands::Run(args) => run(&files, cli.config.as_deref(), args),
        Commands::Scenarios => list_scenarios(&files, cli.config.as_deref()),
        Commands::Init { path } => {
            let path = path
                .or_else(|| files.default_path().map(Path::to_path_buf))
                .ok_or_else(|| anyhow!("No config directory available; pass a path"))?;
            files.init_config(&path)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(files: &FileManager, explicit: Option<&Path>) -> Result<SimulationConfig> {
    let (config, source) = files.resolve_config(explicit)?;
    match &source {
        ConfigSource::Explicit(path) | ConfigSource::UserDefault(path) => {
            info!(path = %path.display(), "using configuration file")
        }
        ConfigSource::BuiltIn => info!("using built-in configuration"),
    }
    Ok(config)
}

fn run(files: &FileManager, explicit: Option<&Path>, args: RunArgs) -> Result<()> {
    let mut config = load_config(files, explicit)?;
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(iterations) = args.comparison_iterations {
        config.comparison_iterations = Some(iterations);
    }
    if let Some(stock_level) = args.stock_level {
        config.stock_level = stock_level;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let runner = SimulationRunner::from_config(&config)?;
    let request = ReportRequest {
        days: args.days,
        ..ReportRequest::from_config(&config, args.scenario.as_str())
    };

    info!(
        scenario = %request.focus,
        iterations = request.iterations,
        stock_level = request.stock_level,
        seed = ?request.seed,
        "starting simulation"
    );
    if args.format == OutputFormat::Text {
        println!("{}", running_line(&request.focus, request.iterations));
    }

    let report = runner.report(&request)?;
    info!(run_id = %report.run_id, "simulation finished");

    match args.format {
        OutputFormat::Text => print_text_report(&report, args.histogram),
        OutputFormat::Ron => {
            let content = ron::ser::to_string_pretty(&report, ron::ser::PrettyConfig::new().depth_limit(4))?;
            println!("{}", content);
        }
    }
    Ok(())
}

fn list_scenarios(files: &FileManager, explicit: Option<&Path>) -> Result<()> {
    let config = load_config(files, explicit)?;
    let table = config.validate()?;
    println!(
        "Baseline demand: mean {:.2}, std dev {:.2}",
        config.baseline.mean_demand, config.baseline.std_dev_demand
    );
    for scenario in table.iter() {
        println!(
            "{:<16} demand_growth {:>6.2}  economic_shift {:>6.2}",
            scenario.name, scenario.demand_growth, scenario.economic_shift
        );
    }
    Ok(())
}

fn print_text_report(report: &SimulationReport, histogram: bool) {
    let focus = &report.focus;
    println!("{}", risk_line(focus));
    if let Some(days) = report.days {
        println!("Expected demand over {} days: {:.2}", days, focus.summary.mean);
    }
    if histogram {
        print_histogram(focus);
    }

    println!();
    println!("Scenario comparison (stock level {:.2}):", focus.stock_level);
    for entry in &report.comparison {
        let theoretical = entry
            .theoretical_risk
            .map(|t| format!("  (normal tail {:.2}%)", t))
            .unwrap_or_default();
        println!(
            "  {:<16} risk {:>6.2}%  mean {:>10.2}  std dev {:>8.2}{}",
            entry.scenario, entry.risk, entry.summary.mean, entry.summary.std_dev, theoretical
        );
    }
    if histogram {
        for entry in &report.comparison {
            print_histogram(entry);
        }
    }
}

fn print_histogram(entry: &ScenarioReport) {
    let peak = entry.summary.histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    println!();
    println!("{} Demand Simulation", capitalize(&entry.scenario));
    for bin in &entry.summary.histogram {
        let bar = "#".repeat(bin.count * HISTOGRAM_WIDTH / peak);
        println!("{:>10.1} | {:<width$} {}", bin.start, bar, bin.count, width = HISTOGRAM_WIDTH);
    }
}

fn running_line(scenario: &str, iterations: usize) -> String {
    format!("Running Monte Carlo simulation for {} scenario with {} iterations...", scenario, iterations)
}

fn risk_line(entry: &ScenarioReport) -> String {
    format!("{} scenario stockout risk: {:.2}%", capitalize(&entry.scenario), entry.risk)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
