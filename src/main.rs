//! Chapter progression simulator CLI.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                                   # Sample content, one run
//!   cargo run -- --config game.json --seed 42   # Reproducible run of your content
//!   cargo run -- --runs 500                     # Balance analysis over 500 runs
//!   cargo run -- --csv out/ --json              # Export the run's tables and report

use chrono::Utc;
use clap::Parser;
use pokesim::build_info;
use pokesim::content::{sample, Configuration};
use pokesim::simulator::{
    export, run_batch, run_simulation, CancelToken, FnObserver, ProgressSnapshot, SimConfig,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pokesim")]
#[command(about = "Simulate chapter progression for a creature-collecting RPG")]
#[command(version = build_info::BUILD_VERSION)]
struct Args {
    /// Content file in the editor's JSON format (built-in sample when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of runs; more than one prints a batch report
    #[arg(short = 'n', long, default_value = "1")]
    runs: u32,

    /// In-game day budget per run (0 = unbounded)
    #[arg(long, default_value_t = pokesim::simulator::DEFAULT_MAX_GAME_DAYS)]
    max_days: u64,

    /// Sleep between days using the content's speed setting
    #[arg(long)]
    pace: bool,

    /// Print the run's narrative (-v) and per-run batch lines (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Save the JSON report (default name is timestamped)
    #[arg(long, num_args = 0..=1)]
    json: Option<Option<PathBuf>>,

    /// Write the export tables as CSV files into this directory
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the built-in sample content to this file and exit
    #[arg(long)]
    write_sample: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &args.write_sample {
        std::fs::write(path, sample::sample_configuration().to_json()?)?;
        println!("Sample content written to: {}", path.display());
        return Ok(());
    }

    let content = match &args.config {
        Some(path) => Configuration::load(path)?,
        None => sample::sample_configuration(),
    };

    let config = SimConfig {
        num_runs: args.runs.max(1),
        seed: args.seed,
        max_game_days: (args.max_days > 0).then_some(args.max_days),
        pace: args.pace,
        verbosity: 1 + args.verbose,
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              POKESIM PROGRESSION SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  pokesim {}", build_info::BUILD_VERSION);
    println!();
    println!("Configuration:");
    println!(
        "  Content:        {}",
        args.config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in sample".to_string())
    );
    println!("  Chapters:       {}", content.chapters.len());
    println!("  Roster:         {}", content.pokemons.len());
    println!("  Runs:           {}", config.num_runs);
    match config.max_game_days {
        Some(limit) => println!("  Day Budget:     {}", limit),
        None => println!("  Day Budget:     unbounded"),
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let cancel = CancelToken::new();

    if config.num_runs > 1 {
        println!("Running {} simulations...", config.num_runs);
        println!();
        let report = run_batch(&content, &config, &cancel)?;
        println!("{}", report.to_text());
        if let Some(path) = json_path(&args, "batch_report") {
            std::fs::write(&path, report.to_json())?;
            println!("JSON report saved to: {}", path.display());
        }
        return Ok(());
    }

    let narrate = config.verbosity >= 2;
    let mut observer = FnObserver::new(
        |snapshot: &ProgressSnapshot| {
            log::debug!(
                "chapter {}/{} day {}: power {:.2} of {:.2}",
                snapshot.chapter,
                snapshot.total_chapters,
                snapshot.day,
                snapshot.current_power,
                snapshot.required_power
            );
        },
        |line: &str| {
            if narrate {
                println!("  {}", line);
            }
        },
    );

    let result = run_simulation(&content, &config, &mut observer, &cancel)?;
    println!("{}", result.to_text());

    if let Some(path) = json_path(&args, "sim_report") {
        std::fs::write(&path, result.to_json())?;
        println!("JSON report saved to: {}", path.display());
    }
    if let Some(dir) = &args.csv {
        for path in export::write_csv(&result, dir)? {
            println!("CSV written: {}", path.display());
        }
    }

    Ok(())
}

/// Where `--json` should write, if it was given.
fn json_path(args: &Args, prefix: &str) -> Option<PathBuf> {
    match &args.json {
        None => None,
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(PathBuf::from(format!(
            "{}_{}.json",
            prefix,
            Utc::now().format("%Y%m%d_%H%M%S")
        ))),
    }
}
