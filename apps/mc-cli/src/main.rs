use clap::{Parser, Subcommand};
use mc_results::{RunRecord, RunRecordStore};
use mc_series::{SeriesResult, load_series};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mc-cli")]
#[command(about = "Monte Carlo run series - plan conditions paths and inspect restart state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a series file
    Validate {
        /// Path to the series YAML or JSON file
        series_path: PathBuf,
    },
    /// Print the conditions of every state in the series
    Plan {
        /// Path to the series YAML or JSON file
        series_path: PathBuf,
    },
    /// Show completed runs and whether the series can be resumed
    Status {
        /// Path to the series YAML or JSON file
        series_path: PathBuf,
        /// Also list the conditions of each completed run
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> SeriesResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { series_path } => cmd_validate(&series_path),
        Commands::Plan { series_path } => cmd_plan(&series_path),
        Commands::Status {
            series_path,
            verbose,
        } => cmd_status(&series_path, verbose),
    }
}

fn cmd_validate(series_path: &Path) -> SeriesResult<()> {
    println!("Validating series: {}", series_path.display());
    let params = load_series(series_path)?;
    println!("✓ Series is valid");
    println!("  States: {}", params.n_states);
    println!("  Dependent runs: {}", params.dependent_runs);
    if params.dependent_runs && !params.output.retains_last_final_state() && params.n_states > 1 {
        println!("  ! final states are not retained; dependent runs will stop after run 0");
    }
    match &params.output.output_dir {
        Some(dir) => println!("  Output: {}", dir.display()),
        None => println!("  Output: none (in-memory only, no restarts)"),
    }
    Ok(())
}

fn cmd_plan(series_path: &Path) -> SeriesResult<()> {
    let params = load_series(series_path)?;
    let path = params.conditions_path()?;
    for (k, conditions) in path.take(params.n_states)?.iter().enumerate() {
        println!("{:>4}  {}", k, conditions);
    }
    Ok(())
}

fn cmd_status(series_path: &Path, verbose: bool) -> SeriesResult<()> {
    let params = load_series(series_path)?;
    let store = RunRecordStore::from_params(&params.output);
    let Some(file) = store.path() else {
        println!("No output_dir set: the series is not persisted");
        return Ok(());
    };

    // Configurations are opaque here; keep them as raw JSON.
    let records: Vec<RunRecord<serde_json::Value>> = store.read()?.unwrap_or_default();
    println!("Completed runs file: {}", file.display());
    println!("  Completed: {}/{}", records.len(), params.n_states);

    if records.len() >= params.n_states {
        println!("✓ Series complete");
    } else if let Some(last) = records.last() {
        let resumable = !params.dependent_runs || last.final_state().is_some();
        if resumable {
            println!("✓ Resumable at run {}", records.len());
        } else {
            println!(
                "✗ Not resumable: dependent runs need the final state of run {}, which was not written",
                records.len() - 1
            );
        }
    } else {
        println!("  No runs completed yet");
    }

    if verbose {
        for (k, record) in records.iter().enumerate() {
            println!(
                "{:>4}  n_unitcells={:<6} initial={} final={}  {}",
                k,
                record.n_unitcells(),
                if record.initial_state().is_some() { "yes" } else { "no" },
                if record.final_state().is_some() { "yes" } else { "no" },
                record.conditions()
            );
        }
    }
    Ok(())
}
