//! CLI for Strava-eksporter: timeseries-dump, NGP og PMC-tabell.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use runload_core::report::{print_pmc_report, write_pmc_csv, write_timeseries_csv};
use runload_core::{
    load_config, ngp_speed, pmc_fields, timeseries_for, training_stress_score, Config,
    ExtractRepository, MinettiModel, StravaApiTranslator, StravaJsonDirectoryRepository,
    StravaJsonFileRepository,
};

#[derive(Parser)]
#[command(name = "runload")]
#[command(about = "NGP/TSS fra lokale Strava-eksporter", long_about = None)]
struct Cli {
    /// Rotkatalog for eksporten
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Lagringsformat
    #[arg(short, long, value_enum, default_value_t = Layout::Directory)]
    layout: Layout,

    /// JSON-konfig (default brukes hvis filen mangler)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    /// activities/{id}/summary.json + streams.json
    Directory,
    /// activities.jl + streams/{id}.json
    File,
}

#[derive(Subcommand)]
enum Commands {
    /// Skriv én aktivitets timeseries som CSV
    Timeseries { activity_id: i64 },
    /// Skriv NGP-fart og TSS for én aktivitet
    Ngp { activity_id: i64 },
    /// Skriv PMC-tabellen (recorded,type,TSS) som CSV
    Pmc {
        /// Skriv et sammendrag i stedet for CSV
        #[arg(long)]
        summary: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("laster {}", path.display()))?,
        None => Config::default(),
    };
    let translator = StravaApiTranslator::new(cfg.variables.clone());
    let repo: Box<dyn ExtractRepository> = match cli.layout {
        Layout::Directory => Box::new(StravaJsonDirectoryRepository::with_translator(&cli.root, translator)),
        Layout::File => Box::new(StravaJsonFileRepository::with_translator(&cli.root, translator)),
    };
    let model = MinettiModel::with_window(cfg.rolling_window_secs);

    match cli.command {
        Commands::Timeseries { activity_id } => {
            match timeseries_for(repo.as_ref(), activity_id)? {
                Some(ts) => write_timeseries_csv(&ts, io::stdout().lock())?,
                None => eprintln!("ingen data for aktivitet {activity_id}"),
            }
        }
        Commands::Ngp { activity_id } => {
            let ts = timeseries_for(repo.as_ref(), activity_id)?
                .with_context(|| format!("ingen data for aktivitet {activity_id}"))?;
            let ngp = ngp_speed(&ts, &model)?;
            let tss = training_stress_score(&ts, &model, cfg.threshold_speed_ms)?;
            println!("NGP: {:.3} m/s", ngp);
            println!("Varighet: {:.0} s", ts.duration_secs());
            println!("TSS: {:.1}", tss);
        }
        Commands::Pmc { summary } => {
            let records = pmc_fields(repo.as_ref(), &model, &cfg)?;
            if summary {
                print_pmc_report(&records);
            } else {
                write_pmc_csv(&records, io::stdout().lock())?;
            }
        }
    }
    Ok(())
}
