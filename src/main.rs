//! Activity Dataset CLI
//!
//! Builds windowed feature datasets from labelled motion-sensor logs.

use activity_dataset::{
    config::{Config, FailurePolicy},
    core::{extract_file, WindowSettings},
    export::{write_dataset, ExportFormat},
    ingest::scan,
    pipeline::prepare,
    report::ProcessingLog,
    VERSION,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "activity-dataset")]
#[command(version = VERSION)]
#[command(about = "Windowed feature datasets from motion-sensor logs", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dataset and write it with its processing report
    Process {
        /// Root directory of the sensor logs
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output directory
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Fraction of records routed to validation (0..=1)
        #[arg(long)]
        validation_fraction: Option<f64>,

        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Skip files that fail to parse instead of aborting
        #[arg(long)]
        skip_bad_files: bool,

        /// Also compute gyroscope and gravity magnitudes
        #[arg(long)]
        auxiliary: bool,

        /// Number of extraction threads
        #[arg(long)]
        workers: Option<usize>,
    },

    /// List the logs that would be processed
    Scan {
        /// Root directory of the sensor logs
        #[arg(long)]
        source: Option<PathBuf>,
    },

    /// Window a single log and print its records
    Inspect {
        /// Log file to inspect
        file: PathBuf,
    },

    /// Show effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let config_path = cli.config.unwrap_or_else(Config::config_path);

    match cli.command {
        Commands::Process {
            source,
            output,
            validation_fraction,
            format,
            skip_bad_files,
            auxiliary,
            workers,
        } => {
            let mut config = config;
            if let Some(source) = source {
                config.source_dir = source;
            }
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(fraction) = validation_fraction {
                config.validation_fraction = fraction;
            }
            if skip_bad_files {
                config.failure_policy = FailurePolicy::Skip;
            }
            if auxiliary {
                config.auxiliary_magnitudes = true;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            if format == ExportFormat::Jsonl && config.dataset_file.ends_with(".json") {
                config.dataset_file.push('l');
            }
            cmd_process(&config, format)
        }
        Commands::Scan { source } => cmd_scan(source.unwrap_or(config.source_dir)),
        Commands::Inspect { file } => cmd_inspect(&config, file),
        Commands::Config { save } => cmd_config(&config, &config_path, save),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("could not load configuration from {path:?}")),
        None => Config::load().context("could not load configuration"),
    }
}

fn cmd_process(config: &Config, format: ExportFormat) -> Result<()> {
    println!("Activity Dataset v{VERSION}");
    println!();
    println!("  Source: {:?}", config.source_dir);
    println!("  Output: {:?}", config.dataset_path());
    println!("  Validation fraction: {}", config.validation_fraction);
    println!(
        "  Window: {} rows (trim {} lead / {} tail)",
        config.windowing.window_size, config.windowing.lead_trim, config.windowing.tail_trim
    );
    println!(
        "  On bad files: {}",
        match config.failure_policy {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Skip => "skip",
        }
    );
    println!();

    let log = ProcessingLog::new();
    let result = prepare(config, &log);

    // the report is useful even when the run failed
    config
        .ensure_directories()
        .context("could not create output directory")?;
    if let Err(e) = log.save(&config.report_path()) {
        eprintln!("Warning: Could not save processing report: {e}");
    }

    let prepared = result.context("dataset preparation failed")?;
    let header = write_dataset(&prepared, &config.dataset_path(), format)
        .context("could not write dataset")?;

    println!("{}", log.summary());
    println!();
    println!("Labels: {:?}", header.labels);
    println!("Features: {:?}", header.features);
    println!(
        "Samples: {} ({} training, {} validation at {}%)",
        header.sample_count,
        header.training_count,
        header.validation_count,
        header.validation_percent
    );
    println!("Exported to {:?}", config.dataset_path());
    println!("Report written to {:?}", config.report_path());

    Ok(())
}

fn cmd_scan(source: PathBuf) -> Result<()> {
    let files = scan(&source);
    if files.is_empty() {
        println!("No sensor logs found in {source:?}");
        return Ok(());
    }

    println!("Found {} log(s) in {:?}", files.len(), source);
    for (index, file) in files.iter().enumerate() {
        println!("  [{index:>3}] {}", file.display());
    }
    Ok(())
}

fn cmd_inspect(config: &Config, file: PathBuf) -> Result<()> {
    let settings = WindowSettings::from_config(&config.windowing, true);
    let extraction =
        extract_file(&file, 0, settings).with_context(|| format!("could not window {file:?}"))?;

    let stats = extraction.stats;
    println!("File: {}", file.display());
    println!(
        "  Rows: {} ({} trimmed, {} windowed, {} dropped in partial window)",
        stats.data_rows, stats.trimmed_rows, stats.kept_rows, stats.dropped_samples
    );
    println!("  Windows: {}", stats.windows);
    println!();

    for record in &extraction.records {
        let (gyro, gravity) = record
            .auxiliary
            .map(|a| (a.gyro_magnitude_of_means, a.gravity_magnitude_of_means))
            .unwrap_or((f64::NAN, f64::NAN));
        println!(
            "  #{:<3} {:<10} accel mean {:>9.4}  accel max {:>9.4}  gyro {:>9.4}  gravity {:>9.4}",
            record.window_index,
            record.label,
            record.accel_magnitude_of_means,
            record.accel_magnitude_of_maxes,
            gyro,
            gravity
        );
    }
    Ok(())
}

fn cmd_config(config: &Config, path: &Path, save: bool) -> Result<()> {
    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {path:?}");
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);

    if save {
        config
            .save_to(path)
            .with_context(|| format!("could not save configuration to {path:?}"))?;
        println!();
        println!("Saved to {path:?}");
    }
    Ok(())
}
