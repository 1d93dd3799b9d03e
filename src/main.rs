use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palettailor::config::{parse_color, parse_weights, AppConfig};
use palettailor::corpus::load_or_empty;
use palettailor::dataset::Dataset;
use palettailor::pipeline::{
    adjacency_report, assign_batch, assign_dataset, describe_color, make_rng, RunSettings,
};

#[derive(Parser)]
#[command(name = "palettailor")]
#[command(about = "Assign discriminable, well-named colors to the classes of a scatterplot")]
struct Cli {
    /// YAML config file (default: $PALETTAILOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// c3 color naming corpus (default: config `corpus`, then $C3_DATA)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a color to every label of a dataset
    Assign {
        /// Dataset JSON file
        input: PathBuf,

        /// Write the label -> color mapping here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Score weights as "separation,naming,legibility" (e.g. "1,1,1")
        #[arg(long)]
        weights: Option<String>,

        /// Background color as hex (e.g. "#ffffff")
        #[arg(long)]
        background: Option<String>,

        /// Canvas width, overriding the dataset
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height, overriding the dataset
        #[arg(long)]
        height: Option<f64>,

        /// Print the full report (scores, iterations) instead of the mapping
        #[arg(long)]
        report: bool,
    },
    /// Print the class adjacency weights of a dataset
    Adjacency {
        /// Dataset JSON file
        input: PathBuf,

        /// Canvas width, overriding the dataset
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height, overriding the dataset
        #[arg(long)]
        height: Option<f64>,
    },
    /// Assign palettes to several datasets in parallel
    Batch {
        /// Dataset JSON files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write the reports here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base seed; dataset i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show how the corpus names colors
    Names {
        /// Hex colors (e.g. "#1f77b4")
        #[arg(required = true)]
        colors: Vec<String>,

        /// Number of terms to show per color
        #[arg(short = 'k', long, default_value_t = 5)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palettailor=info,class_palette=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = AppConfig::locate(cli.config);
    let mut config = AppConfig::load_or_default(config_path.as_deref())?;
    if cli.corpus.is_some() {
        config.corpus = cli.corpus;
    }

    match cli.command {
        Commands::Assign {
            input,
            output,
            seed,
            weights,
            background,
            width,
            height,
            report,
        } => {
            if let Some(weights) = weights {
                config.weights = parse_weights(&weights)?;
            }
            if let Some(background) = background {
                parse_color(&background)?;
                config.background = background;
            }
            run_assign(
                &config,
                &input,
                output.as_deref(),
                seed.or(config.seed),
                (width, height),
                report,
            )
        }
        Commands::Adjacency {
            input,
            width,
            height,
        } => run_adjacency(&config, &input, (width, height)),
        Commands::Batch {
            inputs,
            output,
            seed,
        } => run_batch(&config, &inputs, output.as_deref(), seed.or(config.seed)),
        Commands::Names { colors, top } => run_names(&config, &colors, top),
    }
}

fn run_assign(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
    seed: Option<u64>,
    (width, height): (Option<f64>, Option<f64>),
    full_report: bool,
) -> anyhow::Result<()> {
    let settings = RunSettings::from_config(config)?;
    let names = load_or_empty(config.corpus_path().as_deref())?;
    let dataset = Dataset::load(input)?.with_canvas(width, height);

    let mut rng = make_rng(seed);
    let report = assign_dataset(&dataset, &names, &settings, &mut rng)?;

    let json = if full_report {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.mapping())?
    };
    write_output(output, &json)
}

fn run_adjacency(
    config: &AppConfig,
    input: &Path,
    (width, height): (Option<f64>, Option<f64>),
) -> anyhow::Result<()> {
    let settings = RunSettings::from_config(config)?;
    let dataset = Dataset::load(input)?.with_canvas(width, height);
    // Adjacency does not use names
    let names = class_palette::ColorNameModel::empty();
    let report = adjacency_report(&dataset, &names, &settings)?;
    write_output(None, &serde_json::to_string_pretty(&report)?)
}

fn run_batch(
    config: &AppConfig,
    inputs: &[PathBuf],
    output: Option<&Path>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let settings = RunSettings::from_config(config)?;
    let names = load_or_empty(config.corpus_path().as_deref())?;
    let datasets = inputs
        .iter()
        .map(|path| Dataset::load(path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(datasets = datasets.len(), "Starting batch");
    let mut reports = Vec::with_capacity(datasets.len());
    for (path, result) in inputs.iter().zip(assign_batch(&datasets, &names, &settings, seed)) {
        let report = result.with_context(|| format!("Failed on {}", path.display()))?;
        reports.push(report);
    }
    write_output(output, &serde_json::to_string_pretty(&reports)?)
}

fn run_names(config: &AppConfig, colors: &[String], top: usize) -> anyhow::Result<()> {
    let names = load_or_empty(config.corpus_path().as_deref())?;
    let reports = colors
        .iter()
        .map(|value| Ok(describe_color(&names, parse_color(value)?, top)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    write_output(None, &serde_json::to_string_pretty(&reports)?)
}

fn write_output(path: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
