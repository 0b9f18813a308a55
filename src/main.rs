use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, Log, Metadata, Record};
use mood_palette::{Config, SelectionMode, Session};
use std::{fs, path::PathBuf};

/// Extract a palette of dominant colors from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with extraction settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of colors in each palette
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// How colors are picked from the clusters
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Maximum number of sampled pixels
    #[arg(short, long)]
    budget: Option<usize>,

    /// RGB distance under which colors share a cluster
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Print palettes as JSON
    #[arg(long)]
    json: bool,

    /// Print the delivery request for this address after each palette
    #[arg(short, long)]
    email: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    TopN,
    Balanced,
}

impl From<Mode> for SelectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::TopN => SelectionMode::TopN,
            Mode::Balanced => SelectionMode::Balanced,
        }
    }
}

struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logger(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };

    log::set_boxed_logger(Box::new(StderrLogger { level })).context("logger already installed")?;
    log::set_max_level(level.to_level_filter());

    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("invalid config in {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(count) = args.count {
        config.target_count = count;
    }

    if let Some(mode) = args.mode {
        config.selection_mode = mode.into();
    }

    if let Some(budget) = args.budget {
        config.sample_budget = budget;
    }

    if let Some(threshold) = args.threshold {
        config.cluster_threshold = threshold;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose)?;

    let config = load_config(&args)?;
    let mut session = Session::new(config);

    for input in &args.inputs {
        let image = mood_palette::load_image(input).with_context(|| format!("failed to load {}", input.display()))?;
        session.capture(image);

        let palette = session
            .analyze()
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if palette.is_degraded() {
            log::warn!("{} has no usable colors", input.display());
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(palette)?);
        } else {
            println!("{}: {}", input.display(), palette.hex_colors().join(" "));
        }

        if let Some(address) = &args.email {
            println!("{}", session.email_request(address)?);
        }
    }

    Ok(())
}
