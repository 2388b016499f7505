use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use engsim::config::EngConfig;
use engsim::output::{OutputFormat, create_formatter};
use engsim::{LatencyPipeline, save_wav};

#[derive(Parser, Debug)]
#[command(name = "engsim")]
#[command(about = "Simulate a two-electrode ENG recording and estimate conduction latency")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sampling rate in Hz
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Recording duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Conduction velocity in m/s
    #[arg(long)]
    velocity: Option<f64>,

    /// Electrode spacing in meters
    #[arg(long)]
    distance: Option<f64>,

    /// Noise standard deviation
    #[arg(short, long)]
    noise: Option<f64>,

    /// Band-pass lower cutoff in Hz
    #[arg(long)]
    low_cut: Option<f64>,

    /// Band-pass upper cutoff in Hz
    #[arg(long)]
    high_cut: Option<f64>,

    /// Band-pass filter order
    #[arg(long)]
    order: Option<usize>,

    /// Beamforming delays in seconds, comma-separated (e.g. "0,0.00033")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    delays: Option<Vec<f64>>,

    /// Noise seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the filtered recording to a WAV file
    #[arg(long)]
    dump_wav: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn apply_overrides(&self, config: &mut EngConfig) {
        let physical = &mut config.physical;
        if let Some(v) = self.sample_rate {
            physical.sample_rate = v;
        }
        if let Some(v) = self.duration {
            physical.duration = v;
        }
        if let Some(v) = self.velocity {
            physical.conduction_velocity = v;
        }
        if let Some(v) = self.distance {
            physical.distance = v;
        }
        if let Some(v) = self.noise {
            physical.noise_std = v;
        }

        let filter = &mut config.filter;
        if let Some(v) = self.low_cut {
            filter.low_cut = v;
        }
        if let Some(v) = self.high_cut {
            filter.high_cut = v;
        }
        if let Some(v) = self.order {
            filter.order = v;
        }

        if let Some(delays) = &self.delays {
            config.beamform.delays = Some(delays.clone());
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => EngConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngConfig::default(),
    };
    args.apply_overrides(&mut config);
    log::debug!("Configuration: {:?}", config);

    let pipeline = LatencyPipeline::new(config).context("Invalid configuration")?;
    let output = pipeline.run_seeded().context("Pipeline failed")?;

    if let Some(path) = &args.dump_wav {
        save_wav(path, &output.filtered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote filtered recording to {}", path.display());
    }

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&output.report));

    Ok(())
}
