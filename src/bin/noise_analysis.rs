use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;

use engsim::LatencyPipeline;
use engsim::config::EngConfig;
use engsim::simulation::create_rng;

#[derive(Parser, Debug)]
#[command(name = "noise_analysis")]
#[command(about = "Sweep noise level and report latency estimation error statistics")]
struct Args {
    /// Noise levels to sweep: comma-separated (e.g. "0,0.05,0.1")
    #[arg(short, long, value_delimiter = ',', default_value = "0,0.02,0.05,0.1,0.2,0.3,0.5")]
    noise: Vec<f64>,

    /// Trials per noise level
    #[arg(short, long, default_value_t = 50)]
    trials: u64,

    /// Base seed; trial `i` uses `seed + i`
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Conduction velocity in m/s
    #[arg(long, default_value_t = 30.0)]
    velocity: f64,

    /// Electrode spacing in meters
    #[arg(long, default_value_t = 0.01)]
    distance: f64,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct SweepPoint {
    error: Stats<f64>,
    max_abs_error: i64,
    gain_db: Stats<f64>,
}

fn run_noise_level(base: &EngConfig, noise_std: f64, trials: u64, seed: u64) -> Result<SweepPoint> {
    let mut config = base.clone();
    config.physical.noise_std = noise_std;
    let pipeline = LatencyPipeline::new(config)
        .with_context(|| format!("Invalid configuration at noise {}", noise_std))?;

    let mut point = SweepPoint {
        error: Stats::new(),
        max_abs_error: 0,
        gain_db: Stats::new(),
    };

    for trial in 0..trials {
        let mut rng = create_rng(Some(seed.wrapping_add(trial)));
        let report = pipeline.run(&mut rng)?.report;

        point.error.update(report.lag_error_samples as f64);
        point.max_abs_error = point.max_abs_error.max(report.lag_error_samples.abs());
        if let Some(gain) = report.beamform_gain_db() {
            point.gain_db.update(gain);
        }
    }

    Ok(point)
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

    let mut base = EngConfig::default();
    base.physical.conduction_velocity = args.velocity;
    base.physical.distance = args.distance;

    println!("noise_std,trials,mean_error_samples,std_error_samples,max_abs_error_samples,mean_gain_db");

    for &noise_std in &args.noise {
        let point = run_noise_level(&base, noise_std, args.trials, args.seed)?;
        let gain = if point.gain_db.count > 0 {
            format!("{:.2}", point.gain_db.mean)
        } else {
            String::new()
        };
        println!(
            "{},{},{:.3},{:.3},{},{}",
            noise_std,
            point.error.count,
            point.error.mean,
            point.error.std_dev,
            point.max_abs_error,
            gain
        );
    }

    Ok(())
}
