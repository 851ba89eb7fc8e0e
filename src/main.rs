use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vibecheck::config::Config;
use vibecheck::provider::load_profile;
use vibecheck::scoring::CompatibilityEngine;

/// Score the compatibility of two personality profiles.
#[derive(Parser)]
#[command(name = "vibecheck")]
#[command(version)]
#[command(about = "Deterministic compatibility score between two personality profiles")]
struct Cli {
    /// First profile (JSON)
    profile1: PathBuf,

    /// Second profile (JSON)
    profile2: PathBuf,

    /// TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Amplification power, overrides config and environment (1-5)
    #[arg(long)]
    power: Option<f64>,

    /// Number of top matches/clashes to report
    #[arg(long)]
    top: Option<usize>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("vibecheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config);
    config.apply_env_overrides();
    if let Some(power) = cli.power {
        config.scoring.amplification_power = power;
    }
    if let Some(top) = cli.top {
        config.scoring.top_n = top;
    }
    tracing::debug!("Config: {:?}", config);

    let engine = CompatibilityEngine::from_config(&config.scoring);
    tracing::info!(
        "Engine ready (amplification power {})",
        engine.amplifier().power()
    );

    let mut profiles = Vec::with_capacity(2);
    for path in [&cli.profile1, &cli.profile2] {
        match load_profile(path) {
            Ok(profile) => profiles.push(profile),
            Err(e) => {
                tracing::error!("Failed to load profile {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let report = engine.analyze(&profiles[0], &profiles[1]);
    tracing::info!(
        "{} vs {}: {} ({})",
        report.profile1,
        report.profile2,
        report.result.score,
        report.tier.label()
    );

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
