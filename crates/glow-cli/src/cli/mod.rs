mod plot;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use glow_core::{
    DailyIndices, FileIndexProvider, FixedIndices, GlowExecutable, IndexProvider,
    SimulationRequest, maxwellian,
};
use hifitime::Epoch;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Name of the native simulation binary produced by the CMake build.
const GLOW_EXECUTABLE_NAME: &str = "glowbasic";

/// Local index table override (`YYYY-MM-DD f107 f107a ap` rows).
const INDICES_ENV: &str = "GLOW_INDICES";
/// Simulation source tree holding CMakeLists.txt and the build dir.
const SOURCE_DIR_ENV: &str = "GLOW_SOURCE_DIR";

const REPORT_FILE: &str = "glow_run.json";

/// Quiet-sun drivers used when no index table is configured.
const FALLBACK_INDICES: DailyIndices = DailyIndices {
    f107: 150.0,
    f107a: 150.0,
    ap: 4.0,
};

#[derive(Debug, Parser)]
#[command(
    name = "glow-rs",
    about = "Run the GLOW ionosphere model for a Maxwellian precipitation spectrum and plot its output"
)]
struct Cli {
    /// Simulation time, ISO-8601 UTC (e.g. 2015-12-13T10:00:00)
    time: String,
    /// Geographic latitude, degrees north
    #[arg(allow_negative_numbers = true)]
    glat: f64,
    /// Geographic longitude, degrees east
    #[arg(allow_negative_numbers = true)]
    glon: f64,
    /// Precipitating energy flux
    q: f64,
    /// Characteristic energy
    echar: f64,
}

pub fn run_from_env() -> i32 {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Error: {error:#}");
            1
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let time = Epoch::from_str(&cli.time)
        .map_err(|source| anyhow::anyhow!("invalid ISO timestamp '{}': {source}", cli.time))?;
    let request = SimulationRequest::new(time, cli.glat, cli.glon, cli.q, cli.echar);

    let provider = index_provider()?;
    let executable = GlowExecutable::new(GLOW_EXECUTABLE_NAME, source_dir());

    info!(time = %time, glat = cli.glat, glon = cli.glon, "running GLOW simulation");
    let dataset = maxwellian(&executable, provider.as_ref(), &request)?;
    info!(altitudes = dataset.num_altitudes(), "simulation output parsed");

    println!("{dataset}");

    let report_path = PathBuf::from(REPORT_FILE);
    report::write_run_report(&report_path, &dataset)?;
    println!("JSON report: {}", report_path.display());

    plot::show_all(&dataset);
    Ok(())
}

fn index_provider() -> Result<Box<dyn IndexProvider>> {
    match env::var_os(INDICES_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading geomagnetic index table");
            let provider = FileIndexProvider::from_path(&path)
                .with_context(|| format!("failed to load index table '{}'", path.display()))?;
            Ok(Box::new(provider))
        }
        None => {
            warn!("{INDICES_ENV} not set, using fixed quiet-sun indices");
            Ok(Box::new(FixedIndices(FALLBACK_INDICES)))
        }
    }
}

fn source_dir() -> PathBuf {
    env::var_os(SOURCE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn five_positional_arguments_parse_in_order() {
        let cli = Cli::try_parse_from([
            "glow-rs",
            "2015-12-13T10:00:00",
            "65.1",
            "-147.4",
            "1.0",
            "100.0",
        ])
        .expect("five positionals should parse");

        assert_eq!(cli.time, "2015-12-13T10:00:00");
        assert_eq!(cli.glat, 65.1);
        assert_eq!(cli.glon, -147.4);
        assert_eq!(cli.q, 1.0);
        assert_eq!(cli.echar, 100.0);
    }

    #[test]
    fn missing_arguments_are_a_usage_error() {
        assert!(Cli::try_parse_from(["glow-rs", "2015-12-13T10:00:00"]).is_err());
    }
}
