use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use sail_stats::{
    processors::segments::percentile_from_pct,
    util::{config::StatsConfig, error::Result},
    App,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sailing statistics for annotated GPS tracks", long_about = None)]
struct Cli {
    /// Track exported as JSON: {"segments": [{"points": [...]}]}
    #[arg(required = true)]
    track: PathBuf,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Percent of top speeds to ignore (0 - 50)
    #[arg(long)]
    pct: Option<i64>,

    /// Print one JSON record per segment instead of the text summary
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => StatsConfig::load(path)?,
        None => StatsConfig::default(),
    };

    if let Some(pct) = cli.pct {
        config.extremes_percentile = percentile_from_pct(pct);
    }
    config.verbose |= cli.verbose;
    // keep stdout parseable
    if cli.json {
        config.logging = false;
    }

    let app = App::new(config)?;
    let track = app.load_track(&cli.track)?;
    let stats = app.process_track(&track);

    if cli.json {
        println!("{}", app.records_json(&stats)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("No segment longer than {:.0}s found", app.config().min_segment_duration_s);
    }

    for segment_stats in &stats {
        println!();
        println!("{}", segment_stats);
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sail-stats: {}", err);
            ExitCode::FAILURE
        }
    }
}
