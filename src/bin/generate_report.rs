use anyhow::Result;
use clap::Parser;
use listening_wrapped::history::load_history;
use listening_wrapped::metrics::{ReportConfig, ReportGenerator};
use listening_wrapped::output::write_json;

#[derive(Parser)]
#[command(name = "generate-report")]
#[command(about = "Compute dashboard metrics from a Spotify streaming history")]
#[command(version)]
struct Args {
    /// Path to the streaming history JSON export
    #[arg(long = "history", default_value = "data/streaming_history_2025.json")]
    history_file: String,

    /// Where to write the metrics report
    #[arg(short = 'o', long = "output", default_value = "data/spotify-2025.json")]
    output_file: String,

    /// Optional JSON file overriding report settings (time zone, limits, special dates)
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,
}

fn main() -> Result<()> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let args = Args::parse();

    let config = match &args.config_file {
        Some(path) => {
            println!("Loading report settings from: {path}");
            ReportConfig::load_from_file(path)?
        }
        None => ReportConfig::default(),
    };

    println!("Loading data...");
    let history = load_history(&args.history_file)?;

    println!("Computing metrics (UTC -> {})...", config.timezone);
    let report = ReportGenerator::new(config).generate(&history)?;

    println!("Saving to {}...", args.output_file);
    write_json(&args.output_file, &report)?;

    println!("Done!");
    println!("\nSummary:");
    println!("  - {} minutes", report.overview.total_minutes);
    println!("  - {} artists", report.overview.unique_artists);
    println!(
        "  - Peak hour: {}:00 ({})",
        report.peak_hours.peak_hour, report.metadata.timezone
    );

    Ok(())
}
