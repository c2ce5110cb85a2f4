use anyhow::Result;
use clap::Parser;
use listening_wrapped::client::SpotifyClient;
use listening_wrapped::config::load_config;
use listening_wrapped::enrich::CatalogEnricher;
use listening_wrapped::history::{aggregate_track_stats, load_history};
use listening_wrapped::output::write_json;

#[derive(Parser)]
#[command(name = "fetch-metadata")]
#[command(about = "Enrich a Spotify streaming history with track, album and artist metadata")]
#[command(version)]
struct Args {
    /// Path to the streaming history JSON export
    #[arg(long = "history", default_value = "data/streaming_history_2025.json")]
    history_file: String,

    /// Where to write the enriched catalog
    #[arg(short = 'o', long = "output", default_value = "data/spotify-metadata.json")]
    output_file: String,
}

fn main() -> Result<()> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let args = Args::parse();

    // Credentials are required before any work starts
    let config = load_config()?;

    println!("Loading streaming history...");
    let history = load_history(&args.history_file)?;

    println!("Extracting unique tracks...");
    let track_stats = aggregate_track_stats(&history);
    println!("  {} unique tracks found", track_stats.len());

    println!("\nRequesting Spotify access token...");
    let client = SpotifyClient::connect(&config)?;

    let snapshot = CatalogEnricher::new(client).enrich(&track_stats);

    println!("\nSaving to {}...", args.output_file);
    write_json(&args.output_file, &snapshot)?;

    println!("\nDone!");
    println!("  {} tracks", snapshot.metadata.total_tracks);
    println!("  {} albums", snapshot.metadata.total_albums);
    println!("  {} artists", snapshot.metadata.total_artists);

    Ok(())
}
