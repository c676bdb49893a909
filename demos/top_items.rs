//! Print the current user's top tracks, top artists and recently played tracks.
//!
//! Requires `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and
//! `SPOTIFY_REFRESH_TOKEN` in the environment or a `.env` file.
//!
//! ```sh
//! RUST_LOG=spotirs=debug cargo run --example top_items -- short_term 10
//! ```

use spotirs::{Credentials, SpotifyClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let time_range = args.next().unwrap_or_else(|| "medium_term".to_string());
    let limit: i64 = match args.next() {
        Some(limit) => limit.parse()?,
        None => 10,
    };

    let client = SpotifyClient::new(Credentials::from_env()?);

    println!("Top tracks ({time_range}):");
    for (i, track) in client
        .top_tracks_formatted(&time_range, limit)
        .await?
        .iter()
        .enumerate()
    {
        println!(
            "{:>3}. {} - {} [{}]",
            i + 1,
            track.name,
            track.artists.join(", "),
            track.album.name
        );
    }

    println!("\nTop artists ({time_range}):");
    for (i, artist) in client
        .top_artists_formatted(&time_range, limit)
        .await?
        .iter()
        .enumerate()
    {
        println!("{:>3}. {} ({} followers)", i + 1, artist.name, artist.followers);
    }

    println!("\nRecently played:");
    match client.recently_played_formatted(limit).await {
        Ok(plays) => {
            for play in plays {
                println!(
                    "   {} - {} at {}",
                    play.track.name,
                    play.track.artists.join(", "),
                    play.played_at
                );
            }
        }
        Err(e) => println!("   {e}"),
    }

    Ok(())
}
