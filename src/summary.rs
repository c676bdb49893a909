use crate::Error;
use crate::SpotifyClient;
use crate::artist::Artist;
use crate::track::{PlayedTrack, Track};
use crate::utils::{validate_limit, validate_time_range};
use serde::{Deserialize, Serialize};

/// A snapshot of a user's listening: top tracks, top artists and recent plays.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ListeningSummary {
    pub top_tracks: Vec<Track>,
    pub top_artists: Vec<Artist>,
    pub recently_played: Vec<PlayedTrack>,
}

impl SpotifyClient {
    /// Fetch top tracks, top artists and recently played tracks concurrently.
    ///
    /// Parameters are validated once, up front. Each of the three requests
    /// performs its own token exchange. The first failure is returned and
    /// the remaining requests are dropped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: spotirs::SpotifyClient) -> Result<(), spotirs::Error> {
    /// let summary = client.listening_summary(spotirs::TimeRange::ShortTerm, 5).await?;
    /// for track in &summary.top_tracks {
    ///     println!("{} by {}", track.name, track.artists.join(", "));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn listening_summary(
        &self,
        time_range: impl AsRef<str>,
        limit: i64,
    ) -> Result<ListeningSummary, Error> {
        let time_range = validate_time_range(time_range.as_ref())?;
        let limit = validate_limit(limit)?;

        let (top_tracks, top_artists, recently_played) = tokio::try_join!(
            self.top_tracks_formatted(time_range, limit),
            self.top_artists_formatted(time_range, limit),
            self.recently_played_formatted(limit)
        )?;

        log::debug!(
            "Fetched listening summary: {} top tracks, {} top artists, {} recent plays",
            top_tracks.len(),
            top_artists.len(),
            recently_played.len()
        );

        Ok(ListeningSummary {
            top_tracks,
            top_artists,
            recently_played,
        })
    }
}
