use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{Artist, FollowedArtistsResponse, TopArtistsResponse, TopTracksResponse, TrackObject},
};

/// Affinity window of the `/me/top/*` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl TimeRange {
    /// Fallback order used when a window returns no history.
    pub const ALL: [TimeRange; 3] = [TimeRange::Short, TimeRange::Medium, TimeRange::Long];
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        };
        write!(f, "{}", s)
    }
}

/// Retrieves the user's top artists for an affinity time range.
///
/// Implements automatic retry for 502 Bad Gateway errors with a 10-second
/// delay. Other errors are propagated immediately.
pub async fn get_top_artists(
    token: &str,
    limit: u64,
    time_range: TimeRange,
) -> Result<Vec<Artist>, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/me/top/artists?time_range={time_range}&limit={limit}",
            uri = &config::spotify_apiurl(),
            time_range = time_range,
            limit = limit
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let res = response.json::<TopArtistsResponse>().await?;
        return Ok(res.items);
    }
}

/// Retrieves the user's top tracks for an affinity time range.
pub async fn get_top_tracks(
    token: &str,
    limit: u64,
    time_range: TimeRange,
) -> Result<Vec<TrackObject>, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/me/top/tracks?time_range={time_range}&limit={limit}",
            uri = &config::spotify_apiurl(),
            time_range = time_range,
            limit = limit
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let res = response.json::<TopTracksResponse>().await?;
        return Ok(res.items);
    }
}

/// Retrieves a page of followed artists, the fallback history source when
/// the top-artists endpoints come back empty.
///
/// Uses Spotify's cursor-based pagination; pass the returned cursor as
/// `after` to fetch the next page.
pub async fn get_followed_artists(
    token: &str,
    limit: u64,
    after: Option<String>,
) -> Result<(Vec<Artist>, Option<String>), reqwest::Error> {
    let attempt_after = after.clone();

    loop {
        let mut api_url = format!(
            "{uri}/me/following?type=artist&limit={limit}",
            uri = &config::spotify_apiurl(),
            limit = limit
        );
        if let Some(after_val) = &attempt_after {
            api_url.push_str(&format!("&after={}", after_val));
        }

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let res = response.json::<FollowedArtistsResponse>().await?;
        let next_after = res.artists.cursors.and_then(|c| c.after);

        return Ok((res.artists.items, next_after));
    }
}
