use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{SearchResponse, TrackObject},
    warning,
};

/// Searches for tracks matching a query term.
///
/// One page of up to 50 results starting at `offset`. The candidate pool is
/// assembled by calling this repeatedly with randomized terms and offsets.
///
/// # Rate Limiting
///
/// Search is the chattiest endpoint of a tune run, so 429 Too Many Requests
/// responses honor the `Retry-After` header before retrying. Delays above
/// 120 seconds are not waited out; the page is skipped with a warning and an
/// empty result.
pub async fn search_tracks(
    token: &str,
    term: &str,
    limit: u32,
    offset: u32,
) -> Result<Vec<TrackObject>, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/search?q={term}&type=track&limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            term = urlencoding::encode(term),
            limit = limit,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            if retry_after <= 120 {
                sleep(Duration::from_secs(retry_after)).await;
                continue; // retry
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Skipping search page.",
                retry_after
            );
            return Ok(Vec::new());
        }

        let response = match response.error_for_status() {
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
        };

        let res = response.json::<SearchResponse>().await?;
        return Ok(res.tracks.items);
    }
}
