use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config, error,
    management::TokenManager,
    types::{AudioFeatures, AudioFeaturesResponse},
};

/// Maximum number of track ids per `/audio-features` request.
pub const FEATURES_BATCH_SIZE: usize = 100;

/// Retrieves audio features for a batch of tracks in a single API request.
///
/// Up to [`FEATURES_BATCH_SIZE`] ids per call; the caller chunks larger
/// lists. The response carries one entry per requested id, `None` where
/// Spotify has no feature record for a track, so positions line up with the
/// input.
///
/// Uses the stored token manager for authentication. If no valid token is
/// found the program terminates with a message directing the user to run
/// `tastecli auth`.
pub async fn get_audio_features(
    track_ids: &[String],
) -> Result<Vec<Option<AudioFeatures>>, reqwest::Error> {
    let ids = track_ids.join(",");

    let api_url = format!(
        "{url}/audio-features?ids={ids}",
        url = &config::spotify_apiurl(),
        ids = ids
    );

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run tastecli auth\n Error: {}",
                e
            );
        }
    };

    loop {
        let client = Client::new();
        let token = token_mgr.get_valid_token().await;
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

        let json = response.json::<AudioFeaturesResponse>().await?;
        return Ok(json.audio_features);
    }
}
