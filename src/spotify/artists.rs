use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config, error,
    management::TokenManager,
    types::{Artist, SeveralArtistsResponse},
};

/// Maximum number of artist ids per `/artists` request.
pub const ARTISTS_BATCH_SIZE: usize = 50;

/// Retrieves full artist objects for a batch of artist ids.
///
/// Track objects carry no genre tags of their own, so candidate genres come
/// from the primary artist's object fetched here. Up to
/// [`ARTISTS_BATCH_SIZE`] ids per call; the caller chunks larger lists.
///
/// Uses the stored token manager for authentication. If no valid token is
/// found the program terminates with a message directing the user to run
/// `tastecli auth`.
pub async fn get_several_artists(artist_ids: &[String]) -> Result<Vec<Artist>, reqwest::Error> {
    let ids = artist_ids.join(",");

    let api_url = format!(
        "{url}/artists?ids={ids}",
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

        let json = response.json::<SeveralArtistsResponse>().await?;
        return Ok(json.artists);
    }
}
