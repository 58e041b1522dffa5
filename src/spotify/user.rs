use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, error, management::TokenManager, types::CurrentUser};

/// Retrieves the authenticated user's profile from the Spotify Web API.
///
/// Used both as an authentication check after loading the cached token and
/// to obtain the user id that playlist creation needs. Loads the token from
/// the token manager; if no valid token is found the program terminates with
/// a message directing the user to run `tastecli auth`.
pub async fn get_current_user() -> Result<CurrentUser, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run tastecli auth\n Error: {}",
                e
            );
        }
    };

    loop {
        let token = token_mgr.get_valid_token().await;
        let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

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

        let user = response.json::<CurrentUser>().await?;
        return Ok(user);
    }
}
