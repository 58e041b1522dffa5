use std::collections::HashMap;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::TokenManager,
    spotify::{self, top::TimeRange},
    taste,
    types::{Artist, AudioFeatures, FeatureTableRow, GenreTableRow, TrackObject},
};

/// Builds the taste profile from the live listening history and prints it:
/// favored artist count, the most common genres, the mean audio feature
/// vector and the popularity midpoint.
pub async fn profile() {
    let user = match spotify::user::get_current_user().await {
        Ok(user) => user,
        Err(e) => error!("Failed to fetch user profile: {}", e),
    };
    info!(
        "Authenticated as: {}",
        user.display_name.unwrap_or(user.id)
    );

    let (artists, tracks, features) = gather_history().await;

    let profile = match taste::build_profile(&artists, &tracks, &features) {
        Ok(profile) => profile,
        Err(e) => error!("{}", e),
    };

    info!(
        "Profile built from {} artists and {} tracks ({} feature records)",
        artists.len(),
        tracks.len(),
        features.len()
    );

    // genre frequency across the history artists
    let mut genre_counts: HashMap<String, usize> = HashMap::new();
    for artist in &artists {
        for genre in &artist.genres {
            *genre_counts.entry(genre.clone()).or_insert(0) += 1;
        }
    }
    let mut genre_rows: Vec<GenreTableRow> = genre_counts
        .into_iter()
        .map(|(genre, artists)| GenreTableRow { genre, artists })
        .collect();
    genre_rows.sort_by(|a, b| b.artists.cmp(&a.artists).then(a.genre.cmp(&b.genre)));
    genre_rows.truncate(15);

    if genre_rows.is_empty() {
        info!("No genre tags in the listening history.");
    } else {
        println!("{}", Table::new(genre_rows));
    }

    let feature_rows = vec![
        FeatureTableRow {
            feature: "danceability".to_string(),
            mean: format!("{:.2}", profile.audio.danceability),
        },
        FeatureTableRow {
            feature: "energy".to_string(),
            mean: format!("{:.2}", profile.audio.energy),
        },
        FeatureTableRow {
            feature: "valence".to_string(),
            mean: format!("{:.2}", profile.audio.valence),
        },
        FeatureTableRow {
            feature: "acousticness".to_string(),
            mean: format!("{:.2}", profile.audio.acousticness),
        },
        FeatureTableRow {
            feature: "instrumentalness".to_string(),
            mean: format!("{:.2}", profile.audio.instrumentalness),
        },
        FeatureTableRow {
            feature: "tempo".to_string(),
            mean: format!("{:.0} bpm", profile.audio.tempo),
        },
        FeatureTableRow {
            feature: "popularity midpoint".to_string(),
            mean: format!("{:.0}", profile.popularity_midpoint),
        },
    ];
    println!("{}", Table::new(feature_rows));
}

/// Fetches the listening history the profile builder needs: top artists
/// (followed artists as fallback), top tracks, and their audio features.
pub(crate) async fn gather_history() -> (Vec<Artist>, Vec<TrackObject>, Vec<AudioFeatures>) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run tastecli auth\n Error: {}",
                e
            );
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching listening history...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let token = token_mgr.get_valid_token().await;
    let mut artists = match spotify::top::get_top_artists(&token, 50, TimeRange::Medium).await {
        Ok(artists) => artists,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch top artists: {}", e);
        }
    };

    // No top-artist affinity yet; fall back to the followed artists.
    if artists.is_empty() {
        pb.set_message("No top artists found, fetching followed artists...");
        let mut after: Option<String> = None;
        loop {
            let token = token_mgr.get_valid_token().await;
            match spotify::top::get_followed_artists(&token, 50, after.clone()).await {
                Ok((page, next_after)) => {
                    if page.is_empty() {
                        break;
                    }
                    artists.extend(page);
                    after = next_after;
                    if after.is_none() {
                        break;
                    }
                }
                Err(e) => {
                    pb.finish_and_clear();
                    error!("Failed to fetch followed artists: {}", e);
                }
            }
        }
    }

    // First affinity window with any tracks wins.
    let mut tracks: Vec<TrackObject> = Vec::new();
    for time_range in TimeRange::ALL {
        pb.set_message(format!("Fetching top tracks ({})...", time_range));
        let token = token_mgr.get_valid_token().await;
        match spotify::top::get_top_tracks(&token, 50, time_range).await {
            Ok(page) => {
                if !page.is_empty() {
                    tracks = page;
                    break;
                }
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch top tracks: {}", e);
            }
        }
    }

    pb.set_message("Fetching audio features...");
    let track_ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    let features = fetch_features(&track_ids).await;

    pb.finish_and_clear();
    (artists, tracks, features)
}

/// Batched audio-feature lookup; tracks without a feature record are
/// silently dropped.
pub(crate) async fn fetch_features(track_ids: &[String]) -> Vec<AudioFeatures> {
    let mut features: Vec<AudioFeatures> = Vec::new();
    for chunk in track_ids.chunks(spotify::features::FEATURES_BATCH_SIZE) {
        match spotify::features::get_audio_features(chunk).await {
            Ok(batch) => features.extend(batch.into_iter().flatten()),
            Err(e) => error!("Failed to fetch audio features: {}", e),
        }
    }
    features
}
