use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::TokenManager,
    spotify, success,
    taste::{self, AudioVector, Candidate, TuneConfig},
    types::{PickTableRow, TrackObject},
    utils, warning,
};

use super::profile::{fetch_features, gather_history};

/// Search pages to give up after when the pool refuses to fill.
const MAX_SEARCH_PAGES: usize = 40;

/// Highest random offset passed to track search.
const MAX_SEARCH_OFFSET: u32 = 950;

/// Runs the full tune pipeline: fetch the listening history, build the
/// taste profile, gather and score a candidate pool, select the best
/// subset and write it back as a new private playlist.
pub async fn tune(config: TuneConfig, name: Option<String>) {
    let user = match spotify::user::get_current_user().await {
        Ok(user) => user,
        Err(e) => error!("Failed to fetch user profile: {}", e),
    };
    info!(
        "Authenticated as: {}",
        user.display_name.clone().unwrap_or_else(|| user.id.clone())
    );

    let (artists, tracks, features) = gather_history().await;

    let profile = match taste::build_profile(&artists, &tracks, &features) {
        Ok(profile) => profile,
        Err(e) => error!("{}", e),
    };
    success!(
        "Taste profile built from {} artists and {} tracks",
        artists.len(),
        tracks.len()
    );

    let pool = gather_candidate_pool(config.candidate_pool_size).await;
    if pool.is_empty() {
        warning!("No candidate tracks found; nothing to select.");
        return;
    }
    success!("Gathered {} candidate tracks", pool.len());

    let candidates = assemble_candidates(pool, &tracks).await;

    let scored = taste::score_candidates(candidates, &profile, &config);
    let picks = match taste::select(&scored, config.playlist_size, config.max_per_artist) {
        Ok(picks) => picks,
        Err(e) => error!("{}", e),
    };

    if picks.is_empty() {
        info!("Selection is empty; no playlist created.");
        return;
    }

    let pick_rows: Vec<PickTableRow> = picks
        .iter()
        .map(|p| PickTableRow {
            score: format!("{:.3}", p.score),
            track: p.candidate.name.clone(),
            artist: p.candidate.artist_name.clone(),
        })
        .collect();
    println!("{}", Table::new(pick_rows));

    let playlist_name =
        name.unwrap_or_else(|| format!("Taste Picks {}", Utc::now().format("%Y-%m-%d")));

    let playlist_exists = match spotify::playlist::exists(&playlist_name).await {
        Ok(exists) => exists,
        Err(e) => {
            warning!("Failed to check if playlist exists: {}", e);
            false
        }
    };
    if playlist_exists {
        error!(
            "Playlist {} already exists. Pass --name to pick another one.",
            playlist_name
        );
    }

    let playlist = match spotify::playlist::create(
        &user.id,
        playlist_name.clone(),
        "Automatically generated playlist optimized for your taste.".to_string(),
    )
    .await
    {
        Ok(playlist) => playlist,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    let uris: Vec<String> = picks.iter().map(|p| p.candidate.uri.clone()).collect();
    for chunk in uris.chunks(spotify::playlist::ADD_TRACKS_BATCH_SIZE) {
        if let Err(e) = spotify::playlist::add_tracks(playlist.id.clone(), chunk.to_vec()).await {
            error!("Failed to add tracks to playlist: {}", e);
        }
    }

    success!(
        "Created playlist {} with {} tracks: https://open.spotify.com/playlist/{}",
        playlist_name,
        picks.len(),
        playlist.id
    );
}

/// Assembles a candidate pool through randomized track searches.
///
/// Repeats single-term searches at random offsets and deduplicates by track
/// id until the pool is full or the page budget runs out. Failed pages are
/// skipped with a warning; the pool just ends up smaller.
async fn gather_candidate_pool(pool_size: usize) -> Vec<TrackObject> {
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
    pb.set_message("Gathering candidate tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut pool: Vec<TrackObject> = Vec::new();
    let mut pages = 0;

    while pool.len() < pool_size && pages < MAX_SEARCH_PAGES {
        pages += 1;
        let term = utils::random_search_term();
        let offset = utils::random_search_offset(MAX_SEARCH_OFFSET);
        let token = token_mgr.get_valid_token().await;

        match spotify::search::search_tracks(&token, &term, 50, offset).await {
            Ok(page) => {
                pool.extend(page);
                utils::remove_duplicate_tracks(&mut pool);
                pb.set_message(format!("Gathered {} candidate tracks...", pool.len()));
            }
            Err(e) => {
                warning!("Search page failed: {}", e);
            }
        }
    }

    pb.finish_and_clear();
    pool.truncate(pool_size);
    pool
}

/// Enriches the raw search results into scoreable candidates: audio
/// features per track, genre tags from the primary artist, and the known
/// flag from the top-track history.
async fn assemble_candidates(pool: Vec<TrackObject>, top_tracks: &[TrackObject]) -> Vec<Candidate> {
    let pool_ids: Vec<String> = pool.iter().map(|t| t.id.clone()).collect();
    let audio_by_id: HashMap<String, AudioVector> = fetch_features(&pool_ids)
        .await
        .iter()
        .map(|f| (f.id.clone(), AudioVector::from(f)))
        .collect();

    let mut primary_ids: Vec<String> = pool
        .iter()
        .filter_map(|t| t.artists.first().map(|a| a.id.clone()))
        .collect();
    primary_ids.sort();
    primary_ids.dedup();

    let mut genres_by_artist: HashMap<String, Vec<String>> = HashMap::new();
    for chunk in primary_ids.chunks(spotify::artists::ARTISTS_BATCH_SIZE) {
        match spotify::artists::get_several_artists(chunk).await {
            Ok(batch) => {
                for artist in batch {
                    genres_by_artist.insert(artist.id, artist.genres);
                }
            }
            Err(e) => warning!("Failed to fetch candidate artist genres: {}", e),
        }
    }

    let known_ids: HashSet<&str> = top_tracks.iter().map(|t| t.id.as_str()).collect();

    pool.into_iter()
        .map(|track| {
            let genres = track
                .artists
                .first()
                .and_then(|a| genres_by_artist.get(&a.id))
                .cloned()
                .unwrap_or_default();

            Candidate {
                known: known_ids.contains(track.id.as_str()),
                audio: audio_by_id.get(&track.id).copied(),
                artist_ids: track.artists.iter().map(|a| a.id.clone()).collect(),
                artist_name: track
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                genres,
                popularity: track.popularity,
                id: track.id,
                uri: track.uri,
                name: track.name,
            }
        })
        .collect()
}
