use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::TrackObject;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

// Single lowercase letters plus the wildcard give the broadest spread of
// search results; the wildcard matches anything.
const SEARCH_TERMS: [char; 27] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '%',
];

pub fn random_search_term() -> String {
    let idx = rand::rng().random_range(0..SEARCH_TERMS.len());
    SEARCH_TERMS[idx].to_string()
}

pub fn random_search_offset(max: u32) -> u32 {
    rand::rng().random_range(0..=max)
}

pub fn remove_duplicate_tracks(tracks: &mut Vec<TrackObject>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}
