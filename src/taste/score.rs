use super::{AudioVector, TasteProfile, TuneConfig, Weights};

/// A track eligible for inclusion in the generated playlist.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub uri: String,
    pub name: String,
    /// All credited artist ids; the first one is the primary artist.
    pub artist_ids: Vec<String>,
    pub artist_name: String,
    /// Genre tags of the primary artist (tracks carry none of their own).
    pub genres: Vec<String>,
    /// Popularity in [0,100].
    pub popularity: u32,
    /// Absent when the features endpoint had no record for this track.
    pub audio: Option<AudioVector>,
    /// True when the track already appears in the user's top history.
    pub known: bool,
}

/// A candidate together with its computed score. Derived, recomputed every
/// run, never persisted.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// The five independently normalized components, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub artist_match: f64,
    pub genre_match: f64,
    pub popularity: f64,
    pub audio_match: f64,
    pub diversity: f64,
}

impl SubScores {
    /// Weighted sum of the components. The weights are applied as given,
    /// without normalization.
    pub fn weighted_total(&self, weights: &Weights) -> f64 {
        weights.artist_match * self.artist_match
            + weights.genre_match * self.genre_match
            + weights.popularity * self.popularity
            + weights.audio_match * self.audio_match
            + weights.diversity * self.diversity
    }
}

/// Computes the five sub-scores of a candidate against the profile.
///
/// - artist_match: 1 when any credited artist is a favored artist.
/// - genre_match: share of the candidate's genre tags that are favored;
///   0 when the candidate has no tags.
/// - popularity: closeness to the profile's popularity midpoint.
/// - audio_match: inverted normalized Euclidean distance to the profile's
///   audio vector; 0 when the candidate has no feature record.
/// - diversity: 1 for fresh tracks, `known_penalty` for known ones.
pub fn sub_scores(candidate: &Candidate, profile: &TasteProfile, known_penalty: f64) -> SubScores {
    let artist_match = if candidate
        .artist_ids
        .iter()
        .any(|id| profile.artist_ids.contains(id))
    {
        1.0
    } else {
        0.0
    };

    let genre_match = if candidate.genres.is_empty() {
        0.0
    } else {
        let matching = candidate
            .genres
            .iter()
            .filter(|g| profile.genres.contains(*g))
            .count();
        matching as f64 / candidate.genres.len() as f64
    };

    let popularity =
        1.0 - (candidate.popularity as f64 - profile.popularity_midpoint).abs() / 100.0;

    // Both vectors are bounded, so the distance tops out at √5.
    let audio_match = match &candidate.audio {
        Some(audio) => (1.0 - audio.distance(&profile.audio) / 5f64.sqrt()).clamp(0.0, 1.0),
        None => 0.0,
    };

    let diversity = if candidate.known { known_penalty } else { 1.0 };

    SubScores {
        artist_match,
        genre_match,
        popularity,
        audio_match,
        diversity,
    }
}

/// Scores every candidate against the profile.
///
/// Pure and deterministic: the same profile, weights and candidates always
/// produce identical scores, and the output preserves candidate order.
pub fn score_candidates(
    candidates: Vec<Candidate>,
    profile: &TasteProfile,
    config: &TuneConfig,
) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|candidate| {
            let score = sub_scores(&candidate, profile, config.known_penalty)
                .weighted_total(&config.weights);
            ScoredCandidate { candidate, score }
        })
        .collect()
}
