use std::collections::HashSet;

use crate::types::{Artist, AudioFeatures, TrackObject};

use super::TasteError;

/// Audio feature vector of a track or of a whole listening history.
///
/// The five bounded fields live in [0,1] and drive the audio distance;
/// tempo is in BPM and only carried for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioVector {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub tempo: f64,
}

impl AudioVector {
    fn bounded(&self) -> [f64; 5] {
        [
            self.danceability,
            self.energy,
            self.valence,
            self.acousticness,
            self.instrumentalness,
        ]
    }

    /// Euclidean distance over the bounded fields, in [0, √5].
    pub fn distance(&self, other: &AudioVector) -> f64 {
        self.bounded()
            .iter()
            .zip(other.bounded().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<&AudioFeatures> for AudioVector {
    fn from(f: &AudioFeatures) -> Self {
        Self {
            danceability: f.danceability,
            energy: f.energy,
            valence: f.valence,
            acousticness: f.acousticness,
            instrumentalness: f.instrumentalness,
            tempo: f.tempo,
        }
    }
}

/// Aggregate representation of the user's music taste.
#[derive(Debug, Clone)]
pub struct TasteProfile {
    /// Ids of the user's top (or followed) artists.
    pub artist_ids: HashSet<String>,
    /// Union of the genre tags of those artists.
    pub genres: HashSet<String>,
    /// Per-field mean of the audio features across the top tracks.
    pub audio: AudioVector,
    /// Mean top-track popularity, in [0,100].
    pub popularity_midpoint: f64,
}

/// Condenses the fetched listening history into a [`TasteProfile`].
///
/// An empty artist list alone is tolerated (the artist and genre components
/// then score 0 for every candidate), but without top tracks or without any
/// feature records the popularity midpoint and audio baseline are undefined
/// and the build fails with [`TasteError::EmptyHistory`]. Validating here
/// keeps degenerate NaN vectors out of every downstream step.
pub fn build_profile(
    artists: &[Artist],
    tracks: &[TrackObject],
    features: &[AudioFeatures],
) -> Result<TasteProfile, TasteError> {
    if tracks.is_empty() || features.is_empty() {
        return Err(TasteError::EmptyHistory);
    }

    let artist_ids: HashSet<String> = artists.iter().map(|a| a.id.clone()).collect();
    let genres: HashSet<String> = artists
        .iter()
        .flat_map(|a| a.genres.iter().cloned())
        .collect();

    let n = features.len() as f64;
    let mut audio = AudioVector::default();
    for f in features {
        audio.danceability += f.danceability;
        audio.energy += f.energy;
        audio.valence += f.valence;
        audio.acousticness += f.acousticness;
        audio.instrumentalness += f.instrumentalness;
        audio.tempo += f.tempo;
    }
    audio.danceability /= n;
    audio.energy /= n;
    audio.valence /= n;
    audio.acousticness /= n;
    audio.instrumentalness /= n;
    audio.tempo /= n;

    let popularity_midpoint =
        tracks.iter().map(|t| t.popularity as f64).sum::<f64>() / tracks.len() as f64;

    Ok(TasteProfile {
        artist_ids,
        genres,
        audio,
        popularity_midpoint,
    })
}
