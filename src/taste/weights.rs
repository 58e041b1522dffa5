/// Coefficients of the five scoring components.
///
/// Every coefficient is a non-negative factor applied to a sub-score in
/// [0,1]. The set of components is fixed; the values are configurable per
/// run. The weights are used as given: the sum need not equal 1 and no
/// normalization is applied, so total scores scale with the weight sum.
///
/// Rough tuning guide: raise `artist_match`/`genre_match` for safe,
/// familiar playlists; raise `diversity` and lower `popularity` for
/// exploration; raise `audio_match` for mood-consistent playlists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub artist_match: f64,
    pub genre_match: f64,
    pub popularity: f64,
    pub audio_match: f64,
    pub diversity: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            artist_match: 0.25,
            genre_match: 0.25,
            popularity: 0.2,
            audio_match: 0.4,
            diversity: 0.5,
        }
    }
}

/// Immutable per-run configuration of the tune pipeline.
///
/// Built once from CLI flags and passed into the scorer and selector.
#[derive(Debug, Clone)]
pub struct TuneConfig {
    /// Desired playlist length N; the selection never exceeds it.
    pub playlist_size: usize,
    /// How many candidate tracks to gather before scoring.
    pub candidate_pool_size: usize,
    /// Optional cap on tracks per primary artist in the selection.
    pub max_per_artist: Option<usize>,
    /// Diversity sub-score assigned to tracks already in the user's top
    /// history (fresh tracks always score 1.0 on diversity).
    pub known_penalty: f64,
    pub weights: Weights,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            playlist_size: 20,
            candidate_pool_size: 100,
            max_per_artist: None,
            known_penalty: 0.0,
            weights: Weights::default(),
        }
    }
}
