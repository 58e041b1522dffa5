use std::collections::HashSet;

use approx::assert_relative_eq;
use tastecli::taste::{
    AudioVector, Candidate, ScoredCandidate, TasteError, TasteProfile, TuneConfig, Weights,
    build_profile, score_candidates, select, sub_scores,
};
use tastecli::types::{Artist, AudioFeatures, TrackArtist, TrackObject};

// Helper function to create a test artist
fn create_test_artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("{}_name", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

// Helper function to create a test track
fn create_test_track(id: &str, artist_id: &str, popularity: u32) -> TrackObject {
    TrackObject {
        id: id.to_string(),
        name: format!("{}_name", id),
        uri: format!("spotify:track:{}", id),
        artists: vec![TrackArtist {
            id: artist_id.to_string(),
            name: format!("{}_name", artist_id),
        }],
        popularity,
    }
}

// Helper function to create a feature record with one uniform value
fn create_test_features(id: &str, value: f64, tempo: f64) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        danceability: value,
        energy: value,
        valence: value,
        acousticness: value,
        instrumentalness: value,
        tempo,
    }
}

fn uniform_vector(value: f64) -> AudioVector {
    AudioVector {
        danceability: value,
        energy: value,
        valence: value,
        acousticness: value,
        instrumentalness: value,
        tempo: 120.0,
    }
}

fn create_test_profile() -> TasteProfile {
    TasteProfile {
        artist_ids: HashSet::from(["artist_a".to_string()]),
        genres: HashSet::from(["pop".to_string()]),
        audio: uniform_vector(0.5),
        popularity_midpoint: 50.0,
    }
}

fn create_test_candidate(id: &str, artist_id: &str, genres: &[&str], popularity: u32) -> Candidate {
    Candidate {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        name: format!("{}_name", id),
        artist_ids: vec![artist_id.to_string()],
        artist_name: format!("{}_name", artist_id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        popularity,
        audio: Some(uniform_vector(0.5)),
        known: false,
    }
}

fn scored(id: &str, artist_id: &str, score: f64) -> ScoredCandidate {
    ScoredCandidate {
        candidate: create_test_candidate(id, artist_id, &["pop"], 50),
        score,
    }
}

#[test]
fn test_build_profile_means_and_unions() {
    let artists = vec![
        create_test_artist("artist_a", &["pop", "rock"]),
        create_test_artist("artist_b", &["rock", "jazz"]),
    ];
    let tracks = vec![
        create_test_track("t1", "artist_a", 40),
        create_test_track("t2", "artist_b", 60),
    ];
    let features = vec![
        create_test_features("t1", 0.2, 100.0),
        create_test_features("t2", 0.8, 140.0),
    ];

    let profile = build_profile(&artists, &tracks, &features).unwrap();

    assert_eq!(profile.artist_ids.len(), 2);
    assert!(profile.artist_ids.contains("artist_a"));
    assert!(profile.artist_ids.contains("artist_b"));

    // union of the artists' genre tags
    assert_eq!(profile.genres.len(), 3);
    assert!(profile.genres.contains("pop"));
    assert!(profile.genres.contains("rock"));
    assert!(profile.genres.contains("jazz"));

    assert_relative_eq!(profile.audio.danceability, 0.5);
    assert_relative_eq!(profile.audio.energy, 0.5);
    assert_relative_eq!(profile.audio.tempo, 120.0);
    assert_relative_eq!(profile.popularity_midpoint, 50.0);
}

#[test]
fn test_build_profile_empty_history_fails() {
    let artists = vec![create_test_artist("artist_a", &["pop"])];
    let tracks = vec![create_test_track("t1", "artist_a", 40)];
    let features = vec![create_test_features("t1", 0.5, 120.0)];

    // no tracks at all
    assert_eq!(
        build_profile(&artists, &[], &[]).unwrap_err(),
        TasteError::EmptyHistory
    );

    // tracks without any feature records
    assert_eq!(
        build_profile(&artists, &tracks, &[]).unwrap_err(),
        TasteError::EmptyHistory
    );

    // an empty artist list alone is tolerated
    assert!(build_profile(&[], &tracks, &features).is_ok());
}

#[test]
fn test_artist_match_is_binary() {
    let profile = create_test_profile();

    let favored = create_test_candidate("t1", "artist_a", &[], 50);
    let stranger = create_test_candidate("t2", "artist_x", &[], 50);

    assert_relative_eq!(sub_scores(&favored, &profile, 0.0).artist_match, 1.0);
    assert_relative_eq!(sub_scores(&stranger, &profile, 0.0).artist_match, 0.0);
}

#[test]
fn test_genre_match_is_overlap_share() {
    let profile = create_test_profile();

    let half = create_test_candidate("t1", "artist_x", &["pop", "metal"], 50);
    let none = create_test_candidate("t2", "artist_x", &[], 50);

    assert_relative_eq!(sub_scores(&half, &profile, 0.0).genre_match, 0.5);
    // no genre tags at all scores zero, not an error
    assert_relative_eq!(sub_scores(&none, &profile, 0.0).genre_match, 0.0);
}

#[test]
fn test_popularity_closeness() {
    let profile = create_test_profile();

    let at_midpoint = create_test_candidate("t1", "artist_x", &[], 50);
    let far_away = create_test_candidate("t2", "artist_x", &[], 100);

    assert_relative_eq!(sub_scores(&at_midpoint, &profile, 0.0).popularity, 1.0);
    assert_relative_eq!(sub_scores(&far_away, &profile, 0.0).popularity, 0.5);
}

#[test]
fn test_audio_match() {
    let profile = create_test_profile();

    let identical = create_test_candidate("t1", "artist_x", &[], 50);
    assert_relative_eq!(sub_scores(&identical, &profile, 0.0).audio_match, 1.0);

    let mut missing = create_test_candidate("t2", "artist_x", &[], 50);
    missing.audio = None;
    assert_relative_eq!(sub_scores(&missing, &profile, 0.0).audio_match, 0.0);

    // every bounded field off by 0.5 halves the score
    let mut distant = create_test_candidate("t3", "artist_x", &[], 50);
    distant.audio = Some(uniform_vector(1.0));
    assert_relative_eq!(
        sub_scores(&distant, &profile, 0.0).audio_match,
        0.5,
        epsilon = 1e-12
    );
}

#[test]
fn test_diversity_penalty() {
    let profile = create_test_profile();

    let fresh = create_test_candidate("t1", "artist_x", &[], 50);
    let mut known = create_test_candidate("t2", "artist_x", &[], 50);
    known.known = true;

    assert_relative_eq!(sub_scores(&fresh, &profile, 0.3).diversity, 1.0);
    assert_relative_eq!(sub_scores(&known, &profile, 0.3).diversity, 0.3);
    assert_relative_eq!(sub_scores(&known, &profile, 0.0).diversity, 0.0);
}

#[test]
fn test_full_match_scenario_score() {
    // A track matching the profile on every component under the default
    // weights {0.25, 0.25, 0.2, 0.4, 0.5} attains the weight sum, 1.65.
    let profile = create_test_profile();
    let config = TuneConfig::default();

    let candidate = create_test_candidate("t1", "artist_a", &["pop"], 50);
    let scored = score_candidates(vec![candidate], &profile, &config);

    assert_eq!(scored.len(), 1);
    assert_relative_eq!(scored[0].score, 1.65, epsilon = 1e-12);
}

#[test]
fn test_scores_are_not_renormalized() {
    // Doubling every weight doubles the score; nothing rescales the sum.
    let profile = create_test_profile();
    let candidate = create_test_candidate("t1", "artist_a", &["pop"], 50);

    let mut config = TuneConfig::default();
    config.weights = Weights {
        artist_match: 0.5,
        genre_match: 0.5,
        popularity: 0.4,
        audio_match: 0.8,
        diversity: 1.0,
    };

    let scored = score_candidates(vec![candidate], &profile, &config);
    assert_relative_eq!(scored[0].score, 3.3, epsilon = 1e-12);
}

#[test]
fn test_weight_monotonicity() {
    // Raising one weight must not shrink the lead of a track scoring
    // positively on that component over a track scoring zero on it.
    let profile = create_test_profile();

    let on_genre = create_test_candidate("t1", "artist_x", &["pop"], 50);
    let off_genre = create_test_candidate("t2", "artist_x", &[], 50);

    let lead = |genre_weight: f64| {
        let mut config = TuneConfig::default();
        config.weights.genre_match = genre_weight;
        let scored = score_candidates(
            vec![on_genre.clone(), off_genre.clone()],
            &profile,
            &config,
        );
        scored[0].score - scored[1].score
    };

    let mut previous = lead(0.0);
    for genre_weight in [0.25, 0.5, 1.0, 2.0] {
        let current = lead(genre_weight);
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let profile = create_test_profile();
    let config = TuneConfig::default();

    let candidates: Vec<Candidate> = (0..20)
        .map(|i| create_test_candidate(&format!("t{}", i), "artist_x", &["pop"], (i * 5) as u32))
        .collect();

    let first = score_candidates(candidates.clone(), &profile, &config);
    let second = score_candidates(candidates, &profile, &config);

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn test_selector_never_exceeds_size_and_never_duplicates() {
    let pool: Vec<ScoredCandidate> = (0..30)
        .map(|i| scored(&format!("t{}", i), &format!("a{}", i), i as f64))
        .collect();

    let picks = select(&pool, 7, None).unwrap();
    assert_eq!(picks.len(), 7);

    let ids: HashSet<&str> = picks.iter().map(|p| p.candidate.id.as_str()).collect();
    assert_eq!(ids.len(), picks.len());
}

#[test]
fn test_selector_returns_all_when_pool_equals_size() {
    let pool: Vec<ScoredCandidate> = (0..10)
        .map(|i| scored(&format!("t{}", i), "a", (10 - i) as f64))
        .collect();

    let picks = select(&pool, 10, None).unwrap();
    assert_eq!(picks.len(), 10);
}

#[test]
fn test_selector_takes_the_top_scores() {
    let pool: Vec<ScoredCandidate> = (0..100)
        .map(|i| scored(&format!("t{}", i), &format!("a{}", i), (i as f64) * 0.01))
        .collect();

    let picks = select(&pool, 5, None).unwrap();
    let ids: Vec<&str> = picks.iter().map(|p| p.candidate.id.as_str()).collect();
    assert_eq!(ids, vec!["t99", "t98", "t97", "t96", "t95"]);
}

#[test]
fn test_selector_breaks_ties_by_candidate_order() {
    let pool = vec![
        scored("t0", "a0", 1.0),
        scored("t1", "a1", 1.0),
        scored("t2", "a2", 1.0),
        scored("t3", "a3", 1.0),
    ];

    let picks = select(&pool, 2, None).unwrap();
    let ids: Vec<&str> = picks.iter().map(|p| p.candidate.id.as_str()).collect();
    assert_eq!(ids, vec!["t0", "t1"]);
}

#[test]
fn test_selector_empty_pool_policy() {
    // zero candidates with N = 0: empty selection, no error
    assert!(select(&[], 0, None).unwrap().is_empty());

    // zero candidates with N > 0: the pool shrinks the target, still no error
    assert!(select(&[], 5, None).unwrap().is_empty());

    // an undersized pool without a cap is also not an error
    let pool = vec![scored("t0", "a0", 1.0)];
    assert_eq!(select(&pool, 5, None).unwrap().len(), 1);
}

#[test]
fn test_selector_respects_per_artist_cap() {
    let pool = vec![
        scored("t0", "a", 1.0),
        scored("t1", "a", 0.9),
        scored("t2", "b", 0.8),
        scored("t3", "b", 0.7),
    ];

    let picks = select(&pool, 2, Some(1)).unwrap();
    let ids: Vec<&str> = picks.iter().map(|p| p.candidate.id.as_str()).collect();
    // the best track of each artist, in score order
    assert_eq!(ids, vec!["t0", "t2"]);
}

#[test]
fn test_selector_infeasible_cap_reports_constraint() {
    let pool = vec![
        scored("t0", "a", 1.0),
        scored("t1", "a", 0.9),
        scored("t2", "b", 0.8),
    ];

    let err = select(&pool, 3, Some(1)).unwrap_err();
    assert_eq!(
        err,
        TasteError::Infeasible {
            wanted: 3,
            selectable: 2,
            max_per_artist: 1,
        }
    );
}
