use tastecli::spotify::top::TimeRange;
use tastecli::types::{TrackArtist, TrackObject};
use tastecli::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artist_name: &str) -> TrackObject {
    TrackObject {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        artists: vec![TrackArtist {
            id: format!("{}_artist_id", id),
            name: artist_name.to_string(),
        }],
        popularity: 50,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_random_search_term() {
    for _ in 0..50 {
        let term = random_search_term();
        assert_eq!(term.chars().count(), 1);
        let c = term.chars().next().unwrap();
        assert!(c.is_ascii_lowercase() || c == '%');
    }
}

#[test]
fn test_random_search_offset_stays_in_bounds() {
    for _ in 0..50 {
        assert!(random_search_offset(950) <= 950);
    }

    // degenerate bound
    assert_eq!(random_search_offset(0), 0);
}

#[test]
fn test_remove_duplicate_tracks() {
    let mut tracks = vec![
        create_test_track("id1", "Track 1", "Artist A"),
        create_test_track("id2", "Track 2", "Artist B"),
        create_test_track("id1", "Track 1 Duplicate", "Artist A"), // Duplicate
        create_test_track("id3", "Track 3", "Artist C"),
    ];

    remove_duplicate_tracks(&mut tracks);

    // Should have 3 unique tracks
    assert_eq!(tracks.len(), 3);

    // Should contain the first occurrence of each unique ID
    let ids: Vec<&String> = tracks.iter().map(|t| &t.id).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
}

#[test]
fn test_time_range_display() {
    assert_eq!(TimeRange::Short.to_string(), "short_term");
    assert_eq!(TimeRange::Medium.to_string(), "medium_term");
    assert_eq!(TimeRange::Long.to_string(), "long_term");
}

#[test]
fn test_time_range_fallback_order() {
    assert_eq!(
        TimeRange::ALL,
        [TimeRange::Short, TimeRange::Medium, TimeRange::Long]
    );
}
