//! # Taste Model Module
//!
//! The computational core of the playlist tuner, independent of any HTTP
//! concerns and fully deterministic. Three steps run once per tune:
//!
//! 1. [`profile`] - condenses the fetched listening history into a
//!    [`TasteProfile`]: favored artists, favored genres, a mean audio
//!    feature vector and a popularity midpoint.
//! 2. [`score`] - rates every [`Candidate`] against the profile with five
//!    weighted sub-scores, each normalized into [0,1].
//! 3. [`select`] - picks the subset of candidates maximizing total score
//!    under the playlist-size constraint and an optional per-artist cap.
//!
//! Weights are carried in an immutable [`TuneConfig`] built from CLI flags;
//! they are used exactly as given and never renormalized, so total scores
//! are an unbounded weighted combination of the five components.

mod error;
mod profile;
mod score;
mod select;
mod weights;

pub use error::TasteError;
pub use profile::{AudioVector, TasteProfile, build_profile};
pub use score::{Candidate, ScoredCandidate, SubScores, score_candidates, sub_scores};
pub use select::select;
pub use weights::{TuneConfig, Weights};
