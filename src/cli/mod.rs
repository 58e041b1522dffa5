//! # CLI Module
//!
//! User-facing command implementations. Each command coordinates the
//! Spotify client, the token management and the taste kernel, and owns all
//! user interaction: progress feedback, tables, and the status macros.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth 2.0 PKCE authentication flow
//! - [`profile`] - Builds and displays the user's taste profile
//! - [`tune`] - The full pipeline: fetch history, build the profile, gather
//!   and score candidates, select the best subset and create the playlist
//!
//! ## Error Handling Philosophy
//!
//! Fatal conditions (missing token, empty listening history, infeasible
//! selection, failed API calls) are reported through the `error!` macro,
//! which names the failing step and exits with code 1. Recoverable hiccups
//! (a failed search page, a skipped feature batch) are warnings and the run
//! continues.

mod auth;
mod profile;
mod tune;

pub use auth::auth;
pub use profile::profile;
pub use tune::tune;
