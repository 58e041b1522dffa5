//! # API Module
//!
//! HTTP endpoints served by the temporary local server during the OAuth
//! authentication flow.
//!
//! - [`callback`] - Handles the OAuth redirect from Spotify's authorization
//!   server and completes the PKCE flow by exchanging the authorization code
//!   for an access token.
//! - [`health`] - Health check endpoint returning application status and
//!   version.
//!
//! The endpoints are built with [Axum](https://docs.rs/axum) and wired into
//! the router in [`crate::server`]. The callback shares its PKCE state with
//! the auth command through an `Arc<Mutex<Option<PkceToken>>>` extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
