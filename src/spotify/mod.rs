//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API covering everything the playlist tuner
//! needs: authentication, listening-history retrieval, candidate discovery,
//! and playlist management. It abstracts away HTTP requests, OAuth flows and
//! API quirks behind a small set of async functions.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier/challenge generation,
//!   local callback server, browser launch, code-for-token exchange.
//! - [`user`] - The authenticated user's profile (`GET /me`).
//! - [`top`] - Listening history: top artists and tracks with offset
//!   pagination, followed artists as a cursor-paged fallback.
//! - [`search`] - Track search used to assemble the candidate pool.
//! - [`features`] - Batched audio-feature retrieval.
//! - [`artists`] - Batched artist lookup (genre tags for candidates).
//! - [`playlist`] - Playlist creation, duplicate checking, track adding.
//!
//! ## Error Handling
//!
//! All fetches return `Result` with `reqwest::Error` and share the same
//! resilience behavior: 502 Bad Gateway responses are retried after a short
//! delay, 429 Too Many Requests responses honor the `Retry-After` header
//! (with a warning once the requested delay becomes abnormal), and all other
//! errors are propagated to the caller, which reports which call failed.
//!
//! ## Authentication Strategy
//!
//! The PKCE flow avoids storing a client secret: a cryptographically random
//! code verifier is generated per flow, its SHA256 challenge is sent with
//! the authorization request, and the verifier accompanies the final token
//! exchange. Tokens are persisted by [`crate::management::TokenManager`] and
//! refreshed proactively before expiry.

pub mod artists;
pub mod auth;
pub mod features;
pub mod playlist;
pub mod search;
pub mod top;
pub mod user;
