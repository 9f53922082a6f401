//! # redcollect
//!
//! Pulls the top posts of a subreddit, plus the first few top-level comments
//! of each, into plain records that can be inspected or exported as JSON.
//!
//! ## Architecture
//!
//! ```text
//! Credentials → RedditApi (session) → ItemPager → comments → Normalizer → ItemRecord → export
//! ```
//!
//! The run is strictly sequential and fails fast: the first auth, network or
//! rate-limit error ends it without writing anything.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDDIT_CLIENT_ID=... REDDIT_CLIENT_SECRET=...
//!
//! # Check credentials
//! redcollect auth
//!
//! # Top 10 posts of r/diy this month, 5 comments each, saved as JSON
//! redcollect collect -s diy -t month -o reddit-test-data.json
//!
//! # Titles of r/test's hot listing
//! redcollect hot
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config,
/// credentials, the API client and the throttle.
pub mod app;

/// Remote API access.
///
/// - [`RedditApi`](api::RedditApi): Async trait the collector talks to
/// - [`HttpApi`](api::http::HttpApi): reqwest-based OAuth client
/// - [`FixtureApi`](api::fixture::FixtureApi): Offline stand-in backed by a JSON file
pub mod api;

/// Command-line interface using clap.
///
/// - `collect` - Collect posts and comments, optionally export JSON
/// - `hot` - List hot post titles
/// - `auth` - Check credentials
pub mod cli;

/// The collection workflow: paging, comment expansion, throttling.
pub mod collector;

/// Configuration file and environment credentials.
pub mod config;

/// Core domain models.
///
/// - [`ItemRecord`](domain::ItemRecord): A post with its comments
/// - [`CommentRecord`](domain::CommentRecord): A top-level reply
/// - [`TimeRange`](domain::TimeRange) and [`Sort`](domain::Sort): Listing order
pub mod domain;

/// Deterministic JSON export.
pub mod export;

/// Raw API bodies to domain records.
pub mod normalizer;

/// Pacing between items.
pub mod throttle;
