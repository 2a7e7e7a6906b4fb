//! # v2ex-tui
//!
//! A terminal browser for the V2EX forum.
//!
//! ## Architecture
//!
//! Every page goes through the same pipeline:
//!
//! ```text
//! Fetcher → Extractor → Threader → TUI
//! ```
//!
//! - [`fetcher`]: HTTP client that retrieves raw page markup
//! - [`extractor`]: CSS-selector extraction into domain records
//! - [`threader`]: Per-reply counts of incoming `@mentions`
//! - [`tui`]: Two-view terminal interface built with ratatui
//!
//! The TUI never blocks on the network. Fetches run as tokio tasks and
//! report back over a channel; results belonging to a view the user has
//! already left are discarded.
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`clipboard`]: System clipboard access
//! - [`config`]: User configuration
//! - [`domain`]: Topic and reply records

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// extractor and clipboard.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Clipboard writes behind a trait, backed by arboard.
pub mod clipboard;

/// Configuration management for the TUI.
///
/// Loads from `~/.config/v2ex-tui/config.toml`, supporting:
/// - Network settings (base URL, tab, proxy, timeout)
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`TopicSummary`](domain::TopicSummary): One row of the topic list
/// - [`TopicDetail`](domain::TopicDetail): A topic page with its replies
/// - [`Reply`](domain::Reply): One reply, with mention and reply count
pub mod domain;

/// Page markup to domain records.
pub mod extractor;

/// Raw page retrieval.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for markup fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Reply threading by `@mention`.
pub mod threader;

/// Terminal user interface.
///
/// Two views, a topic list and a topic detail, plus a one-line status bar.
///
/// Keybindings: j/k navigate, Enter opens, Backspace goes back, f copies
/// the topic URL, o opens it in the browser, r refreshes, m toggles mouse
/// capture, q quits.
pub mod tui;

#[cfg(test)]
mod test_support;
