//! Trello binding for the issue tracker contract.
//!
//! Implements [`tracker_api::Client`] and the entity traits over the Trello
//! REST API: issues are Trello cards, boards are boards, members are members.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, credential sourcing, request
//! formatting and response projection all live here. The [`tracker_api`]
//! crate sees only [`tracker_api::Client`].
//!
//! ## Wiring
//!
//! Either construct a [`TrelloClient`] directly and pass it to consumers, or
//! call [`register`] once at start-up so that [`tracker_api::get_client`]
//! produces Trello clients:
//!
//! ```no_run
//! # async fn demo() -> tracker_api::Result<()> {
//! trello::register();
//! let client = tracker_api::get_client(tracker_api::ClientOptions::default())?;
//! for issue in client.get_issues(tracker_api::DEFAULT_MAX_ISSUES).await? {
//!     println!("{} {}", issue.id(), issue.title());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod entities;

pub use client::TrelloClient;
pub use config::TrelloConfig;
pub use entities::{TrelloBoard, TrelloCard, TrelloMember};

use tracker_api::{Client, ClientOptions, Result};

/// [`tracker_api::ClientFactory`] producing a [`TrelloClient`] configured from
/// the process environment.
pub fn client_factory(options: ClientOptions) -> Result<Box<dyn Client>> {
    Ok(Box::new(TrelloClient::from_env(options.interactive)?))
}

/// Installs [`client_factory`] into the [`tracker_api`] registry.
///
/// Idempotent; must run before the first [`tracker_api::get_client`] call.
pub fn register() {
    tracker_api::register_client_factory(client_factory);
    tracing::debug!("registered Trello client factory");
}
