//! Vendor-neutral issue tracker contract.
//!
//! This crate defines what any backing issue tracker must provide: the entity
//! traits ([`Issue`], [`Board`], [`Member`]), the [`Client`] port, the
//! identifier newtypes, and the shared [`TrackerError`]. Backend crates (e.g.
//! `trello`) implement the traits; this crate never depends on them.
//!
//! ## Architectural Layer
//!
//! **Port definitions.** This crate has no I/O dependencies. It defines *what*
//! is needed; binding crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype entity identifiers (`IssueId`, `BoardId`, etc.) |
//! | [`types`] | Shared value types (`Timestamp`) |
//! | [`errors`] | [`TrackerError`] and the crate [`Result`] alias |
//! | [`entities`] | The [`Issue`], [`Board`] and [`Member`] traits |
//! | [`client`] | The [`Client`] port and the [`Listing`] sequence |
//! | [`registry`] | Process-wide client factory and the lookup functions |
//!
//! ## Binding a backend
//!
//! Until a backend registers itself every lookup fails with
//! [`TrackerError::NotImplemented`]:
//!
//! ```
//! use tracker_api::{get_client, ClientOptions, TrackerError};
//!
//! match get_client(ClientOptions::default()) {
//!     Err(TrackerError::NotImplemented { operation }) => assert_eq!(operation, "get_client"),
//!     _ => unreachable!("no backend is registered in this doctest"),
//! }
//! ```

pub mod client;
pub mod entities;
pub mod errors;
pub mod identifiers;
pub mod registry;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::{Client, Listing, DEFAULT_MAX_ISSUES};
pub use entities::{Board, Issue, Member};
pub use errors::{Result, TrackerError};
pub use identifiers::{BoardId, EmptyIdError, IssueId, ListId, MemberId};
pub use registry::{
    get_board, get_client, get_issue, get_member, is_registered, register_client_factory,
    unregister_client_factory, ClientFactory, ClientOptions,
};
pub use types::Timestamp;
