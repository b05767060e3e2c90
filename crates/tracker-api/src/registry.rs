//! Process-wide client factory registry.
//!
//! The contract layer never depends on a concrete backend. Instead a binding
//! installs a [`ClientFactory`] here at start-up, and code that only knows
//! about this crate obtains clients through [`get_client`].
//!
//! Explicit composition is still the primary path: an application may build
//! a concrete client itself and hand it to consumers as `&dyn Client`. The
//! registry is the opt-in indirection for consumers that cannot take the
//! client as a parameter.
//!
//! ## Lifecycle
//!
//! - **init**: the composition root calls the binding's `register()` (which
//!   calls [`register_client_factory`]) before any lookup.
//! - **teardown**: [`unregister_client_factory`] empties the slot, returning
//!   lookups to their unbound state. Tests use it to reset global state.
//!
//! Registering again (the same or a different factory) replaces the slot and
//! is otherwise harmless.

use std::sync::{PoisonError, RwLock};

use tracing::{debug, instrument};

use crate::{Board, BoardId, Client, Issue, IssueId, Member, MemberId, Result, TrackerError};

/// Options passed to a [`ClientFactory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Whether the caller wants interactive behaviour (e.g. prompting for
    /// missing credentials). Bindings may ignore it.
    pub interactive: bool,
}

impl ClientOptions {
    /// Options for an interactive client.
    pub fn interactive() -> Self {
        Self { interactive: true }
    }
}

/// Constructor a binding registers to produce its concrete [`Client`].
pub type ClientFactory = fn(ClientOptions) -> Result<Box<dyn Client>>;

static CLIENT_FACTORY: RwLock<Option<ClientFactory>> = RwLock::new(None);

/// Installs `factory` as the process-wide client factory.
///
/// Replaces any previously registered factory.
pub fn register_client_factory(factory: ClientFactory) {
    let mut slot = CLIENT_FACTORY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        debug!("replacing registered client factory");
    }
    *slot = Some(factory);
}

/// Removes the registered factory, returning it if there was one.
pub fn unregister_client_factory() -> Option<ClientFactory> {
    CLIENT_FACTORY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// Returns `true` if a client factory is currently registered.
pub fn is_registered() -> bool {
    registered_factory().is_some()
}

fn registered_factory() -> Option<ClientFactory> {
    *CLIENT_FACTORY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Returns a client from the registered backend.
///
/// Fails with [`TrackerError::NotImplemented`] when no backend is registered.
#[instrument(skip_all, fields(interactive = options.interactive))]
pub fn get_client(options: ClientOptions) -> Result<Box<dyn Client>> {
    let factory = registered_factory().ok_or(TrackerError::NotImplemented {
        operation: "get_client",
    })?;
    factory(options)
}

fn bound_client(operation: &'static str) -> Result<Box<dyn Client>> {
    let factory = registered_factory().ok_or(TrackerError::NotImplemented { operation })?;
    factory(ClientOptions::default())
}

/// Looks up an issue through the registered backend.
///
/// Fails with [`TrackerError::NotImplemented`] when no backend is registered.
pub async fn get_issue(issue_id: &IssueId) -> Result<Box<dyn Issue>> {
    bound_client("get_issue")?.get_issue(issue_id).await
}

/// Looks up a board through the registered backend.
///
/// Fails with [`TrackerError::NotImplemented`] when no backend is registered.
pub async fn get_board(board_id: &BoardId) -> Result<Box<dyn Board>> {
    bound_client("get_board")?.get_board(board_id).await
}

/// Looks up a member through the registered backend.
///
/// Fails with [`TrackerError::NotImplemented`] when no backend is registered
/// or the backend does not support member lookup.
pub async fn get_member(member_id: &MemberId) -> Result<Box<dyn Member>> {
    bound_client("get_member")?.get_member(member_id).await
}
