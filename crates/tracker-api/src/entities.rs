//! Entity traits: the read-only capability sets every backend must provide.
//!
//! Entities are immutable value snapshots taken from a backend response. None
//! of the traits expose mutators; state changes go through [`crate::Client`]
//! operations and callers re-fetch to observe them.
//!
//! Bindings implement these traits on their own concrete structs. The traits
//! themselves cannot be instantiated.

use crate::{BoardId, IssueId, ListId, MemberId, Timestamp};

/// A unit of trackable work (a Trello card, a GitHub issue, ...).
///
/// `id`, `title` and `is_complete` are required. The remaining accessors are
/// optional capabilities: they default to `None`, which means "this backend or
/// this record has no value", never an empty placeholder.
pub trait Issue: std::fmt::Debug + Send + Sync {
    /// Stable unique key of the issue.
    fn id(&self) -> &IssueId;

    /// Display name of the issue.
    fn title(&self) -> &str;

    /// Whether the issue is complete.
    fn is_complete(&self) -> bool;

    /// Longer free-text description.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Due date.
    fn due(&self) -> Option<Timestamp> {
        None
    }

    /// Board the issue belongs to.
    fn board_id(&self) -> Option<&BoardId> {
        None
    }

    /// List (column) the issue sits in.
    fn list_id(&self) -> Option<&ListId> {
        None
    }
}

/// A named collection of issues.
///
/// Boards never embed their issues or members; those are discovered only
/// through [`crate::Client`] queries.
pub trait Board: std::fmt::Debug + Send + Sync {
    /// Stable unique key of the board.
    fn id(&self) -> &BoardId;

    /// Display name of the board.
    fn name(&self) -> &str;
}

/// A user identity associated with issues and boards.
///
/// `username` and `confirmed` are independently optional; a value for one
/// says nothing about the other.
pub trait Member: std::fmt::Debug + Send + Sync {
    /// Stable unique key of the member.
    fn id(&self) -> &MemberId;

    /// Login name, when the backend exposes it.
    fn username(&self) -> Option<&str>;

    /// Whether the member has confirmed their account, when known.
    fn confirmed(&self) -> Option<bool>;
}
