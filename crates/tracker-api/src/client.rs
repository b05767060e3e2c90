//! The [`Client`] port and the [`Listing`] sequence it returns.
//!
//! Every operation takes a valid id and resolves once the backend has
//! answered. There is no retry policy; retrying is the caller's
//! responsibility.

use async_trait::async_trait;

use crate::{Board, BoardId, Issue, IssueId, Member, MemberId, Result, TrackerError};

/// Default cap applied by callers that do not choose their own
/// `max_issues` for [`Client::get_issues`].
pub const DEFAULT_MAX_ISSUES: usize = 10;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A finite, forward-only sequence of entities produced by one listing call.
///
/// A `Listing` cannot be rewound. To observe the backend again, call the
/// listing operation again; each call yields a fresh, independent `Listing`.
#[derive(Debug)]
pub struct Listing<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> Listing<T> {
    /// An empty listing.
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// A listing over at most `cap` of `items`, keeping their original order.
    pub fn truncated(items: impl IntoIterator<Item = T>, cap: usize) -> Self {
        Self::from(items.into_iter().take(cap).collect::<Vec<_>>())
    }

    /// Returns `true` if no items remain.
    pub fn is_empty(&self) -> bool {
        self.items.len() == 0
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl<T> Iterator for Listing<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> ExactSizeIterator for Listing<T> {}

impl<T> std::iter::FusedIterator for Listing<T> {}

// ---------------------------------------------------------------------------
// Client port
// ---------------------------------------------------------------------------

/// The façade through which all reads and writes against a backing issue
/// tracker are performed.
///
/// Implementations hold only immutable-after-construction state (credentials,
/// defaults), so a single client may be shared across tasks for concurrent
/// reads.
#[async_trait]
pub trait Client: Send + Sync {
    /// Returns a single issue.
    ///
    /// Fails with [`TrackerError::NotFound`] if the id does not resolve.
    async fn get_issue(&self, issue_id: &IssueId) -> Result<Box<dyn Issue>>;

    /// Deletes an issue. Returns `true` on success.
    async fn delete_issue(&self, issue_id: &IssueId) -> Result<bool>;

    /// Marks an issue complete. Returns `true` on success.
    ///
    /// Idempotent: completing an already-complete issue also returns `true`.
    /// The in-memory [`Issue`] snapshots the caller holds are not updated.
    async fn mark_complete(&self, issue_id: &IssueId) -> Result<bool>;

    /// Returns up to `max_issues` issues in the order the backend lists them.
    ///
    /// See [`DEFAULT_MAX_ISSUES`] for the conventional cap.
    async fn get_issues(&self, max_issues: usize) -> Result<Listing<Box<dyn Issue>>>;

    /// Returns a single board.
    async fn get_board(&self, board_id: &BoardId) -> Result<Box<dyn Board>>;

    /// Returns every board visible to the authenticated identity.
    ///
    /// Unbounded: there is no cap argument. Bindings document whether their
    /// backend paginates internally.
    async fn get_boards(&self) -> Result<Listing<Box<dyn Board>>>;

    /// Returns the members assigned to an issue, in backend order.
    ///
    /// Unlike the issue and board listings this is fully materialised.
    async fn get_members_on_card(&self, issue_id: &IssueId) -> Result<Vec<Box<dyn Member>>>;

    /// Returns a single member.
    ///
    /// Backends without member lookup keep this default, which fails with
    /// [`TrackerError::NotImplemented`].
    async fn get_member(&self, member_id: &MemberId) -> Result<Box<dyn Member>> {
        let _ = member_id;
        Err(TrackerError::NotImplemented {
            operation: "get_member",
        })
    }

    /// Whether the caller asked for interactive behaviour (e.g. prompting for
    /// missing credentials). Bindings may ignore the flag.
    fn is_interactive(&self) -> bool {
        false
    }
}
