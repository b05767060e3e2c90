//! Newtype entity identifiers.
//!
//! Every entity the tracker exposes has an opaque, backend-assigned string id.
//! Each kind of id is a distinct newtype so that an [`IssueId`] can never be
//! passed where a [`BoardId`] is expected, even though both are strings on the
//! wire.
//!
//! Ids are foreign references: holding one says nothing about whether the
//! entity still exists. They are resolved only when explicitly fetched through
//! a [`crate::Client`].

use serde::{Deserialize, Serialize};

/// An identifier was built from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and a
// TryFrom<String> that deserialization goes through.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdError)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies an issue (a Trello card, a GitHub issue, ...).
    IssueId
}

string_id! {
    /// Identifies a board: a named collection of issues.
    BoardId
}

string_id! {
    /// Identifies a list (column) within a board.
    ///
    /// Only backends that group issues into lists populate this.
    ListId
}

string_id! {
    /// Identifies a member: a user known to the backing tracker.
    MemberId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ids_are_rejected() {
        assert!(IssueId::new("").is_none());
        assert!(BoardId::new(String::new()).is_none());
        assert!(ListId::new("").is_none());
        assert!(MemberId::new("").is_none());
    }

    #[test]
    fn ids_preserve_their_value() {
        let id = IssueId::new("5f1c2a").unwrap();
        assert_eq!(id.as_str(), "5f1c2a");
        assert_eq!(id.to_string(), "5f1c2a");
    }

    #[test]
    fn deserialization_rejects_empty_ids() {
        assert!(serde_json::from_str::<IssueId>(r#""""#).is_err());
        assert!(serde_json::from_str::<BoardId>(r#""""#).is_err());
        assert!(serde_json::from_str::<ListId>(r#""""#).is_err());
        assert!(serde_json::from_str::<MemberId>(r#""""#).is_err());
    }

    #[test]
    fn ids_round_trip_as_plain_strings() {
        let id: MemberId = serde_json::from_str(r#""m1""#).unwrap();
        assert_eq!(id.as_str(), "m1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""m1""#);
        assert_eq!(IssueId::try_from(String::new()), Err(EmptyIdError));
    }
}
