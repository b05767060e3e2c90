//! Trello cards, boards and members as tracker entities.
//!
//! Each type is built once, either from explicit field values or from a raw
//! Trello response record via `from_api`, and never changes afterwards.
//!
//! Mapping rules applied by `from_api`:
//!
//! - **Card**: complete when `isComplete` *or* `dueComplete` is true. Missing
//!   optional fields (and an empty `desc`) map to `None`; a missing `name`
//!   maps to an empty title.
//! - **Board**: a missing `name` maps to an empty string, not `None`.
//! - **Member**: `confirmed` is `None` only when the key is absent or null;
//!   an explicit `false` is kept.

use serde::Deserialize;
use serde_json::Value;
use tracker_api::{
    Board, BoardId, Issue, IssueId, ListId, Member, MemberId, Result, Timestamp, TrackerError,
};

fn decode<'a, T: Deserialize<'a>>(kind: &str, record: &'a Value) -> Result<T> {
    T::deserialize(record).map_err(|e| TrackerError::InvalidResponse {
        message: format!("malformed {kind} record: {e}"),
    })
}

fn missing_id(kind: &str) -> TrackerError {
    TrackerError::InvalidResponse {
        message: format!("{kind} record has no id"),
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    id: Option<String>,
    name: Option<String>,
    is_complete: Option<bool>,
    due_complete: Option<bool>,
    desc: Option<String>,
    due: Option<String>,
    id_board: Option<String>,
    id_list: Option<String>,
}

/// A Trello card exposed as an [`Issue`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrelloCard {
    id: IssueId,
    title: String,
    is_complete: bool,
    due_complete: bool,
    description: Option<String>,
    due: Option<String>,
    board_id: Option<BoardId>,
    list_id: Option<ListId>,
}

impl TrelloCard {
    /// Creates a card from its required fields. Optional fields start empty.
    pub fn new(id: IssueId, title: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id,
            title: title.into(),
            is_complete,
            due_complete: false,
            description: None,
            due: None,
            board_id: None,
            list_id: None,
        }
    }

    /// Sets the due-date completion flag. A completed due date also marks the
    /// card complete.
    pub fn with_due_complete(mut self, due_complete: bool) -> Self {
        self.due_complete = due_complete;
        self.is_complete |= due_complete;
        self
    }

    /// Sets the card description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw due date as Trello reports it (RFC 3339).
    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Sets the parent board.
    pub fn with_board(mut self, board_id: BoardId) -> Self {
        self.board_id = Some(board_id);
        self
    }

    /// Sets the parent list.
    pub fn with_list(mut self, list_id: ListId) -> Self {
        self.list_id = Some(list_id);
        self
    }

    /// Projects a Trello card record.
    pub fn from_api(record: &Value) -> Result<Self> {
        let card: CardRecord = decode("card", record)?;
        let id = card.id.and_then(IssueId::new).ok_or_else(|| missing_id("card"))?;
        let due_complete = card.due_complete.unwrap_or(false);

        Ok(Self {
            id,
            title: card.name.unwrap_or_default(),
            is_complete: card.is_complete.unwrap_or(false) || due_complete,
            due_complete,
            description: card.desc.filter(|d| !d.is_empty()),
            due: card.due,
            board_id: card.id_board.and_then(BoardId::new),
            list_id: card.id_list.and_then(ListId::new),
        })
    }

    /// Whether the card's due date has been marked complete.
    pub fn due_complete(&self) -> bool {
        self.due_complete
    }

    /// The due date exactly as Trello reported it.
    pub fn due_raw(&self) -> Option<&str> {
        self.due.as_deref()
    }
}

impl Issue for TrelloCard {
    fn id(&self) -> &IssueId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_complete(&self) -> bool {
        self.is_complete
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn due(&self) -> Option<Timestamp> {
        self.due.as_deref().and_then(Timestamp::parse_rfc3339)
    }

    fn board_id(&self) -> Option<&BoardId> {
        self.board_id.as_ref()
    }

    fn list_id(&self) -> Option<&ListId> {
        self.list_id.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct BoardRecord {
    id: Option<String>,
    name: Option<String>,
}

/// A Trello board exposed as a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrelloBoard {
    id: BoardId,
    name: String,
}

impl TrelloBoard {
    /// Creates a board from its id and name.
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Projects a Trello board record.
    pub fn from_api(record: &Value) -> Result<Self> {
        let board: BoardRecord = decode("board", record)?;
        let id = board.id.and_then(BoardId::new).ok_or_else(|| missing_id("board"))?;
        Ok(Self::new(id, board.name.unwrap_or_default()))
    }
}

impl Board for TrelloBoard {
    fn id(&self) -> &BoardId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberRecord {
    id: Option<String>,
    username: Option<String>,
    confirmed: Option<bool>,
    full_name: Option<String>,
}

/// A Trello member exposed as a [`Member`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrelloMember {
    id: MemberId,
    username: Option<String>,
    confirmed: Option<bool>,
    full_name: Option<String>,
}

impl TrelloMember {
    /// Creates a member. `None` means Trello did not report the field.
    pub fn new(id: MemberId, username: Option<String>, confirmed: Option<bool>) -> Self {
        Self {
            id,
            username,
            confirmed,
            full_name: None,
        }
    }

    /// Sets the display name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Projects a Trello member record.
    pub fn from_api(record: &Value) -> Result<Self> {
        let member: MemberRecord = decode("member", record)?;
        let id = member.id.and_then(MemberId::new).ok_or_else(|| missing_id("member"))?;
        Ok(Self {
            id,
            username: member.username,
            confirmed: member.confirmed,
            full_name: member.full_name,
        })
    }

    /// Display name (Trello `fullName`).
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }
}

impl Member for TrelloMember {
    fn id(&self) -> &MemberId {
        &self.id
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn confirmed(&self) -> Option<bool> {
        self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn card_constructor_reflects_inputs() {
        let card = TrelloCard::new(IssueId::new("c1").unwrap(), "T", false);
        assert_eq!(card.id().as_str(), "c1");
        assert_eq!(card.title(), "T");
        assert!(!card.is_complete());
        assert!(!card.due_complete());
    }

    #[test]
    fn card_builders_fill_optional_fields() {
        let card = TrelloCard::new(IssueId::new("c1").unwrap(), "T", false)
            .with_description("Details")
            .with_due("2024-12-31T23:59:59.000Z")
            .with_board(BoardId::new("b1").unwrap())
            .with_list(ListId::new("l1").unwrap());

        assert_eq!(card.description(), Some("Details"));
        assert_eq!(card.due(), Timestamp::parse_rfc3339("2024-12-31T23:59:59Z"));
        assert_eq!(card.board_id().map(BoardId::as_str), Some("b1"));
        assert_eq!(card.list_id().map(ListId::as_str), Some("l1"));
        assert_eq!(
            card,
            TrelloCard::from_api(&json!({
                "id": "c1",
                "name": "T",
                "desc": "Details",
                "due": "2024-12-31T23:59:59.000Z",
                "idBoard": "b1",
                "idList": "l1",
            }))
            .unwrap()
        );
    }

    #[test]
    fn due_complete_implies_complete() {
        let card = TrelloCard::new(IssueId::new("c1").unwrap(), "T", false).with_due_complete(true);
        assert!(card.is_complete());
        assert!(card.due_complete());
    }

    #[test]
    fn card_from_api_maps_every_field() {
        let card = TrelloCard::from_api(&json!({
            "id": "test_card_id",
            "name": "Test Card",
            "desc": "Test card description",
            "dueComplete": false,
            "due": "2024-12-31T23:59:59.000Z",
            "idBoard": "test_board_id",
            "idList": "test_list_id",
        }))
        .unwrap();

        assert_eq!(card.id().as_str(), "test_card_id");
        assert_eq!(card.title(), "Test Card");
        assert!(!card.is_complete());
        assert_eq!(card.description(), Some("Test card description"));
        assert_eq!(card.due_raw(), Some("2024-12-31T23:59:59.000Z"));
        assert_eq!(
            card.due(),
            Timestamp::parse_rfc3339("2024-12-31T23:59:59Z")
        );
        assert_eq!(card.board_id().map(BoardId::as_str), Some("test_board_id"));
        assert_eq!(card.list_id().map(ListId::as_str), Some("test_list_id"));
    }

    #[test]
    fn completion_is_either_flag() {
        let due_only = TrelloCard::from_api(&json!({
            "id": "c1", "name": "T", "isComplete": false, "dueComplete": true,
        }))
        .unwrap();
        assert!(due_only.is_complete());

        let generic_only = TrelloCard::from_api(&json!({
            "id": "c2", "name": "T", "isComplete": true, "dueComplete": false,
        }))
        .unwrap();
        assert!(generic_only.is_complete());
        assert!(!generic_only.due_complete());

        let neither = TrelloCard::from_api(&json!({"id": "c3", "name": "T"})).unwrap();
        assert!(!neither.is_complete());
    }

    #[test]
    fn absent_card_fields_are_none() {
        let card = TrelloCard::from_api(&json!({"id": "c1", "desc": "", "due": null})).unwrap();
        assert_eq!(card.title(), "");
        assert!(card.description().is_none());
        assert!(card.due().is_none());
        assert!(card.due_raw().is_none());
        assert!(card.board_id().is_none());
        assert!(card.list_id().is_none());
    }

    #[test]
    fn unparseable_due_keeps_raw_value() {
        let card = TrelloCard::from_api(&json!({"id": "c1", "due": "next week"})).unwrap();
        assert!(card.due().is_none());
        assert_eq!(card.due_raw(), Some("next week"));
    }

    #[test]
    fn records_without_id_are_rejected() {
        for record in [json!({"name": "T"}), json!({"id": ""}), json!(42)] {
            assert!(matches!(
                TrelloCard::from_api(&record),
                Err(TrackerError::InvalidResponse { .. })
            ));
        }
        assert!(TrelloBoard::from_api(&json!({"name": "B"})).is_err());
        assert!(TrelloMember::from_api(&json!({"username": "u"})).is_err());
    }

    #[test]
    fn board_name_defaults_to_empty_string() {
        let board = TrelloBoard::from_api(&json!({"id": "b1"})).unwrap();
        assert_eq!(board.id().as_str(), "b1");
        assert_eq!(board.name(), "");

        let board = TrelloBoard::from_api(&json!({"id": "b2", "name": "Test Board"})).unwrap();
        assert_eq!(board.name(), "Test Board");
    }

    #[test]
    fn member_confirmed_distinguishes_absent_from_false() {
        let absent = TrelloMember::from_api(&json!({"id": "m1"})).unwrap();
        assert_eq!(absent.confirmed(), None);
        assert_eq!(absent.username(), None);

        let confirmed = TrelloMember::from_api(&json!({"id": "m2", "confirmed": true})).unwrap();
        assert_eq!(confirmed.confirmed(), Some(true));

        let unconfirmed = TrelloMember::from_api(&json!({"id": "m3", "confirmed": false})).unwrap();
        assert_eq!(unconfirmed.confirmed(), Some(false));
    }

    #[test]
    fn member_from_api_maps_profile_fields() {
        let member = TrelloMember::from_api(&json!({
            "id": "test_member_id",
            "username": "testuser",
            "fullName": "Test User",
            "initials": "TU",
            "confirmed": true,
        }))
        .unwrap();

        assert_eq!(member.id().as_str(), "test_member_id");
        assert_eq!(member.username(), Some("testuser"));
        assert_eq!(member.full_name(), Some("Test User"));
        assert_eq!(member.confirmed(), Some(true));
    }

    #[test]
    fn member_full_name_is_optional() {
        let member = TrelloMember::new(MemberId::new("m1").unwrap(), Some("u".into()), Some(true));
        assert_eq!(member.full_name(), None);
        assert_eq!(member.with_full_name("User").full_name(), Some("User"));
    }

    #[test]
    fn username_and_confirmed_are_independent() {
        let member = TrelloMember::new(MemberId::new("m1").unwrap(), None, Some(false));
        assert_eq!(member.username(), None);
        assert_eq!(member.confirmed(), Some(false));

        let member = TrelloMember::new(MemberId::new("m2").unwrap(), Some("u".into()), None);
        assert_eq!(member.username(), Some("u"));
        assert_eq!(member.confirmed(), None);
    }
}
