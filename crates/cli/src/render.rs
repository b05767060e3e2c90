//! Rendering of tracker entities for stdout.

use serde::Serialize;
use tracker_api::{Board, Issue, Member};

use crate::args::OutputFormat;

#[derive(Debug, Serialize)]
pub struct IssueView {
    pub id: String,
    pub title: String,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parsed due date in RFC 3339. A backend value that does not parse is
    /// left out, since [`Issue::due`] reports it as absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
}

impl From<&dyn Issue> for IssueView {
    fn from(issue: &dyn Issue) -> Self {
        Self {
            id: issue.id().to_string(),
            title: issue.title().to_string(),
            complete: issue.is_complete(),
            description: issue.description().map(str::to_string),
            due: issue.due().map(|d| d.to_string()),
            board_id: issue.board_id().map(|b| b.to_string()),
            list_id: issue.list_id().map(|l| l.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardView {
    pub id: String,
    pub name: String,
}

impl From<&dyn Board> for BoardView {
    fn from(board: &dyn Board) -> Self {
        Self {
            id: board.id().to_string(),
            name: board.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub id: String,
    pub username: Option<String>,
    pub confirmed: Option<bool>,
}

impl From<&dyn Member> for MemberView {
    fn from(member: &dyn Member) -> Self {
        Self {
            id: member.id().to_string(),
            username: member.username().map(str::to_string),
            confirmed: member.confirmed(),
        }
    }
}

/// Result of one command, ready to print.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Issues(Vec<IssueView>),
    Issue(IssueView),
    Boards(Vec<BoardView>),
    Board(BoardView),
    Members(Vec<MemberView>),
    Member(MemberView),
    Done { id: String, ok: bool },
}

impl Rendered {
    pub fn format(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(self.text()),
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Issues(issues) => issues.iter().map(issue_line).collect::<Vec<_>>().join("\n"),
            Self::Issue(issue) => issue_detail(issue),
            Self::Boards(boards) => boards.iter().map(board_line).collect::<Vec<_>>().join("\n"),
            Self::Board(board) => board_line(board),
            Self::Members(members) => members.iter().map(member_line).collect::<Vec<_>>().join("\n"),
            Self::Member(member) => member_line(member),
            Self::Done { id, ok } => format!("{id}: {}", if *ok { "ok" } else { "failed" }),
        }
    }
}

fn issue_line(issue: &IssueView) -> String {
    let mark = if issue.complete { 'x' } else { ' ' };
    format!("[{mark}] {}  {}", issue.id, issue.title)
}

fn issue_detail(issue: &IssueView) -> String {
    let mut lines = vec![issue_line(issue)];
    let optional = [
        ("due", &issue.due),
        ("board", &issue.board_id),
        ("list", &issue.list_id),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("    {label}: {value}"));
        }
    }
    if let Some(description) = &issue.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    lines.join("\n")
}

fn board_line(board: &BoardView) -> String {
    format!("{}  {}", board.id, board.name)
}

fn member_line(member: &MemberView) -> String {
    let username = member.username.as_deref().unwrap_or("-");
    let confirmed = match member.confirmed {
        Some(true) => "confirmed",
        Some(false) => "unconfirmed",
        None => "unknown",
    };
    format!("{}  {username}  ({confirmed})", member.id)
}
