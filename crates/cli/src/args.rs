//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use tracker_api::{BoardId, IssueId, MemberId, DEFAULT_MAX_ISSUES};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Rendering of command results on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "trackctl")]
#[command(version)]
#[command(about = "Read and update issues on the configured issue tracker (Trello)")]
#[command(
    long_about = "Read and update issues on the configured issue tracker (Trello).\n\n\
    Credentials come from TRELLO_API_KEY and TRELLO_TOKEN (or token.json in the working \
    directory). TRELLO_BOARD_ID selects the board `issues` lists; without it the first \
    board of the authenticated member is used."
)]
pub struct Cli {
    /// Ask the backend for interactive behaviour (e.g. credential prompts)
    #[arg(long, global = true)]
    pub interactive: bool,

    /// Log format written to stderr; verbosity is controlled by RUST_LOG
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Result format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List issues on the default board
    Issues {
        /// Maximum number of issues to list
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ISSUES)]
        max: usize,
    },
    /// Show one issue
    Issue {
        #[arg(value_parser = parse_issue_id)]
        id: IssueId,
    },
    /// Mark an issue complete
    Complete {
        #[arg(value_parser = parse_issue_id)]
        id: IssueId,
    },
    /// Delete an issue
    Delete {
        #[arg(value_parser = parse_issue_id)]
        id: IssueId,
    },
    /// List every board visible to the authenticated member
    Boards,
    /// Show one board
    Board {
        #[arg(value_parser = parse_board_id)]
        id: BoardId,
    },
    /// List the members assigned to an issue
    Members {
        #[arg(value_parser = parse_issue_id)]
        issue: IssueId,
    },
    /// Show one member
    Member {
        #[arg(value_parser = parse_member_id)]
        id: MemberId,
    },
}

fn parse_issue_id(s: &str) -> Result<IssueId, String> {
    IssueId::new(s.trim()).ok_or_else(|| "cannot be empty".to_string())
}

fn parse_board_id(s: &str) -> Result<BoardId, String> {
    BoardId::new(s.trim()).ok_or_else(|| "cannot be empty".to_string())
}

fn parse_member_id(s: &str) -> Result<MemberId, String> {
    MemberId::new(s.trim()).ok_or_else(|| "cannot be empty".to_string())
}
