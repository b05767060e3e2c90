//! `trackctl` entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments**: see [`args::Cli`].
//! 2. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter` (`RUST_LOG`, default `warn`) and a text or JSON layer on
//!    stderr. All `tracing` spans and events emitted by the workspace crates
//!    flow through it.
//! 3. **Bind the backend**: register the Trello factory with the contract
//!    layer and obtain a `dyn Client` through [`tracker_api::get_client`].
//! 4. **Dispatch**: run the selected command and print the result.

mod args;
mod render;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracker_api::{Client, ClientOptions};

use crate::args::{Cli, Command, LogFormat};
use crate::render::{BoardView, IssueView, MemberView, Rendered};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

async fn run(client: &dyn Client, command: &Command) -> anyhow::Result<Rendered> {
    let rendered = match command {
        Command::Issues { max } => Rendered::Issues(
            client
                .get_issues(*max)
                .await
                .context("cannot list issues")?
                .map(|issue| IssueView::from(&*issue))
                .collect(),
        ),
        Command::Issue { id } => {
            let issue = client
                .get_issue(id)
                .await
                .with_context(|| format!("cannot fetch issue {id}"))?;
            Rendered::Issue(IssueView::from(&*issue))
        }
        Command::Complete { id } => Rendered::Done {
            id: id.to_string(),
            ok: client
                .mark_complete(id)
                .await
                .with_context(|| format!("cannot mark issue {id} complete"))?,
        },
        Command::Delete { id } => Rendered::Done {
            id: id.to_string(),
            ok: client
                .delete_issue(id)
                .await
                .with_context(|| format!("cannot delete issue {id}"))?,
        },
        Command::Boards => Rendered::Boards(
            client
                .get_boards()
                .await
                .context("cannot list boards")?
                .map(|board| BoardView::from(&*board))
                .collect(),
        ),
        Command::Board { id } => {
            let board = client
                .get_board(id)
                .await
                .with_context(|| format!("cannot fetch board {id}"))?;
            Rendered::Board(BoardView::from(&*board))
        }
        Command::Members { issue } => Rendered::Members(
            client
                .get_members_on_card(issue)
                .await
                .with_context(|| format!("cannot list members of issue {issue}"))?
                .iter()
                .map(|member| MemberView::from(&**member))
                .collect(),
        ),
        Command::Member { id } => {
            let member = client
                .get_member(id)
                .await
                .with_context(|| format!("cannot fetch member {id}"))?;
            Rendered::Member(MemberView::from(&*member))
        }
    };
    Ok(rendered)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    trello::register();
    let client = tracker_api::get_client(ClientOptions {
        interactive: cli.interactive,
    })
    .context("cannot construct a tracker client")?;

    let rendered = run(&*client, &cli.command).await?;
    let output = rendered
        .format(cli.output)
        .context("cannot render command output")?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tracker_api::{
        Board, BoardId, Issue, IssueId, Listing, Member, MemberId, Result, TrackerError,
    };

    use super::*;

    #[derive(Debug)]
    struct FakeIssue(IssueId);

    impl Issue for FakeIssue {
        fn id(&self) -> &IssueId {
            &self.0
        }

        fn title(&self) -> &str {
            "fake"
        }

        fn is_complete(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct FakeClient {
        completions: AtomicUsize,
    }

    #[async_trait]
    impl Client for FakeClient {
        async fn get_issue(&self, issue_id: &IssueId) -> Result<Box<dyn Issue>> {
            Err(TrackerError::NotFound {
                resource: issue_id.to_string(),
            })
        }

        async fn delete_issue(&self, _issue_id: &IssueId) -> Result<bool> {
            Ok(true)
        }

        async fn mark_complete(&self, _issue_id: &IssueId) -> Result<bool> {
            self.completions.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn get_issues(&self, max_issues: usize) -> Result<Listing<Box<dyn Issue>>> {
            let all = ["a", "b", "c"]
                .into_iter()
                .map(|id| Box::new(FakeIssue(IssueId::new(id).unwrap())) as Box<dyn Issue>);
            Ok(Listing::truncated(all, max_issues))
        }

        async fn get_board(&self, _board_id: &BoardId) -> Result<Box<dyn Board>> {
            Err(TrackerError::NotImplemented {
                operation: "get_board",
            })
        }

        async fn get_boards(&self) -> Result<Listing<Box<dyn Board>>> {
            Ok(Listing::empty())
        }

        async fn get_members_on_card(&self, _issue_id: &IssueId) -> Result<Vec<Box<dyn Member>>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn issues_command_respects_the_cap() {
        let client = FakeClient::default();
        let rendered = run(&client, &Command::Issues { max: 2 }).await.unwrap();
        match rendered {
            Rendered::Issues(issues) => {
                let ids: Vec<_> = issues.iter().map(|i| i.id.as_str()).collect();
                assert_eq!(ids, ["a", "b"]);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_command_reports_success() {
        let client = FakeClient::default();
        let command = Command::Complete {
            id: IssueId::new("a").unwrap(),
        };
        let rendered = run(&client, &command).await.unwrap();
        assert!(matches!(rendered, Rendered::Done { ok: true, .. }));
        assert_eq!(client.completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_carry_context_and_source() {
        let client = FakeClient::default();
        let command = Command::Issue {
            id: IssueId::new("missing").unwrap(),
        };
        let err = run(&client, &command).await.unwrap_err();
        assert_eq!(err.to_string(), "cannot fetch issue missing");
        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn member_lookup_falls_back_to_not_implemented() {
        let client = FakeClient::default();
        let command = Command::Member {
            id: MemberId::new("m1").unwrap(),
        };
        let err = run(&client, &command).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::NotImplemented { operation: "get_member" })
        ));
    }
}
