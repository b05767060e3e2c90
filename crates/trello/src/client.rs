//! [`TrelloClient`]: the [`Client`] port over the Trello REST API.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `get_issue` | `GET /cards/{id}` |
//! | `delete_issue` | `DELETE /cards/{id}` |
//! | `mark_complete` | `PUT /cards/{id}` with `{"dueComplete": true}` |
//! | `get_issues` | `GET /boards/{board}/cards` (plus `GET /members/me/boards` without a default board) |
//! | `get_board` | `GET /boards/{id}` |
//! | `get_boards` | `GET /members/me/boards` |
//! | `get_members_on_card` | `GET /cards/{id}/members` |
//! | `get_member` | `GET /members/{id}` |
//!
//! Every request carries the API key and token as `key`/`token` query
//! parameters and is bounded by the configured timeout. Listings are a single
//! request each: Trello returns the full collection, and any cap is applied
//! client-side.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use tracker_api::{
    Board, BoardId, Client, Issue, IssueId, Listing, Member, MemberId, Result, TrackerError,
};

use crate::config::{TrelloConfig, TOKEN_FILE_NAME, TOKEN_VAR};
use crate::entities::{TrelloBoard, TrelloCard, TrelloMember};

/// Trello-backed [`Client`].
///
/// Holds only immutable configuration and a pooled HTTP client; cloning is
/// cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    config: TrelloConfig,
    interactive: bool,
}

impl TrelloClient {
    /// Builds a client from `config`.
    ///
    /// Credentials are not checked here; see [`TrelloClient::token`].
    pub fn new(config: TrelloConfig, interactive: bool) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TrackerError::Configuration {
            message: format!("invalid Trello base URL '{}': {e}", config.base_url),
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TrackerError::Configuration {
                message: format!("cannot build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            config,
            interactive,
        })
    }

    /// Builds a client from the process environment (see [`TrelloConfig::from_env`]).
    pub fn from_env(interactive: bool) -> Result<Self> {
        Self::new(TrelloConfig::from_env()?, interactive)
    }

    /// The access token.
    ///
    /// Fails with [`TrackerError::MissingCredential`] when no token was
    /// configured.
    pub fn token(&self) -> Result<&str> {
        self.config
            .token
            .as_deref()
            .ok_or_else(|| TrackerError::MissingCredential {
                name: format!(
                    "Trello token not set; set {TOKEN_VAR} or create {TOKEN_FILE_NAME} with a 'token' key"
                ),
            })
    }

    /// The application API key sent with every request.
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Board `get_issues` lists from, if one was configured.
    pub fn default_board_id(&self) -> Option<&BoardId> {
        self.config.default_board_id.as_ref()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TrackerError::Configuration {
                message: format!("Trello base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, segments: &[&str], body: Option<Value>) -> Result<Response> {
        let token = self.token()?;
        let url = self.endpoint(segments)?;
        let resource = url.path().to_string();
        debug!(%method, path = %resource, "sending Trello request");

        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .query(&[("key", self.config.api_key.as_str()), ("token", token)]);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            // The request URL carries the credentials; keep it out of logs and errors.
            let e = e.without_url();
            warn!(path = %resource, error = %e, "Trello request did not complete");
            TrackerError::RequestFailed {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        })?;

        check_status(resource, response).await
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let response = self.send(Method::GET, segments, None).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| TrackerError::InvalidResponse {
                message: format!("response body is not JSON: {e}"),
            })
    }

    async fn get_records(&self, segments: &[&str]) -> Result<Vec<Value>> {
        match self.get_json(segments).await? {
            Value::Array(records) => Ok(records),
            other => Err(TrackerError::InvalidResponse {
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    /// First board listed for the authenticated member, if any.
    async fn first_board(&self) -> Result<Option<BoardId>> {
        let boards = self.get_records(&["members", "me", "boards"]).await?;
        boards
            .first()
            .map(|record| TrelloBoard::from_api(record).map(|board| board.id().clone()))
            .transpose()
    }
}

async fn check_status(resource: String, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_else(|e| {
        debug!(path = %resource, error = %e.without_url(), "cannot read error response body");
        String::new()
    });
    warn!(path = %resource, status = status.as_u16(), "Trello request failed");
    if status == StatusCode::NOT_FOUND {
        return Err(TrackerError::NotFound { resource });
    }
    Err(TrackerError::RequestFailed {
        status: Some(status.as_u16()),
        message: if body.is_empty() {
            status.to_string()
        } else {
            body
        },
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Client for TrelloClient {
    #[instrument(skip_all, fields(issue_id = %issue_id))]
    async fn get_issue(&self, issue_id: &IssueId) -> Result<Box<dyn Issue>> {
        let record = self.get_json(&["cards", issue_id.as_str()]).await?;
        Ok(Box::new(TrelloCard::from_api(&record)?))
    }

    #[instrument(skip_all, fields(issue_id = %issue_id))]
    async fn delete_issue(&self, issue_id: &IssueId) -> Result<bool> {
        self.send(Method::DELETE, &["cards", issue_id.as_str()], None)
            .await?;
        Ok(true)
    }

    #[instrument(skip_all, fields(issue_id = %issue_id))]
    async fn mark_complete(&self, issue_id: &IssueId) -> Result<bool> {
        self.send(
            Method::PUT,
            &["cards", issue_id.as_str()],
            Some(serde_json::json!({ "dueComplete": true })),
        )
        .await?;
        Ok(true)
    }

    /// Lists up to `max_issues` cards from the default board.
    ///
    /// Without a configured default board, the first board Trello lists for
    /// the authenticated member is used. Trello's board order is the only
    /// tie-break; the choice is logged at `info` level. A member with no
    /// boards gets an empty listing rather than an error.
    #[instrument(skip(self))]
    async fn get_issues(&self, max_issues: usize) -> Result<Listing<Box<dyn Issue>>> {
        let board_id = match self.default_board_id() {
            Some(board_id) => board_id.clone(),
            None => match self.first_board().await? {
                Some(board_id) => {
                    info!(%board_id, "no default board configured; using the first board listed");
                    board_id
                }
                None => {
                    info!("no default board configured and no boards visible; no issues to list");
                    return Ok(Listing::empty());
                }
            },
        };

        let cards = self
            .get_records(&["boards", board_id.as_str(), "cards"])
            .await?;
        let issues = Listing::truncated(cards, max_issues)
            .map(|card| TrelloCard::from_api(&card).map(|c| Box::new(c) as Box<dyn Issue>))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = issues.len(), "listed issues");
        Ok(Listing::from(issues))
    }

    #[instrument(skip_all, fields(board_id = %board_id))]
    async fn get_board(&self, board_id: &BoardId) -> Result<Box<dyn Board>> {
        let record = self.get_json(&["boards", board_id.as_str()]).await?;
        Ok(Box::new(TrelloBoard::from_api(&record)?))
    }

    /// Lists every board of the authenticated member. Trello returns the
    /// whole collection in one response; there is no pagination.
    #[instrument(skip(self))]
    async fn get_boards(&self) -> Result<Listing<Box<dyn Board>>> {
        let boards = self
            .get_records(&["members", "me", "boards"])
            .await?
            .iter()
            .map(|record| TrelloBoard::from_api(record).map(|b| Box::new(b) as Box<dyn Board>))
            .collect::<Result<Vec<_>>>()?;
        Ok(Listing::from(boards))
    }

    #[instrument(skip_all, fields(issue_id = %issue_id))]
    async fn get_members_on_card(&self, issue_id: &IssueId) -> Result<Vec<Box<dyn Member>>> {
        self.get_records(&["cards", issue_id.as_str(), "members"])
            .await?
            .iter()
            .map(|record| TrelloMember::from_api(record).map(|m| Box::new(m) as Box<dyn Member>))
            .collect()
    }

    #[instrument(skip_all, fields(member_id = %member_id))]
    async fn get_member(&self, member_id: &MemberId) -> Result<Box<dyn Member>> {
        let record = self.get_json(&["members", member_id.as_str()]).await?;
        Ok(Box::new(TrelloMember::from_api(&record)?))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
