//! Trello connection settings and credential sourcing.
//!
//! Sources, in order of precedence:
//!
//! | Setting | Source |
//! |---------|--------|
//! | API key | `TRELLO_API_KEY` (absent → empty string) |
//! | Token | `TRELLO_TOKEN`, else `token.json` (`{"token": "..."}`) in the working directory |
//! | Default board | `TRELLO_BOARD_ID` (absent or empty → none) |
//! | Base URL | `TRELLO_BASE_URL` (absent → [`DEFAULT_BASE_URL`]) |
//!
//! Nothing is validated here. A missing token only surfaces as
//! [`TrackerError::MissingCredential`] when a request needs it.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use tracker_api::{BoardId, Result, TrackerError};

/// Public Trello REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Wall-clock ceiling applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credential file looked up in the working directory when `TRELLO_TOKEN` is unset.
pub const TOKEN_FILE_NAME: &str = "token.json";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "TRELLO_API_KEY";
/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "TRELLO_TOKEN";
/// Environment variable naming the default board.
pub const BOARD_ID_VAR: &str = "TRELLO_BOARD_ID";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_VAR: &str = "TRELLO_BASE_URL";

/// Settings a [`crate::TrelloClient`] is built from.
#[derive(Clone)]
pub struct TrelloConfig {
    /// Root of the REST API; request paths are appended to it.
    pub base_url: String,
    /// Application API key. May be empty; Trello rejects such requests.
    pub api_key: String,
    /// User access token, if one was configured.
    pub token: Option<String>,
    /// Board used by `get_issues`. When `None` the first board listed for the
    /// authenticated member is used.
    pub default_board_id: Option<BoardId>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            token: None,
            default_board_id: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for TrelloConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloConfig")
            .field("base_url", &self.base_url)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("token_set", &self.token.is_some())
            .field("default_board_id", &self.default_board_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenFile {
    token: Option<String>,
}

impl TrelloConfig {
    /// Loads settings from the process environment and the current directory.
    pub fn from_env() -> Result<Self> {
        let dir = std::env::current_dir().map_err(|e| TrackerError::Configuration {
            message: format!("cannot determine the working directory: {e}"),
        })?;
        Self::from_sources(|name| std::env::var(name).ok(), &dir)
    }

    /// Loads settings using `lookup` for variables and `dir` for the token file.
    pub fn from_sources(lookup: impl Fn(&str) -> Option<String>, dir: &Path) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let token = match non_empty(TOKEN_VAR) {
            Some(token) => Some(token),
            None => load_token_file(dir)?,
        };

        Ok(Self {
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: lookup(API_KEY_VAR).unwrap_or_default(),
            token,
            default_board_id: lookup(BOARD_ID_VAR).and_then(BoardId::new),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Points the client at another API root, such as a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the access token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the board `get_issues` lists from.
    pub fn with_default_board(mut self, board_id: BoardId) -> Self {
        self.default_board_id = Some(board_id);
        self
    }

    /// Overrides [`DEFAULT_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn load_token_file(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(TOKEN_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }

    debug!(path = %path.display(), "reading token file");
    let contents = std::fs::read_to_string(&path).map_err(|e| TrackerError::Configuration {
        message: format!("cannot read {}: {e}", path.display()),
    })?;
    let file: TokenFile =
        serde_json::from_str(&contents).map_err(|e| TrackerError::Configuration {
            message: format!("{} is not a JSON object with a 'token' key: {e}", path.display()),
        })?;

    Ok(file.token.filter(|t| !t.is_empty()))
}
