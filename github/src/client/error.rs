//! Error type for Github Client

use serde::Deserialize;
use std::{borrow::Cow, fmt, io};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Message(Cow<'static, str>),

    #[error("`{0}` {1}")]
    GithubClientError(reqwest::StatusCode, GithubClientError),

    #[error("graphql error: {}", join_messages(.0))]
    GraphqlError(Vec<GraphqlError>),
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// Github Error Responses
// https://docs.github.com/en/rest/overview/resources-in-the-rest-api#client-errors
#[derive(Debug, Deserialize)]
pub struct GithubClientError {
    pub message: Option<String>,
    pub documentation_url: Option<String>,
}

impl GithubClientError {
    pub(super) fn from_message(message: String) -> Self {
        Self {
            message: Some(message),
            documentation_url: None,
        }
    }
}

impl fmt::Display for GithubClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => f.write_str(message),
            _ => f.write_str("no error message"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub locations: Option<Vec<GraphqlErrorLocation>>,
}

#[cfg(test)]
mod test {
    use super::{Error, GithubClientError, GraphqlError};

    #[test]
    fn graphql_error_lists_every_message() {
        let errors: Vec<GraphqlError> = serde_json::from_str(
            r#"[
                {"type": "NOT_FOUND", "message": "Could not resolve to a Repository"},
                {"message": "Field 'foo' doesn't exist on type 'Query'", "locations": [{"line": 1, "column": 3}]}
            ]"#,
        )
        .unwrap();

        let message = Error::GraphqlError(errors).to_string();
        assert_eq!(
            message,
            "graphql error: Could not resolve to a Repository; Field 'foo' doesn't exist on type 'Query'"
        );
    }

    #[test]
    fn client_error_shows_status_and_message() {
        let error: GithubClientError = serde_json::from_str(
            r#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com/graphql"}"#,
        )
        .unwrap();

        let message = Error::GithubClientError(reqwest::StatusCode::UNAUTHORIZED, error).to_string();
        assert_eq!(message, "`401 Unauthorized` Bad credentials");
    }
}
