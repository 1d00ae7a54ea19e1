use std::{borrow::Cow, io};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is not set.")]
    MissingCredential(String),
    #[error("Failed to query rate limit: {0}.")]
    RateLimitQuery(#[source] github::client::Error),
    #[error("github client error: {0}")]
    Github(#[from] github::client::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(Cow<'static, str>),
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
