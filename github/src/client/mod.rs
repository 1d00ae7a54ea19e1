use log::debug;
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

mod error;
mod graphql;
mod rate_limit;

pub use error::{Error, GithubClientError, GraphqlError, GraphqlErrorLocation, Result};
pub use graphql::GraphqlClient;
pub use rate_limit::Rate;

// Constants
const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const HEADER_RATE_LIMIT: &str = "X-RateLimit-Limit";
const HEADER_RATE_REMAINING: &str = "X-RateLimit-Remaining";
const HEADER_RATE_RESET: &str = "X-RateLimit-Reset";

#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    github_api_token: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            github_api_token: None,
            timeout: None,
        }
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn github_api_token<S: Into<String>>(mut self, github_api_token: S) -> Self {
        self.github_api_token = Some(github_api_token.into());
        self
    }

    /// Timeout applied to every request, from connecting until the body has been read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());

        let mut client_builder = ReqwestClient::builder().user_agent(&user_agent);

        if let Some(token) = &self.github_api_token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| "github api token is not a valid header value")?;
            value.set_sensitive(true);

            let mut headers = header::HeaderMap::new();
            headers.insert(header::AUTHORIZATION, value);
            client_builder = client_builder.default_headers(headers);
        }

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Client {
            base_url,
            user_agent,
            client,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded response body together with the rate limit reported in its headers.
#[derive(Debug)]
pub struct Response<T> {
    rate: Rate,
    inner: T,
}

impl<T> Response<T> {
    pub(crate) fn new(rate: Rate, inner: T) -> Self {
        Self { rate, inner }
    }

    pub fn rate(&self) -> &Rate {
        &self.rate
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (Rate, T) {
        (self.rate, self.inner)
    }
}

#[derive(Debug)]
pub struct Client {
    /// Base URL to use for API requests. Defaults to the public GitHub API,
    /// but can be overridden for use with GitHub Enterprise. Always
    /// terminated with a trailing slash.
    base_url: Url,

    /// User agent string sent when communicating with GitHub APIs
    user_agent: String,

    /// Client used to make http requests, carrying the auth header
    client: ReqwestClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn post(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::POST, path)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        Ok(self.client.request(method, url))
    }

    // Process a response recieved from Github. Non-success statuses are turned into errors
    // carrying whatever Github put in the body, otherwise the json payload is deserialized.
    async fn json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<Response<T>> {
        debug!("Github Response: {:#?}", response);

        let status = response.status();
        let rate = Rate::from_headers(response.headers());
        debug!(
            "Github rate limit: {} of {} remaining, reset at {}",
            rate.remaining, rate.limit, rate.reset
        );

        let payload = response.text().await?;

        if !status.is_success() {
            let error = serde_json::from_str(&payload)
                .unwrap_or_else(|_| GithubClientError::from_message(payload));
            return Err(Error::GithubClientError(status, error));
        }

        Ok(Response::new(rate, serde_json::from_str(&payload)?))
    }

    pub fn graphql(&self) -> GraphqlClient {
        GraphqlClient::new(self)
    }
}
