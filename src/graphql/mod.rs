//! Authenticated client for Github's v4 GraphQL API
//!
//! `github-schema.graphql` is a subset of the schema sourced from
//! [here](https://docs.github.com/en/graphql/overview/public-schema)
//!
//! [Github's v4 API Explorer](https://docs.github.com/en/graphql/overview/explorer)
//! [Github's v4 API Docs](https://docs.github.com/en/graphql)

use crate::{Action, Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use graphql_client::GraphQLQuery;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

mod query;

use query::{rate_limit_query, RateLimitQuery};

/// Rate limit status of the authenticated user, as reported by the `rateLimit` query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimit {
    pub cost: i64,
    pub limit: i64,
    pub remaining: i64,
    pub reset_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    /// Base URL of the Github API, `https://api.github.com/` when unset
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// Github GraphQL client authenticated with a token taken from the Actions environment.
#[derive(Debug)]
pub struct Client<'a> {
    inner: github::Client,
    action: &'a Action,
}

impl<'a> Client<'a> {
    /// Builds a client authenticated with the token found in the environment variable
    /// `token_var` and checks that it can make queries.
    ///
    /// Any failure is reported to the runner as an error and returned, the caller is expected
    /// to stop the job.
    pub async fn new(action: &'a Action, token_var: &str) -> Result<Client<'a>> {
        Self::with_options(action, token_var, &ClientOptions::default()).await
    }

    pub async fn with_options(
        action: &'a Action,
        token_var: &str,
        options: &ClientOptions,
    ) -> Result<Client<'a>> {
        let token = action.getenv(token_var);
        if token.is_empty() {
            return abort(action, Error::MissingCredential(token_var.to_owned()));
        }

        let mut builder = github::Client::builder()
            .github_api_token(token)
            .user_agent(action.user_agent());
        if let Some(api_url) = &options.api_url {
            builder = builder.base_url(api_url.as_str());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = match builder.build() {
            Ok(inner) => inner,
            Err(e) => return abort(action, Error::RateLimitQuery(e)),
        };
        debug!("querying Github at {}", inner.base_url());

        let client = Self { inner, action };

        // check that the client is able to make queries
        let rate_limit = match client.rate_limit().await {
            Ok(rate_limit) => rate_limit,
            Err(e) => return abort(action, e),
        };

        action.debug(format_args!(
            "Rate limit remaining: {}, reset at: {}.",
            rate_limit.remaining,
            rate_limit.reset_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));

        Ok(client)
    }

    pub fn inner(&self) -> &github::Client {
        &self.inner
    }

    pub fn action(&self) -> &'a Action {
        self.action
    }

    /// Perform an arbitrary query, returning its `data`
    pub async fn query<Q: Serialize, R: DeserializeOwned>(&self, query: &Q) -> Result<R> {
        Ok(self.inner.graphql().query(query).await?.into_inner())
    }

    /// Perform a query generated by `graphql_client`
    pub async fn run<Q: GraphQLQuery>(&self, variables: Q::Variables) -> Result<Q::ResponseData> {
        Ok(self.inner.graphql().run::<Q>(variables).await?.into_inner())
    }

    /// Query the current rate limit status
    pub async fn rate_limit(&self) -> Result<RateLimit> {
        let response = self
            .inner
            .graphql()
            .run::<RateLimitQuery>(rate_limit_query::Variables)
            .await
            .map_err(Error::RateLimitQuery)?;

        response
            .into_inner()
            .rate_limit
            .map(Into::into)
            .ok_or_else(|| Error::RateLimitQuery("rateLimit is missing from the response".into()))
    }
}

fn abort<T>(action: &Action, error: Error) -> Result<T> {
    action.error(&error);
    Err(error)
}
