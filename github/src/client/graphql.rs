use crate::client::{Client, Error, GraphqlError, Response, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

/// `GraphqlClient` handles communication with the GitHub's GraphQL API.
///
/// GitHub API docs: https://docs.github.com/en/graphql
pub struct GraphqlClient<'a> {
    inner: &'a Client,
}

impl<'a> GraphqlClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// Perform a Query against GitHub's GraphQL Endpoint
    pub async fn query<Q: Serialize, R: DeserializeOwned>(&self, query: &Q) -> Result<Response<R>> {
        let response = self.inner.post("graphql")?.json(query).send().await?;
        let (rate, response) = self
            .inner
            .json::<GraphqlResponse<R>>(response)
            .await?
            .into_parts();

        match (response.data, response.errors) {
            (_, Some(errors)) if !errors.is_empty() => Err(Error::GraphqlError(errors)),
            (Some(data), _) => Ok(Response::new(rate, data)),
            (None, _) => Err("graphql response carried neither data nor errors".into()),
        }
    }

    /// Perform a Query generated by `graphql_client`
    #[cfg(feature = "graphql")]
    pub async fn run<Q: graphql_client::GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Response<Q::ResponseData>> {
        self.query(&Q::build_query(variables)).await
    }
}

#[cfg(test)]
mod test {
    use crate::client::{Client, Error};
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[derive(Debug, Deserialize)]
    struct Viewer {
        viewer: Login,
    }

    #[derive(Debug, Deserialize)]
    struct Login {
        login: String,
    }

    fn client(server: &MockServer) -> Client {
        Client::builder()
            .base_url(server.uri())
            .github_api_token("ghp_example123")
            .user_agent("graphql-test")
            .build()
            .unwrap()
    }

    fn viewer_query() -> serde_json::Value {
        json!({ "query": "query { viewer { login } }" })
    }

    #[tokio::test]
    async fn query_returns_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer ghp_example123"))
            .and(header("user-agent", "graphql-test"))
            .and(body_partial_json(viewer_query()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-RateLimit-Limit", "5000")
                    .insert_header("X-RateLimit-Remaining", "4998")
                    .set_body_json(json!({ "data": { "viewer": { "login": "octocat" } } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .graphql()
            .query::<_, Viewer>(&viewer_query())
            .await
            .unwrap();

        assert_eq!(response.rate().limit, 5000);
        assert_eq!(response.rate().remaining, 4998);
        assert_eq!(response.inner().viewer.login, "octocat");
    }

    #[tokio::test]
    async fn empty_error_list_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "viewer": { "login": "octocat" } },
                "errors": []
            })))
            .mount(&server)
            .await;

        let viewer = client(&server)
            .graphql()
            .query::<_, Viewer>(&viewer_query())
            .await
            .unwrap()
            .into_inner();

        assert_eq!(viewer.viewer.login, "octocat");
    }

    #[tokio::test]
    async fn query_errors_take_precedence_over_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User" }]
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .graphql()
            .query::<_, Viewer>(&viewer_query())
            .await
            .unwrap_err();

        match err {
            Error::GraphqlError(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].error_type.as_deref(), Some("NOT_FOUND"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client(&server)
            .graphql()
            .query::<_, Viewer>(&viewer_query())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Message(_)));
    }

    #[tokio::test]
    async fn unauthorized_keeps_github_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/graphql"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .graphql()
            .query::<_, Viewer>(&viewer_query())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "`401 Unauthorized` Bad credentials");
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client(&server)
            .graphql()
            .query::<_, Viewer>(&viewer_query())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "`502 Bad Gateway` Bad Gateway");
    }
}
