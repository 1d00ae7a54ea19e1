use graphql_client::GraphQLQuery;

type DateTime = chrono::DateTime<chrono::Utc>;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "src/graphql/github-schema.graphql",
    query_path = "src/graphql/rate_limit.graphql",
    response_derives = "Debug"
)]
pub struct RateLimitQuery;

impl From<rate_limit_query::RateLimitQueryRateLimit> for super::RateLimit {
    fn from(rate_limit: rate_limit_query::RateLimitQueryRateLimit) -> Self {
        let rate_limit_query::RateLimitQueryRateLimit {
            cost,
            limit,
            remaining,
            reset_at,
        } = rate_limit;

        Self {
            cost,
            limit,
            remaining,
            reset_at,
        }
    }
}
