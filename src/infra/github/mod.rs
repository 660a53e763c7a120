// GitHub infra layer.
// - `graphql_client.rs` talks to the GitHub GraphQL API.

#[path = "graphql_client.rs"]
pub mod graphql_client;
