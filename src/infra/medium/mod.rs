// Medium infra layer.
// - `feed_client.rs` talks to the rss2json feed bridge.

#[path = "feed_client.rs"]
pub mod feed_client;
