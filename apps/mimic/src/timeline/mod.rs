//! Content source — resolves handles and lists original posts.
//!
//! All content-source HTTP goes through a `TimelineApi`. The status checks and
//! body decoding live in `fetcher`, so they are exercised by tests with a stub.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

pub mod fetcher;
pub mod models;

pub use fetcher::{fetch_posts, FetchWindow};
pub use models::PostCollection;

pub const DEFAULT_TIMELINE_API_BASE: &str = "https://api.twitter.com/2";

/// Status and raw body of one content-source response.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Query for the posts listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineQuery {
    pub max_results: u32,
}

impl TimelineQuery {
    /// Query parameters: creation time, referenced-post expansion, media URLs,
    /// replies and reposts excluded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("tweet.fields", "created_at".to_string()),
            ("max_results", self.max_results.to_string()),
            ("expansions", "referenced_tweets.id".to_string()),
            ("media.fields", "url".to_string()),
            ("exclude", "replies,retweets".to_string()),
        ]
    }
}

/// The content-source seam. Implementations only move bytes; they never
/// interpret statuses.
#[async_trait]
pub trait TimelineApi: Send + Sync {
    async fn lookup_user(&self, handle: &str) -> Result<RawReply, reqwest::Error>;

    async fn user_posts(
        &self,
        user_id: &str,
        query: &TimelineQuery,
    ) -> Result<RawReply, reqwest::Error>;
}

/// Bearer-token client for the v2-style content-source API.
#[derive(Clone)]
pub struct TwitterApi {
    client: Client,
    base: String,
    bearer_token: String,
}

impl TwitterApi {
    pub fn new(bearer_token: String, base: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base: base.trim_end_matches('/').to_string(),
            bearer_token,
        }
    }

    fn lookup_request(&self, handle: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/users/by/username/{handle}", self.base))
            .bearer_auth(&self.bearer_token)
    }

    fn posts_request(&self, user_id: &str, query: &TimelineQuery) -> RequestBuilder {
        self.client
            .get(format!("{}/users/{user_id}/tweets", self.base))
            .bearer_auth(&self.bearer_token)
            .query(&query.params())
    }
}

async fn send(request: RequestBuilder) -> Result<RawReply, reqwest::Error> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(RawReply { status, body })
}

#[async_trait]
impl TimelineApi for TwitterApi {
    async fn lookup_user(&self, handle: &str) -> Result<RawReply, reqwest::Error> {
        send(self.lookup_request(handle)).await
    }

    async fn user_posts(
        &self,
        user_id: &str,
        query: &TimelineQuery,
    ) -> Result<RawReply, reqwest::Error> {
        send(self.posts_request(user_id, query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_exclude_replies_and_reposts() {
        let params = TimelineQuery { max_results: 70 }.params();
        assert!(params.contains(&("exclude", "replies,retweets".to_string())));
        assert!(params.contains(&("max_results", "70".to_string())));
        assert!(params.contains(&("tweet.fields", "created_at".to_string())));
        assert!(params.contains(&("expansions", "referenced_tweets.id".to_string())));
        assert!(params.contains(&("media.fields", "url".to_string())));
    }

    #[test]
    fn test_raw_reply_success_range() {
        let ok = RawReply {
            status: 200,
            body: String::new(),
        };
        let missing = RawReply {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let api = TwitterApi::new("token".to_string(), "https://api.example.com/2/");
        assert_eq!(api.base, "https://api.example.com/2");
    }

    #[test]
    fn test_lookup_request_carries_bearer_token() {
        let api = TwitterApi::new("secret".to_string(), "https://api.example.com/2");
        let request = api.lookup_request("ada").build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/2/users/by/username/ada"
        );
        assert_eq!(request.headers()["authorization"], "Bearer secret");
    }

    #[test]
    fn test_posts_request_encodes_listing_query() {
        let api = TwitterApi::new("secret".to_string(), "https://api.example.com/2");
        let request = api
            .posts_request("42", &TimelineQuery { max_results: 70 })
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/2/users/42/tweets");
        assert_eq!(request.headers()["authorization"], "Bearer secret");
        let pairs: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert!(pairs.contains(&("exclude".to_string(), "replies,retweets".to_string())));
        assert!(pairs.contains(&("max_results".to_string(), "70".to_string())));
        assert!(pairs.contains(&("tweet.fields".to_string(), "created_at".to_string())));
        assert!(request
            .url()
            .query()
            .unwrap()
            .contains("exclude=replies%2Cretweets"));
    }
}
