use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single original post as returned by the content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of the username lookup call.
///
/// An unknown handle still comes back with a success status, carrying
/// `errors` instead of `data`.
#[derive(Debug, Deserialize)]
pub struct UserLookup {
    pub data: Option<UserData>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiProblem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiProblem {
    pub fn describe(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| "unspecified problem".to_string())
    }
}

/// Body of the posts-by-user listing. `data` is absent for an empty timeline.
#[derive(Debug, Deserialize)]
pub struct TimelinePage {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub meta: Option<TimelineMeta>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineMeta {
    #[serde(default)]
    pub result_count: u32,
}

/// The posts a session writes from, plus the exemplar text built from them.
///
/// Immutable once fetched; `posts` holds only the posts that contributed at
/// least one line to `examples`.
#[derive(Debug, Clone, Serialize)]
pub struct PostCollection {
    pub user_id: String,
    pub posts: Vec<Post>,
    examples: String,
}

impl PostCollection {
    pub fn new(user_id: String, posts: Vec<Post>, examples: String) -> Self {
        Self {
            user_id,
            posts,
            examples,
        }
    }

    /// The concatenated, trimmed post text embedded in prompts.
    pub fn examples(&self) -> &str {
        &self.examples
    }

    pub fn line_count(&self) -> usize {
        if self.examples.is_empty() {
            0
        } else {
            self.examples.lines().count()
        }
    }
}
