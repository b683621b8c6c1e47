//! Content Fetcher — handle → user id → recent original posts → exemplar text.
//!
//! Flow: normalize handle → lookup (status check) → posts listing (status
//! check) → line-bounded concatenation. Two calls, no retries.

use tracing::{debug, info, warn};

use crate::errors::MimicError;
use crate::timeline::models::{Post, PostCollection, TimelinePage, UserLookup};
use crate::timeline::{TimelineApi, TimelineQuery};

/// Accepted range for the listing's `max_results`.
const MIN_PULL: u32 = 5;
const MAX_PULL: u32 = 100;

/// How many posts to request and how many exemplar lines to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub pull_count: u32,
    pub return_count: usize,
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            pull_count: 70,
            return_count: 30,
        }
    }
}

/// Resolves `handle` and returns its recent original posts as a `PostCollection`.
///
/// A failed lookup returns before the listing call is made.
pub async fn fetch_posts(
    api: &dyn TimelineApi,
    handle: &str,
    window: FetchWindow,
) -> Result<PostCollection, MimicError> {
    let handle = normalize_handle(handle)?;

    let reply = api.lookup_user(&handle).await?;
    if !reply.is_success() {
        return Err(MimicError::Resolution {
            handle,
            status: reply.status,
        });
    }
    let lookup: UserLookup = serde_json::from_str(&reply.body)?;
    let user = match lookup.data {
        Some(user) => user,
        None => {
            let detail = lookup
                .errors
                .first()
                .map(|p| p.describe())
                .unwrap_or_else(|| "lookup returned no user".to_string());
            return Err(MimicError::UnknownUser { handle, detail });
        }
    };
    info!("Resolved @{} to user {}", user.username, user.id);

    let query = TimelineQuery {
        max_results: clamp_pull_count(window.pull_count),
    };
    let reply = api.user_posts(&user.id, &query).await?;
    if !reply.is_success() {
        return Err(MimicError::Fetch {
            user_id: user.id,
            status: reply.status,
        });
    }
    let page: TimelinePage = serde_json::from_str(&reply.body)?;
    debug!(
        "Listing returned {} posts (meta result_count={:?})",
        page.data.len(),
        page.meta.as_ref().map(|m| m.result_count)
    );

    // Blank posts trim away too; prompts never get an empty examples block.
    let (examples, used) = concatenate_posts(&page.data, window.return_count);
    if examples.is_empty() {
        return Err(MimicError::NoPosts { handle });
    }
    let mut posts = page.data;
    posts.truncate(used);

    let collection = PostCollection::new(user.id, posts, examples);
    info!(
        "Kept {} posts ({} lines) as examples for @{}",
        collection.posts.len(),
        collection.line_count(),
        handle
    );
    Ok(collection)
}

/// Strips whitespace and a leading `@`; rejects handles that cannot sit in a URL path.
pub fn normalize_handle(raw: &str) -> Result<String, MimicError> {
    let handle = raw.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle).trim();
    let unsafe_char = |c: char| c.is_whitespace() || matches!(c, '/' | '?' | '#');
    if handle.is_empty() || handle.contains(unsafe_char) {
        return Err(MimicError::InvalidHandle(raw.to_string()));
    }
    Ok(handle.to_string())
}

fn clamp_pull_count(requested: u32) -> u32 {
    let clamped = requested.clamp(MIN_PULL, MAX_PULL);
    if clamped != requested {
        warn!(
            "pull_count={} outside {}..={}, requesting {} posts",
            requested, MIN_PULL, MAX_PULL, clamped
        );
    }
    clamped
}

/// Joins post texts line by line until `return_count` lines are collected.
///
/// The cut is on a line boundary, so the last post may be partially included.
/// Returns the trimmed text and how many posts contributed to it.
pub fn concatenate_posts(posts: &[Post], return_count: usize) -> (String, usize) {
    let mut lines: Vec<&str> = Vec::with_capacity(return_count);
    let mut used = 0;

    for post in posts {
        if lines.len() >= return_count {
            break;
        }
        used += 1;
        for line in post.text.split('\n') {
            if lines.len() >= return_count {
                break;
            }
            lines.push(line);
        }
    }

    (lines.join("\n").trim().to_string(), used)
}
