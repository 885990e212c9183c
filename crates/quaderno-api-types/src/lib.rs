//! Shared request and response types for the blog-post REST backend.
//!
//! The backend exposes a single `posts` collection; these are the exact
//! shapes it exchanges, kept in a separate crate so automation can reuse
//! them without pulling in the console.

use serde::{Deserialize, Serialize};

/// A blog post as held by the backend.
///
/// `id` is assigned by the backend on creation and stable afterwards.
/// `content` is optional on the wire; the admin surfaces require it to be
/// non-empty before a record is saved. `date` is a `D/M/YYYY` stamp without
/// zero-padding, set once at creation and never changed by updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub content: Option<String>,
    pub date: String,
    pub status: bool,
}

/// Body of a partial status update, `PATCH /posts/{id}`.
///
/// `status` is `true` for published, `false` for unpublished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_without_content_deserializes() {
        let raw = r#"{"id":7,"title":"Hello","image":"http://host/a.png","date":"3/9/2025","status":true}"#;
        let post: Post = serde_json::from_str(raw).expect("post");
        assert_eq!(post.id, 7);
        assert_eq!(post.content, None);
        assert!(post.status);
    }

    #[test]
    fn status_patch_serializes_to_bare_flag() {
        let body = serde_json::to_value(StatusPatch { status: false }).expect("patch");
        assert_eq!(body, serde_json::json!({"status": false}));
    }
}
