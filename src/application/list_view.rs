//! State machine behind the post administration screen.
//!
//! All mutable screen state lives in [`ListView`]: the collection, the
//! editor lifecycle, the search keyword, the draft, and the fetch sequence
//! counters. The machine is generic over [`PostsGateway`] and performs no
//! rendering, so every transition is testable against an in-memory backend.

use quaderno_api_types::Post;
use tracing::debug;

use crate::application::error::AppError;
use crate::application::gateway::PostsGateway;
use crate::domain::error::DomainError;
use crate::domain::posts::{self, Draft};

/// Editor (modal) lifecycle.
///
/// `Closed → Create` via [`ListView::open_create`] with a fresh draft,
/// `Closed → Edit` via [`ListView::open_edit`] with a copy of the selected
/// record, back to `Closed` via cancel or a successful save, always with
/// the draft reset. There is no saving or error state; latency is never
/// reflected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    Closed,
    Create,
    Edit { id: i64 },
}

/// A successful save, carrying the record the backend returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Created(Post),
    Updated(Post),
}

pub struct ListView<G> {
    gateway: G,
    posts: Vec<Post>,
    editor: Editor,
    search_term: String,
    not_found: bool,
    draft: Draft,
    issued_seq: u64,
    applied_seq: u64,
}

impl<G> ListView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            posts: Vec::new(),
            editor: Editor::Closed,
            search_term: String::new(),
            not_found: false,
            draft: Draft::empty(posts::today_stamp()),
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn editor(&self) -> Editor {
        self.editor
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// True iff the last applied collection was empty.
    pub fn not_found(&self) -> bool {
        self.not_found
    }

    pub fn find(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Reset the draft and enter create mode.
    pub fn open_create(&mut self) {
        self.draft = Draft::empty(posts::today_stamp());
        self.editor = Editor::Create;
    }

    /// Copy the record wholesale into the draft and enter edit mode.
    pub fn open_edit(&mut self, post: &Post) {
        self.draft = Draft::from_post(post);
        self.editor = Editor::Edit { id: post.id };
    }

    /// Close the editor and reset the draft. Never touches the collection.
    pub fn cancel(&mut self) {
        self.editor = Editor::Closed;
        self.draft = Draft::empty(posts::today_stamp());
    }

    pub fn set_title(&mut self, title: &str) {
        self.draft.title = title.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.draft.content = content.to_string();
    }

    /// Replace the draft's image with a transient `file://` reference to a
    /// local file. The bytes are never uploaded.
    pub fn attach_image(&mut self, path: &std::path::Path) -> Result<(), AppError> {
        self.draft.attach_image(path)?;
        Ok(())
    }

    fn next_seq(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Replace the collection unless a newer response already landed.
    ///
    /// Fetches are tagged with a monotonically increasing sequence number;
    /// a response older than the last applied one is discarded so the last
    /// issued request wins, not the last resolved one.
    fn apply_collection(&mut self, seq: u64, posts: Vec<Post>) -> bool {
        if seq < self.applied_seq {
            debug!(seq, applied = self.applied_seq, "discarding stale collection response");
            return false;
        }
        self.applied_seq = seq;
        self.not_found = posts.is_empty();
        self.posts = posts;
        true
    }
}

impl<G: PostsGateway> ListView<G> {
    /// Fetch the full collection and replace local state with it.
    ///
    /// On failure the previous state is kept and the error propagates to
    /// the caller, which decides how to surface it.
    pub async fn load(&mut self) -> Result<(), AppError> {
        let seq = self.next_seq();
        let posts = self.gateway.list().await?;
        self.apply_collection(seq, posts);
        Ok(())
    }

    /// Store the keyword and refresh the collection: a blank keyword
    /// restores the unfiltered collection, anything else runs a
    /// server-side title substring query.
    pub async fn search(&mut self, keyword: &str) -> Result<(), AppError> {
        self.search_term = keyword.to_string();
        if keyword.trim().is_empty() {
            return self.load().await;
        }
        let seq = self.next_seq();
        let posts = self.gateway.search(keyword).await?;
        self.apply_collection(seq, posts);
        Ok(())
    }

    /// Validate the draft and persist it.
    ///
    /// Validation failures return before any request is issued; the editor
    /// stays open with the draft unchanged. Edit mode sends a full-record
    /// `PUT`, create mode a `POST`. On success the editor closes, the draft
    /// resets, and the full collection is reloaded.
    pub async fn save(&mut self) -> Result<Saved, AppError> {
        let editing = match self.editor {
            Editor::Edit { id } => Some(id),
            Editor::Create => None,
            Editor::Closed => {
                return Err(DomainError::validation("no draft is open").into());
            }
        };

        posts::validate_draft(&self.draft, &self.posts, editing)?;

        let record = self.draft.clone().into_post();
        let saved = match editing {
            Some(id) => Saved::Updated(self.gateway.update(id, &record).await?),
            None => Saved::Created(self.gateway.create(&record).await?),
        };

        self.editor = Editor::Closed;
        self.draft = Draft::empty(posts::today_stamp());
        self.load().await?;
        Ok(saved)
    }

    /// Flip the published flag of a locally known record.
    ///
    /// Sends the negation of the current local status; an id with no local
    /// record sends nothing. The full collection is reloaded afterwards in
    /// either case.
    pub async fn toggle_status(&mut self, id: i64) -> Result<(), AppError> {
        let patched = match self.find(id) {
            Some(post) => self
                .gateway
                .set_status(id, !post.status)
                .await
                .map(drop)
                .map_err(AppError::from),
            None => Ok(()),
        };
        let reloaded = self.load().await;
        patched?;
        reloaded
    }

    /// Remove a record, then reload the collection.
    pub async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        self.gateway.delete(id).await?;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::gateway::GatewayError;

    /// In-memory backend recording every request it serves.
    #[derive(Default)]
    struct FakeBackend {
        posts: Mutex<Vec<Post>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn seeded(posts: Vec<Post>) -> Self {
            Self {
                posts: Mutex::new(posts),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls").clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().expect("calls").push(call.into());
        }
    }

    #[async_trait]
    impl PostsGateway for FakeBackend {
        async fn list(&self) -> Result<Vec<Post>, GatewayError> {
            self.record("GET /posts");
            Ok(self.posts.lock().expect("posts").clone())
        }

        async fn search(&self, keyword: &str) -> Result<Vec<Post>, GatewayError> {
            self.record(format!("GET /posts?title_like={keyword}"));
            Ok(self
                .posts
                .lock()
                .expect("posts")
                .iter()
                .filter(|p| p.title.contains(keyword))
                .cloned()
                .collect())
        }

        async fn create(&self, post: &Post) -> Result<Post, GatewayError> {
            self.record("POST /posts");
            let mut posts = self.posts.lock().expect("posts");
            let mut created = post.clone();
            created.id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            posts.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: i64, post: &Post) -> Result<Post, GatewayError> {
            self.record(format!("PUT /posts/{id}"));
            let mut posts = self.posts.lock().expect("posts");
            let slot = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(GatewayError::Status {
                    status: 404,
                    body: String::new(),
                })?;
            *slot = Post {
                id,
                ..post.clone()
            };
            Ok(slot.clone())
        }

        async fn set_status(&self, id: i64, status: bool) -> Result<Post, GatewayError> {
            self.record(format!("PATCH /posts/{id} status={status}"));
            let mut posts = self.posts.lock().expect("posts");
            let slot = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(GatewayError::Status {
                    status: 404,
                    body: String::new(),
                })?;
            slot.status = status;
            Ok(slot.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), GatewayError> {
            self.record(format!("DELETE /posts/{id}"));
            self.posts.lock().expect("posts").retain(|p| p.id != id);
            Ok(())
        }
    }

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            image: "http://backend/img.png".to_string(),
            content: Some("body".to_string()),
            date: "1/2/2025".to_string(),
            status: true,
        }
    }

    fn new_view(posts: Vec<Post>) -> ListView<FakeBackend> {
        ListView::new(FakeBackend::seeded(posts))
    }

    fn fill_draft(view: &mut ListView<FakeBackend>, title: &str) {
        view.set_title(title);
        view.set_content("body");
        view.attach_image(std::path::Path::new("/tmp/cover.png"))
            .expect("image");
    }

    #[tokio::test]
    async fn load_sets_not_found_iff_collection_is_empty() {
        let mut view = new_view(Vec::new());
        view.load().await.expect("load");
        assert!(view.not_found());
        assert!(view.posts().is_empty());

        let mut view = new_view(vec![post(1, "A")]);
        view.load().await.expect("load");
        assert!(!view.not_found());
        assert_eq!(view.posts().len(), 1);
    }

    #[tokio::test]
    async fn blank_fields_abort_save_before_any_request() {
        let mut view = new_view(vec![post(1, "A")]);
        view.load().await.expect("load");
        view.open_create();
        view.set_title("   ");

        let err = view.save().await.expect_err("blank title");
        assert!(err.validation_message().is_some());
        assert_eq!(view.editor(), Editor::Create);
        assert_eq!(view.draft().title, "   ");
        // Only the initial load reached the backend.
        assert_eq!(view.gateway().calls(), vec!["GET /posts"]);
    }

    #[tokio::test]
    async fn duplicate_title_rejected_then_fresh_title_posts() {
        let mut view = new_view(vec![post(1, "A")]);
        view.load().await.expect("load");

        view.open_create();
        fill_draft(&mut view, "A");
        let err = view.save().await.expect_err("duplicate title");
        assert!(err.validation_message().expect("message").contains("A"));
        assert_eq!(view.editor(), Editor::Create);

        view.set_title("B");
        let saved = view.save().await.expect("save");
        match saved {
            Saved::Created(created) => assert_eq!(created.title, "B"),
            Saved::Updated(_) => panic!("expected a create"),
        }
        assert_eq!(view.editor(), Editor::Closed);
        let calls = view.gateway().calls();
        assert_eq!(calls.iter().filter(|c| *c == "POST /posts").count(), 1);
        // Successful save reloads the full collection.
        assert_eq!(calls.last().map(String::as_str), Some("GET /posts"));
        assert_eq!(view.posts().len(), 2);
    }

    #[tokio::test]
    async fn editing_with_unchanged_title_saves_via_put() {
        let mut view = new_view(vec![post(1, "A"), post(2, "B")]);
        view.load().await.expect("load");

        let target = view.find(2).expect("post 2").clone();
        view.open_edit(&target);
        assert_eq!(view.editor(), Editor::Edit { id: 2 });
        view.set_content("revised body");

        let saved = view.save().await.expect("save");
        match saved {
            Saved::Updated(updated) => {
                assert_eq!(updated.id, 2);
                assert_eq!(updated.content.as_deref(), Some("revised body"));
            }
            Saved::Created(_) => panic!("expected an update"),
        }
        assert!(view.gateway().calls().contains(&"PUT /posts/2".to_string()));
    }

    #[tokio::test]
    async fn double_toggle_returns_to_original_status() {
        let mut view = new_view(vec![post(5, "E")]);
        view.load().await.expect("load");
        assert!(view.find(5).expect("post 5").status);

        view.toggle_status(5).await.expect("first toggle");
        assert!(!view.find(5).expect("post 5").status);

        view.toggle_status(5).await.expect("second toggle");
        assert!(view.find(5).expect("post 5").status);

        let calls = view.gateway().calls();
        assert!(calls.contains(&"PATCH /posts/5 status=false".to_string()));
        assert!(calls.contains(&"PATCH /posts/5 status=true".to_string()));
    }

    #[tokio::test]
    async fn toggle_of_unknown_id_sends_nothing_but_still_reloads() {
        let mut view = new_view(vec![post(1, "A")]);
        view.load().await.expect("load");

        view.toggle_status(99).await.expect("toggle");
        let calls = view.gateway().calls();
        assert!(calls.iter().all(|c| !c.starts_with("PATCH")));
        assert_eq!(calls.iter().filter(|c| *c == "GET /posts").count(), 2);
    }

    #[tokio::test]
    async fn blank_search_restores_the_full_collection() {
        let mut view = new_view(vec![post(1, "alpha"), post(2, "beta")]);
        view.load().await.expect("load");

        view.search("alp").await.expect("search");
        assert_eq!(view.search_term(), "alp");
        assert_eq!(view.posts().len(), 1);

        view.search("").await.expect("blank search");
        assert_eq!(view.posts().len(), 2);
        assert!(!view.not_found());
    }

    #[tokio::test]
    async fn search_with_no_matches_raises_not_found() {
        let mut view = new_view(vec![post(1, "alpha")]);
        view.load().await.expect("load");

        view.search("zzz").await.expect("search");
        assert!(view.not_found());
        assert!(view.posts().is_empty());
    }

    #[tokio::test]
    async fn cancel_resets_draft_and_leaves_collection_alone() {
        let mut view = new_view(vec![post(1, "A")]);
        view.load().await.expect("load");
        let before = view.posts().to_vec();

        let target = view.find(1).expect("post 1").clone();
        view.open_edit(&target);
        view.set_title("mangled");
        view.cancel();

        assert_eq!(view.editor(), Editor::Closed);
        assert_eq!(view.draft().id, 0);
        assert!(view.draft().title.is_empty());
        assert!(view.draft().status);
        assert_eq!(view.posts(), before);
    }

    #[tokio::test]
    async fn save_with_editor_closed_is_rejected() {
        let mut view = new_view(vec![post(1, "A")]);
        view.load().await.expect("load");
        let err = view.save().await.expect_err("closed editor");
        assert!(err.validation_message().is_some());
    }

    #[tokio::test]
    async fn delete_removes_the_record_and_reloads() {
        let mut view = new_view(vec![post(1, "A"), post(2, "B")]);
        view.load().await.expect("load");

        view.delete(1).await.expect("delete");
        assert!(view.gateway().calls().contains(&"DELETE /posts/1".to_string()));
        assert_eq!(view.posts().len(), 1);
        assert!(view.find(1).is_none());
    }

    #[test]
    fn stale_collection_responses_are_discarded() {
        let mut view = new_view(Vec::new());
        let first = view.next_seq();
        let second = view.next_seq();

        assert!(view.apply_collection(second, vec![post(2, "newer")]));
        // The older in-flight response resolves last and must lose.
        assert!(!view.apply_collection(first, vec![post(1, "older")]));

        assert_eq!(view.posts().len(), 1);
        assert_eq!(view.posts()[0].title, "newer");
        assert!(!view.not_found());
    }

    #[test]
    fn open_create_starts_from_the_default_draft() {
        let mut view = new_view(Vec::new());
        view.open_create();
        assert_eq!(view.editor(), Editor::Create);
        assert_eq!(view.draft().id, 0);
        assert!(view.draft().title.is_empty());
        assert!(view.draft().image.is_empty());
        assert!(view.draft().content.is_empty());
        assert!(view.draft().status);
        assert!(!view.draft().date.is_empty());
    }
}
