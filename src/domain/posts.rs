//! The post draft and the invariants enforced before a save is issued.

use std::path::Path;

use quaderno_api_types::Post;
use time::{Date, OffsetDateTime};
use url::Url;

use super::error::DomainError;

/// The in-progress editor copy of a post.
///
/// Mirrors the wire shape except that `content` is a plain form field:
/// blank is representable while editing and rejected only at save time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub content: String,
    pub date: String,
    pub status: bool,
}

impl Draft {
    /// Fresh draft for a new post: id 0 until the backend assigns one,
    /// stamped with the given creation date, published by default.
    pub fn empty(date: String) -> Self {
        Self {
            id: 0,
            title: String::new(),
            image: String::new(),
            content: String::new(),
            date,
            status: true,
        }
    }

    /// Wholesale copy of an existing record for editing.
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            image: post.image.clone(),
            content: post.content.clone().unwrap_or_default(),
            date: post.date.clone(),
            status: post.status,
        }
    }

    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            image: self.image,
            content: Some(self.content),
            date: self.date,
            status: self.status,
        }
    }

    /// Point the draft's image at a local file.
    ///
    /// The file is never read or uploaded; the reference is a transient
    /// `file://` URL that is only meaningful on this machine.
    pub fn attach_image(&mut self, path: &Path) -> Result<(), DomainError> {
        let absolute = std::path::absolute(path)
            .map_err(|err| DomainError::validation(format!("unusable image path: {err}")))?;
        let url = Url::from_file_path(&absolute).map_err(|()| {
            DomainError::validation(format!("unusable image path: {}", absolute.display()))
        })?;
        self.image = url.into();
        Ok(())
    }
}

/// Today's date as `D/M/YYYY` without zero-padding, from the local clock
/// when the offset is obtainable, UTC otherwise.
pub fn today_stamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    date_stamp(now.date())
}

pub fn date_stamp(date: Date) -> String {
    format!("{}/{}/{}", date.day(), u8::from(date.month()), date.year())
}

/// Save-time validation against the locally held collection.
///
/// `editing` is the id of the record being edited, if any; the duplicate
/// title check excludes that record so an unchanged title never collides
/// with itself. Uniqueness is only checked against the local collection,
/// not re-verified with the backend.
pub fn validate_draft(
    draft: &Draft,
    posts: &[Post],
    editing: Option<i64>,
) -> Result<(), DomainError> {
    ensure_non_empty(&draft.title, "title")?;
    ensure_non_empty(&draft.image, "image")?;
    ensure_non_empty(&draft.content, "content")?;

    let duplicate = posts
        .iter()
        .any(|p| p.title == draft.title && editing != Some(p.id));
    if duplicate {
        return Err(DomainError::validation(format!(
            "a post titled \"{}\" already exists",
            draft.title
        )));
    }

    Ok(())
}

pub fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
