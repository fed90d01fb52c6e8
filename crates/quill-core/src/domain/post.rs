use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::PostImage;

/// Post entity - a single authored text entry, optionally grouped and
/// illustrated.
///
/// `author_id` and `pub_date` are fixed at creation; edits replace only
/// `text`, `group_id` and `image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub group_id: Option<Uuid>,
    pub image: Option<PostImage>,
}

impl Post {
    /// Create a new post with generated ID and the current publication time.
    pub fn new(
        author_id: Uuid,
        text: String,
        group_id: Option<Uuid>,
        image: Option<PostImage>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            pub_date: Utc::now(),
            group_id,
            image,
        }
    }
}
