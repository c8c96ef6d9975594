use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters in a post title.
pub const TITLE_MAX_LENGTH: usize = 255;

/// Post entity - a bulletin-board entry.
///
/// `created_at` is assigned once in [`Post::new`] and never changes afterwards.
/// Posts referencing an author are removed together with that author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<Uuid>,
}

impl Post {
    /// Create a new post.
    pub fn new(title: String, content: String, author_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            // Storage keeps microseconds; truncate so a round trip compares equal.
            created_at: Utc::now().trunc_subsecs(6),
            author_id,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
