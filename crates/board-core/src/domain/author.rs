use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters in an author's name.
pub const AUTHOR_NAME_MAX_LENGTH: usize = 255;

/// Author entity - a named writer that posts may be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

impl Author {
    /// Create a new author with a generated ID.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
