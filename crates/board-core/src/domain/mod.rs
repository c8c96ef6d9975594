//! Domain entities - the core business objects.

mod author;
mod post;

pub use author::{AUTHOR_NAME_MAX_LENGTH, Author};
pub use post::{Post, TITLE_MAX_LENGTH};
