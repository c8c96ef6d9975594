use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Load every entity, in the repository's display order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite the mutable fields of an existing entity.
    ///
    /// Fails with [`RepoError::NotFound`] when the entity no longer exists.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// `find_all` yields the newest posts first. `update` never touches
/// `id` or `created_at`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Author repository.
///
/// `find_all` yields authors ordered by name. Deleting an author also
/// deletes every post that references it, atomically.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    /// Delete an author and its posts, returning how many posts went with it.
    async fn delete_with_posts(&self, id: Uuid) -> Result<u64, RepoError>;
}
