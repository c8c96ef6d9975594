//! In-memory storage - used when no database is configured, and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use board_core::domain::{Author, Post};
use board_core::error::RepoError;
use board_core::ports::{AuthorRepository, BaseRepository, PostRepository};

#[derive(Default)]
struct Tables {
    authors: HashMap<Uuid, Author>,
    posts: HashMap<Uuid, Post>,
}

impl Tables {
    fn check_author_ref(&self, post: &Post) -> Result<(), RepoError> {
        match post.author_id {
            Some(author_id) if !self.authors.contains_key(&author_id) => Err(
                RepoError::Constraint(format!("Author {author_id} does not exist")),
            ),
            _ => Ok(()),
        }
    }
}

/// Both tables behind one async RwLock, so the author cascade is atomic.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn authors(&self) -> InMemoryAuthorRepository {
        InMemoryAuthorRepository {
            tables: Arc::clone(&self.tables),
        }
    }
}

/// Post repository over an [`InMemoryStore`].
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

/// Author repository over an [`InMemoryStore`].
pub struct InMemoryAuthorRepository {
    tables: Arc<RwLock<Tables>>,
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.contains_key(&entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.check_author_ref(&entity)?;

        tables.posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_author_ref(&entity)?;

        let stored = tables.posts.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        stored.title = entity.title;
        stored.content = entity.content;
        stored.author_id = entity.author_id;

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.author_id == Some(author_id))
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Author, Uuid> for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.authors.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        authors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(authors)
    }

    async fn create(&self, entity: Author) -> Result<Author, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.authors.contains_key(&entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        tables.authors.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Author) -> Result<Author, RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .authors
            .get_mut(&entity.id)
            .ok_or(RepoError::NotFound)?;
        stored.name = entity.name;

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.delete_with_posts(id).await.map(|_| ())
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn delete_with_posts(&self, id: Uuid) -> Result<u64, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.authors.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let before = tables.posts.len();
        tables.posts.retain(|_, post| post.author_id != Some(id));
        let removed = (before - tables.posts.len()) as u64;

        tracing::debug!(author_id = %id, removed_posts = removed, "Deleted author with posts");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_post() {
        let store = InMemoryStore::new();
        let posts = store.posts();

        let post = Post::new("Hello".to_string(), "World".to_string(), None);
        posts.create(post.clone()).await.unwrap();

        assert_eq!(posts.find_by_id(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let store = InMemoryStore::new();
        let posts = store.posts();
        let original = posts
            .create(Post::new("Old".to_string(), "Body".to_string(), None))
            .await
            .unwrap();

        let mut changed = original.clone();
        changed.title = "New".to_string();
        changed.created_at = chrono::Utc::now() + chrono::Duration::days(1);
        let updated = posts.update(changed).await.unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let posts = InMemoryStore::new().posts();
        let ghost = Post::new("Ghost".to_string(), "Body".to_string(), None);

        assert!(matches!(posts.update(ghost).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_post_with_unknown_author_is_not_found() {
        let posts = InMemoryStore::new().posts();
        let ghost = Post::new(
            "Ghost".to_string(),
            "Body".to_string(),
            Some(Uuid::new_v4()),
        );

        assert!(matches!(posts.update(ghost).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let posts = InMemoryStore::new().posts();
        let post = posts
            .create(Post::new("Bye".to_string(), "Body".to_string(), None))
            .await
            .unwrap();

        posts.delete(post.id).await.unwrap();
        assert!(matches!(posts.delete(post.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_unknown_author_reference_is_rejected() {
        let posts = InMemoryStore::new().posts();
        let post = Post::new("T".to_string(), "C".to_string(), Some(Uuid::new_v4()));

        assert!(matches!(posts.create(post).await, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_author_delete_cascades_to_own_posts_only() {
        let store = InMemoryStore::new();
        let (posts, authors) = (store.posts(), store.authors());

        let ada = authors.create(Author::new("Ada".to_string())).await.unwrap();
        let bob = authors.create(Author::new("Bob".to_string())).await.unwrap();
        for title in ["a1", "a2"] {
            posts
                .create(Post::new(title.to_string(), "x".to_string(), Some(ada.id)))
                .await
                .unwrap();
        }
        let kept = posts
            .create(Post::new("b1".to_string(), "x".to_string(), Some(bob.id)))
            .await
            .unwrap();
        let anonymous = posts
            .create(Post::new("n1".to_string(), "x".to_string(), None))
            .await
            .unwrap();

        assert_eq!(authors.delete_with_posts(ada.id).await.unwrap(), 2);

        let remaining: Vec<Uuid> = posts.find_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.contains(&kept.id));
        assert!(remaining.contains(&anonymous.id));
        assert!(posts.find_by_author_id(ada.id).await.unwrap().is_empty());
        assert!(authors.find_by_id(ada.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_orders() {
        let store = InMemoryStore::new();
        let (posts, authors) = (store.posts(), store.authors());

        let mut older = Post::new("older".to_string(), "x".to_string(), None);
        older.created_at -= chrono::Duration::minutes(5);
        posts.create(older).await.unwrap();
        posts
            .create(Post::new("newer".to_string(), "x".to_string(), None))
            .await
            .unwrap();

        authors.create(Author::new("Zed".to_string())).await.unwrap();
        authors.create(Author::new("Amy".to_string())).await.unwrap();

        let titles: Vec<String> = posts
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["newer", "older"]);

        let names: Vec<String> = authors
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Amy", "Zed"]);
    }
}
