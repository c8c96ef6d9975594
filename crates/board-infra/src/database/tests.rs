mod mock {
    use std::sync::Arc;

    use crate::database::entity::post;
    use crate::database::SqlPostRepository;
    use board_core::domain::Post;
    use board_core::error::RepoError;
    use board_core::ports::BaseRepository;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
                created_at: now.into(),
                author_id: Some(author_id),
            }]])
            .into_connection();

        let repo = SqlPostRepository::new(Arc::new(db));

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, Some(author_id));
    }

    #[tokio::test]
    async fn test_update_of_vanished_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = SqlPostRepository::new(Arc::new(db));
        let ghost = Post::new("Ghost".to_string(), "Body".to_string(), None);

        assert!(matches!(repo.update(ghost).await, Err(RepoError::NotFound)));
    }
}

mod sqlite {
    use std::sync::Arc;

    use board_core::domain::{Author, Post};
    use board_core::error::RepoError;
    use board_core::ports::{AuthorRepository, BaseRepository, PostRepository};
    use migration::{Migrator, MigratorTrait};

    use crate::database::{
        DatabaseConfig, DatabaseConnections, SqlAuthorRepository, SqlPostRepository,
    };

    async fn connect() -> DatabaseConnections {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        };
        let db = DatabaseConnections::init(&config).await.unwrap();
        Migrator::up(&*db.main, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_then_read_back() {
        let db = connect().await;
        let posts = SqlPostRepository::new(Arc::clone(&db.main));

        let post = Post::new("Hello".to_string(), "World".to_string(), None);
        posts.create(post.clone()).await.unwrap();

        let stored = posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored, post);

        drop(posts);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_created_at() {
        let db = connect().await;
        let posts = SqlPostRepository::new(Arc::clone(&db.main));
        let original = posts
            .create(Post::new("Old".to_string(), "Body".to_string(), None))
            .await
            .unwrap();

        let mut changed = original.clone();
        changed.title = "New".to_string();
        changed.created_at = chrono::Utc::now() + chrono::Duration::days(1);
        posts.update(changed).await.unwrap();

        let stored = posts.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "New");
        assert_eq!(stored.content, "Body");
        assert_eq!(stored.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = connect().await;
        let posts = SqlPostRepository::new(Arc::clone(&db.main));
        let post = posts
            .create(Post::new("Bye".to_string(), "Body".to_string(), None))
            .await
            .unwrap();

        posts.delete(post.id).await.unwrap();
        assert!(matches!(posts.delete(post.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_author_delete_cascades() {
        let db = connect().await;
        let posts = SqlPostRepository::new(Arc::clone(&db.main));
        let authors = SqlAuthorRepository::new(Arc::clone(&db.main));

        let ada = authors.create(Author::new("Ada".to_string())).await.unwrap();
        let bob = authors.create(Author::new("Bob".to_string())).await.unwrap();
        posts
            .create(Post::new("a1".to_string(), "x".to_string(), Some(ada.id)))
            .await
            .unwrap();
        posts
            .create(Post::new("a2".to_string(), "x".to_string(), Some(ada.id)))
            .await
            .unwrap();
        let kept = posts
            .create(Post::new("b1".to_string(), "x".to_string(), Some(bob.id)))
            .await
            .unwrap();

        assert_eq!(authors.delete_with_posts(ada.id).await.unwrap(), 2);

        let remaining = posts.find_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        assert_eq!(posts.find_by_author_id(bob.id).await.unwrap().len(), 1);
        assert!(authors.find_by_id(ada.id).await.unwrap().is_none());

        assert!(matches!(
            authors.delete_with_posts(ada.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_authors_listed_by_name() {
        let db = connect().await;
        let authors = SqlAuthorRepository::new(Arc::clone(&db.main));

        authors.create(Author::new("Zed".to_string())).await.unwrap();
        authors.create(Author::new("Amy".to_string())).await.unwrap();

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
