//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    Unchanged,
};
use uuid::Uuid;

use board_core::domain::{Author, Post};
use board_core::error::RepoError;
use board_core::ports::{AuthorRepository, BaseRepository, PostRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::sql_base::{SqlBaseRepository, map_db_err};

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

/// SQL author repository.
pub type SqlAuthorRepository = SqlBaseRepository<AuthorEntity>;

#[async_trait]
impl BaseRepository<Post, Uuid> for SqlPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %entity.id, "Inserting post");

        let model = post::ActiveModel::from(entity)
            .insert(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %entity.id, "Updating post");

        let model = post::ActiveModel::for_update(entity)
            .update(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        tracing::debug!(post_id = %id, "Deleting post");
        self.delete_model(id).await
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl BaseRepository<Author, Uuid> for SqlAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        let models = AuthorEntity::find()
            .order_by_asc(author::Column::Name)
            .order_by_asc(author::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, entity: Author) -> Result<Author, RepoError> {
        tracing::debug!(author_id = %entity.id, "Inserting author");

        let model = author::ActiveModel::from(entity)
            .insert(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, entity: Author) -> Result<Author, RepoError> {
        let active = author::ActiveModel {
            id: Unchanged(entity.id),
            name: Set(entity.name),
        };
        let model = active.update(&*self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.delete_with_posts(id).await.map(|_| ())
    }
}

#[async_trait]
impl AuthorRepository for SqlAuthorRepository {
    async fn delete_with_posts(&self, id: Uuid) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        // SQLite ignores the schema's ON DELETE CASCADE unless foreign_keys is on.
        let removed_posts = PostEntity::delete_many()
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?
            .rows_affected;

        let removed_author = AuthorEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?
            .rows_affected;

        if removed_author == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(author_id = %id, removed_posts, "Deleted author with posts");

        Ok(removed_posts)
    }
}
