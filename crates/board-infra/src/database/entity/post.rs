//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(nullable)]
    pub author_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Active model for an UPDATE: keyed by id, leaves `created_at` alone.
    pub fn for_update(post: board_core::domain::Post) -> Self {
        Self {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            created_at: NotSet,
            author_id: Set(post.author_id),
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for board_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            created_at: model.created_at.into(),
            author_id: model.author_id,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<board_core::domain::Post> for ActiveModel {
    fn from(post: board_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
            author_id: Set(post.author_id),
        }
    }
}
