//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::PostImage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub pub_date: DateTimeWithTimeZone,
    pub group_id: Option<Uuid>,
    pub image: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Group,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post. The image rides in two
/// columns (bytes + content type) and is only a `PostImage` when both are
/// present.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        let image = match (model.image, model.image_content_type) {
            (Some(bytes), Some(content_type)) => Some(PostImage {
                content_type,
                bytes,
            }),
            _ => None,
        };

        Self {
            id: model.id,
            author_id: model.author_id,
            text: model.text,
            pub_date: model.pub_date.into(),
            group_id: model.group_id,
            image,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        let (image, image_content_type) = match post.image {
            Some(image) => (Some(image.bytes), Some(image.content_type)),
            None => (None, None),
        };

        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            text: Set(post.text),
            pub_date: Set(post.pub_date.into()),
            group_id: Set(post.group_id),
            image: Set(image),
            image_content_type: Set(image_content_type),
        }
    }
}
