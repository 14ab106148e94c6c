//! Follows join entity for SeaORM.
//!
//! Both columns reference `users`, so the relation is declared twice and no
//! `Related` impl is provided; join through `Relation::Follower` or
//! `Relation::Followed` explicitly.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub follower_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub followed_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Follower,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowedId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Followed,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for warbler_core::domain::Follow {
    fn from(model: Model) -> Self {
        Self::new(model.follower_id, model.followed_id)
    }
}

impl From<warbler_core::domain::Follow> for ActiveModel {
    fn from(follow: warbler_core::domain::Follow) -> Self {
        Self {
            follower_id: Set(follow.follower_id),
            followed_id: Set(follow.followed_id),
        }
    }
}
