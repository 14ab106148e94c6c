//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use warbler_core::domain::{Follow, Message, User};
use warbler_core::error::RepoError;
use warbler_core::ports::{FollowRepository, MessageRepository, UserRepository};

use super::entity::follows::{self, Entity as FollowEntity};
use super::entity::message::{self, Entity as MessageEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::mask_email;
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL message repository.
pub type PostgresMessageRepository = PostgresBaseRepository<MessageEntity>;

/// PostgreSQL follows repository.
pub type PostgresFollowRepository = PostgresBaseRepository<FollowEntity>;

/// Escape `LIKE` metacharacters so `query` only matches literally.
pub(crate) fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, RepoError> {
        let mut select = UserEntity::find();
        if !query.is_empty() {
            let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Username)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let result = select
            .order_by_asc(user::Column::Username)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(user::Column::Username)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Message>, RepoError> {
        let result = MessageEntity::find()
            .filter(message::Column::UserId.eq(user_id))
            .order_by_desc(message::Column::Timestamp)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_authors(
        &self,
        user_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Message>, RepoError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = MessageEntity::find()
            .filter(message::Column::UserId.is_in(user_ids.iter().copied()))
            .order_by_desc(message::Column::Timestamp)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        MessageEntity::find()
            .filter(message::Column::UserId.eq(user_id))
            .count(self.conn())
            .await
            .map_err(map_db_err)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let result = MessageEntity::delete_many()
            .filter(message::Column::UserId.eq(user_id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn add(&self, follow: Follow) -> Result<(), RepoError> {
        let active_model: follows::ActiveModel = follow.into();

        FollowEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([follows::Column::FollowerId, follows::Column::FollowedId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.conn())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            follower_id = %follow.follower_id,
            followed_id = %follow.followed_id,
            "Follow recorded"
        );
        Ok(())
    }

    async fn remove(&self, follow: Follow) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_by_id((follow.follower_id, follow.followed_id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, follow: Follow) -> Result<bool, RepoError> {
        let result = FollowEntity::find_by_id((follow.follower_id, follow.followed_id))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.is_some())
    }

    async fn follower_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let result = FollowEntity::find()
            .filter(follows::Column::FollowedId.eq(user_id))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(|f| f.follower_id).collect())
    }

    async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let result = FollowEntity::find()
            .filter(follows::Column::FollowerId.eq(user_id))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(|f| f.followed_id).collect())
    }

    async fn remove_all_for(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let result = FollowEntity::delete_many()
            .filter(
                Condition::any()
                    .add(follows::Column::FollowerId.eq(user_id))
                    .add(follows::Column::FollowedId.eq(user_id)),
            )
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
