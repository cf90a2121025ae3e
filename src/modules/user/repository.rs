use uuid::Uuid;

use crate::{
    api::error,
    modules::user::model::{InsertUser, UpdateUser},
    modules::user::schema::UserEntity,
};

/// Identity store. Friend edges live on the user row, one side per update.
#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError>;

    async fn update_profile(
        &self,
        email: &str,
        user: &UpdateUser,
    ) -> Result<Option<UserEntity>, error::SystemError>;

    /// Drops requests and messages touching the user, pulls the user from every
    /// friend set, then deletes the row.
    async fn delete_account(&self, id: &Uuid) -> Result<(), error::SystemError>;

    /// Case-insensitive partial match on name or email.
    async fn search(
        &self,
        query: &str,
        exclude_id: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError>;

    /// Set-union insert of `friend_id` into `user_id`'s friend set.
    async fn add_friend(&self, user_id: &Uuid, friend_id: &Uuid) -> Result<(), error::SystemError>;

    async fn remove_friend(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<(), error::SystemError>;

    /// Users listing any of `friend_ids`, excluding `user_id` and `friend_ids`, oldest account first.
    async fn find_friends_of_friends(
        &self,
        user_id: &Uuid,
        friend_ids: &[Uuid],
    ) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn find_sample_excluding(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn update_membership(
        &self,
        id: &Uuid,
        is_gold_member: bool,
        expiry: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(), error::SystemError>;
}
