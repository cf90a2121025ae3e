use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UpdateUser},
        repository::UserRepository,
        schema::UserEntity,
    },
};

/// LIKE pattern matching `query` anywhere, with its wildcards and the escape
/// character taken literally.
fn contains_pattern(query: &str) -> String {
    let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let users =
            sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = ANY($1) ORDER BY id")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        sqlx::query(
            "INSERT INTO users (id, email, name, gender, date_of_birth) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.gender)
        .bind(user.date_of_birth)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_profile(
        &self,
        email: &str,
        user: &UpdateUser,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
        UPDATE users
        SET
            name          = $2,
            gender        = $3,
            date_of_birth = $4
        WHERE email = $1
        RETURNING *
        "#,
        )
        .bind(email)
        .bind(&user.name)
        .bind(user.gender)
        .bind(user.date_of_birth)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_account(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM friend_requests WHERE sender_id = $1 OR receiver_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        sqlx::query("UPDATE users SET friends = array_remove(friends, $1) WHERE $1 = ANY(friends)")
            .bind(id)
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM messages WHERE sender_id = $1 OR receiver_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // profile_visits, posts and post_comments cascade
        sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(&self.pool).await?;

        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        exclude_id: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let search_pattern = contains_pattern(query);
        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users
            WHERE id <> $2
            AND (
                lower(name) LIKE lower($1)
                OR lower(email) LIKE lower($1)
            )
            ORDER BY name
            "#,
        )
        .bind(&search_pattern)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn add_friend(&self, user_id: &Uuid, friend_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query(
            "UPDATE users SET friends = array_append(friends, $2) WHERE id = $1 AND NOT ($2 = ANY(friends))",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_friend(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE users SET friends = array_remove(friends, $2) WHERE id = $1")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_friends_of_friends(
        &self,
        user_id: &Uuid,
        friend_ids: &[Uuid],
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        // GIN index on friends serves the overlap operator
        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users
            WHERE friends && $2
            AND id <> $1
            AND NOT (id = ANY($2))
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .bind(friend_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_sample_excluding(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let users =
            sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id <> $1 ORDER BY created_at LIMIT $2")
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    async fn update_membership(
        &self,
        id: &Uuid,
        is_gold_member: bool,
        expiry: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(), error::SystemError> {
        sqlx::query(
            "UPDATE users SET is_gold_member = $2, gold_membership_expiry = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(is_gold_member)
        .bind(expiry)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
