use uuid::Uuid;

use crate::{
    api::error,
    modules::membership::{
        model::VisitorRow, repository::VisitRepository, schema::ProfileVisitEntity,
    },
};

#[derive(Clone)]
pub struct VisitRepositoryPg {
    pool: sqlx::PgPool,
}

impl VisitRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VisitRepository for VisitRepositoryPg {
    async fn create(
        &self,
        visitor_id: &Uuid,
        visited_id: &Uuid,
    ) -> Result<ProfileVisitEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let visit = sqlx::query_as::<_, ProfileVisitEntity>(
            "INSERT INTO profile_visits (id, visitor_id, visited_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(id)
        .bind(visitor_id)
        .bind(visited_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(visit)
    }

    async fn find_visitors(&self, visited_id: &Uuid) -> Result<Vec<VisitorRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, VisitorRow>(
            r#"
            SELECT
                pv.id AS visit_id,
                pv.visited_at,
                u.id AS user_id,
                u.name,
                u.email,
                u.profile_picture
            FROM profile_visits pv
            JOIN users u
                ON pv.visitor_id = u.id
            WHERE pv.visited_id = $1
            ORDER BY pv.visited_at DESC, pv.id DESC
            "#,
        )
        .bind(visited_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
