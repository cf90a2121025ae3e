use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileVisitEntity {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub visited_id: Uuid,
    pub visited_at: chrono::DateTime<chrono::Utc>,
}
