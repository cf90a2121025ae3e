use uuid::Uuid;

use crate::api::error;
use crate::modules::membership::{model::VisitorRow, schema::ProfileVisitEntity};

/// Append-only log of profile visits.
#[async_trait::async_trait]
pub trait VisitRepository {
    async fn create(
        &self,
        visitor_id: &Uuid,
        visited_id: &Uuid,
    ) -> Result<ProfileVisitEntity, error::SystemError>;

    /// Visits to `visited_id` joined with the visitor, newest first.
    async fn find_visitors(&self, visited_id: &Uuid) -> Result<Vec<VisitorRow>, error::SystemError>;
}
