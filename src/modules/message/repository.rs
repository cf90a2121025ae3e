use uuid::Uuid;

use crate::api::error;
use crate::modules::message::{model::InsertMessage, schema::MessageEntity};

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError>;

    /// Both directions between the pair, oldest first.
    async fn find_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;
}
