use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
    pub profile_picture: Option<Vec<u8>>,
    pub friends: Vec<Uuid>,
    pub is_gold_member: bool,
    pub gold_membership_expiry: Option<chrono::DateTime<chrono::Utc>>,
    #[allow(unused)]
    pub is_banned: bool,
    #[allow(unused)]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserEntity {
    pub fn is_friend_of(&self, other: &Uuid) -> bool {
        self.friends.contains(other)
    }
}
