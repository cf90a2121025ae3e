use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::schema::{Gender, UserEntity};
use crate::utils::encode_picture;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterModel {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
}

#[derive(Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, message = "Search query is required"))]
    pub query: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

pub struct InsertUser {
    pub email: String,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
}

pub struct UpdateUser {
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub date_of_birth: chrono::NaiveDate,
    pub profile_picture: Option<String>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            profile_picture: encode_picture(entity.profile_picture.as_deref()),
            name: entity.name,
            email: entity.email,
            gender: entity.gender,
            date_of_birth: entity.date_of_birth,
        }
    }
}

/// The fields of an identity any other identity may see.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

impl From<&UserEntity> for PublicProfile {
    fn from(user: &UserEntity) -> Self {
        PublicProfile {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_picture: encode_picture(user.profile_picture.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub profile: PublicProfile,
    pub is_friend: bool,
}
