use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::{model::PublicProfile, schema::UserEntity};
use crate::utils::encode_picture;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisitBody {
    #[validate(length(min = 1, message = "Visitor email is required"))]
    pub visitor_email: String,
    #[validate(length(min = 1, message = "Visited email is required"))]
    pub visited_email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeBody {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(range(min = 1, message = "Duration must be at least one month"))]
    pub duration_months: Option<u32>,
}

#[derive(FromRow)]
pub struct VisitorRow {
    pub visit_id: Uuid,
    pub visited_at: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<Vec<u8>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
    pub visit_id: Uuid,
    pub visitor: PublicProfile,
    pub visited_at: chrono::DateTime<chrono::Utc>,
}

impl From<VisitorRow> for VisitorResponse {
    fn from(r: VisitorRow) -> Self {
        VisitorResponse {
            visit_id: r.visit_id,
            visitor: PublicProfile {
                id: r.user_id,
                profile_picture: encode_picture(r.profile_picture.as_deref()),
                name: r.name,
                email: r.email,
            },
            visited_at: r.visited_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipStatusResponse {
    pub is_gold_member: bool,
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&UserEntity> for MembershipStatusResponse {
    fn from(user: &UserEntity) -> Self {
        MembershipStatusResponse {
            is_gold_member: user.is_gold_member,
            expiry_date: user.gold_membership_expiry,
        }
    }
}
