use actix_web::{delete, get, post, put, web};

use crate::api::{error, success};
use crate::modules::user::{model, service::UserService};
use crate::utils::{ValidatedJson, ValidatedQuery};

#[post("")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::RegisterModel>,
) -> Result<success::Success<model::RegisterResponse>, error::Error> {
    let id = user_service.register(user_data.0).await?;
    Ok(success::Success::created(Some(model::RegisterResponse { id }))
        .message("Registration successful"))
}

#[get("/search")]
pub async fn search_users(
    user_service: web::Data<UserService>,
    query: ValidatedQuery<model::SearchQuery>,
) -> Result<success::Success<Vec<model::SearchResult>>, error::Error> {
    let results = user_service.search(&query.0.query, &query.0.email).await?;
    Ok(success::Success::ok(Some(results)).message("Users retrieved successfully"))
}

#[put("/profile")]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::UpdateProfileModel>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.update_profile(user_data.0).await?;
    Ok(success::Success::ok(Some(user)).message("Profile updated successfully"))
}

#[get("/{email}")]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    email: web::Path<String>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_profile(&email).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[delete("/{email}")]
pub async fn delete_account(
    user_service: web::Data<UserService>,
    email: web::Path<String>,
) -> Result<success::Success<()>, error::Error> {
    user_service.delete_account(&email).await?;
    Ok(success::Success::ok(None).message("Account deleted successfully"))
}
