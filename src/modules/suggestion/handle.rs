use actix_web::{get, web};

use crate::{
    api::{error, success},
    modules::{
        suggestion::{model::SuggestionResponse, service::SuggestionService},
        user::repository_pg::UserRepositoryPg,
    },
};

pub type SuggestionSvc = SuggestionService<UserRepositoryPg>;

#[get("/{email}")]
pub async fn suggest_friends(
    suggestion_service: web::Data<SuggestionSvc>,
    email: web::Path<String>,
) -> Result<success::Success<Vec<SuggestionResponse>>, error::Error> {
    let suggestions = suggestion_service.suggest(&email).await?;

    Ok(success::Success::ok(Some(suggestions)).message("Friend suggestions retrieved successfully"))
}
