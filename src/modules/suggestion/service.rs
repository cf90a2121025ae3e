/// Suggestion Service
///
/// Friends-of-friends ranked by how many friends they share with the user.
use std::sync::Arc;

use crate::api::error;
use crate::constants::COLD_START_SUGGESTIONS;
use crate::modules::suggestion::model::SuggestionResponse;
use crate::modules::user::{model::PublicProfile, repository::UserRepository, schema::UserEntity};

/// Scores every candidate against the user's friend set and sorts by score,
/// highest first. Equal scores keep the order the candidates came in.
pub fn rank(user: &UserEntity, candidates: &[UserEntity]) -> Vec<SuggestionResponse> {
    let mut ranked: Vec<SuggestionResponse> = candidates
        .iter()
        .filter(|c| c.id != user.id && !user.is_friend_of(&c.id))
        .map(|c| SuggestionResponse {
            profile: PublicProfile::from(c),
            mutual_friends: c.friends.iter().filter(|id| user.is_friend_of(id)).count(),
        })
        .collect();

    // stable
    ranked.sort_by(|a, b| b.mutual_friends.cmp(&a.mutual_friends));
    ranked
}

#[derive(Clone)]
pub struct SuggestionService<U>
where
    U: UserRepository + Send + Sync,
{
    user_repo: Arc<U>,
}

impl<U> SuggestionService<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(user_repo: Arc<U>) -> Self {
        SuggestionService { user_repo }
    }

    pub async fn suggest(&self, email: &str) -> Result<Vec<SuggestionResponse>, error::SystemError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if user.friends.is_empty() {
            let sample =
                self.user_repo.find_sample_excluding(&user.id, COLD_START_SUGGESTIONS).await?;

            return Ok(sample
                .iter()
                .map(|u| SuggestionResponse { profile: PublicProfile::from(u), mutual_friends: 0 })
                .collect());
        }

        let candidates = self.user_repo.find_friends_of_friends(&user.id, &user.friends).await?;
        let ranked = rank(&user, &candidates);

        tracing::debug!("{} suggestion(s) for {}", ranked.len(), user.id);
        Ok(ranked)
    }
}
