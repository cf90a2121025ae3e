use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::error;
use crate::modules::user::model::{
    InsertUser, PublicProfile, RegisterModel, SearchResult, UpdateProfileModel, UpdateUser,
    UserResponse,
};
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserEntity;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn with_dependencies(repo: Arc<dyn UserRepository + Send + Sync>) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo }
    }

    async fn require(&self, email: &str) -> Result<UserEntity, error::SystemError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    pub async fn register(&self, user: RegisterModel) -> Result<Uuid, error::SystemError> {
        let new_user = InsertUser {
            email: user.email,
            name: user.name,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
        };

        let user_id = self.repo.create(&new_user).await?;
        info!("Registered user {}", user_id);
        Ok(user_id)
    }

    pub async fn get_profile(&self, email: &str) -> Result<UserResponse, error::SystemError> {
        Ok(UserResponse::from(self.require(email).await?))
    }

    pub async fn update_profile(
        &self,
        user: UpdateProfileModel,
    ) -> Result<UserResponse, error::SystemError> {
        let update = UpdateUser {
            name: user.name,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
        };

        let updated = self
            .repo
            .update_profile(&user.email, &update)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(UserResponse::from(updated))
    }

    pub async fn search(
        &self,
        query: &str,
        email: &str,
    ) -> Result<Vec<SearchResult>, error::SystemError> {
        let current = self.require(email).await?;
        let users = self.repo.search(query, &current.id).await?;

        Ok(users
            .iter()
            .map(|user| SearchResult {
                profile: PublicProfile::from(user),
                is_friend: current.is_friend_of(&user.id),
            })
            .collect())
    }

    pub async fn delete_account(&self, email: &str) -> Result<(), error::SystemError> {
        let user = self.require(email).await?;
        self.repo.delete_account(&user.id).await?;
        info!("Deleted account {}", user.id);
        Ok(())
    }
}
