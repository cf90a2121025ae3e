/// Membership Service
///
/// Profile visits are recorded for everyone but only gold members may read
/// who visited them. Expiry is enforced lazily: the first read after the
/// expiry date clears the flag and persists that.
use std::sync::Arc;

use chrono::{DateTime, Months, Utc};

use crate::api::error;
use crate::modules::membership::model::{MembershipStatusResponse, VisitorResponse};
use crate::modules::membership::repository::VisitRepository;
use crate::modules::membership::schema::ProfileVisitEntity;
use crate::modules::user::{repository::UserRepository, schema::UserEntity};

/// Gold flag still set but the expiry date has passed.
pub fn is_lapsed(user: &UserEntity, now: DateTime<Utc>) -> bool {
    user.is_gold_member && user.gold_membership_expiry.is_some_and(|expiry| expiry < now)
}

#[derive(Clone)]
pub struct MembershipService<V, U>
where
    V: VisitRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    visit_repo: Arc<V>,
    user_repo: Arc<U>,
}

impl<V, U> MembershipService<V, U>
where
    V: VisitRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(visit_repo: Arc<V>, user_repo: Arc<U>) -> Self {
        MembershipService { visit_repo, user_repo }
    }

    async fn find_user(&self, email: &str) -> Result<UserEntity, error::SystemError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    /// Clears a lapsed gold flag in storage and on `user`. The expiry date is
    /// kept so the owner can still see when it ended.
    async fn downgrade_if_lapsed(&self, user: &mut UserEntity) -> Result<bool, error::SystemError> {
        if !is_lapsed(user, Utc::now()) {
            return Ok(false);
        }

        self.user_repo.update_membership(&user.id, false, user.gold_membership_expiry).await?;
        user.is_gold_member = false;

        tracing::info!("Gold membership of {} lapsed, downgraded", user.id);
        Ok(true)
    }

    pub async fn record_visit(
        &self,
        visitor_email: &str,
        visited_email: &str,
    ) -> Result<ProfileVisitEntity, error::SystemError> {
        if visitor_email.is_empty() || visited_email.is_empty() {
            return Err(error::SystemError::invalid_input("Visitor and visited emails are required"));
        }
        if visitor_email == visited_email {
            return Err(error::SystemError::invalid_input("Cannot record a visit to your own profile"));
        }

        let (visitor, visited) =
            tokio::try_join!(self.find_user(visitor_email), self.find_user(visited_email))?;

        let visit = self.visit_repo.create(&visitor.id, &visited.id).await?;

        tracing::debug!("Visit {} recorded {} -> {}", visit.id, visitor.id, visited.id);
        Ok(visit)
    }

    pub async fn list_visitors(
        &self,
        owner_email: &str,
    ) -> Result<Vec<VisitorResponse>, error::SystemError> {
        let mut owner = self.find_user(owner_email).await?;

        if !owner.is_gold_member {
            return Err(error::SystemError::membership_required(
                "Gold membership is required to see profile visitors",
            ));
        }

        if self.downgrade_if_lapsed(&mut owner).await? {
            return Err(error::SystemError::membership_expired("Your gold membership has expired"));
        }

        let rows = self.visit_repo.find_visitors(&owner.id).await?;
        Ok(rows.into_iter().map(VisitorResponse::from).collect())
    }

    /// Expiry is always counted from now; a second upgrade replaces the first.
    pub async fn upgrade(
        &self,
        email: &str,
        duration_months: Option<u32>,
    ) -> Result<MembershipStatusResponse, error::SystemError> {
        let months = duration_months.unwrap_or(1);
        if months < 1 {
            return Err(error::SystemError::invalid_input("Duration must be at least one month"));
        }

        let user = self.find_user(email).await?;

        let expiry = Utc::now()
            .checked_add_months(Months::new(months))
            .ok_or_else(|| error::SystemError::invalid_input("Duration is out of range"))?;

        self.user_repo.update_membership(&user.id, true, Some(expiry)).await?;

        tracing::info!("User {} upgraded to gold until {}", user.id, expiry);
        Ok(MembershipStatusResponse { is_gold_member: true, expiry_date: Some(expiry) })
    }

    pub async fn check_status(
        &self,
        email: &str,
    ) -> Result<MembershipStatusResponse, error::SystemError> {
        let mut user = self.find_user(email).await?;
        self.downgrade_if_lapsed(&mut user).await?;

        Ok(MembershipStatusResponse::from(&user))
    }
}
