use actix_web::{get, post, web};

use crate::{
    api::{error, success},
    modules::{
        membership::{
            model::{MembershipStatusResponse, UpgradeBody, VisitBody, VisitorResponse},
            repository_pg::VisitRepositoryPg,
            service::MembershipService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type MembershipSvc = MembershipService<VisitRepositoryPg, UserRepositoryPg>;

#[post("")]
pub async fn record_visit(
    membership_service: web::Data<MembershipSvc>,
    body: ValidatedJson<VisitBody>,
) -> Result<success::Success<()>, error::Error> {
    membership_service.record_visit(&body.0.visitor_email, &body.0.visited_email).await?;

    Ok(success::Success::created(None).message("Profile visit recorded"))
}

#[get("/{email}")]
pub async fn list_visitors(
    membership_service: web::Data<MembershipSvc>,
    email: web::Path<String>,
) -> Result<success::Success<Vec<VisitorResponse>>, error::Error> {
    let visitors = membership_service.list_visitors(&email).await?;

    Ok(success::Success::ok(Some(visitors)).message("Profile visitors retrieved successfully"))
}

#[post("/upgrade")]
pub async fn upgrade_membership(
    membership_service: web::Data<MembershipSvc>,
    body: ValidatedJson<UpgradeBody>,
) -> Result<success::Success<MembershipStatusResponse>, error::Error> {
    let status = membership_service.upgrade(&body.0.email, body.0.duration_months).await?;

    Ok(success::Success::ok(Some(status)).message("Upgraded to gold membership"))
}

#[get("/{email}")]
pub async fn membership_status(
    membership_service: web::Data<MembershipSvc>,
    email: web::Path<String>,
) -> Result<success::Success<MembershipStatusResponse>, error::Error> {
    let status = membership_service.check_status(&email).await?;

    Ok(success::Success::ok(Some(status)))
}
