use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

use crate::ENV;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid Input: {0}")]
    InvalidInput(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Already Friends: {0}")]
    AlreadyFriends(Cow<'static, str>),
    #[error("Duplicate Request: {0}")]
    DuplicateRequest(Cow<'static, str>),
    #[error("Not Friends: {0}")]
    NotFriends(Cow<'static, str>),
    #[error("Already Liked: {0}")]
    AlreadyLiked(Cow<'static, str>),
    #[error("Not Liked: {0}")]
    NotLiked(Cow<'static, str>),
    #[error("Membership Required: {0}")]
    MembershipRequired(Cow<'static, str>),
    #[error("Membership Expired: {0}")]
    MembershipExpired(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn invalid_input(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Stable name of the failure class, shared by HTTP bodies and socket error events.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "InvalidInput",
            Error::Forbidden(_) => "Forbidden",
            Error::NotFound(_) => "NotFound",
            Error::AlreadyFriends(_) => "AlreadyFriends",
            Error::DuplicateRequest(_) => "DuplicateRequest",
            Error::NotFriends(_) => "NotFriends",
            Error::AlreadyLiked(_) => "AlreadyLiked",
            Error::NotLiked(_) => "NotLiked",
            Error::MembershipRequired(_) => "MembershipRequired",
            Error::MembershipExpired(_) => "MembershipExpired",
            Error::Conflict(_) => "Conflict",
            Error::InternalServer => "InternalError",
        }
    }

    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Error::InvalidInput(msg)
            | Error::Forbidden(msg)
            | Error::NotFound(msg)
            | Error::AlreadyFriends(msg)
            | Error::DuplicateRequest(msg)
            | Error::NotFriends(msg)
            | Error::AlreadyLiked(msg)
            | Error::NotLiked(msg)
            | Error::MembershipRequired(msg)
            | Error::MembershipExpired(msg)
            | Error::Conflict(msg) => msg.clone(),
            Error::InternalServer => "Internal Server Error".into(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody { kind: self.kind(), message: self.message() }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::InvalidInput(_)
            | Error::AlreadyFriends(_)
            | Error::DuplicateRequest(_)
            | Error::AlreadyLiked(_)
            | Error::NotLiked(_) => StatusCode::BAD_REQUEST,
            Error::Forbidden(_)
            | Error::NotFriends(_)
            | Error::MembershipRequired(_)
            | Error::MembershipExpired(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let header = ("Access-Control-Allow-Origin", ENV.frontend_url.as_str());
        let mut res = HttpResponse::build(self.status_code());

        res.insert_header(header);
        res.insert_header(("Access-Control-Allow-Credentials", "true"));

        res.json(self.body())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // sqlx errors
    #[error("Database Error : {0}")]
    DatabaseError(Cow<'static, str>),
    #[error("Migration Error")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    // Domain errors
    #[error("Invalid Input: {0}")]
    InvalidInput(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Already Friends: {0}")]
    AlreadyFriends(Cow<'static, str>),
    #[error("Duplicate Request: {0}")]
    DuplicateRequest(Cow<'static, str>),
    #[error("Not Friends: {0}")]
    NotFriends(Cow<'static, str>),
    #[error("Already Liked: {0}")]
    AlreadyLiked(Cow<'static, str>),
    #[error("Not Liked: {0}")]
    NotLiked(Cow<'static, str>),
    #[error("Membership Required: {0}")]
    MembershipRequired(Cow<'static, str>),
    #[error("Membership Expired: {0}")]
    MembershipExpired(Cow<'static, str>),
    #[error("Database Conflict: {0:?}")]
    Conflict(Option<DbErrorMeta>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

fn conflict_message(meta: &Option<DbErrorMeta>) -> Cow<'static, str> {
    let Some(m) = meta else {
        return "Duplicate value".into();
    };

    let Some(constraint) = &m.constraint else {
        return "Duplicate value".into();
    };

    // users_email_key -> "Email"
    let field = constraint.trim_end_matches("_key").split('_').next_back().unwrap_or("value");

    let mut chars = field.chars();
    let field = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Value".to_string(),
    };

    format!("{field} already exists").into()
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub message: String,
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::InvalidInput(msg) => Error::InvalidInput(msg),
            SystemError::Forbidden(msg) => Error::Forbidden(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::AlreadyFriends(msg) => Error::AlreadyFriends(msg),
            SystemError::DuplicateRequest(msg) => Error::DuplicateRequest(msg),
            SystemError::NotFriends(msg) => Error::NotFriends(msg),
            SystemError::AlreadyLiked(msg) => Error::AlreadyLiked(msg),
            SystemError::NotLiked(msg) => Error::NotLiked(msg),
            SystemError::MembershipRequired(msg) => Error::MembershipRequired(msg),
            SystemError::MembershipExpired(msg) => Error::MembershipExpired(msg),
            SystemError::Conflict(meta) => Error::Conflict(conflict_message(&meta)),
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return SystemError::Conflict(Some(DbErrorMeta {
                    code: db_err.code().map(|s| s.to_string()),
                    constraint: db_err.constraint().map(|s| s.to_string()),
                    message: db_err.message().to_string(),
                }));
            }
            log::error!("Unhandled DB error: {:?}", db_err);
            return SystemError::DatabaseError(db_err.message().to_string().into());
        }
        log::error!("{:?}", err);
        SystemError::InternalError(Box::new(err))
    }
}

impl SystemError {
    pub fn invalid_input(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn already_friends(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::AlreadyFriends(msg.into())
    }

    pub fn duplicate_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::DuplicateRequest(msg.into())
    }

    pub fn not_friends(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFriends(msg.into())
    }

    pub fn already_liked(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::AlreadyLiked(msg.into())
    }

    pub fn not_liked(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotLiked(msg.into())
    }

    pub fn membership_required(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::MembershipRequired(msg.into())
    }

    pub fn membership_expired(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::MembershipExpired(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_kind() {
        let err: Error = SystemError::not_friends("You can only send messages to friends").into();
        assert_eq!(err.kind(), "NotFriends");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err: Error = SystemError::duplicate_request("exists").into();
        assert_eq!(err.kind(), "DuplicateRequest");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: Error = SystemError::already_liked("You have already liked this post").into();
        assert_eq!(err.kind(), "AlreadyLiked");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: Error = SystemError::membership_expired("expired").into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn storage_failures_hide_details() {
        let err: Error = SystemError::DatabaseError("relation users does not exist".into()).into();
        assert_eq!(err.kind(), "InternalError");
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_message_names_the_column() {
        let meta = Some(DbErrorMeta {
            code: Some("23505".into()),
            constraint: Some("users_email_key".into()),
            message: "duplicate key".into(),
        });
        assert_eq!(conflict_message(&meta), "Email already exists");
        assert_eq!(conflict_message(&None), "Duplicate value");
    }
}
