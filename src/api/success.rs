use actix_web::{http::StatusCode, HttpRequest, HttpResponse};
use std::borrow::Cow;

/// Wire shape of every successful response: `{ "data": ..., "message": ... }`.
#[derive(serde::Serialize)]
pub struct Envelope<'a, T: serde::Serialize> {
    pub data: &'a Option<T>,
    pub message: &'a Option<Cow<'static, str>>,
}

pub struct Success<T: serde::Serialize> {
    pub status: StatusCode,
    pub data: Option<T>,
    pub message: Option<Cow<'static, str>>,
}

impl<T: serde::Serialize> Success<T> {
    fn with_status(status: StatusCode, data: Option<T>) -> Self {
        Self { status, data, message: None }
    }

    pub fn ok(data: Option<T>) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: Option<T>) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(msg.into());
        self
    }

    fn envelope(&self) -> Envelope<'_, T> {
        Envelope { data: &self.data, message: &self.message }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.envelope())
    }
}
