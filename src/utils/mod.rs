use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::future::LocalBoxFuture;
use validator::Validate;

use crate::api::error;

/// Profile pictures travel as base64 strings in every public payload.
pub fn encode_picture(picture: Option<&[u8]>) -> Option<String> {
    picture.map(|bytes| STANDARD.encode(bytes))
}

/// Malformed bodies and failed validation both surface as `InvalidInput`.
fn rejected(e: impl std::fmt::Display) -> error::Error {
    error::Error::invalid_input(e.to_string())
}

/// JSON body that has passed its `validator` rules.
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let body = body.await.map_err(rejected)?.into_inner();
            body.validate().map_err(rejected)?;
            Ok(ValidatedJson(body))
        })
    }
}

/// Query string that has passed its `validator` rules.
pub struct ValidatedQuery<T>(pub T);

impl<T> FromRequest for ValidatedQuery<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let query = web::Query::<T>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .map_err(rejected);

        Box::pin(async move {
            let query = query?;
            query.validate().map_err(rejected)?;
            Ok(ValidatedQuery(query))
        })
    }
}
