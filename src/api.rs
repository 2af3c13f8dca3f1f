//! HTTP rendering of diversity errors, plus body and query extractors whose
//! rejections use the same `{"error": ...}` shape.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, warn};

use crate::diversity::{DiversityError, ErrorKind};

pub fn status_of(err: &DiversityError) -> StatusCode {
    match err {
        DiversityError::InvalidGoal(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DiversityError::MissingField(_)
        | DiversityError::InvalidBody(_)
        | DiversityError::InvalidQuery(_)
        | DiversityError::InvalidWeek(_) => StatusCode::BAD_REQUEST,
        DiversityError::UnknownFood(_) | DiversityError::LogNotFound(_) => StatusCode::NOT_FOUND,
        DiversityError::NotOwner { .. } => StatusCode::FORBIDDEN,
        DiversityError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for DiversityError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        match self.kind() {
            ErrorKind::TransientStore => error!(error = %self, "store failure"),
            _ => warn!(error = %self, %status, "request rejected"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `Json<T>` whose rejections come back as `{"error": ...}` like every other
/// failure instead of axum's plain-text body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = DiversityError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(DiversityError::InvalidBody(rejection.body_text())),
        }
    }
}

/// `Query<T>` with the same rejection treatment as [`JsonBody`].
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = DiversityError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(DiversityError::InvalidQuery(rejection.body_text())),
        }
    }
}
