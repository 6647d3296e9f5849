use crate::auth::error::{ErrorKind, ErrorResponse, Reason};
use crate::auth::{AccessTokenErrorKind, AuthorizationErrorKind, ConfirmationErrorKind};

use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    Authorization(AuthorizationErrorKind),
    Confirmation(ConfirmationErrorKind),
    AccessToken(AccessTokenErrorKind),
}

impl warp::reject::Reject for AuthRejection {}

impl From<AuthorizationErrorKind> for AuthRejection {
    fn from(error: AuthorizationErrorKind) -> Self {
        Self::Authorization(error)
    }
}

impl From<ConfirmationErrorKind> for AuthRejection {
    fn from(error: ConfirmationErrorKind) -> Self {
        Self::Confirmation(error)
    }
}

impl From<AccessTokenErrorKind> for AuthRejection {
    fn from(error: AccessTokenErrorKind) -> Self {
        Self::AccessToken(error)
    }
}

impl AuthRejection {
    fn body(&self) -> ErrorResponse {
        match self {
            Self::Authorization(e) => e.into(),
            Self::Confirmation(e) => e.into(),
            Self::AccessToken(e) => e.into(),
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Authorization(e) => e.kind(),
            Self::Confirmation(e) => e.kind(),
            Self::AccessToken(e) => e.kind(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match (self, self.kind()) {
            (_, ErrorKind::ServerError) => StatusCode::INTERNAL_SERVER_ERROR,
            (_, ErrorKind::InvalidClient) => StatusCode::UNAUTHORIZED,
            // Only the token endpoint reports an unknown client as missing.
            (Self::AccessToken(_), ErrorKind::UnknownClient) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl Reply for AuthRejection {
    fn into_response(self) -> Response {
        let body = warp::reply::json(&self.body());
        warp::reply::with_status(body, self.status()).into_response()
    }
}

pub async fn handle_reject(err: Rejection) -> Result<Response, Rejection> {
    match err.find::<AuthRejection>() {
        Some(e) => Ok((*e).into_response()),
        None => Err(err),
    }
}
