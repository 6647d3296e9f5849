use super::error::AuthRejection;
use warp::http::header::{HeaderValue, CACHE_CONTROL};
use warp::reply::{Reply, Response};
use warp::Rejection;

/// JSON body that must never be cached by the user agent or a proxy.
pub struct NoStore<T>(pub T);

impl<T: serde::Serialize + Send> Reply for NoStore<T> {
    fn into_response(self) -> Response {
        let mut response = warp::reply::json(&self.0).into_response();
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}

pub fn json_encode(
    value: Result<impl serde::Serialize + Send, impl Into<AuthRejection>>,
) -> Result<Response, Rejection> {
    value
        .map(|v| NoStore(v).into_response())
        .map_err(|e| warp::reject::custom::<AuthRejection>(e.into()))
}

pub fn reply<T, E>(result: Result<T, E>) -> Result<Response, Rejection>
where
    T: Reply,
    E: Into<AuthRejection>,
{
    result
        .map(|t| t.into_response())
        .map_err(|e| warp::reject::custom(e.into()))
}

/// Like [`reply`], but renders errors in place so the caller can still
/// decorate the response.
pub fn respond<T, E>(result: Result<T, E>) -> Response
where
    T: Reply,
    E: Into<AuthRejection>,
{
    match result {
        Ok(t) => t.into_response(),
        Err(e) => {
            let rejection: AuthRejection = e.into();
            rejection.into_response()
        }
    }
}
