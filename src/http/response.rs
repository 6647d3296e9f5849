use crate::auth::error::ErrorResponse;
use crate::auth::{ConsentPrompt, PendingCode, Redirect};
use crate::core::types::{Expire, RedirectUri};
use crate::provider::error::Error;

use chrono::{DateTime, Utc};
use tracing::{event, Level};
use url::Url;
use warp::http::header::{HeaderValue, CACHE_CONTROL, LOCATION, SET_COOKIE};
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

pub const PENDING_CODE_COOKIE: &str = "temp_auth_request_code";

/// The cookie is only ever read back by the confirmation endpoint.
const PENDING_CODE_PATH: &str = "/confirm_auth";

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Appends `params` to whatever query the registered URI already has.
fn append_params(r: &RedirectUri, p: impl serde::Serialize) -> Result<Url, Error> {
    let mut url = Url::parse(&r.0)?;
    let new_qs = serde_urlencoded::to_string(p)?;
    let pairs = form_urlencoded::parse(new_qs.as_bytes());
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(url)
}

fn server_error() -> Response {
    let body = warp::reply::json(&ErrorResponse {
        error: "server error",
    });
    warp::reply::with_status(body, StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

impl<T: serde::Serialize + Send> Reply for Redirect<T> {
    fn into_response(self) -> Response {
        let location = append_params(&self.uri, self.params)
            .map(|url| HeaderValue::from_str(url.as_str()));

        match location {
            Ok(Ok(location)) => {
                let mut response = Response::default();
                *response.status_mut() = StatusCode::FOUND;
                response.headers_mut().insert(LOCATION, location);
                response
            }
            Ok(Err(e)) => {
                event!(Level::ERROR, error = %e, "Redirect location is not a valid header");
                server_error()
            }
            Err(e) => {
                event!(Level::ERROR, error = %e, "Registered redirect URI is unusable");
                server_error()
            }
        }
    }
}

impl Reply for ConsentPrompt {
    fn into_response(self) -> Response {
        let cookie = pending_code_cookie(&self.credential);
        let mut response = warp::reply::html(self.page).into_response();

        let headers = response.headers_mut();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        match HeaderValue::from_str(&cookie) {
            Ok(cookie) => {
                headers.insert(SET_COOKIE, cookie);
            }
            Err(_) => return server_error(),
        }
        response
    }
}

/// `Set-Cookie` value carrying a freshly issued code.
pub fn pending_code_cookie(credential: &PendingCode) -> String {
    let expires: DateTime<Utc> = credential.expires_at().as_datetime();
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path={}; Max-Age={}; Expires={}",
        PENDING_CODE_COOKIE,
        credential.code.0,
        PENDING_CODE_PATH,
        PendingCode::EXPIRES_IN_SECS,
        expires.format(HTTP_DATE),
    )
}

/// `Set-Cookie` value that removes the pending code from the user agent.
pub fn clear_pending_code_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "temp_auth_request_code=; HttpOnly; Secure; SameSite=Lax; Path=/confirm_auth; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
    )
}

/// Adds the clearing cookie to any response, success or error.
pub fn with_cleared_pending_code(mut response: Response) -> Response {
    response
        .headers_mut()
        .append(SET_COOKIE, clear_pending_code_cookie());
    response
}
