pub mod error;
pub mod reply;

use crate::auth::{AccessTokenErrorKind, TokenRequest};
use http_basic_auth::Credential as BasicCredentials;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection};

/// The raw query string, or an empty one when the request has none.
///
/// Decoding is left to the handlers so that a malformed query is reported
/// with each endpoint's own reason instead of a generic rejection.
pub fn raw_query() -> impl Filter<Extract = (String,), Error = std::convert::Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
}

pub fn decode_query<T: serde::de::DeserializeOwned>(
    raw: &str,
) -> Result<T, serde_urlencoded::de::Error> {
    serde_urlencoded::from_str(raw)
}

/// Accepts a JSON body when the content type says so, form encoding
/// otherwise. Basic credentials only fill fields the body left empty.
pub fn decode_token_request(
    content_type: Option<&str>,
    authorization: Option<&str>,
    body: &Bytes,
) -> Result<TokenRequest, AccessTokenErrorKind> {
    let is_json = content_type.map(|c| c.contains("json")).unwrap_or(false);

    let req: TokenRequest = if is_json {
        serde_json::from_slice(body).map_err(|_| AccessTokenErrorKind::Malformed)?
    } else {
        serde_urlencoded::from_bytes(body).map_err(|_| AccessTokenErrorKind::Malformed)?
    };

    let basic = authorization.and_then(|h| h.parse::<BasicCredentials>().ok());
    Ok(match basic {
        Some(c) => req.with_basic_credentials(c.user_id, c.password),
        None => req,
    })
}
