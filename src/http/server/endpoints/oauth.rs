use std::sync::Arc;

use warp::hyper::body::Bytes;
use warp::Filter;

use crate::auth::{
    AuthorizationErrorKind, AuthorizationRequest, ConfirmAuthRequest, ConfirmationErrorKind,
    PendingCode,
};
use crate::http::encoding::{self, reply};
use crate::http::response::{with_cleared_pending_code, PENDING_CODE_COOKIE};
use crate::provider::OAuth2Provider;

const MAX_TOKEN_BODY: u64 = 16 * 1024;

pub fn oauth_endpoint(
    provider: Arc<OAuth2Provider>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_provider = warp::any().map(move || provider.clone());

    let authorize = warp::path("auth")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_provider.clone())
        .and(encoding::raw_query())
        .and_then(|provider: Arc<OAuth2Provider>, query: String| async move {
            let result = match encoding::decode_query::<AuthorizationRequest>(&query) {
                Ok(req) => provider.authorization_request(req).await,
                Err(_) => Err(AuthorizationErrorKind::Malformed),
            };
            reply::reply(result)
        });

    // The pending code cookie is dropped whatever the outcome, so errors are
    // rendered here rather than through the rejection handler.
    let confirm = warp::path("confirm_auth")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_provider.clone())
        .and(warp::cookie::optional(PENDING_CODE_COOKIE))
        .and(encoding::raw_query())
        .and_then(
            |provider: Arc<OAuth2Provider>, cookie: Option<String>, query: String| async move {
                let credential = PendingCode::from_credential(cookie);
                let result = match encoding::decode_query::<ConfirmAuthRequest>(&query) {
                    Ok(req) => provider.confirm_authorization(credential, req).await,
                    Err(_) if credential.is_none() => Err(ConfirmationErrorKind::MissingCredential),
                    Err(_) => Err(ConfirmationErrorKind::Malformed),
                };
                Ok::<_, warp::Rejection>(with_cleared_pending_code(reply::respond(result)))
            },
        );

    let token = warp::path("token")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_provider.clone())
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::content_length_limit(MAX_TOKEN_BODY))
        .and(warp::body::bytes())
        .and_then(
            |provider: Arc<OAuth2Provider>,
             content_type: Option<String>,
             authorization: Option<String>,
             body: Bytes| async move {
                let result = match encoding::decode_token_request(
                    content_type.as_deref(),
                    authorization.as_deref(),
                    &body,
                ) {
                    Ok(req) => provider.access_token_request(req).await,
                    Err(e) => Err(e),
                };
                reply::json_encode(result)
            },
        );

    authorize.or(confirm).or(token)
}
