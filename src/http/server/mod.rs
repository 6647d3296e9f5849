use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use crate::provider::OAuth2Provider;

mod endpoints;

use endpoints::oauth::oauth_endpoint;

use super::encoding::error::handle_reject;

#[derive(Debug)]
pub struct Server {
    provider: Arc<OAuth2Provider>,
}

/// The full route tree, without binding a socket.
pub fn routes(
    provider: Arc<OAuth2Provider>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let index = warp::path::end().and(warp::get()).map(|| "hello!");

    index
        .or(oauth_endpoint(provider))
        .recover(handle_reject)
        .with(warp::log("http-api"))
}

impl Server {
    pub fn new(provider: Arc<OAuth2Provider>) -> Self {
        Self {
            provider: Arc::clone(&provider),
        }
    }

    pub async fn serve(self, addr: SocketAddr) {
        warp::serve(routes(self.provider)).run(addr).await;
    }
}
