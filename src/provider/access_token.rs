use crate::auth::{AccessTokenErrorKind, AccessTokenResponse, TokenRequest, EXPIRES_IN_DISPLAY};
use crate::provider::token::TokenService;
use crate::util::hash::{constant_time_eq, hash_without_salt};

use super::{CodePolicy, OAuth2Provider};

use tracing::{event, Level};

impl OAuth2Provider {
    #[tracing::instrument(skip_all, fields(client_id = %req.client_id))]
    pub async fn access_token_request(
        &self,
        req: TokenRequest,
    ) -> Result<AccessTokenResponse, AccessTokenErrorKind> {
        event!(Level::TRACE, "Handling access token request");
        let req = req.validate()?;

        let client = self
            .find_client(&req.client_id)
            .map_err(|_| AccessTokenErrorKind::ServerError)?
            .ok_or(AccessTokenErrorKind::ClientNotFound)?;

        if !constant_time_eq(client.secret.as_ref(), req.client_secret.as_ref()) {
            event!(Level::WARN, "Client authentication failed");
            return Err(AccessTokenErrorKind::InvalidClient);
        }

        let presented = hash_without_salt(&req.code);
        let matches = client
            .code
            .as_ref()
            .map(|stored| constant_time_eq(stored.as_ref(), presented.as_ref()))
            .unwrap_or(false);

        if !matches {
            event!(Level::DEBUG, "Presented code does not match pending code");
            return Err(AccessTokenErrorKind::InvalidCode);
        }

        if self.policy == CodePolicy::SingleUse {
            let cleared = self
                .store
                .clear_client_code(&client.id, &presented)
                .map_err(|e| {
                    event!(Level::ERROR, error = %e, "Failed to clear redeemed code");
                    AccessTokenErrorKind::ServerError
                })?;

            if !cleared {
                event!(Level::DEBUG, "Code was redeemed concurrently");
                return Err(AccessTokenErrorKind::InvalidCode);
            }
        }

        let access_token = self.token.new_token(&client).map_err(|e| {
            event!(Level::ERROR, error = %e, "Failed to sign access token");
            AccessTokenErrorKind::ServerError
        })?;

        Ok(AccessTokenResponse {
            access_token,
            token_type: TokenService::token_type(),
            expires_in: EXPIRES_IN_DISPLAY,
        })
    }
}
