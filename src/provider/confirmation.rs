use crate::auth::{
    ConfirmAuthRequest, ConfirmationErrorKind, ConfirmationResponse, PendingCode, Redirect,
};
use crate::core::types::ClientId;
use crate::util::hash::hash_without_salt;

use tracing::{event, Level};

use super::OAuth2Provider;

impl OAuth2Provider {
    /// Settle the user's decision. The redirect target is always the
    /// client's registered URI, never anything the request supplied.
    #[tracing::instrument(skip_all, fields(client_id = %req.client_id, authorize = req.authorize))]
    pub async fn confirm_authorization(
        &self,
        credential: Option<PendingCode>,
        req: ConfirmAuthRequest,
    ) -> Result<Redirect<ConfirmationResponse>, ConfirmationErrorKind> {
        let credential = credential.ok_or(ConfirmationErrorKind::MissingCredential)?;

        let client_id = ClientId(req.client_id);
        let client = self
            .find_client(&client_id)
            .map_err(|_| ConfirmationErrorKind::ServerError)?
            .ok_or(ConfirmationErrorKind::UnknownClient)?;

        if !req.authorize {
            event!(Level::INFO, "User denied authorization");
            return Ok(Redirect::new(
                client.redirect_uri,
                ConfirmationResponse::denied(req.state),
            ));
        }

        let hashed = hash_without_salt(&credential.code);
        self.store
            .set_client_code(&client.id, &hashed)
            .map_err(|e| {
                event!(Level::ERROR, error = %e, "Failed to record authorization code");
                ConfirmationErrorKind::ServerError
            })?;

        event!(Level::INFO, "User approved authorization");
        Ok(Redirect::new(
            client.redirect_uri,
            ConfirmationResponse::granted(credential.code, req.state),
        ))
    }
}
