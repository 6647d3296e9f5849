use crate::auth::error::Reason;
use crate::auth::{AuthorizationErrorKind, AuthorizationRequest, ConsentPrompt, ConsentView};
use crate::core::models::Client;
use crate::core::types::{ClientId, Scope};

use tracing::{event, Level};

use super::OAuth2Provider;

impl OAuth2Provider {
    /// Checks are applied in a fixed order and the first failure wins.
    pub fn validate_authorization_request(
        &self,
        req: &AuthorizationRequest,
    ) -> Result<Client, AuthorizationErrorKind> {
        if req.response_type != "code" {
            return Err(AuthorizationErrorKind::UnsupportedResponseType);
        }
        if req.client_id.is_empty() {
            return Err(AuthorizationErrorKind::MissingClientId);
        }
        if !req.redirect_uri.contains("https") {
            return Err(AuthorizationErrorKind::InsecureRedirectUri);
        }
        if req.scope.is_empty() {
            return Err(AuthorizationErrorKind::MissingScope);
        }
        if req.state.is_empty() {
            return Err(AuthorizationErrorKind::MissingState);
        }

        self.find_client(&ClientId(req.client_id.clone()))
            .map_err(|_| AuthorizationErrorKind::ServerError)?
            .ok_or(AuthorizationErrorKind::UnknownClient)
    }

    #[tracing::instrument(skip_all, fields(client_id = %req.client_id))]
    pub async fn authorization_request(
        &self,
        req: AuthorizationRequest,
    ) -> Result<ConsentPrompt, AuthorizationErrorKind> {
        let client = self.validate_authorization_request(&req).map_err(|e| {
            event!(Level::DEBUG, reason = e.reason(), "Rejecting authorization request");
            e
        })?;

        let credential = self.codes.issue().map_err(|e| {
            event!(Level::ERROR, error = %e, "Failed to generate authorization code");
            AuthorizationErrorKind::ServerError
        })?;

        let view = ConsentView {
            client_id: client.id.0.clone(),
            name: client.name.clone(),
            website: client.website.clone(),
            logo: client.logo.clone(),
            state: req.state,
            scopes: Scope::from_delimited_parts(&req.scope).as_parts(),
        };

        event!(Level::DEBUG, scopes = ?view.scopes, "Presenting consent screen");
        Ok(ConsentPrompt {
            page: self.consent.render(&view),
            credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::ConsentView;
    use crate::provider::consent::ConsentRenderer;
    use crate::provider::testing::{provider_with_store, Exhausted};

    struct PlainRenderer;

    impl ConsentRenderer for PlainRenderer {
        fn render(&self, view: &ConsentView) -> String {
            format!("{} wants {}", view.name, view.scopes.join(","))
        }
    }

    fn acme_request() -> AuthorizationRequest {
        AuthorizationRequest {
            response_type: "code".to_string(),
            client_id: "acme".to_string(),
            redirect_uri: "https://acme.example/cb".to_string(),
            scope: "profile email".to_string(),
            state: "xyz".to_string(),
        }
    }

    fn modified(change: impl FnOnce(&mut AuthorizationRequest)) -> AuthorizationRequest {
        let mut req = acme_request();
        change(&mut req);
        req
    }

    #[tokio::test]
    async fn custom_renderer_replaces_the_builtin_page() {
        let (provider, _) = provider_with_store();
        let provider = provider.with_consent_renderer(Arc::new(PlainRenderer));

        let prompt = provider.authorization_request(acme_request()).await.unwrap();
        assert_eq!(prompt.page, "Acme wants profile,email");
    }

    #[tokio::test]
    async fn valid_request_renders_consent_with_a_fresh_code() {
        let (provider, _) = provider_with_store();

        let prompt = provider.authorization_request(acme_request()).await.unwrap();

        assert!(prompt.page.contains("Acme"));
        assert!(prompt.page.contains("<li>profile</li>"));
        assert!(prompt.page.contains("<li>email</li>"));
        assert!(prompt.page.contains(r#"value="xyz""#));
        assert_eq!(prompt.credential.code.0.len(), 43);
    }

    #[test]
    fn first_failing_check_is_reported() {
        let (provider, _) = provider_with_store();

        let cases = vec![
            (
                modified(|r| r.response_type = "token".to_string()),
                AuthorizationErrorKind::UnsupportedResponseType,
            ),
            (modified(|r| r.client_id.clear()), AuthorizationErrorKind::MissingClientId),
            (
                modified(|r| r.redirect_uri = "http://acme.example/cb".to_string()),
                AuthorizationErrorKind::InsecureRedirectUri,
            ),
            (modified(|r| r.scope.clear()), AuthorizationErrorKind::MissingScope),
            (modified(|r| r.state.clear()), AuthorizationErrorKind::MissingState),
            (
                modified(|r| r.client_id = "nobody".to_string()),
                AuthorizationErrorKind::UnknownClient,
            ),
        ];

        for (req, expected) in cases {
            assert_eq!(provider.validate_authorization_request(&req).unwrap_err(), expected);
        }
    }

    #[test]
    fn response_type_is_checked_before_client_id() {
        let (provider, _) = provider_with_store();
        let req = AuthorizationRequest {
            response_type: "token".to_string(),
            ..Default::default()
        };

        assert_eq!(
            provider.validate_authorization_request(&req).unwrap_err(),
            AuthorizationErrorKind::UnsupportedResponseType
        );
    }

    #[tokio::test]
    async fn redirect_uri_is_not_compared_to_registration() {
        let (provider, _) = provider_with_store();
        let mut req = acme_request();
        req.redirect_uri = "https://elsewhere.example/".to_string();

        assert!(provider.authorization_request(req).await.is_ok());
    }

    #[tokio::test]
    async fn code_generation_failure_is_a_server_error() {
        let (provider, _) = provider_with_store();
        let provider = provider.with_random_source(Arc::new(Exhausted));

        assert_eq!(
            provider.authorization_request(acme_request()).await.unwrap_err(),
            AuthorizationErrorKind::ServerError
        );
    }
}
