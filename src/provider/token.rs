use std::sync::Arc;

use crate::auth::TokenType;
use crate::core::models::Client;
use crate::provider::{claims::AccessClaims, error::Error};

use jsonwebtoken::{DecodingKey, EncodingKey};
use tracing::{event, Level};

/// Resolves the key a client's tokens are signed and verified with.
pub trait SigningKeys: Send + Sync {
    fn encoding_key(&self, client: &Client) -> Result<EncodingKey, Error>;
    fn decoding_key(&self, client: &Client) -> Result<DecodingKey<'static>, Error>;
}

/// HMAC keys taken from each client's own secret.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientSecretKeys;

impl SigningKeys for ClientSecretKeys {
    fn encoding_key(&self, client: &Client) -> Result<EncodingKey, Error> {
        Ok(EncodingKey::from_secret(client.secret.as_ref().as_bytes()))
    }

    fn decoding_key(&self, client: &Client) -> Result<DecodingKey<'static>, Error> {
        Ok(DecodingKey::from_secret(client.secret.as_ref().as_bytes()).into_static())
    }
}

pub struct TokenService {
    keys: Arc<dyn SigningKeys>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenService {{ ... }}")
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new(Arc::new(ClientSecretKeys))
    }
}

impl TokenService {
    pub fn new(keys: Arc<dyn SigningKeys>) -> Self {
        Self { keys }
    }

    pub fn token_type() -> TokenType {
        TokenType::Bearer
    }

    #[tracing::instrument(skip_all, fields(client_id = %client.id))]
    pub fn new_token(&self, client: &Client) -> Result<String, Error> {
        let claims = AccessClaims::new();

        event!(Level::DEBUG, exp = claims.exp, "Issuing access_token");
        self.make_token(client, &claims)
    }

    pub fn make_token(&self, client: &Client, claims: &impl serde::Serialize) -> Result<String, Error> {
        use jsonwebtoken::{encode, Algorithm, Header};

        let header = Header {
            alg: Algorithm::HS256,
            ..Default::default()
        };
        let key = self.keys.encoding_key(client)?;

        Ok(encode(&header, claims, &key)?)
    }

    pub fn validate_token(&self, client: &Client, token: &str) -> Result<AccessClaims, Error> {
        use jsonwebtoken::{decode, Algorithm, Validation};

        let validation = Validation::new(Algorithm::HS256);
        let key = self.keys.decoding_key(client)?;

        decode::<AccessClaims>(token, &key, &validation)
            .map(|td| td.claims)
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ClientRegistration;
    use crate::core::types::{ClientId, ClientSecret, RedirectUri};
    use chrono::Utc;

    fn client(secret: &str) -> Client {
        ClientRegistration {
            id: ClientId("acme".to_string()),
            name: "Acme".to_string(),
            secret: ClientSecret(secret.to_string()),
            redirect_uri: RedirectUri("https://acme.example/cb".to_string()),
            website: String::new(),
            logo: String::new(),
        }
        .into_client(Utc::now())
    }

    #[test]
    fn token_verifies_with_the_clients_secret() {
        let service = TokenService::default();
        let acme = client("acme-secret");

        let token = service.new_token(&acme).unwrap();
        let claims = service.validate_token(&acme, &token).unwrap();

        let six_hours = Utc::now().timestamp() as u64 + 6 * 60 * 60;
        assert!(claims.exp + 5 >= six_hours && claims.exp <= six_hours + 5);
    }

    #[test]
    fn token_carries_only_an_expiry() {
        let token = TokenService::default().new_token(&client("k")).unwrap();
        let data = jsonwebtoken::dangerous_insecure_decode::<serde_json::Value>(&token).unwrap();

        let claims = data.claims.as_object().unwrap();
        assert_eq!(claims.len(), 1);
        assert!(claims.contains_key("exp"));
        assert_eq!(data.header.alg, jsonwebtoken::Algorithm::HS256);
    }

    #[test]
    fn other_secret_rejects_token() {
        let service = TokenService::default();
        let token = service.new_token(&client("right")).unwrap();

        assert!(matches!(
            service.validate_token(&client("wrong"), &token),
            Err(Error::Signing(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::default();
        let acme = client("k");
        let stale = AccessClaims {
            exp: Utc::now().timestamp() as u64 - 3600,
        };
        let token = service.make_token(&acme, &stale).unwrap();

        assert!(service.validate_token(&acme, &token).is_err());
    }
}
