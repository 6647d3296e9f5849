use crate::auth::error::{ErrorKind, Reason};
use crate::core::types::{AuthCode, ClientId, ClientSecret, RedirectUri};

/// Display value for `expires_in`. The signed token itself lives for six
/// hours; the two are deliberately not kept in sync.
pub const EXPIRES_IN_DISPLAY: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TokenType {
    Bearer,
}

/// Body of `POST /token`. Every field is required; absent ones decode as
/// empty and are rejected uniformly.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub grant_type: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

/// A [`TokenRequest`] whose fields have all been checked for presence.
#[derive(Debug, Clone)]
pub struct ValidTokenRequest {
    pub grant_type: String,
    pub code: AuthCode,
    pub redirect_uri: RedirectUri,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

impl TokenRequest {
    pub fn validate(self) -> Result<ValidTokenRequest, AccessTokenErrorKind> {
        let missing = [
            &self.client_id,
            &self.code,
            &self.redirect_uri,
            &self.grant_type,
            &self.client_secret,
        ]
        .iter()
        .any(|field| field.is_empty());

        if missing {
            return Err(AccessTokenErrorKind::MissingField);
        }

        Ok(ValidTokenRequest {
            grant_type: self.grant_type,
            code: AuthCode(self.code),
            redirect_uri: RedirectUri(self.redirect_uri),
            client_id: ClientId(self.client_id),
            client_secret: ClientSecret(self.client_secret),
        })
    }

    /// Fill in credentials from HTTP Basic authentication where the body
    /// left them out.
    pub fn with_basic_credentials(mut self, client_id: String, client_secret: String) -> Self {
        if self.client_id.is_empty() {
            self.client_id = client_id;
        }
        if self.client_secret.is_empty() {
            self.client_secret = client_secret;
        }
        self
    }
}

/// Carries `token_type` in addition to `access_token` and `expires_in`,
/// as RFC 6749 clients expect it.
#[derive(serde::Serialize, Debug)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: TokenType,
    pub expires_in: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenErrorKind {
    Malformed,
    MissingField,
    ClientNotFound,
    InvalidClient,
    InvalidCode,
    ServerError,
}

impl Reason for AccessTokenErrorKind {
    fn kind(&self) -> ErrorKind {
        use AccessTokenErrorKind::*;

        match self {
            Malformed | MissingField => ErrorKind::MalformedRequest,
            ClientNotFound => ErrorKind::UnknownClient,
            InvalidClient => ErrorKind::InvalidClient,
            InvalidCode => ErrorKind::InvalidCode,
            ServerError => ErrorKind::ServerError,
        }
    }

    fn reason(&self) -> &'static str {
        use AccessTokenErrorKind::*;

        match self {
            Malformed => "invalid token request",
            MissingField => "invalid_client_id",
            ClientNotFound => "client not found",
            InvalidClient => "invalid_client",
            InvalidCode => "invalid_code",
            ServerError => "server error",
        }
    }
}
