use crate::auth::error::{ErrorKind, Reason};
use crate::core::types::{AuthCode, Expire, Expiry};

/// Query of `GET /auth`. Absent fields decode as empty strings so that the
/// validation order, not the decoder, decides which error is reported.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AuthorizationRequest {
    #[serde(default)]
    pub response_type: String,
    #[serde(default)]
    pub client_id: String,
    /// Client-asserted; checked for scheme only and never redirected to.
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationErrorKind {
    Malformed,
    UnsupportedResponseType,
    MissingClientId,
    InsecureRedirectUri,
    MissingScope,
    MissingState,
    UnknownClient,
    ServerError,
}

impl Reason for AuthorizationErrorKind {
    fn kind(&self) -> ErrorKind {
        use AuthorizationErrorKind::*;

        match self {
            Malformed | UnsupportedResponseType | MissingClientId | InsecureRedirectUri
            | MissingScope | MissingState => ErrorKind::MalformedRequest,
            UnknownClient => ErrorKind::UnknownClient,
            ServerError => ErrorKind::ServerError,
        }
    }

    fn reason(&self) -> &'static str {
        use AuthorizationErrorKind::*;

        match self {
            Malformed => "invalid auth request",
            UnsupportedResponseType => "invalid code request",
            MissingClientId => "invalid_client_id",
            InsecureRedirectUri => "invalid_redirect_uri",
            MissingScope => "invalid scope request",
            MissingState => "invalid state request",
            UnknownClient => "invalid client",
            ServerError => "server error",
        }
    }
}

/// The code as carried by the user agent between `/auth` and
/// `/confirm_auth`. Transport only; redemption never trusts it directly.
#[derive(Debug, Clone)]
pub struct PendingCode {
    pub code: AuthCode,
}

impl Expire for PendingCode {
    const EXPIRES_IN_SECS: u64 = 60;
}

impl PendingCode {
    pub fn new(code: AuthCode) -> Self {
        Self { code }
    }

    /// Cookie values are opaque; an empty one counts as absent.
    pub fn from_credential(value: Option<String>) -> Option<Self> {
        value
            .filter(|v| !v.is_empty())
            .map(|v| Self::new(AuthCode(v)))
    }

    pub fn expires_at(&self) -> Expiry {
        Self::expiry()
    }
}

/// Data shown on the consent screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentView {
    pub client_id: String,
    pub name: String,
    pub website: String,
    pub logo: String,
    pub state: String,
    pub scopes: Vec<String>,
}

/// Successful `/auth` outcome: a rendered page plus the credential to set.
#[derive(Debug)]
pub struct ConsentPrompt {
    pub page: String,
    pub credential: PendingCode,
}
