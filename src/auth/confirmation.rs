use crate::auth::error::{ErrorKind, Reason};
use crate::core::types::AuthCode;

use serde::de::{self, Deserialize, Deserializer, Unexpected};

const ACCESS_DENIED: &str = "access_denied";

/// Query of `GET /confirm_auth`, submitted from the consent screen.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ConfirmAuthRequest {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub authorize: bool,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub state: String,
}

/// Form-style booleans: `1`/`t`/`true` in any of the usual casings, their
/// negative counterparts, checkbox `on`, and an empty value as false.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    match value.as_str() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "on" => Ok(true),
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(de::Error::invalid_value(
            Unexpected::Str(other),
            &"a boolean",
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationErrorKind {
    MissingCredential,
    Malformed,
    UnknownClient,
    ServerError,
}

impl Reason for ConfirmationErrorKind {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::InvalidCode,
            Self::Malformed => ErrorKind::MalformedRequest,
            Self::UnknownClient => ErrorKind::UnknownClient,
            Self::ServerError => ErrorKind::ServerError,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredential => "invalid code request",
            Self::Malformed => "invalid confirm auth request",
            Self::UnknownClient => "invalid client",
            Self::ServerError => "server error",
        }
    }
}

/// Query parameters appended to the registered redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct ConfirmationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<AuthCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub state: String,
}

impl ConfirmationResponse {
    pub fn granted(code: AuthCode, state: String) -> Self {
        Self {
            code: Some(code),
            error: None,
            state,
        }
    }

    pub fn denied(state: String) -> Self {
        Self {
            code: None,
            error: Some(ACCESS_DENIED),
            state,
        }
    }
}
