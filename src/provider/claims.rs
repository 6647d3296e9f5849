use crate::core::types::Expire;

/// Claims of an access token: expiry only.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccessClaims {
    pub exp: u64,
}

impl Expire for AccessClaims {
    const EXPIRES_IN_SECS: u64 = 6 * 60 * 60;
}

impl AccessClaims {
    pub fn new() -> Self {
        Self {
            exp: Self::expiry().as_secs(),
        }
    }
}

impl Default for AccessClaims {
    fn default() -> Self {
        Self::new()
    }
}
