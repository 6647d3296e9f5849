use std::sync::Arc;

use crate::auth::PendingCode;
use crate::core::types::AuthCode;
use crate::provider::error::Error;
use crate::util::random::{FromRandom, OsRandom, RandomSource};

use tracing::{event, Level};

/// Issues the unforgeable codes handed to the user agent on `/auth`.
pub struct CodeIssuer {
    random: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for CodeIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CodeIssuer {{ ... }}")
    }
}

impl Default for CodeIssuer {
    fn default() -> Self {
        Self::new(Arc::new(OsRandom))
    }
}

impl CodeIssuer {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn issue(&self) -> Result<PendingCode, Error> {
        let code = AuthCode::from_random(self.random.as_ref())?;
        event!(Level::DEBUG, "Issued pending authorization code");
        Ok(PendingCode::new(code))
    }
}
