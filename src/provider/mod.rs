use std::str::FromStr;
use std::sync::Arc;

use crate::auth::Store;
use crate::config::Config;
use crate::core::models::Client;
use crate::core::types::ClientId;
use crate::db::DbStore;
use crate::http::server::Server;
use crate::util::random::RandomSource;

use tracing::{event, Level};

pub mod access_token;
pub mod authorization;
pub mod claims;
pub mod code;
pub mod confirmation;
pub mod consent;
pub mod error;
pub mod token;

use code::CodeIssuer;
use consent::{ConsentRenderer, HtmlConsentRenderer};
use error::Error;
use token::{SigningKeys, TokenService};

/// What happens to a client's pending code once it has been redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePolicy {
    /// The code stays redeemable until a later approval overwrites it.
    Reusable,
    /// The code is cleared atomically on its first successful redemption.
    SingleUse,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self::Reusable
    }
}

impl FromStr for CodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reusable" => Ok(Self::Reusable),
            "single-use" => Ok(Self::SingleUse),
            other => Err(format!(
                "unknown code policy `{}` (expected `reusable` or `single-use`)",
                other
            )),
        }
    }
}

pub struct OAuth2Provider {
    store: Arc<dyn Store>,
    token: TokenService,
    codes: CodeIssuer,
    consent: Arc<dyn ConsentRenderer>,
    policy: CodePolicy,
}

impl std::fmt::Debug for OAuth2Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Provider")
            .field("store", &self.store)
            .field("policy", &self.policy)
            .finish()
    }
}

impl OAuth2Provider {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            token: TokenService::default(),
            codes: CodeIssuer::default(),
            consent: Arc::new(HtmlConsentRenderer),
            policy: CodePolicy::default(),
        }
    }

    pub fn with_code_policy(mut self, policy: CodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.codes = CodeIssuer::new(random);
        self
    }

    pub fn with_signing_keys(mut self, keys: Arc<dyn SigningKeys>) -> Self {
        self.token = TokenService::new(keys);
        self
    }

    pub fn with_consent_renderer(mut self, consent: Arc<dyn ConsentRenderer>) -> Self {
        self.consent = consent;
        self
    }

    pub fn code_policy(&self) -> CodePolicy {
        self.policy
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token
    }

    fn find_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error> {
        self.store.get_client(client_id).map_err(|e| {
            event!(Level::ERROR, error = %e, "Client registry lookup failed");
            e
        })
    }
}

/// Run the daemon until the listener stops.
pub async fn serve(config: Config) -> Result<(), Error> {
    let store = DbStore::acquire(&config.database_url, config.pool_size)?;
    store.migrate()?;

    if config.code_policy == CodePolicy::Reusable {
        event!(
            Level::WARN,
            "Authorization codes stay redeemable until overwritten; set CODE_POLICY=single-use to clear them on redemption"
        );
    }

    let provider = Arc::new(OAuth2Provider::new(Arc::new(store)).with_code_policy(config.code_policy));
    let addr = config.socket_addr();

    event!(Level::INFO, %addr, policy = ?config.code_policy, "Starting authorization server");
    Server::new(provider).serve(addr).await;
    Ok(())
}
