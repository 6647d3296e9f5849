use crate::core::models::{Client, ClientRegistration};
use crate::core::types::{ClientId, HashedAuthCode, RedirectUri};
use crate::provider::error::Error;

pub mod access_token;
pub mod authorization;
pub mod confirmation;
pub mod error;

pub use access_token::*;
pub use authorization::*;
pub use confirmation::*;

#[derive(Debug, Clone)]
pub struct Redirect<T> {
    pub uri: RedirectUri,
    pub params: T,
}

impl<T> Redirect<T> {
    pub fn new(uri: RedirectUri, params: T) -> Self {
        Redirect { uri, params }
    }
}

/// The client registry.
///
/// Every method is a single-row operation and must be atomic with respect
/// to the others for the same client: a reader observes either the old or
/// the new pending code, never a partial write.
pub trait Store: Send + Sync + std::fmt::Debug {
    fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error>;

    /// Insert, or update the metadata and secret of an existing client.
    /// The pending code and creation time of an existing client are kept.
    fn put_client(&self, registration: ClientRegistration) -> Result<Client, Error>;

    /// Record the approved code for a client, replacing any stale one.
    fn set_client_code(&self, client_id: &ClientId, code: &HashedAuthCode) -> Result<(), Error>;

    /// Clear the pending code only if it still equals `code`. Returns
    /// whether a row was changed.
    fn clear_client_code(&self, client_id: &ClientId, code: &HashedAuthCode)
        -> Result<bool, Error>;
}
