use chrono::{DateTime, Utc};

use super::types::*;

#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub secret: ClientSecret,
    pub redirect_uri: RedirectUri,
    pub website: String,
    pub logo: String,
    /// Outstanding authorization code, if a user has approved this client.
    pub code: Option<HashedAuthCode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Out-of-band provisioning input for a client.
#[derive(Debug, Clone)]
pub struct ClientRegistration {
    pub id: ClientId,
    pub name: String,
    pub secret: ClientSecret,
    pub redirect_uri: RedirectUri,
    pub website: String,
    pub logo: String,
}

impl ClientRegistration {
    pub fn into_client(self, now: DateTime<Utc>) -> Client {
        Client {
            id: self.id,
            name: self.name,
            secret: self.secret,
            redirect_uri: self.redirect_uri,
            website: self.website,
            logo: self.logo,
            code: None,
            created_at: now,
            updated_at: now,
        }
    }
}
