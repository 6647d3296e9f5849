use chrono::{DateTime, Utc};

use super::schema::*;
use crate::core::models;
use crate::core::types::{ClientId, ClientSecret, HashedAuthCode, RedirectUri};

#[derive(Debug)]
#[derive(Queryable)]
pub struct Client {
    pub client_id: String,
    pub name: String,
    pub secret: String,
    pub redirect_uri: String,
    pub website: String,
    pub logo: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for models::Client {
    fn from(c: Client) -> Self {
        Self {
            id: ClientId(c.client_id),
            name: c.name,
            secret: ClientSecret(c.secret),
            redirect_uri: RedirectUri(c.redirect_uri),
            website: c.website,
            logo: c.logo,
            code: c.code.map(HashedAuthCode),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug)]
#[derive(Insertable)]
#[table_name = "clients"]
pub struct NewClient {
    pub client_id: String,
    pub name: String,
    pub secret: String,
    pub redirect_uri: String,
    pub website: String,
    pub logo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewClient {
    pub fn new(registration: models::ClientRegistration, now: DateTime<Utc>) -> Self {
        Self {
            client_id: registration.id.0,
            name: registration.name,
            secret: registration.secret.0,
            redirect_uri: registration.redirect_uri.0,
            website: registration.website,
            logo: registration.logo,
            created_at: now,
            updated_at: now,
        }
    }
}
