use std::fmt::Debug;

use crate::auth::Store;
use crate::core::models::{Client, ClientRegistration};
use crate::core::types::{ClientId, HashedAuthCode};
use crate::provider::error::Error;

use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use tokio::task::block_in_place;
use tracing::{event, Level};

use super::models;
use super::schema;

diesel_migrations::embed_migrations!("migrations");

/// Postgres-backed registry. Calls are synchronous and run under
/// `block_in_place`, so a multi-threaded runtime is required.
pub struct DbStore {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl DbStore {
    pub fn acquire(uri: &str, max_size: u32) -> Result<Self, Error> {
        let pool = Pool::builder()
            .max_size(max_size)
            .build(ConnectionManager::new(uri))?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, Error> {
        Ok(self.pool.get()?)
    }

    pub fn migrate(&self) -> Result<(), Error> {
        let conn = self.conn()?;
        block_in_place(|| embedded_migrations::run(&conn))?;
        event!(Level::INFO, "Ran migrations");
        Ok(())
    }

    pub fn list_clients(&self) -> Result<Vec<Client>, Error> {
        use schema::clients::dsl::{client_id, clients};

        let conn = self.conn()?;
        let found = block_in_place(|| {
            clients
                .order(client_id)
                .get_results::<models::Client>(&conn)
        })?;

        Ok(found.into_iter().map(Into::into).collect())
    }

    pub fn delete_client(&self, id: &ClientId) -> Result<(), Error> {
        use schema::clients::dsl::clients;

        let conn = self.conn()?;
        let deleted = block_in_place(|| diesel::delete(clients.find(&id.0)).execute(&conn))?;

        match deleted {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

impl Debug for DbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbStore").finish()
    }
}

impl Store for DbStore {
    fn get_client(&self, id: &ClientId) -> Result<Option<Client>, Error> {
        use schema::clients::dsl::clients;

        let conn = self.conn()?;
        let found = block_in_place(|| {
            clients
                .find(&id.0)
                .first::<models::Client>(&conn)
                .optional()
        })?;

        Ok(found.map(Into::into))
    }

    fn put_client(&self, registration: ClientRegistration) -> Result<Client, Error> {
        use schema::clients::dsl::{self, clients};

        let now = Utc::now();
        let model = models::NewClient::new(registration, now);

        let conn = self.conn()?;
        let result = block_in_place(|| {
            diesel::insert_into(clients)
                .values(&model)
                .on_conflict(dsl::client_id)
                .do_update()
                .set((
                    dsl::name.eq(&model.name),
                    dsl::secret.eq(&model.secret),
                    dsl::redirect_uri.eq(&model.redirect_uri),
                    dsl::website.eq(&model.website),
                    dsl::logo.eq(&model.logo),
                    dsl::updated_at.eq(now),
                ))
                .get_result::<models::Client>(&conn)
        })?;

        Ok(result.into())
    }

    fn set_client_code(&self, id: &ClientId, code: &HashedAuthCode) -> Result<(), Error> {
        use schema::clients::dsl::{self, clients};

        let conn = self.conn()?;
        let updated = block_in_place(|| {
            diesel::update(clients.find(&id.0))
                .set((
                    dsl::code.eq(Some(code.0.clone())),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .execute(&conn)
        })?;

        match updated {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }

    fn clear_client_code(&self, id: &ClientId, code: &HashedAuthCode) -> Result<bool, Error> {
        use schema::clients::dsl::{self, clients};

        let conn = self.conn()?;
        let updated = block_in_place(|| {
            diesel::update(
                clients
                    .filter(dsl::client_id.eq(&id.0))
                    .filter(dsl::code.eq(Some(code.0.clone()))),
            )
            .set((
                dsl::code.eq(None::<String>),
                dsl::updated_at.eq(Utc::now()),
            ))
            .execute(&conn)
        })?;

        Ok(updated > 0)
    }
}
