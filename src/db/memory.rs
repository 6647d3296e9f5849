use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::auth::Store;
use crate::core::models::{Client, ClientRegistration};
use crate::core::types::{ClientId, HashedAuthCode};
use crate::provider::error::Error;

/// Process-local registry for tests and single-node development. Each
/// operation holds the lock for its whole read-modify-write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    clients: RwLock<HashMap<ClientId, Client>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error> {
        let clients = self.clients.read().map_err(|_| Error::Poisoned)?;
        Ok(clients.get(client_id).cloned())
    }

    fn put_client(&self, registration: ClientRegistration) -> Result<Client, Error> {
        let mut clients = self.clients.write().map_err(|_| Error::Poisoned)?;
        let now = Utc::now();

        let client = match clients.remove(&registration.id) {
            Some(existing) => Client {
                code: existing.code,
                created_at: existing.created_at,
                ..registration.into_client(now)
            },
            None => registration.into_client(now),
        };

        clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    fn set_client_code(&self, client_id: &ClientId, code: &HashedAuthCode) -> Result<(), Error> {
        let mut clients = self.clients.write().map_err(|_| Error::Poisoned)?;
        let client = clients.get_mut(client_id).ok_or(Error::NotFound)?;
        client.code = Some(code.clone());
        client.updated_at = Utc::now();
        Ok(())
    }

    fn clear_client_code(&self, client_id: &ClientId, code: &HashedAuthCode) -> Result<bool, Error> {
        let mut clients = self.clients.write().map_err(|_| Error::Poisoned)?;
        match clients.get_mut(client_id) {
            Some(client) if client.code.as_ref() == Some(code) => {
                client.code = None;
                client.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ClientSecret, RedirectUri};

    fn registration(secret: &str) -> ClientRegistration {
        ClientRegistration {
            id: ClientId("acme".to_string()),
            name: "Acme".to_string(),
            secret: ClientSecret(secret.to_string()),
            redirect_uri: RedirectUri("https://acme.example/cb".to_string()),
            website: "https://acme.example".to_string(),
            logo: "https://acme.example/logo.png".to_string(),
        }
    }

    #[test]
    fn unknown_client_is_none() {
        let store = MemoryStore::new();
        assert!(store
            .get_client(&ClientId("nobody".to_string()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn upsert_keeps_pending_code() {
        let store = MemoryStore::new();
        let first = store.put_client(registration("one")).unwrap();
        let code = HashedAuthCode("digest".to_string());
        store.set_client_code(&first.id, &code).unwrap();

        let second = store.put_client(registration("two")).unwrap();
        assert_eq!(second.secret, ClientSecret("two".to_string()));
        assert_eq!(second.code, Some(code));
        assert_eq!(second.created_at, first.created_at);
    }

    #[test]
    fn setting_a_code_on_a_missing_client_fails() {
        let store = MemoryStore::new();
        let result = store.set_client_code(
            &ClientId("ghost".to_string()),
            &HashedAuthCode("digest".to_string()),
        );
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[test]
    fn clearing_is_conditional() {
        let store = MemoryStore::new();
        let client = store.put_client(registration("s")).unwrap();
        let current = HashedAuthCode("current".to_string());
        store.set_client_code(&client.id, &current).unwrap();

        let stale = HashedAuthCode("stale".to_string());
        assert!(!store.clear_client_code(&client.id, &stale).unwrap());
        assert!(store.clear_client_code(&client.id, &current).unwrap());
        assert!(!store.clear_client_code(&client.id, &current).unwrap());
        assert!(store.get_client(&client.id).unwrap().unwrap().code.is_none());
    }
}
