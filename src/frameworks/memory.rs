use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::UserAccount;
use crate::domain::errors::{ServiceError, StoreError};
use crate::domain::ports::{DocumentStore, IdentityService};

// Platform password policy observed by clients: six characters minimum.
const MIN_PASSWORD_LEN: usize = 6;

struct StoredAccount {
    uid: String,
    password: String,
}

// In-memory identity service mirroring the hosted platform's observable
// rules. Used for local development and end-to-end tests; clones share the
// same account table and session.
#[derive(Clone)]
pub struct InMemoryIdentityService {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
    current: Arc<Mutex<Option<UserAccount>>>,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            current: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for InMemoryIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn sign_in_with_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        let account = {
            let accounts = self.accounts.lock().expect("accounts mutex poisoned");
            match accounts.get(user_name) {
                Some(stored) if stored.password == password => UserAccount {
                    uid: stored.uid.clone(),
                    email: user_name.to_string(),
                },
                Some(_) => return Err(ServiceError::InvalidCredentials),
                None => return Err(ServiceError::InvalidUser),
            }
        };

        let mut current = self.current.lock().expect("session mutex poisoned");
        *current = Some(account);
        Ok(())
    }

    async fn create_account_with_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        if !user_name.contains('@') {
            return Err(ServiceError::InvalidCredentials);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::WeakPassword);
        }

        let uid = Uuid::new_v4().to_string();
        {
            let mut accounts = self.accounts.lock().expect("accounts mutex poisoned");
            if accounts.contains_key(user_name) {
                return Err(ServiceError::AccountCollision);
            }
            accounts.insert(
                user_name.to_string(),
                StoredAccount {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
        }

        // Account creation also signs the new user in, as the platform does.
        let mut current = self.current.lock().expect("session mutex poisoned");
        *current = Some(UserAccount {
            uid,
            email: user_name.to_string(),
        });
        Ok(())
    }

    async fn send_password_reset(&self, user_name: &str) -> Result<(), ServiceError> {
        let accounts = self.accounts.lock().expect("accounts mutex poisoned");
        if !accounts.contains_key(user_name) {
            return Err(ServiceError::InvalidUser);
        }
        // Delivery of the reset email is the platform's concern.
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        let mut current = self.current.lock().expect("session mutex poisoned");
        *current = None;
        Ok(())
    }

    fn current_user(&self) -> Option<UserAccount> {
        let current = self.current.lock().expect("session mutex poisoned");
        current.clone()
    }
}

// In-memory document store keyed by (collection, key). Last write wins.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    documents: Arc<Mutex<HashMap<(String, String), Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, collection: &str, key: &str) -> Option<Value> {
        let documents = self.documents.lock().expect("documents mutex poisoned");
        documents
            .get(&(collection.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        let documents = self.documents.lock().expect("documents mutex poisoned");
        documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().expect("documents mutex poisoned");
        documents.insert((collection.to_string(), key.to_string()), document);
        Ok(())
    }
}
