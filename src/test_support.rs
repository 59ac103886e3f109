use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::UserAccount;
use crate::domain::errors::{ServiceError, StoreError};
use crate::domain::ports::{DocumentStore, IdentityService};

// Identity fake that succeeds by default and can be scripted to fail any
// single operation. Successful calls maintain a shared session so clones
// observe the same current user.
#[derive(Clone)]
pub(crate) struct ScriptedIdentityService {
    current: Arc<Mutex<Option<UserAccount>>>,
    sign_in_error: Option<ServiceError>,
    sign_up_error: Option<ServiceError>,
    reset_error: Option<ServiceError>,
    sign_out_error: Option<ServiceError>,
}

impl ScriptedIdentityService {
    pub(crate) fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            sign_in_error: None,
            sign_up_error: None,
            reset_error: None,
            sign_out_error: None,
        }
    }

    pub(crate) fn with_sign_in_error(mut self, error: ServiceError) -> Self {
        self.sign_in_error = Some(error);
        self
    }

    pub(crate) fn with_sign_up_error(mut self, error: ServiceError) -> Self {
        self.sign_up_error = Some(error);
        self
    }

    pub(crate) fn with_reset_error(mut self, error: ServiceError) -> Self {
        self.reset_error = Some(error);
        self
    }

    pub(crate) fn with_sign_out_error(mut self, error: ServiceError) -> Self {
        self.sign_out_error = Some(error);
        self
    }

    fn establish_session(&self, email: &str) {
        let mut guard = self.current.lock().expect("session mutex poisoned");
        *guard = Some(UserAccount {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
        });
    }
}

#[async_trait]
impl IdentityService for ScriptedIdentityService {
    async fn sign_in_with_credentials(
        &self,
        user_name: &str,
        _password: &str,
    ) -> Result<(), ServiceError> {
        if let Some(error) = &self.sign_in_error {
            return Err(error.clone());
        }
        self.establish_session(user_name);
        Ok(())
    }

    async fn create_account_with_credentials(
        &self,
        user_name: &str,
        _password: &str,
    ) -> Result<(), ServiceError> {
        if let Some(error) = &self.sign_up_error {
            return Err(error.clone());
        }
        self.establish_session(user_name);
        Ok(())
    }

    async fn send_password_reset(&self, _user_name: &str) -> Result<(), ServiceError> {
        match &self.reset_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        if let Some(error) = &self.sign_out_error {
            return Err(error.clone());
        }
        let mut guard = self.current.lock().expect("session mutex poisoned");
        *guard = None;
        Ok(())
    }

    fn current_user(&self) -> Option<UserAccount> {
        let guard = self.current.lock().expect("session mutex poisoned");
        guard.clone()
    }
}

// Document-store fake that records every write and can be toggled to fail,
// used to verify the best-effort profile persistence behavior.
#[derive(Clone)]
pub(crate) struct RecordingDocumentStore {
    documents: Arc<Mutex<Vec<(String, String, Value)>>>,
    fail_puts: bool,
}

impl RecordingDocumentStore {
    pub(crate) fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
            fail_puts: false,
        }
    }

    pub(crate) fn failing_puts(mut self) -> Self {
        self.fail_puts = true;
        self
    }

    pub(crate) fn documents(&self) -> Vec<(String, String, Value)> {
        let guard = self.documents.lock().expect("documents mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl DocumentStore for RecordingDocumentStore {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        if self.fail_puts {
            return Err(StoreError("put failed".to_string()));
        }
        let mut guard = self.documents.lock().expect("documents mutex poisoned");
        guard.push((collection.to_string(), key.to_string(), document));
        Ok(())
    }
}
