use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::UserAccount;
use crate::domain::errors::{ServiceError, StoreError};
use crate::domain::ports::{DocumentStore, IdentityService};

// Configuration for the REST adapters.
#[derive(Clone, Debug)]
pub struct RestConfig {
    // Project API key sent with every identity call.
    pub api_key: String,
    // Base URL of the identity REST surface.
    pub identity_url: String,
    // Base URL of the document-store REST surface.
    pub documents_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration value: {0}")]
    Missing(&'static str),
}

impl RestConfig {
    pub fn new(
        api_key: impl Into<String>,
        identity_url: impl Into<String>,
        documents_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            api_key: api_key.into(),
            identity_url: identity_url.into(),
            documents_url: documents_url.into(),
        };
        if config.api_key.is_empty() {
            return Err(ConfigError::Missing("api_key"));
        }
        if config.identity_url.is_empty() {
            return Err(ConfigError::Missing("identity_url"));
        }
        if config.documents_url.is_empty() {
            return Err(ConfigError::Missing("documents_url"));
        }
        Ok(config)
    }

    // Load configuration from the environment (reads a .env file if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let api_key =
            std::env::var("AUTH_API_KEY").map_err(|_| ConfigError::Missing("AUTH_API_KEY"))?;
        let identity_url = std::env::var("AUTH_IDENTITY_URL")
            .map_err(|_| ConfigError::Missing("AUTH_IDENTITY_URL"))?;
        let documents_url = std::env::var("AUTH_DOCUMENTS_URL")
            .map_err(|_| ConfigError::Missing("AUTH_DOCUMENTS_URL"))?;
        Self::new(api_key, identity_url, documents_url)
    }
}

// Session state tracked client-side after a successful identity call.
#[derive(Clone)]
struct RestSession {
    uid: String,
    email: String,
    id_token: String,
}

type SharedSession = Arc<Mutex<Option<RestSession>>>;

// Identity adapter over the platform's REST surface. Sign-in and sign-up
// exchange credentials for a token; sign-out only drops the local session,
// matching the platform client behavior.
pub struct RestIdentityService {
    config: RestConfig,
    http: reqwest::Client,
    session: SharedSession,
}

// Successful credential-exchange response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    local_id: String,
    email: String,
    id_token: String,
}

// Error envelope returned by the identity REST surface.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl RestIdentityService {
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: Arc::new(Mutex::new(None)),
        }
    }

    // Document-store adapter sharing this service's session token.
    pub fn document_store(&self) -> RestDocumentStore {
        RestDocumentStore {
            documents_url: self.config.documents_url.clone(),
            http: self.http.clone(),
            session: self.session.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.config.identity_url, action, self.config.api_key
        )
    }

    // One credential-exchange call; a success replaces the local session.
    async fn exchange_credentials(
        &self,
        action: &str,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        let body = json!({
            "email": user_name,
            "password": password,
            "returnSecureToken": true,
        });
        let response = self
            .http
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .map_err(translate_transport_error)?;

        debug!(action, status = %response.status(), "identity call completed");

        if !response.status().is_success() {
            return Err(translate_error_response(response).await);
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|err| ServiceError::Internal(err.to_string()))?;

        let mut guard = self.session.lock().expect("session mutex poisoned");
        *guard = Some(RestSession {
            uid: session.local_id,
            email: session.email,
            id_token: session.id_token,
        });
        Ok(())
    }
}

#[async_trait]
impl IdentityService for RestIdentityService {
    async fn sign_in_with_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        self.exchange_credentials("signInWithPassword", user_name, password)
            .await
    }

    async fn create_account_with_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        self.exchange_credentials("signUp", user_name, password).await
    }

    async fn send_password_reset(&self, user_name: &str) -> Result<(), ServiceError> {
        let body = json!({
            "requestType": "PASSWORD_RESET",
            "email": user_name,
        });
        let response = self
            .http
            .post(self.endpoint("sendOobCode"))
            .json(&body)
            .send()
            .await
            .map_err(translate_transport_error)?;

        debug!(status = %response.status(), "password reset requested");

        if !response.status().is_success() {
            return Err(translate_error_response(response).await);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        let mut guard = self.session.lock().expect("session mutex poisoned");
        *guard = None;
        Ok(())
    }

    fn current_user(&self) -> Option<UserAccount> {
        let guard = self.session.lock().expect("session mutex poisoned");
        guard.as_ref().map(|session| UserAccount {
            uid: session.uid.clone(),
            email: session.email.clone(),
        })
    }
}

// Document-store adapter writing through the REST surface with the current
// session's bearer token.
pub struct RestDocumentStore {
    documents_url: String,
    http: reqwest::Client,
    session: SharedSession,
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        let token = {
            let guard = self.session.lock().expect("session mutex poisoned");
            match guard.as_ref() {
                Some(session) => session.id_token.clone(),
                None => return Err(StoreError("no active session".to_string())),
            }
        };

        let url = format!("{}/{}/{}", self.documents_url, collection, key);
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&document)
            .send()
            .await
            .map_err(|err| StoreError(err.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError(format!("status {}", response.status())));
        }
        Ok(())
    }
}

// Transport-level failures: anything that never produced a response.
fn translate_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_connect() || err.is_timeout() {
        ServiceError::NetworkUnavailable
    } else {
        ServiceError::Internal(err.to_string())
    }
}

// Map an error response body onto the service taxonomy. A body that does not
// match the documented envelope falls through to the internal catch-all.
async fn translate_error_response(response: reqwest::Response) -> ServiceError {
    let status = response.status();
    match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => translate_error_code(&envelope.error.message),
        Err(_) => ServiceError::Internal(format!("status {status}")),
    }
}

// The identity surface reports failures as SCREAMING_SNAKE codes; the weak
// password and rate-limit codes carry a trailing explanation after " : ".
fn translate_error_code(code: &str) -> ServiceError {
    let bare = code.split(" :").next().unwrap_or(code).trim();
    match bare {
        "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" | "USER_DISABLED" => ServiceError::InvalidUser,
        "WEAK_PASSWORD" => ServiceError::WeakPassword,
        "INVALID_PASSWORD" | "INVALID_EMAIL" | "INVALID_LOGIN_CREDENTIALS"
        | "MISSING_PASSWORD" => ServiceError::InvalidCredentials,
        "EMAIL_EXISTS" => ServiceError::AccountCollision,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => ServiceError::TooManyRequests,
        _ => ServiceError::Internal(code.to_string()),
    }
}
