use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::UserAccount;
use crate::domain::errors::{ServiceError, StoreError};

// Port for the hosted identity platform. Each async operation issues exactly
// one remote call; current_user() reads the locally tracked session without
// touching the network.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_in_with_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError>;

    async fn create_account_with_credentials(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(), ServiceError>;

    async fn send_password_reset(&self, user_name: &str) -> Result<(), ServiceError>;

    async fn sign_out(&self) -> Result<(), ServiceError>;

    fn current_user(&self) -> Option<UserAccount>;
}

// Port for the document store holding per-account profile records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError>;
}
