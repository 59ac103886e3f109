use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::errors::ServiceError;
use crate::domain::outcome::{AuthError, AuthMessage, AuthOutcome};
use crate::domain::ports::{DocumentStore, IdentityService};

// Collection holding one profile document per account, keyed by email.
const USER_DATA_COLLECTION: &str = "userData";

// Literal returned by user_email() when no session exists. Kept for callers
// that compare against it; the original client surfaced the same value.
const NO_SESSION_EMAIL: &str = "null";

// Account capability set consumed by presentation code.
#[async_trait]
pub trait AuthManager: Send + Sync {
    fn check_auth(&self) -> bool;

    fn user_email(&self) -> String;

    async fn reset_password(&self, user_name: &str) -> AuthOutcome<()>;

    async fn sign_in(&self, user_name: &str, password: &str) -> AuthOutcome<()>;

    async fn sign_up(&self, user_name: &str, password: &str) -> AuthOutcome<()>;

    async fn sign_out(&self) -> AuthOutcome<()>;
}

// Adapter over injected identity and document-store handles. Every mutating
// operation issues one remote call and resolves to one outcome; failures are
// delivered as values, never panics.
pub struct AuthManagerImpl<I, D> {
    pub identity: I,
    pub documents: D,
}

#[async_trait]
impl<I, D> AuthManager for AuthManagerImpl<I, D>
where
    I: IdentityService,
    D: DocumentStore,
{
    fn check_auth(&self) -> bool {
        self.identity.current_user().is_some()
    }

    fn user_email(&self) -> String {
        match self.identity.current_user() {
            Some(account) => account.email,
            None => NO_SESSION_EMAIL.to_string(),
        }
    }

    async fn reset_password(&self, user_name: &str) -> AuthOutcome<()> {
        match self.identity.send_password_reset(user_name).await {
            Ok(()) => AuthOutcome::Success(()),
            Err(err) => AuthOutcome::Failure(translate_service_error(&err)),
        }
    }

    async fn sign_in(&self, user_name: &str, password: &str) -> AuthOutcome<()> {
        match self
            .identity
            .sign_in_with_credentials(user_name, password)
            .await
        {
            Ok(()) => AuthOutcome::Success(()),
            // Sign-in gets its own message for an unknown account; every
            // other failure goes through the shared translation.
            Err(ServiceError::InvalidUser) => AuthOutcome::Failure(AuthError {
                message: AuthMessage::UserIsNotRegistered,
                user_name_invalid: true,
                password_invalid: false,
            }),
            Err(err) => AuthOutcome::Failure(translate_service_error(&err)),
        }
    }

    async fn sign_up(&self, user_name: &str, password: &str) -> AuthOutcome<()> {
        match self
            .identity
            .create_account_with_credentials(user_name, password)
            .await
        {
            Ok(()) => {
                self.store_profile_document().await;
                AuthOutcome::Success(())
            }
            Err(err) => AuthOutcome::Failure(translate_service_error(&err)),
        }
    }

    async fn sign_out(&self) -> AuthOutcome<()> {
        match self.identity.sign_out().await {
            Ok(()) => AuthOutcome::Success(()),
            Err(err) => AuthOutcome::Failure(translate_service_error(&err)),
        }
    }
}

impl<I, D> AuthManagerImpl<I, D>
where
    I: IdentityService,
    D: DocumentStore,
{
    // Best-effort persistence of the profile record after account creation.
    // The account and session are authoritative; a missing profile document
    // can be repaired out of band, so a write failure does not fail sign-up.
    async fn store_profile_document(&self) {
        let Some(account) = self.identity.current_user() else {
            warn!("no active account after sign-up; skipping profile document");
            return;
        };

        let document = json!({ "uid": account.uid });
        if let Err(err) = self
            .documents
            .put(USER_DATA_COLLECTION, &account.email, document)
            .await
        {
            warn!(error = %err, email = %account.email, "failed to store profile document");
        }
    }
}

// Shared failure translation used by reset, sign-up, and sign-out. Sign-in
// overrides the InvalidUser arm before falling through to this mapping.
fn translate_service_error(err: &ServiceError) -> AuthError {
    match err {
        ServiceError::InvalidUser => AuthError {
            message: AuthMessage::NoResetUser,
            user_name_invalid: true,
            password_invalid: false,
        },
        ServiceError::WeakPassword => AuthError {
            message: AuthMessage::PasswordIsWeak,
            user_name_invalid: false,
            password_invalid: true,
        },
        ServiceError::InvalidCredentials => AuthError {
            message: AuthMessage::InvalidCredentials,
            user_name_invalid: true,
            password_invalid: true,
        },
        ServiceError::AccountCollision => AuthError {
            message: AuthMessage::UsernameIsTaken,
            user_name_invalid: true,
            password_invalid: false,
        },
        ServiceError::NetworkUnavailable => AuthError::new(AuthMessage::NetworkError),
        ServiceError::TooManyRequests => AuthError::new(AuthMessage::TooManyRequests),
        ServiceError::Internal(_) => AuthError::new(AuthMessage::SomethingIsWrong),
    }
}
