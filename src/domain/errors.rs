use thiserror::Error;

// Failure taxonomy spoken by the identity-service port. These are the
// remote platform's failure categories as observed by the client; the
// manager translates them into the UI-facing AuthError model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    // No account is registered for the given identifier.
    #[error("no account registered for this identifier")]
    InvalidUser,

    // Password rejected by the platform's strength policy.
    #[error("password does not meet the platform strength policy")]
    WeakPassword,

    // Credentials are malformed or do not match the account.
    #[error("credentials are malformed or do not match")]
    InvalidCredentials,

    // An account already exists for the given identifier.
    #[error("an account already exists for this identifier")]
    AccountCollision,

    // The platform could not be reached.
    #[error("identity platform is unreachable")]
    NetworkUnavailable,

    // The platform rejected the call due to rate limiting.
    #[error("identity platform rejected the call: too many requests")]
    TooManyRequests,

    // Any other platform failure, carrying the raw platform code or message.
    #[error("identity platform call failed: {0}")]
    Internal(String),
}

// Failure writing to the document store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("document store write failed: {0}")]
pub struct StoreError(pub String);
