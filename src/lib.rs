// Client-side adapter for a hosted identity platform: exposes the account
// capability set (check session, sign in, sign up, sign out, reset password,
// read current email) and translates platform failures into a structured
// error model suitable for form-field highlighting.

pub mod domain;
pub mod frameworks;
pub mod manager;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::entities::UserAccount;
pub use domain::errors::{ServiceError, StoreError};
pub use domain::outcome::{AuthError, AuthMessage, AuthOutcome};
pub use domain::ports::{DocumentStore, IdentityService};
pub use manager::{AuthManager, AuthManagerImpl};
