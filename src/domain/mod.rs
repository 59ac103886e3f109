// Domain layer: boundary types, failure taxonomy, and capability ports.

pub mod entities;
pub mod errors;
pub mod outcome;
pub mod ports;

pub use entities::UserAccount;
pub use errors::{ServiceError, StoreError};
pub use outcome::{AuthError, AuthMessage, AuthOutcome};
pub use ports::{DocumentStore, IdentityService};
