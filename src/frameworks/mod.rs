// Frameworks layer: concrete adapters behind the domain ports.

pub mod memory;
pub mod rest;

pub use memory::{InMemoryDocumentStore, InMemoryIdentityService};
pub use rest::{ConfigError, RestConfig, RestDocumentStore, RestIdentityService};
