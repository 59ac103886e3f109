use serde::{Deserialize, Serialize};

// The slice of the platform session this adapter observes. The session
// itself (tokens, expiry, refresh state) stays inside the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub uid: String,
    pub email: String,
}
