use serde::{Deserialize, Serialize};

// Message selector carried by AuthError. Each variant corresponds to one
// user-visible message in the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMessage {
    UserIsNotRegistered,
    NoResetUser,
    PasswordIsWeak,
    InvalidCredentials,
    UsernameIsTaken,
    NetworkError,
    TooManyRequests,
    SomethingIsWrong,
}

// Structured failure description for one auth operation: a message selector
// plus per-field validity flags so the caller can highlight the implicated
// input field(s).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthError {
    pub message: AuthMessage,
    pub user_name_invalid: bool,
    pub password_invalid: bool,
}

impl AuthError {
    // Error with a message selector and no field flags.
    pub fn new(message: AuthMessage) -> Self {
        Self {
            message,
            user_name_invalid: false,
            password_invalid: false,
        }
    }
}

// Single-shot result of one auth operation. The tagged representation makes
// "exactly one of success/error" structural rather than a runtime invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome<T> {
    Success(T),
    Failure(AuthError),
}

impl<T> AuthOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error(&self) -> Option<&AuthError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_outcome_is_success_then_error_is_absent() {
        let outcome: AuthOutcome<()> = AuthOutcome::Success(());

        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
    }

    #[test]
    fn when_outcome_is_failure_then_error_is_present_and_success_is_false() {
        let outcome: AuthOutcome<()> =
            AuthOutcome::Failure(AuthError::new(AuthMessage::SomethingIsWrong));

        assert!(!outcome.is_success());
        let error = outcome.error().expect("expected failure to carry an error");
        assert_eq!(error.message, AuthMessage::SomethingIsWrong);
        assert!(!error.user_name_invalid);
        assert!(!error.password_invalid);
    }

    #[test]
    fn when_error_is_built_with_new_then_field_flags_default_to_false() {
        let error = AuthError::new(AuthMessage::NetworkError);

        assert!(!error.user_name_invalid);
        assert!(!error.password_invalid);
    }
}
