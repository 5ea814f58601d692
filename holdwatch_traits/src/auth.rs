//! Authentication collaborator.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An authenticated user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("auth provider error: {0}")]
    Provider(String),
}

pub trait AuthProvider {
    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;
    fn current_session(&self) -> Option<Session>;
}
