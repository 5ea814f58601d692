//! In-process authentication provider.

use holdwatch_traits::{AuthError, AuthProvider, Credentials, Session};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Accepts registered accounts, or in permissive mode any address with an `@`.
#[derive(Debug, Default)]
pub struct LocalAuth {
    accounts: HashMap<String, String>,
    permissive: bool,
    session: Mutex<Option<Session>>,
    fail_sign_out: AtomicBool,
}

impl LocalAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any well-formed email signs in, whatever the password.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts
            .insert(email.into().to_ascii_lowercase(), password.into());
        self
    }

    /// Make the next `sign_out` fail with a provider error.
    pub fn fail_next_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::Relaxed);
    }

    fn accepts(&self, c: &Credentials) -> bool {
        let email = c.email.trim().to_ascii_lowercase();
        match self.accounts.get(&email) {
            Some(pw) => *pw == c.password,
            None => self.permissive && is_email(&email),
        }
    }
}

fn is_email(s: &str) -> bool {
    matches!(s.split_once('@'), Some((user, host)) if !user.is_empty() && !host.is_empty())
}

impl AuthProvider for LocalAuth {
    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if !self.accepts(credentials) {
            tracing::debug!(email = %credentials.email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let email = credentials.email.trim().to_ascii_lowercase();
        let session = Session {
            user_id: format!("local:{email}"),
            email,
        };
        let mut cur = self
            .session
            .lock()
            .map_err(|_| AuthError::Provider("session lock poisoned".to_string()))?;
        *cur = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out.swap(false, Ordering::Relaxed) {
            return Err(AuthError::Provider("sign-out request failed".to_string()));
        }
        let mut cur = self
            .session
            .lock()
            .map_err(|_| AuthError::Provider("session lock poisoned".to_string()))?;
        match cur.take() {
            Some(_) => Ok(()),
            None => Err(AuthError::NotSignedIn),
        }
    }

    fn current_session(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|g| g.clone())
    }
}
