use std::sync::Arc;

use tracing::{debug, warn};

use servify_core::analytics::CredentialStore;

/// Email/password check against the `users` table.
///
/// Returns a bare `bool`: callers cannot tell an unknown email from a wrong
/// password, and a failed lookup looks the same as both.
#[derive(Clone)]
pub struct AuthGate {
    store: Arc<dyn CredentialStore>,
}

impl AuthGate {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            debug!("Login rejected: email and password are required");
            return false;
        }

        let credential = match self.store.find_credential(email).await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Credential lookup failed");
                return false;
            }
        };

        let ok = credential.is_some_and(|c| c.matches(password));
        if !ok {
            debug!("Login rejected: invalid email or password");
        }
        ok
    }
}
