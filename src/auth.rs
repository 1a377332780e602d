// auth: Single-admin access gate
//
// This is a cosmetic gate: the submitted pair is compared against a fixed
// pair held in the company profile. There is no hashing, token or expiry.

use tracing::{info, warn};

use crate::config::Credentials;
use crate::error::{AppError, Result};

#[derive(Debug)]
pub struct AccessGate {
    credentials: Credentials,
    authenticated: bool,
}

impl AccessGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            authenticated: false,
        }
    }

    /// Succeeds only when both fields match exactly.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if username == self.credentials.username && password == self.credentials.password {
            self.authenticated = true;
            info!(user = username, "admin signed in");
            Ok(())
        } else {
            self.authenticated = false;
            warn!(user = username, "rejected login");
            Err(AppError::InvalidCredentials)
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
