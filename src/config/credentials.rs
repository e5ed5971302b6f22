// src/config/credentials.rs
use std::fmt;

use crate::error::{DigestError, DigestResult};

pub const ENV_EMAIL_USER: &str = "EMAIL_USER";
pub const ENV_EMAIL_PASS: &str = "EMAIL_PASS";

/// Sender identity + auth token, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> DigestResult<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Resolve both secrets through `lookup`. Missing or blank values are a
    /// configuration error naming every absent variable.
    pub fn from_lookup<F>(lookup: F) -> DigestResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let user = get(ENV_EMAIL_USER);
        let pass = get(ENV_EMAIL_PASS);

        match (user, pass) {
            (Some(user), Some(pass)) => Ok(Self { user, pass }),
            (user, pass) => {
                let missing: Vec<&str> = [
                    user.is_none().then_some(ENV_EMAIL_USER),
                    pass.is_none().then_some(ENV_EMAIL_PASS),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(DigestError::config(format!(
                    "missing email credentials: set {} in the environment or .env",
                    missing.join(" and ")
                )))
            }
        }
    }
}
