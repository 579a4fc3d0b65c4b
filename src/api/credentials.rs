//! Bearer credential sources.
//!
//! The console treats the token as opaque. It is looked up again before
//! every call, so a token file rewritten by another tool is picked up
//! without a restart.

use std::fs;
use std::path::PathBuf;

use log::debug;

pub trait CredentialProvider: Send + Sync {
    /// The bearer token, or `None` if no credential is available.
    fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at startup (config file or env var).
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A token stored in a file, read on every call.
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialProvider for TokenFile {
    fn bearer_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                debug!("No token at {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
