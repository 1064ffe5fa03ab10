// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Sources of signing credentials.
//!
//! Network profiles only name their accounts. The actual keys are looked up through a
//! [`SecretProvider`] when a profile is resolved, so nothing else in the crate reads the process
//! environment.

use std::{collections::HashMap, env, fmt};

/// A hex-encoded private key.
///
/// Formatting never reveals the key; use [`SigningKey::expose`] where the raw value is required.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

impl fmt::Display for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Capability for looking up signing keys by name.
pub trait SecretProvider {
    /// Returns the secret registered under `key`, or `None` when it is unset or blank.
    fn secret(&self, key: &str) -> Option<SigningKey>;
}

impl<T: SecretProvider + ?Sized> SecretProvider for &T {
    fn secret(&self, key: &str) -> Option<SigningKey> {
        (**self).secret(key)
    }
}

/// Reads secrets from environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl SecretProvider for EnvSecrets {
    fn secret(&self, key: &str) -> Option<SigningKey> {
        env::var(key)
            .ok()
            .map(SigningKey::new)
            .filter(|secret| !secret.is_empty())
    }
}

/// In-memory secrets.
#[derive(Debug, Default, Clone)]
pub struct StaticSecrets {
    secrets: HashMap<String, SigningKey>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets.insert(key.into(), SigningKey::new(secret));
        self
    }
}

impl SecretProvider for StaticSecrets {
    fn secret(&self, key: &str) -> Option<SigningKey> {
        self.secrets
            .get(key)
            .filter(|secret| !secret.is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_key_is_redacted() {
        let key = SigningKey::new("0xdeadbeef");
        assert_eq!(format!("{key:?}"), "SigningKey(<redacted>)");
        assert_eq!(key.to_string(), "<redacted>");
        assert_eq!(key.expose(), "0xdeadbeef");
    }

    #[test]
    fn blank_static_secret_is_unset() {
        let secrets = StaticSecrets::new()
            .with("PRIVATE_KEY", "  ")
            .with("OTHER_KEY", " 0x01 ");
        assert_eq!(secrets.secret("PRIVATE_KEY"), None);
        assert_eq!(secrets.secret("MISSING"), None);
        assert_eq!(secrets.secret("OTHER_KEY").unwrap().expose(), "0x01");
    }

    #[test]
    fn env_secrets_skip_unset_variables() {
        assert_eq!(
            EnvSecrets.secret("ARENA_TOOLS_TEST_VARIABLE_THAT_IS_NEVER_SET"),
            None
        );
    }
}
