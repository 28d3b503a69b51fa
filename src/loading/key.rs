use std::borrow::Borrow;
use std::fmt;

use uuid::Uuid;

/// Identifies one logical component in the loading registry.
///
/// Two live components must not share a key; if they do, their busy states
/// merge into one entry. [`ComponentKey::generate`] hands out keys that
/// cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey(String);

impl ComponentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Fresh opaque key, unique for the lifetime of the process.
    pub fn generate() -> Self {
        Self(format!("anon-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ComponentKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&ComponentKey> for ComponentKey {
    fn from(key: &ComponentKey) -> Self {
        key.clone()
    }
}

impl AsRef<str> for ComponentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
