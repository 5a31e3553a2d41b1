//! Named posture lookup.

use heapless::{FnvIndexMap, String};

use crate::config::{ArmConfig, MAX_POSTURES};
use crate::error::{PostureError, Result};
use crate::motion::Joint6D;

/// Registry of named joint postures.
#[derive(Debug, Clone, Default)]
pub struct PostureRegistry {
    postures: FnvIndexMap<String<32>, Joint6D, MAX_POSTURES>,
}

impl PostureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every posture of a configuration.
    pub fn from_config(config: &ArmConfig) -> Self {
        Self {
            postures: config.postures.clone(),
        }
    }

    /// Register or replace a posture.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too long or the registry is full.
    pub fn register(&mut self, name: &str, joints: Joint6D) -> Result<()> {
        let key = String::try_from(name).map_err(|_| PostureError::InvalidName)?;
        self.postures
            .insert(key, joints)
            .map_err(|_| PostureError::RegistryFull)?;
        Ok(())
    }

    /// Get a posture by name.
    pub fn get(&self, name: &str) -> Option<&Joint6D> {
        let key = String::try_from(name).ok()?;
        self.postures.get(&key)
    }

    /// Get a posture by name, failing with [`PostureError::NotFound`].
    pub fn get_or_error(&self, name: &str) -> Result<&Joint6D> {
        self.get(name).ok_or_else(|| {
            let mut missing = String::new();
            for c in name.chars() {
                if missing.push(c).is_err() {
                    break;
                }
            }
            PostureError::NotFound(missing).into()
        })
    }

    /// Check if a posture exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of postures.
    pub fn len(&self) -> usize {
        self.postures.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.postures.is_empty()
    }

    /// Posture names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.postures.keys().map(|s| s.as_str())
    }

    /// Iterate over names and postures.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Joint6D)> {
        self.postures.iter().map(|(k, v)| (k.as_str(), v))
    }
}
