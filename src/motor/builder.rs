//! Builder pattern for ArmSystem.

use embedded_hal::delay::DelayNs;

use crate::config::ArmConfig;
use crate::error::{ConfigError, Error, Result};
use crate::kinematics::Kinematics;
use crate::transport::MotorTransport;

use super::system::ArmSystem;

/// Builder for creating ArmSystem instances.
///
/// The configuration defaults to [`ArmConfig::default`].
pub struct ArmSystemBuilder<T, K, D>
where
    T: MotorTransport,
    K: Kinematics,
    D: DelayNs,
{
    transport: Option<T>,
    kinematics: Option<K>,
    delay: Option<D>,
    config: Option<ArmConfig>,
}

impl<T, K, D> Default for ArmSystemBuilder<T, K, D>
where
    T: MotorTransport,
    K: Kinematics,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K, D> ArmSystemBuilder<T, K, D>
where
    T: MotorTransport,
    K: Kinematics,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            transport: None,
            kinematics: None,
            delay: None,
            config: None,
        }
    }

    /// Set the motor bus.
    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the kinematics solver.
    pub fn kinematics(mut self, kinematics: K) -> Self {
        self.kinematics = Some(kinematics);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the arm configuration.
    pub fn config(mut self, config: ArmConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the ArmSystem.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is missing or the configuration is invalid.
    pub fn build(self) -> Result<ArmSystem<T, K, D>> {
        let transport = self
            .transport
            .ok_or(Error::Config(ConfigError::MissingComponent("transport")))?;

        let kinematics = self
            .kinematics
            .ok_or(Error::Config(ConfigError::MissingComponent("kinematics")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingComponent("delay")))?;

        let config = self.config.unwrap_or_default();

        ArmSystem::new(config, transport, kinematics, delay)
    }
}
