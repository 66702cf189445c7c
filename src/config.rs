//! Configuration primitives for the PMW3360 driver.

use crate::params::{Cpi, ReadMode};
use crate::registers::Config2;

/// User-facing configuration for the PMW3360 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Tracking resolution.
    pub cpi: Cpi,
    /// Let the sensor downshift into its rest modes when idle.
    pub rest_enabled: bool,
    /// Strategy used by [`Pmw3360::poll`](crate::device::Pmw3360::poll).
    pub read_mode: ReadMode,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// `Config2` register value carrying this configuration.
    pub fn config2(&self) -> Config2 {
        Config2::new().with_rest_enable(self.rest_enabled)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the tracking resolution.
    pub fn cpi(mut self, cpi: Cpi) -> Self {
        self.config.cpi = cpi;
        self
    }

    /// Enables or disables the rest modes.
    pub fn rest_enabled(mut self, enabled: bool) -> Self {
        self.config.rest_enabled = enabled;
        self
    }

    /// Selects the motion read strategy.
    pub fn read_mode(mut self, mode: ReadMode) -> Self {
        self.config.read_mode = mode;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpi: Cpi::default(),
            rest_enabled: false,
            read_mode: ReadMode::Burst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::new()
            .cpi(Cpi::from_counts_per_inch(800))
            .rest_enabled(true)
            .read_mode(ReadMode::Discrete)
            .build();

        assert_eq!(config.cpi.counts_per_inch(), 800);
        assert_eq!(config.read_mode, ReadMode::Discrete);
        assert_eq!(u8::from(config.config2()), 0x20);
    }

    #[test]
    fn default_disables_rest_modes() {
        let config = Config::default();
        assert_eq!(u8::from(config.config2()), 0x00);
        assert_eq!(config.read_mode, ReadMode::Burst);
    }
}
