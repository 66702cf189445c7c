//! Strongly typed parameter types for the PMW3360 driver.
//!
//! These map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs.
//!
//! # Examples
//!
//! ```rust
//! use pmw3360::params::{Cpi, ReadMode};
//!
//! let cpi = Cpi::from_counts_per_inch(1_600);
//! assert_eq!(cpi.value(), 15);
//! let _ = ReadMode::Burst;
//! ```

use modular_bitfield::prelude::Specifier;

/// Operating mode reported in `Motion[2:1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum OperationMode {
    /// Full-rate tracking.
    Run = 0b00,
    /// First rest mode.
    Rest1 = 0b01,
    /// Second rest mode.
    Rest2 = 0b10,
    /// Deepest rest mode.
    Rest3 = 0b11,
}

/// Resolution setting as stored in `Config1`.
///
/// Each step is 100 counts per inch, starting at 100 for a raw value of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cpi(u8);

impl Cpi {
    /// Highest raw value accepted by the sensor (12000 CPI).
    pub const MAX: Self = Self(0x77);
    /// Lowest raw value (100 CPI).
    pub const MIN: Self = Self(0x00);

    const STEP: u16 = 100;

    /// Builds a setting from a raw `Config1` value, saturating at [`Cpi::MAX`].
    pub const fn from_raw(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Picks the closest setting at or below `cpi`, clamped to 100..=12000.
    pub const fn from_counts_per_inch(cpi: u16) -> Self {
        if cpi < Self::STEP {
            return Self::MIN;
        }
        let steps = cpi / Self::STEP - 1;
        if steps > Self::MAX.0 as u16 {
            Self::MAX
        } else {
            Self(steps as u8)
        }
    }

    /// Raw `Config1` value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Resolution in counts per inch.
    pub const fn counts_per_inch(self) -> u16 {
        (self.0 as u16 + 1) * Self::STEP
    }
}

impl Default for Cpi {
    fn default() -> Self {
        Self::from_counts_per_inch(1_600)
    }
}

/// Motion read strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadMode {
    /// Poll `Motion` and the four delta registers individually.
    Discrete,
    /// Stream all motion fields in one motion-burst transaction.
    #[default]
    Burst,
}

#[cfg(test)]
mod tests {
    use super::Cpi;

    #[test]
    fn raw_values_saturate_at_max() {
        assert_eq!(Cpi::from_raw(0x10).value(), 0x10);
        assert_eq!(Cpi::from_raw(0x77), Cpi::MAX);
        assert_eq!(Cpi::from_raw(0xFF), Cpi::MAX);
    }

    #[test]
    fn counts_per_inch_conversion() {
        assert_eq!(Cpi::from_counts_per_inch(100).value(), 0);
        assert_eq!(Cpi::from_counts_per_inch(1_650).counts_per_inch(), 1_600);
        assert_eq!(Cpi::from_counts_per_inch(12_000), Cpi::MAX);
        assert_eq!(Cpi::from_counts_per_inch(40_000), Cpi::MAX);
        assert_eq!(Cpi::from_counts_per_inch(0), Cpi::MIN);
        assert_eq!(Cpi::MAX.counts_per_inch(), 12_000);
    }
}
