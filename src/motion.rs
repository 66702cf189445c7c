//! Motion sample types and burst frame decoding.

use crate::registers::MotionStatus;

/// Number of bytes clocked out of `Motion_Burst` per read.
pub const BURST_FRAME_LEN: usize = 6;

const BURST_MOTION: usize = 0;
const BURST_OBSERVATION: usize = 1;
const BURST_DELTA_X_L: usize = 2;
const BURST_DELTA_X_H: usize = 3;
const BURST_DELTA_Y_L: usize = 4;
const BURST_DELTA_Y_H: usize = 5;

/// Displacement accumulated since the previous read, in sensor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionDelta {
    /// X-axis displacement.
    pub x: i16,
    /// Y-axis displacement.
    pub y: i16,
}

impl MotionDelta {
    /// Rebuilds both axes from their low and high register halves.
    pub const fn from_halves(x_low: u8, x_high: u8, y_low: u8, y_high: u8) -> Self {
        Self {
            x: i16::from_le_bytes([x_low, x_high]),
            y: i16::from_le_bytes([y_low, y_high]),
        }
    }

    /// Returns `true` when neither axis moved.
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Raw contents of one motion-burst read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstFrame {
    raw: [u8; BURST_FRAME_LEN],
}

impl BurstFrame {
    /// Wraps the bytes received after the `Motion_Burst` command.
    pub const fn new(raw: [u8; BURST_FRAME_LEN]) -> Self {
        Self { raw }
    }

    /// Leading `Motion` register copy.
    pub fn status(&self) -> MotionStatus {
        MotionStatus::from(self.raw[BURST_MOTION])
    }

    /// `Observation` register copy.
    pub fn observation(&self) -> u8 {
        self.raw[BURST_OBSERVATION]
    }

    /// Displacement carried by the frame.
    pub fn delta(&self) -> MotionDelta {
        MotionDelta::from_halves(
            self.raw[BURST_DELTA_X_L],
            self.raw[BURST_DELTA_X_H],
            self.raw[BURST_DELTA_Y_L],
            self.raw[BURST_DELTA_Y_H],
        )
    }
}
