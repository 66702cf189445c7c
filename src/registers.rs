//! Register map definitions for the PMW3360 optical sensor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::OperationMode;

/// PMW3360 register addresses.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// `Product_ID`.
    ProductId = 0x00,
    /// `Revision_ID`.
    RevisionId = 0x01,
    /// `Motion`.
    Motion = 0x02,
    /// `Delta_X_L`.
    DeltaXL = 0x03,
    /// `Delta_X_H`.
    DeltaXH = 0x04,
    /// `Delta_Y_L`.
    DeltaYL = 0x05,
    /// `Delta_Y_H`.
    DeltaYH = 0x06,
    /// `SQUAL`.
    Squal = 0x07,
    /// `Raw_Data_Sum`.
    RawDataSum = 0x08,
    /// `Maximum_Raw_data`.
    MaximumRawData = 0x09,
    /// `Minimum_Raw_data`.
    MinimumRawData = 0x0A,
    /// `Shutter_Lower`.
    ShutterLower = 0x0B,
    /// `Shutter_Upper`.
    ShutterUpper = 0x0C,
    /// `Control`.
    Control = 0x0D,
    /// `Config1`, resolution.
    Config1 = 0x0F,
    /// `Config2`.
    Config2 = 0x10,
    /// `Angle_Tune`.
    AngleTune = 0x11,
    /// `Frame_Capture`.
    FrameCapture = 0x12,
    /// `SROM_Enable`.
    SromEnable = 0x13,
    /// `Run_Downshift`.
    RunDownshift = 0x14,
    /// `Rest1_Rate_Lower`.
    Rest1RateLower = 0x15,
    /// `Rest1_Rate_Upper`.
    Rest1RateUpper = 0x16,
    /// `Rest1_Downshift`.
    Rest1Downshift = 0x17,
    /// `Rest2_Rate_Lower`.
    Rest2RateLower = 0x18,
    /// `Rest2_Rate_Upper`.
    Rest2RateUpper = 0x19,
    /// `Rest2_Downshift`.
    Rest2Downshift = 0x1A,
    /// `Rest3_Rate_Lower`.
    Rest3RateLower = 0x1B,
    /// `Rest3_Rate_Upper`.
    Rest3RateUpper = 0x1C,
    /// `Observation`.
    Observation = 0x24,
    /// `Data_Out_Lower`.
    DataOutLower = 0x25,
    /// `Data_Out_Upper`.
    DataOutUpper = 0x26,
    /// `Raw_Data_Dump`.
    RawDataDump = 0x29,
    /// `SROM_ID`.
    SromId = 0x2A,
    /// `Min_SQ_Run`.
    MinSqRun = 0x2B,
    /// `Raw_Data_Threshold`.
    RawDataThreshold = 0x2C,
    /// `Config5`.
    Config5 = 0x2F,
    /// `Power_Up_Reset`.
    PowerUpReset = 0x3A,
    /// `Shutdown`.
    Shutdown = 0x3B,
    /// `Inverse_Product_ID`.
    InverseProductId = 0x3F,
    /// `LiftCutoff_Tune3`.
    LiftCutoffTune3 = 0x41,
    /// `Angle_Snap`.
    AngleSnap = 0x42,
    /// `LiftCutoff_Tune1`.
    LiftCutoffTune1 = 0x4A,
    /// `Motion_Burst`.
    MotionBurst = 0x50,
    /// `LiftCutoff_Tune_Timeout`.
    LiftCutoffTuneTimeout = 0x58,
    /// `LiftCutoff_Tune_Min_Length`.
    LiftCutoffTuneMinLength = 0x5A,
    /// `SROM_Load_Burst`.
    SromLoadBurst = 0x62,
    /// `Lift_Config`.
    LiftConfig = 0x63,
    /// `Raw_Data_Burst`.
    RawDataBurst = 0x64,
    /// `LiftCutoff_Tune2`.
    LiftCutoffTune2 = 0x65,
}

impl Register {
    /// Raw register address.
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// First byte of a read transaction (bit 7 clear).
    #[inline]
    pub const fn read_command(self) -> u8 {
        self.addr() & !SPI_WRITE
    }

    /// First byte of a write transaction (bit 7 set).
    #[inline]
    pub const fn write_command(self) -> u8 {
        self.addr() | SPI_WRITE
    }
}

/// Address bit selecting a register write.
pub const SPI_WRITE: u8 = 0x80;

/// Expected `Product_ID` value.
pub const EXPECTED_PRODUCT_ID: u8 = 0x42;
/// Expected `Revision_ID` value.
pub const EXPECTED_REVISION_ID: u8 = 0x01;
/// Expected `Inverse_Product_ID` value once the SROM is running.
pub const EXPECTED_INVERSE_PRODUCT_ID: u8 = 0xBD;

/// Value written to `Power_Up_Reset` to reboot the sensor.
pub const POWER_UP_RESET_COMMAND: u8 = 0x5A;
/// First `SROM_Enable` value of the download sequence.
pub const SROM_ENABLE_UNLOCK: u8 = 0x1D;
/// Second `SROM_Enable` value of the download sequence.
pub const SROM_ENABLE_CONFIRM: u8 = 0x18;
/// Any value written to `Motion_Burst` enters burst mode.
pub const MOTION_BURST_ENTER: u8 = 0x00;

/// Bitfield representation of the `Motion` register (address `0x02`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStatus {
    // First pixel of a raw data frame is available (bit 0).
    pub first_raw_frame: bool,
    // Current operating mode (bits 2:1).
    pub operation_mode: OperationMode,
    // Chip lifted off the tracking surface (bit 3).
    pub lifted: bool,
    #[skip]
    __: B3,
    // Motion occurred since the last report (bit 7).
    pub motion: bool,
}

impl MotionStatus {
    /// Bits that must read `MOT=1, Lift_Stat=0` for the deltas to be valid.
    pub const VALID_MASK: u8 = 0x88;
    /// Expected value of the masked bits.
    pub const VALID_PATTERN: u8 = 0x80;

    /// Returns `true` when new motion is reported on the tracking surface.
    pub fn has_valid_motion(self) -> bool {
        u8::from(self) & Self::VALID_MASK == Self::VALID_PATTERN
    }
}

impl From<u8> for MotionStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<MotionStatus> for u8 {
    fn from(value: MotionStatus) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `Config2` register (address `0x10`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config2 {
    #[skip]
    __: B2,
    // Separate X/Y resolution reporting (bit 2).
    pub rpt_mod: bool,
    #[skip]
    __: B2,
    // Automatic downshift to the rest modes (bit 5).
    pub rest_enable: bool,
    #[skip]
    __: B2,
}

impl From<u8> for Config2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Config2> for u8 {
    fn from(value: Config2) -> Self {
        value.into_bytes()[0]
    }
}
