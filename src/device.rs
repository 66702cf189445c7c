//! High-level PMW3360 device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Pmw3360Interface;
use crate::motion::{BurstFrame, MotionDelta, BURST_FRAME_LEN};
use crate::params::{Cpi, ReadMode};
use crate::registers::{
    Config2,
    MotionStatus,
    Register,
    EXPECTED_INVERSE_PRODUCT_ID,
    EXPECTED_PRODUCT_ID,
    EXPECTED_REVISION_ID,
    MOTION_BURST_ENTER,
    POWER_UP_RESET_COMMAND,
    SROM_ENABLE_CONFIRM,
    SROM_ENABLE_UNLOCK,
};
use crate::scan_rate::{Clock, NoClock, ScanRate};
use crate::srom::SromImage;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

// Address-to-data delay of a register read (tSRAD).
const T_SRAD_US: u32 = 160;
// Hold time between the last clock edge of a read and NCS rising.
const T_READ_HOLD_US: u32 = 1;
// Gap after a read before the next transaction (tSRW/tSRR minus hold).
const T_SRX_US: u32 = 19;
// Last clock edge of a write to NCS rising (tSCLK-NCS write).
const T_SCLK_NCS_WRITE_US: u32 = 35;
// Gap after a write before the next transaction (tSWW/tSWR).
const T_SWX_US: u32 = 180;
// Address-to-data delay of a motion burst (tSRAD_MOTBR).
const T_SRAD_MOTBR_US: u32 = 35;
// NCS must be released this long before it is asserted again after a burst.
const T_BEXIT_US: u32 = 1;
// Gap between consecutive SROM download bytes (tBRSEP).
const T_BRSEP_US: u32 = 15;
// Wait between the two SROM_Enable writes.
const SROM_ENABLE_DELAY_US: u32 = 10;
// Wait after the SROM download before SROM_ID may be read.
const SROM_EXIT_DELAY_US: u32 = 200;
// Wait for the freshly downloaded firmware to start.
const SROM_SETTLE_MS: u32 = 10;
// Sensor reboot time after Power_Up_Reset.
const RESET_DELAY_MS: u32 = 50;

/// Registers read and discarded after a reset to clear stale motion.
const MOTION_REGISTERS: [Register; 5] = [
    Register::Motion,
    Register::DeltaXL,
    Register::DeltaXH,
    Register::DeltaYL,
    Register::DeltaYH,
];

/// High-level blocking driver for the PMW3360 optical sensor.
///
/// `D` provides the busy-wait delays mandated by the datasheet. `C` is only
/// consulted for scan-rate instrumentation.
pub struct Pmw3360<IFACE, D, C = NoClock> {
    interface: IFACE,
    delay: D,
    #[cfg_attr(not(feature = "scan-rate"), allow(dead_code))]
    clock: C,
    config: Config,
    in_burst: bool,
    initialized: bool,
    srom_id: u8,
    scan_rate: ScanRate,
}

impl<IFACE, D> Pmw3360<IFACE, D> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface and delay.
    ///
    /// The driver starts with [`NoClock`]; attach a real time source with
    /// [`with_clock`](Pmw3360::with_clock) or scan-rate windows never close.
    pub fn new(interface: IFACE, delay: D, config: Config) -> Self {
        Self {
            interface,
            delay,
            clock: NoClock,
            config,
            in_burst: false,
            initialized: false,
            srom_id: 0,
            scan_rate: ScanRate::new(0),
        }
    }
}

impl<IFACE, D, C> Pmw3360<IFACE, D, C> {
    /// Attaches a millisecond time source for scan-rate instrumentation.
    pub fn with_clock<C2: Clock>(self, mut clock: C2) -> Pmw3360<IFACE, D, C2> {
        let scan_rate = ScanRate::new(clock.now_ms());
        Pmw3360 {
            interface: self.interface,
            delay: self.delay,
            clock,
            config: self.config,
            in_burst: self.in_burst,
            initialized: self.initialized,
            srom_id: self.srom_id,
            scan_rate,
        }
    }

    /// Consumes the driver and returns the owned interface, delay and configuration.
    pub fn release(self) -> (IFACE, D, Config) {
        (self.interface, self.delay, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the stored configuration.
    ///
    /// Changes reach the sensor on the next [`configure`](Self::configure) or
    /// [`init`](Self::init).
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// `SROM_ID` reported after the last firmware download, zero before any.
    pub fn srom_id(&self) -> u8 {
        self.srom_id
    }

    /// Whether the last [`initialize`](Self::initialize) found a PMW3360.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the sensor is currently streaming in motion-burst mode.
    pub fn in_burst(&self) -> bool {
        self.in_burst
    }

    /// Motion reads per second measured over the last closed window.
    ///
    /// Always zero unless the `scan-rate` feature is enabled and a clock was
    /// attached with [`with_clock`](Self::with_clock): [`NoClock`] never
    /// advances, so no window ever closes.
    pub fn scan_rate(&self) -> u32 {
        self.scan_rate.last()
    }
}

impl<SPI, CS, D> Pmw3360<SpiInterface<SPI, CS>, D>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for an SPI bus with a dedicated NCS pin.
    pub fn new_spi(spi: SPI, cs: CS, delay: D, config: Config) -> Self {
        Self::new(SpiInterface::new(spi, cs), delay, config)
    }
}

impl<SPI, CS, D, C> Pmw3360<SpiInterface<SPI, CS>, D, C> {
    /// Releases the driver, returning the SPI bus, NCS pin, delay and configuration.
    pub fn release_spi(self) -> (SPI, CS, D, Config) {
        let (iface, delay, config) = self.release();
        let (spi, cs) = iface.release();
        (spi, cs, delay, config)
    }
}

impl<IFACE, D, C, CommE> Pmw3360<IFACE, D, C>
where
    IFACE: Pmw3360Interface<Error = CommE>,
    D: DelayNs,
    C: Clock,
{
    // ==================================================================
    // == Register Access ===============================================
    // ==================================================================
    /// Reads a single register.
    ///
    /// Reading anything but `Motion_Burst` makes the sensor leave burst mode.
    pub fn read_register(&mut self, register: Register) -> Result<u8, CommE> {
        if register != Register::MotionBurst {
            self.in_burst = false;
        }

        let mut value = [0u8; 1];
        self.interface.begin_transaction()?;
        self.interface.transfer(&[register.read_command()], &mut [])?;
        self.delay.delay_us(T_SRAD_US);
        self.interface.transfer(&[], &mut value)?;
        self.delay.delay_us(T_READ_HOLD_US);
        self.interface.end_transaction()?;
        self.delay.delay_us(T_SRX_US);

        Ok(value[0])
    }

    /// Writes a single register.
    pub fn write_register(&mut self, register: Register, value: u8) -> Result<(), CommE> {
        self.interface.begin_transaction()?;
        self.interface
            .transfer(&[register.write_command(), value], &mut [])?;
        self.delay.delay_us(T_SCLK_NCS_WRITE_US);
        self.interface.end_transaction()?;
        self.delay.delay_us(T_SWX_US);

        Ok(())
    }

    // ==================================================================
    // == Initialization & Firmware =====================================
    // ==================================================================
    /// Runs the complete power-up sequence: reset, SROM download and configuration.
    pub fn init(&mut self, image: &SromImage<'_>) -> Result<(), CommE> {
        self.initialize()?;
        self.upload_firmware(image)?;
        self.configure(self.config)?;
        info!("PMW3360 initialized, SROM_ID {:#x}", self.srom_id);
        Ok(())
    }

    /// Reboots the sensor and verifies its identity registers.
    ///
    /// Returns [`Error::DeviceIdMismatch`] when no PMW3360 answers; the driver must
    /// not be used for firmware download or motion reads in that case.
    pub fn initialize(&mut self) -> Result<(), CommE> {
        self.initialized = false;
        self.srom_id = 0;

        self.interface.begin_transaction()?;
        self.write_register(Register::PowerUpReset, POWER_UP_RESET_COMMAND)?;
        self.delay.delay_ms(RESET_DELAY_MS);

        for register in MOTION_REGISTERS {
            self.read_register(register)?;
        }

        self.write_register(Register::Config2, u8::from(Config2::new()))?;

        let product_id = self.read_register(Register::ProductId)?;
        let revision_id = self.read_register(Register::RevisionId)?;
        self.interface.end_transaction()?;

        if product_id != EXPECTED_PRODUCT_ID || revision_id != EXPECTED_REVISION_ID {
            error!(
                "PMW3360 not detected, product {:#x} revision {:#x}",
                product_id, revision_id
            );
            return Err(Error::DeviceIdMismatch {
                product_id,
                revision_id,
            });
        }

        debug!("PMW3360 detected, revision {:#x}", revision_id);
        self.initialized = true;
        Ok(())
    }

    /// Downloads an SROM image and returns the `SROM_ID` the sensor reports.
    ///
    /// Every byte is clocked out on its own followed by the mandatory gap.
    pub fn upload_firmware(&mut self, image: &SromImage<'_>) -> Result<u8, CommE> {
        if !self.initialized {
            return Err(Error::NotReady);
        }

        debug!(
            "PMW3360 downloading {} byte SROM, revision {:#x}",
            image.len(),
            image.revision().id()
        );

        self.write_register(Register::Config2, u8::from(Config2::new()))?;
        self.write_register(Register::SromEnable, SROM_ENABLE_UNLOCK)?;
        self.delay.delay_us(SROM_ENABLE_DELAY_US);
        self.write_register(Register::SromEnable, SROM_ENABLE_CONFIRM)?;

        self.interface.begin_transaction()?;
        self.interface
            .transfer(&[Register::SromLoadBurst.write_command()], &mut [])?;
        self.delay.delay_us(T_BRSEP_US);
        for byte in image.data() {
            self.interface.transfer(core::slice::from_ref(byte), &mut [])?;
            self.delay.delay_us(T_BRSEP_US);
        }
        self.interface.end_transaction()?;
        self.delay.delay_us(SROM_EXIT_DELAY_US);

        self.srom_id = self.read_register(Register::SromId)?;
        if self.srom_id != image.revision().id() {
            warn!(
                "PMW3360 reports SROM_ID {:#x}, image revision {:#x}",
                self.srom_id,
                image.revision().id()
            );
        }

        self.write_register(Register::Config2, u8::from(Config2::new()))?;
        self.delay.delay_ms(SROM_SETTLE_MS);

        Ok(self.srom_id)
    }

    /// Checks `Product_ID` / `Inverse_Product_ID`, which only match once the
    /// firmware is running.
    pub fn check_signature(&mut self) -> Result<bool, CommE> {
        let product_id = self.read_register(Register::ProductId)?;
        let inverse_product_id = self.read_register(Register::InverseProductId)?;

        Ok(product_id == EXPECTED_PRODUCT_ID && inverse_product_id == EXPECTED_INVERSE_PRODUCT_ID)
    }

    // ==================================================================
    // == Resolution & Configuration ====================================
    // ==================================================================
    /// Applies a new configuration to the device.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        self.set_resolution(config.cpi)?;
        self.write_register(Register::Config2, u8::from(config.config2()))?;

        self.config = config;
        Ok(())
    }

    /// Returns the raw `Config1` resolution value.
    pub fn get_cpi(&mut self) -> Result<u8, CommE> {
        self.read_register(Register::Config1)
    }

    /// Writes a raw resolution value, saturating at [`Cpi::MAX`].
    pub fn set_cpi(&mut self, cpi: u8) -> Result<(), CommE> {
        self.set_resolution(Cpi::from_raw(cpi))
    }

    /// Writes a typed resolution setting.
    pub fn set_resolution(&mut self, cpi: Cpi) -> Result<(), CommE> {
        self.write_register(Register::Config1, cpi.value())?;
        self.config.cpi = cpi;
        Ok(())
    }

    // ==================================================================
    // == Motion Acquisition ============================================
    // ==================================================================
    /// Reads motion with the configured [`ReadMode`].
    pub fn poll(&mut self) -> Result<Option<MotionDelta>, CommE> {
        self.read(self.config.read_mode)
    }

    /// Reads motion with an explicit strategy.
    ///
    /// Burst reads always yield a delta; discrete reads yield `None` when no new
    /// motion was reported.
    pub fn read(&mut self, mode: ReadMode) -> Result<Option<MotionDelta>, CommE> {
        match mode {
            ReadMode::Discrete => self.read_motion(),
            ReadMode::Burst => self.read_motion_burst().map(Some),
        }
    }

    /// Polls `Motion` and, when it reports valid motion, the four delta registers.
    pub fn read_motion(&mut self) -> Result<Option<MotionDelta>, CommE> {
        self.record_poll();

        let status = MotionStatus::from(self.read_register(Register::Motion)?);
        if !status.has_valid_motion() {
            return Ok(None);
        }

        let x_low = self.read_register(Register::DeltaXL)?;
        let x_high = self.read_register(Register::DeltaXH)?;
        let y_low = self.read_register(Register::DeltaYL)?;
        let y_high = self.read_register(Register::DeltaYH)?;

        Ok(Some(MotionDelta::from_halves(x_low, x_high, y_low, y_high)))
    }

    /// Streams one motion-burst frame, entering burst mode first if needed.
    pub fn read_motion_burst(&mut self) -> Result<MotionDelta, CommE> {
        self.record_poll();

        if !self.in_burst {
            self.write_register(Register::MotionBurst, MOTION_BURST_ENTER)?;
            self.in_burst = true;
        }

        let mut raw = [0u8; BURST_FRAME_LEN];
        self.interface.begin_transaction()?;
        self.interface
            .transfer(&[Register::MotionBurst.addr()], &mut [])?;
        self.delay.delay_us(T_SRAD_MOTBR_US);
        self.interface.transfer(&[], &mut raw)?;
        self.interface.end_transaction()?;
        self.delay.delay_us(T_BEXIT_US);

        let frame = BurstFrame::new(raw);
        trace!("PMW3360 burst {:x}", raw);

        Ok(frame.delta())
    }

    #[inline]
    fn record_poll(&mut self) {
        #[cfg(feature = "scan-rate")]
        {
            let now = self.clock.now_ms();
            self.scan_rate.record(now);
        }
    }
}
