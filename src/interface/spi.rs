//! SPI interface implementation built on top of `embedded-hal` `SpiBus` and a
//! dedicated chip-select `OutputPin`.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::Pmw3360Interface;

/// Failure raised by either half of an [`SpiInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceError<SpiE, PinE> {
    /// The SPI bus reported an error.
    Spi(SpiE),
    /// Driving the chip-select pin failed.
    Pin(PinE),
}

/// SPI-based interface implementation for the PMW3360 driver.
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiInterface<SPI, CS> {
    /// Creates a new interface from an exclusively owned bus and its NCS pin.
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Provides mutable access to the wrapped SPI bus.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned bus and chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> Pmw3360Interface for SpiInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = InterfaceError<SPI::Error, CS::Error>;

    fn begin_transaction(&mut self) -> core::result::Result<(), Self::Error> {
        self.cs.set_low().map_err(InterfaceError::Pin)
    }

    fn end_transaction(&mut self) -> core::result::Result<(), Self::Error> {
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if write.is_empty() && read.is_empty() {
            return Ok(());
        }

        if !write.is_empty() {
            self.spi.write(write).map_err(InterfaceError::Spi)?;
        }

        if !read.is_empty() {
            self.spi.read(read).map_err(InterfaceError::Spi)?;
        }

        // Callers start timing the sensor's settle delays on return.
        self.spi.flush().map_err(InterfaceError::Spi)
    }
}
