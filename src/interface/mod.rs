//! Bus interface abstraction for the PMW3360 driver.

pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
///
/// The sensor needs chip select held across multi-step exchanges with
/// microsecond gaps between them, so framing is exposed separately from the
/// byte transfers.
pub trait Pmw3360Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Asserts chip select. Asserting an already selected device is a no-op.
    fn begin_transaction(&mut self) -> core::result::Result<(), Self::Error>;

    /// Waits for pending bus traffic and deasserts chip select.
    fn end_transaction(&mut self) -> core::result::Result<(), Self::Error>;

    /// Sends `write` then clocks `read.len()` bytes into `read`.
    ///
    /// Either slice may be empty.
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> core::result::Result<(), Self::Error>;
}
