//! Error handling primitives for the PMW3360 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The identity registers did not report a PMW3360.
    DeviceIdMismatch {
        /// Value read from `Product_ID`.
        product_id: u8,
        /// Value read from `Revision_ID`.
        revision_id: u8,
    },
    /// The sensor has not been successfully initialized yet.
    NotReady,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
