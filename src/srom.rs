//! SROM firmware images.
//!
//! The PMW3360 keeps its microcode in volatile memory, so an image has to be
//! downloaded after every power-up. The crate does not bundle the PixArt blobs;
//! the application embeds the one matching its sensor and hands it over here.

/// Known SROM firmware revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SromRevision {
    /// Firmware reporting `SROM_ID` 0x04.
    Rev04,
    /// Firmware reporting `SROM_ID` 0x81.
    Rev81,
}

impl SromRevision {
    /// `SROM_ID` value the sensor reports once this revision is running.
    pub const fn id(self) -> u8 {
        match self {
            Self::Rev04 => 0x04,
            Self::Rev81 => 0x81,
        }
    }
}

/// A firmware image borrowed from read-only program data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SromImage<'a> {
    revision: SromRevision,
    data: &'a [u8],
}

impl<'a> SromImage<'a> {
    /// Wraps `data` as an image of the given revision.
    pub const fn new(revision: SromRevision, data: &'a [u8]) -> Self {
        Self { revision, data }
    }

    /// Revision the image was declared as.
    pub const fn revision(&self) -> SromRevision {
        self.revision
    }

    /// Image bytes in download order.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Image length in bytes.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for an image without any bytes.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
