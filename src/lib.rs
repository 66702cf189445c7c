#![cfg_attr(not(test), no_std)]

mod error;
#[macro_use]
mod log;

pub mod config;
pub mod device;
pub mod interface;
pub mod motion;
pub mod params;
pub mod registers;
pub mod scan_rate;
pub mod srom;

pub use crate::config::Config;
pub use crate::device::Pmw3360;
pub use crate::error::{Error, Result};
pub use crate::motion::MotionDelta;
pub use crate::params::{Cpi, ReadMode};
pub use crate::srom::{SromImage, SromRevision};
