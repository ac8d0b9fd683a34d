//! lljail-core: shared types, errors, and capability detection for lljail
//!
//! This crate provides the foundational types used by the other lljail crates:
//! - Error taxonomy and Result alias
//! - Runtime Landlock support detection

pub mod capabilities;
pub mod error;

pub use capabilities::{LandlockSupport, SystemCapabilities};
pub use error::{LljailError, Result, UsageError};
