//! Audio host adapters
//!
//! Both adapters number devices by their position in the default host's
//! enumeration, so ids printed by the catalog are accepted by the input.

mod cpal_catalog;
mod cpal_input;

pub use cpal_catalog::CpalDeviceCatalog;
pub use cpal_input::CpalInput;
