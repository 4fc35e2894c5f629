//! Device enumeration port interface

use thiserror::Error;

use crate::domain::device::DeviceId;

/// Device enumeration errors
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("Failed to enumerate audio devices: {0}")]
    EnumerationFailed(String),

    #[error("Failed to resolve device name: {0}")]
    NameUnavailable(String),
}

/// What the host reports about one device.
///
/// Probing never fails as a whole for a single device: a failed name
/// lookup is carried in `name` so the caller decides what to do with it.
#[derive(Debug, Clone)]
pub struct DeviceProbe {
    pub id: DeviceId,
    /// Number of input-scoped stream configurations the device exposes
    pub input_streams: usize,
    pub name: Result<String, DeviceError>,
}

impl DeviceProbe {
    /// Check if the device can capture audio
    pub fn has_input(&self) -> bool {
        self.input_streams > 0
    }
}

/// Port for enumerating the host's audio devices
pub trait DeviceCatalog {
    /// Probe every device the host knows about, in host order.
    ///
    /// # Returns
    /// One probe per device, or an error if the device list itself
    /// could not be obtained
    fn probe_all(&self) -> Result<Vec<DeviceProbe>, DeviceError>;
}
