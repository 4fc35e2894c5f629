//! Device catalog backed by cpal's default host

use cpal::traits::{DeviceTrait, HostTrait};
use tracing::{debug, warn};

use crate::application::ports::{DeviceCatalog, DeviceError, DeviceProbe};
use crate::domain::device::DeviceId;

/// Enumerates the default host's devices
pub struct CpalDeviceCatalog {
    host: cpal::Host,
}

impl CpalDeviceCatalog {
    /// Create a catalog over the platform's default audio host
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    /// Count input stream configurations; a device that cannot report
    /// them is treated as having none
    fn count_input_streams(device: &cpal::Device) -> usize {
        match device.supported_input_configs() {
            Ok(configs) => configs.count(),
            Err(e) => {
                debug!("No input configs: {}", e);
                0
            }
        }
    }
}

impl Default for CpalDeviceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceCatalog for CpalDeviceCatalog {
    fn probe_all(&self) -> Result<Vec<DeviceProbe>, DeviceError> {
        let devices = self
            .host
            .devices()
            .map_err(|e| DeviceError::EnumerationFailed(e.to_string()))?;

        let probes = devices
            .enumerate()
            .filter_map(|(index, device)| {
                let Some(id) = device_id_for(index) else {
                    warn!("Skipping device at position {}: id out of range", index);
                    return None;
                };
                Some(DeviceProbe {
                    id,
                    input_streams: Self::count_input_streams(&device),
                    name: device
                        .name()
                        .map_err(|e| DeviceError::NameUnavailable(e.to_string())),
                })
            })
            .collect();

        Ok(probes)
    }
}

/// Id for the device at `index` in host order, if it fits
fn device_id_for(index: usize) -> Option<DeviceId> {
    u32::try_from(index).ok().map(DeviceId::new)
}
