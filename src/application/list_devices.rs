//! List input devices use case

use tracing::{debug, warn};

use crate::domain::device::AudioDeviceDescriptor;

use super::ports::DeviceCatalog;

/// Lists every device that can capture audio, in host order
pub struct ListInputDevicesUseCase<C: DeviceCatalog> {
    catalog: C,
}

impl<C: DeviceCatalog> ListInputDevicesUseCase<C> {
    /// Create a new use case instance
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Enumerate input-capable devices.
    ///
    /// Devices without input streams are left out. A device whose name
    /// cannot be resolved is skipped with a warning. If the host refuses
    /// to enumerate at all the result is empty.
    pub fn execute(&self) -> Vec<AudioDeviceDescriptor> {
        let probes = match self.catalog.probe_all() {
            Ok(probes) => probes,
            Err(e) => {
                warn!("{}", e);
                return Vec::new();
            }
        };

        debug!("Host reported {} audio devices", probes.len());

        probes
            .into_iter()
            .filter(|probe| probe.has_input())
            .filter_map(|probe| match probe.name {
                Ok(name) => Some(AudioDeviceDescriptor::new(probe.id, name)),
                Err(e) => {
                    warn!("Skipping device {}: {}", probe.id, e);
                    None
                }
            })
            .collect()
    }
}
