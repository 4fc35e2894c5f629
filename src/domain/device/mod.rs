//! Audio device value objects

mod descriptor;

pub use descriptor::{AudioDeviceDescriptor, DeviceId};
