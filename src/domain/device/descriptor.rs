//! Device id and descriptor value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidDeviceIdError;

/// Opaque device identifier.
///
/// The value is the device's position in the host's enumeration order,
/// so it stays valid between a listing and a recording as long as the
/// set of attached devices does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Index into the host enumeration
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DeviceId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = InvalidDeviceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| InvalidDeviceIdError {
                input: s.to_string(),
            })
    }
}

/// One input-capable audio endpoint, as printed by `--list-devices`.
///
/// Field names and types are the external JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDeviceDescriptor {
    pub id: DeviceId,
    pub name: String,
}

impl AudioDeviceDescriptor {
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
