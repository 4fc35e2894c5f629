//! Device listing through the use case with a scripted host

use atunc::application::ports::{DeviceCatalog, DeviceError, DeviceProbe};
use atunc::application::ListInputDevicesUseCase;
use atunc::domain::device::DeviceId;

struct ScriptedHost {
    devices: Vec<(u32, usize, Option<&'static str>)>,
    fail: bool,
}

impl DeviceCatalog for ScriptedHost {
    fn probe_all(&self) -> Result<Vec<DeviceProbe>, DeviceError> {
        if self.fail {
            return Err(DeviceError::EnumerationFailed("host offline".into()));
        }
        Ok(self
            .devices
            .iter()
            .map(|&(id, input_streams, name)| DeviceProbe {
                id: DeviceId::new(id),
                input_streams,
                name: name
                    .map(str::to_string)
                    .ok_or_else(|| DeviceError::NameUnavailable("no name".into())),
            })
            .collect())
    }
}

fn list_json(host: ScriptedHost) -> String {
    let devices = ListInputDevicesUseCase::new(host).execute();
    serde_json::to_string(&devices).unwrap()
}

#[test]
fn mic_listed_and_speakers_left_out() {
    let json = list_json(ScriptedHost {
        devices: vec![(81, 1, Some("MacBook Mic")), (74, 0, Some("Speakers"))],
        fail: false,
    });
    assert_eq!(json, r#"[{"id":81,"name":"MacBook Mic"}]"#);
}

#[test]
fn every_named_input_device_appears_once() {
    let devices = ListInputDevicesUseCase::new(ScriptedHost {
        devices: vec![
            (0, 2, Some("Line In")),
            (1, 0, Some("HDMI")),
            (2, 1, Some("Headset")),
            (3, 4, Some("Interface")),
        ],
        fail: false,
    })
    .execute();

    let ids: Vec<u32> = devices.iter().map(|d| d.id.value()).collect();
    assert_eq!(ids, vec![0, 2, 3]);
    assert_eq!(devices[1].name, "Headset");
}

#[test]
fn unnamed_input_device_is_skipped() {
    let json = list_json(ScriptedHost {
        devices: vec![(5, 1, None), (6, 1, Some("Webcam"))],
        fail: false,
    });
    assert_eq!(json, r#"[{"id":6,"name":"Webcam"}]"#);
}

#[test]
fn no_input_devices_is_empty_array() {
    let json = list_json(ScriptedHost {
        devices: vec![(1, 0, Some("Speakers"))],
        fail: false,
    });
    assert_eq!(json, "[]");
}

#[test]
fn failed_enumeration_is_empty_array() {
    let json = list_json(ScriptedHost {
        devices: vec![],
        fail: true,
    });
    assert_eq!(json, "[]");
}
