//=========================================================================
// Game Controller Selection
//=========================================================================
//
// Platform-neutral controller handle and first-match selection.
//
// The platform layer enumerates joystick devices (gilrs) into
// `DeviceInfo` values; selection walks them in enumeration order and
// opens the first one recognized as a game controller. Finding none is
// a normal outcome, not an error.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info};

//=== ControllerId ========================================================

/// Stable identifier of a joystick device for the lifetime of the
/// controller subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub usize);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== DeviceInfo ==========================================================

/// One enumerated joystick device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: ControllerId,
    pub name: String,
    pub uuid: [u8; 16],
    /// `true` when the device has a game-controller mapping.
    pub is_game_controller: bool,
}

//=== Controller ==========================================================

/// The open game controller owned by the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    id: ControllerId,
    name: String,
    uuid: [u8; 16],
}

impl Controller {
    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> [u8; 16] {
        self.uuid
    }
}

impl From<DeviceInfo> for Controller {
    fn from(device: DeviceInfo) -> Self {
        Self {
            id: device.id,
            name: device.name,
            uuid: device.uuid,
        }
    }
}

//=== Selection ===========================================================

/// Opens the first device, in enumeration order, that is a game
/// controller. Plain joysticks without a mapping are skipped.
pub fn select_game_controller<I>(devices: I) -> Option<Controller>
where
    I: IntoIterator<Item = DeviceInfo>,
{
    for device in devices {
        if !device.is_game_controller {
            debug!(
                target: "platform::input",
                "Skipping joystick {} ({}): no controller mapping",
                device.id,
                device.name
            );
            continue;
        }

        info!(target: "platform::input", "Using game controller: {}", device.name);
        return Some(Controller::from(device));
    }

    debug!(target: "platform::input", "No game controller found");
    None
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: usize, name: &str, is_game_controller: bool) -> DeviceInfo {
        DeviceInfo {
            id: ControllerId(id),
            name: name.to_string(),
            uuid: [id as u8; 16],
            is_game_controller,
        }
    }

    #[test]
    fn no_devices_yields_none() {
        assert_eq!(select_game_controller(Vec::new()), None);
    }

    #[test]
    fn plain_joysticks_are_skipped() {
        let devices = vec![device(0, "Flight Stick", false), device(1, "Wheel", false)];
        assert_eq!(select_game_controller(devices), None);
    }

    #[test]
    fn first_game_controller_wins() {
        let devices = vec![
            device(0, "Flight Stick", false),
            device(1, "Xbox Controller", true),
            device(2, "DualSense", true),
        ];

        let controller = select_game_controller(devices).expect("controller expected");
        assert_eq!(controller.id(), ControllerId(1));
        assert_eq!(controller.name(), "Xbox Controller");
        assert_eq!(controller.uuid(), [1; 16]);
    }

    #[test]
    fn controller_id_display() {
        assert_eq!(ControllerId(3).to_string(), "#3");
    }
}
