//=========================================================================
// Gamepads (gilrs)
//=========================================================================
//
// Owns the gilrs context, opens the first game controller at startup and
// drains controller events every frame.
//
// gilrs failing to start is not fatal: the context simply runs without
// a controller, matching the "no controller attached" case.
//
//=========================================================================

//=== External Dependencies ===============================================

use gilrs::{Event, Gamepad, GamepadId, Gilrs, MappingSource};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::event_mapper::map_controller_event;
use crate::core::controller::{select_game_controller, Controller, ControllerId, DeviceInfo};
use crate::core::event::ContextEvent;

//=== Gamepads ============================================================

pub(crate) struct Gamepads {
    gilrs: Gilrs,
    active: Option<(GamepadId, Controller)>,
}

impl Gamepads {
    //--- Construction -----------------------------------------------------

    /// Starts gilrs and opens the first game controller, if any.
    pub(crate) fn open() -> Option<Self> {
        info!(target: "platform::input", "Initializing gilrs controller interface");

        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                warn!(target: "platform::input", "Controllers not supported on this platform");
                dummy
            }
            Err(e) => {
                warn!(target: "platform::input", "Failed to initialize gilrs: {}", e);
                return None;
            }
        };

        let mut gamepads = Self { gilrs, active: None };
        gamepads.active = gamepads.scan();
        Some(gamepads)
    }

    /// Walks connected gamepads in enumeration order.
    fn scan(&self) -> Option<(GamepadId, Controller)> {
        let devices: Vec<(GamepadId, DeviceInfo)> = self
            .gilrs
            .gamepads()
            .map(|(id, gamepad)| (id, device_info(id, &gamepad)))
            .collect();

        debug!(target: "platform::input", "Found {} joystick device(s)", devices.len());

        let controller = select_game_controller(devices.iter().map(|(_, d)| d.clone()))?;
        let gamepad_id = devices
            .iter()
            .find(|(_, d)| d.id == controller.id())
            .map(|(id, _)| *id)?;

        Some((gamepad_id, controller))
    }

    //--- Access -----------------------------------------------------------

    pub(crate) fn controller(&self) -> Option<&Controller> {
        self.active.as_ref().map(|(_, controller)| controller)
    }

    /// Live gilrs view of the open controller (buttons, axes, power).
    pub(crate) fn gamepad(&self) -> Option<Gamepad<'_>> {
        self.active.as_ref().map(|(id, _)| self.gilrs.gamepad(*id))
    }

    //--- Per Frame --------------------------------------------------------

    /// Drains every queued gilrs event; hot-plug events are forwarded.
    pub(crate) fn drain_events(&mut self, events: &mut Vec<ContextEvent>) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            let gilrs = &self.gilrs;
            if let Some(mapped) =
                map_controller_event(id, &event, || gilrs.gamepad(id).name().to_string())
            {
                events.push(mapped);
            }
        }
    }

    //--- Teardown ---------------------------------------------------------

    /// Releases the open controller, then the gilrs context.
    pub(crate) fn close(mut self) {
        if let Some((_, controller)) = self.active.take() {
            info!(target: "platform::input", "Closing game controller: {}", controller.name());
        }
        drop(self.gilrs);
    }
}

fn device_info(id: GamepadId, gamepad: &Gamepad<'_>) -> DeviceInfo {
    DeviceInfo {
        id: ControllerId::from(id),
        name: gamepad.name().to_string(),
        uuid: gamepad.uuid(),
        is_game_controller: gamepad.mapping_source() != MappingSource::None,
    }
}
