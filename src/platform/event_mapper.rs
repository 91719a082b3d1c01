//=========================================================================
// Platform Event Mapper
//
// Converts Winit window events and gilrs controller events to
// `ContextEvent`s. Keeps OS-specific input types out of core.
//
// Responsibilities:
// - Translate close requests, keyboard input and resizes
// - Translate controller hot-plug events
// - Provide fallbacks (`Unidentified`) for everything else
//
//=========================================================================

use gilrs::{EventType as GilrsEventType, GamepadId};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::{Key, NamedKey, PhysicalKey};

use crate::core::controller::ControllerId;
use crate::core::event::{ContextEvent, KeyCode};

//=== Key Conversion ======================================================
//
// Maps `WinitKeyCode` values to the context's `KeyCode` enum.
// Only a subset of codes is supported; all others map to `Unidentified`.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -----------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Special keys -----------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified
        }
    }
}

//=== Keyboard ============================================================

/// Converts a key + press state into `KeyDown`/`KeyUp`.
///
/// The physical key picks the code, except that a logical Escape is
/// always `Escape` so remapped layouts still quit. Repeats arrive as
/// further presses, so holding Escape keeps asking for exit.
pub(crate) fn map_key(
    physical_key: PhysicalKey,
    logical_key: &Key,
    state: ElementState,
) -> ContextEvent {
    let key = match (logical_key, physical_key) {
        (Key::Named(NamedKey::Escape), _) => KeyCode::Escape,
        (_, PhysicalKey::Code(code)) => KeyCode::from(code),
        _ => KeyCode::Unidentified,
    };

    match state {
        ElementState::Pressed => ContextEvent::KeyDown(key),
        ElementState::Released => ContextEvent::KeyUp(key),
    }
}

//=== Window Events =======================================================
//
// Notes:
// - `CloseRequested` is the windowed equivalent of a quit event.
// - `Resized` carries the new drawable size in physical pixels.
// - Mouse, focus, IME and redraw events are not used by the context.
//

pub(crate) fn map_window_event(event: &WindowEvent) -> ContextEvent {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => ContextEvent::Quit,

        WindowEvent::KeyboardInput {
            event: KeyEvent { physical_key, logical_key, state, .. },
            ..
        } => map_key(*physical_key, logical_key, *state),

        WindowEvent::Resized(size) => ContextEvent::Resized {
            width: size.width,
            height: size.height,
        },

        _ => ContextEvent::Unidentified,
    }
}

//=== Controller Events ===================================================

impl From<GamepadId> for ControllerId {
    fn from(id: GamepadId) -> Self {
        ControllerId(usize::from(id))
    }
}

/// Hot-plug events become context events; button/axis traffic is only
/// drained (gilrs updates gamepad state while draining).
pub(crate) fn map_controller_event(
    id: GamepadId,
    event: &GilrsEventType,
    name: impl FnOnce() -> String,
) -> Option<ContextEvent> {
    match event {
        GilrsEventType::Connected => Some(ContextEvent::ControllerConnected {
            id: ControllerId::from(id),
            name: name(),
        }),
        GilrsEventType::Disconnected => Some(ContextEvent::ControllerDisconnected {
            id: ControllerId::from(id),
        }),
        _ => None,
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;
    use winit::keyboard::{NativeKey, NativeKeyCode};

    #[test]
    fn close_requested_is_quit() {
        assert_eq!(map_window_event(&WindowEvent::CloseRequested), ContextEvent::Quit);
    }

    #[test]
    fn resized_carries_physical_size() {
        let event = WindowEvent::Resized(PhysicalSize::new(640, 480));
        assert_eq!(
            map_window_event(&event),
            ContextEvent::Resized { width: 640, height: 480 }
        );
    }

    #[test]
    fn focus_changes_are_unidentified() {
        assert_eq!(map_window_event(&WindowEvent::Focused(true)), ContextEvent::Unidentified);
    }

    #[test]
    fn escape_press_maps_to_key_down() {
        let event = map_key(
            PhysicalKey::Code(WinitKeyCode::Escape),
            &Key::Named(NamedKey::Escape),
            ElementState::Pressed,
        );
        assert_eq!(event, ContextEvent::KeyDown(KeyCode::Escape));
        assert!(event.requests_exit());
    }

    #[test]
    fn escape_release_maps_to_key_up() {
        let event = map_key(
            PhysicalKey::Code(WinitKeyCode::Escape),
            &Key::Named(NamedKey::Escape),
            ElementState::Released,
        );
        assert_eq!(event, ContextEvent::KeyUp(KeyCode::Escape));
        assert!(!event.requests_exit());
    }

    #[test]
    fn unidentified_physical_key() {
        let event = map_key(
            PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
            &Key::Unidentified(NativeKey::Unidentified),
            ElementState::Pressed,
        );
        assert_eq!(event, ContextEvent::KeyDown(KeyCode::Unidentified));
    }

    #[test]
    fn logical_escape_on_remapped_key_is_escape() {
        // Caps Lock remapped to Escape by the keyboard layout.
        let event = map_key(
            PhysicalKey::Code(WinitKeyCode::CapsLock),
            &Key::Named(NamedKey::Escape),
            ElementState::Pressed,
        );
        assert_eq!(event, ContextEvent::KeyDown(KeyCode::Escape));
        assert!(event.requests_exit());
    }

    #[test]
    fn physical_key_decides_for_other_logical_keys() {
        let event = map_key(
            PhysicalKey::Code(WinitKeyCode::KeyQ),
            &Key::Character("a".into()),
            ElementState::Pressed,
        );
        assert_eq!(event, ContextEvent::KeyDown(KeyCode::KeyQ));
    }

    #[test]
    fn keycode_conversion_filters_unmapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_special() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(KeyCode::from(WinitKeyCode::Delete), KeyCode::Delete);
    }
}
