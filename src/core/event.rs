//=========================================================================
// Context Event Types
//
// Platform-neutral representation of everything the frame pump drains
// from the windowing layer and the controller subsystem.
//
// Responsibilities:
// - Represent the window/input events the context reacts to
// - Keep key identifiers independent of Winit/SDL key codes
// - Carry viewport and window-size values between core and platform
//
// Event Flow:
// ```text
// Platform Layer (Winit, gilrs)
//         ↓
//    ContextEvent (this module)
//         ↓
//    FrameState::apply (resize → viewport, quit/escape → exit)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::controller::ControllerId;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of keyboard layout.
///
/// Only `Escape` carries meaning for the context itself (it ends the
/// frame loop); the remaining keys are passed through so callers can
/// observe them in their own event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key (requests loop exit)
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified
}

//=== ContextEvent ========================================================

/// A single event drained during [`Context::flip_and_poll_events`].
///
/// [`Context::flip_and_poll_events`]: crate::Context::flip_and_poll_events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextEvent {
    /// Explicit quit request (window closed, OS shutdown, loop exit).
    Quit,

    /// Key pressed (including OS key repeat).
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Window drawable size changed, in physical pixels.
    Resized { width: u32, height: u32 },

    /// A controller was plugged in after startup.
    ControllerConnected { id: ControllerId, name: String },

    /// A controller was unplugged.
    ControllerDisconnected { id: ControllerId },

    /// Anything the context does not react to (mouse, focus, IME, ...).
    Unidentified,
}

impl ContextEvent {
    /// Returns `true` for events that end the frame loop.
    pub fn requests_exit(&self) -> bool {
        matches!(self, Self::Quit | Self::KeyDown(KeyCode::Escape))
    }
}

//=== WindowSize ==========================================================

/// Stored drawable size of the window, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

//=== Viewport ============================================================

/// GL viewport rectangle (`glViewport` arguments).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Viewport covering the whole window, origin at `(0, 0)`.
    ///
    /// Sizes beyond `i32::MAX` saturate; GL clamps to its own maximum
    /// viewport dimensions anyway.
    pub fn covering(size: WindowSize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: i32::try_from(size.width).unwrap_or(i32::MAX),
            height: i32::try_from(size.height).unwrap_or(i32::MAX),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_and_escape_request_exit() {
        assert!(ContextEvent::Quit.requests_exit());
        assert!(ContextEvent::KeyDown(KeyCode::Escape).requests_exit());
    }

    #[test]
    fn other_events_do_not_request_exit() {
        let events = [
            ContextEvent::KeyUp(KeyCode::Escape),
            ContextEvent::KeyDown(KeyCode::KeyQ),
            ContextEvent::Resized { width: 1, height: 1 },
            ContextEvent::ControllerDisconnected { id: ControllerId(0) },
            ContextEvent::Unidentified,
        ];

        for event in &events {
            assert!(!event.requests_exit(), "{:?} should not exit", event);
        }
    }

    #[test]
    fn viewport_covering_starts_at_origin() {
        let viewport = Viewport::covering(WindowSize::new(640, 480));
        assert_eq!(viewport, Viewport { x: 0, y: 0, width: 640, height: 480 });
    }

    #[test]
    fn viewport_covering_saturates_huge_sizes() {
        let viewport = Viewport::covering(WindowSize::new(u32::MAX, 10));
        assert_eq!(viewport.width, i32::MAX);
        assert_eq!(viewport.height, 10);
    }
}
