//=========================================================================
// Frame State
//=========================================================================
//
// Applies one frame's worth of drained events to the stored window size
// and decides whether the caller's loop keeps running.
//
// Architecture:
//   Vec<ContextEvent> → FrameState::apply() → (size, viewport) → LoopControl
//
// Draining is exhaustive: an exit request does not stop processing, so
// a resize queued after a quit is still applied.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::event::{ContextEvent, Viewport, WindowSize};

//=== LoopControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

impl LoopControl {
    pub fn should_continue(self) -> bool {
        self == Self::Continue
    }
}

//=== FrameState ==========================================================

/// Window size tracked across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrameState {
    size: WindowSize,
}

impl FrameState {
    pub(crate) fn new(size: WindowSize) -> Self {
        Self { size }
    }

    pub(crate) fn size(&self) -> WindowSize {
        self.size
    }

    /// Consumes every event, forwarding resizes to `set_viewport`.
    pub(crate) fn apply<I, F>(&mut self, events: I, mut set_viewport: F) -> LoopControl
    where
        I: IntoIterator<Item = ContextEvent>,
        F: FnMut(Viewport),
    {
        let mut control = LoopControl::Continue;

        for event in events {
            if event.requests_exit() {
                info!(target: "context", "Quit requested ({:?})", event);
                control = LoopControl::Exit;
                continue;
            }

            match event {
                ContextEvent::Resized { width, height } => {
                    debug!(target: "context", "Window resized to {}x{}", width, height);
                    self.size = WindowSize::new(width, height);
                    set_viewport(Viewport::covering(self.size));
                }

                ContextEvent::ControllerConnected { id, name } => {
                    info!(target: "context", "Controller {} connected: {}", id, name);
                }

                ContextEvent::ControllerDisconnected { id } => {
                    info!(target: "context", "Controller {} disconnected", id);
                }

                // Key events never touch the stored size.
                other => trace!(target: "context", "Ignoring {:?}", other),
            }
        }

        control
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
