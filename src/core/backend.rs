//=========================================================================
// Backend Interface
//=========================================================================
//
// Contract between the `Context` facade and a windowing/GL backend.
//
// The facade owns lifecycle and frame logic; a backend owns the actual
// window, GL context and controller handles. `GlWindow` (winit + glutin
// + gilrs) is the default; tests drive the facade with a scripted one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::controller::Controller;
use crate::core::event::{ContextEvent, Viewport};

//=== Backend =============================================================

/// Owner of one window, its GL context and an optional controller.
///
/// All methods run on the thread that opened the backend.
pub trait Backend {
    /// Presents the back buffer. Failures are logged, not returned.
    fn swap_buffers(&mut self);

    /// Appends every pending event to `events`, leaving the platform
    /// queue empty.
    fn drain_events(&mut self, events: &mut Vec<ContextEvent>);

    /// Issues `glViewport` (and resizes the surface where required).
    fn set_viewport(&mut self, viewport: Viewport);

    /// The open game controller, if one was found.
    fn controller(&self) -> Option<&Controller>;

    /// Releases everything in reverse creation order: controller,
    /// GL context, window, then the windowing subsystem.
    fn shutdown(self)
    where
        Self: Sized;
}
