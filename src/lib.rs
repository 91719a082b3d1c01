//=========================================================================
// GL Context — Library Root
//
// Windowed OpenGL context bootstrap: one window, one core-profile GL
// context, the first game controller found, and a per-frame
// "swap + poll" primitive for the caller's own loop.
//
// Responsibilities:
// - Expose the `Context` facade and its builder
// - Keep the Winit/glutin/gilrs glue (`platform`) behind the `Backend`
//   seam defined in `core`
//
// Typical usage:
// ```no_run
// use glcontext::Context;
//
// let mut context = Context::init("Test", 800, 600);
// while context.flip_and_poll_events() {
//     // render with context.backend().map(|b| b.gl())
// }
// context.terminate();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-agnostic types: events, configuration,
// errors, controller selection and the `Backend` trait.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit + glutin + glow + gilrs backend. Only
// `GlWindow` and `GlInfo` leave it.
//
// `context` defines the facade and lifecycle.
//
mod context;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use context::{Context, ContextBuilder, ContextState};
pub use platform::{GlInfo, GlWindow};
