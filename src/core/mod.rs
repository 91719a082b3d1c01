//=========================================================================
// Core
//
// Platform-agnostic building blocks of the context.
//
// Components:
// - `backend`: the `Backend` trait every window/GL implementation fulfils
// - `config`: window and GL context parameters
// - `controller`: controller handle and first-match selection
// - `error`: initialization failure taxonomy
// - `event`: drained events, key codes, viewport and size values
// - `frame`: per-frame event application (resize, quit, escape)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub(crate) mod frame;

//=== Public API ==========================================================

pub use backend::Backend;
pub use config::{ContextConfig, GlVersion};
pub use controller::{select_game_controller, Controller, ControllerId, DeviceInfo};
pub use error::{ContextError, LoaderError};
pub use event::{ContextEvent, KeyCode, Viewport, WindowSize};
pub use frame::LoopControl;
