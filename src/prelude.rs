//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use glcontext::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Context facade
pub use crate::{Context, ContextBuilder, ContextState, GlInfo, GlWindow};

// Core types
pub use crate::core::{
    Backend, ContextConfig, ContextError, ContextEvent, Controller, ControllerId, GlVersion,
    KeyCode, LoopControl, Viewport, WindowSize,
};
