//=========================================================================
// GL Entry Point Loading
//=========================================================================
//
// Resolves GL function pointers into a `glow::Context`.
//
// Platform branch (compile time):
// - Apple: the system GL framework exports every entry point, so the
//   pointers are loaded as-is.
// - Everything else: entry points beyond GL 1.1 come from the driver at
//   runtime. A required set is resolved first and any null pointer fails
//   initialization before glow is built on top of it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ffi::{c_void, CStr};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::LoaderError;

//=== Required Entry Points ===============================================

/// Entry points the context itself and any 3.3 core renderer need.
#[cfg(not(target_vendor = "apple"))]
const REQUIRED_ENTRY_POINTS: &[&CStr] = &[
    c"glGetString",
    c"glGetIntegerv",
    c"glGetError",
    c"glViewport",
    c"glClear",
    c"glGenVertexArrays",
    c"glBindVertexArray",
    c"glCreateShader",
    c"glCreateProgram",
];

//=== Loading =============================================================

/// Builds a glow context from `resolve` (usually the display's
/// `get_proc_address`). The context must be current.
pub(crate) fn load_entry_points<F>(mut resolve: F) -> Result<glow::Context, LoaderError>
where
    F: FnMut(&CStr) -> *const c_void,
{
    #[cfg(not(target_vendor = "apple"))]
    verify_entry_points(&mut resolve, REQUIRED_ENTRY_POINTS)?;

    #[cfg(target_vendor = "apple")]
    debug!(target: "platform::gl", "Using native GL entry points");

    // SAFETY: the caller made the context current on this thread and
    // `resolve` returns pointers for that context.
    let gl = unsafe { glow::Context::from_loader_function_cstr(|name| resolve(name)) };

    info!(target: "platform::gl", "GL entry points loaded");
    Ok(gl)
}

/// Fails on the first entry point that resolves to null.
#[cfg_attr(target_vendor = "apple", allow(dead_code))]
pub(crate) fn verify_entry_points<F>(resolve: &mut F, names: &[&CStr]) -> Result<(), LoaderError>
where
    F: FnMut(&CStr) -> *const c_void,
{
    for &name in names {
        if resolve(name).is_null() {
            return Err(LoaderError::MissingEntryPoint(name.to_string_lossy().into_owned()));
        }
    }

    debug!(target: "platform::gl", "Verified {} GL entry points", names.len());
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
