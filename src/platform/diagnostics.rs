//=========================================================================
// GL Diagnostics
//=========================================================================
//
// Queries the negotiated GL version, profile mask and context flags and
// logs them once after the context is created. Purely informational: a
// GL error during the queries downgrades to a warning.
//
//=========================================================================

//=== External Dependencies ===============================================

use glow::HasContext;
use log::{info, warn};

const MAX_STALE_ERRORS: usize = 16;

//=== GlInfo ==============================================================

/// What the driver actually gave us.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlInfo {
    pub version: String,
    pub major: i32,
    pub minor: i32,
    pub profile_mask: i32,
    pub context_flags: i32,
}

impl GlInfo {
    /// Reads the version/profile state of the current context.
    ///
    /// Returns `None` if the driver raised a GL error while answering.
    pub(crate) fn query(gl: &glow::Context) -> Option<Self> {
        // SAFETY: plain state queries on the current context.
        unsafe {
            // Clear stale errors; the queue is bounded by the driver.
            for _ in 0..MAX_STALE_ERRORS {
                if gl.get_error() == glow::NO_ERROR {
                    break;
                }
            }

            let info = Self {
                version: gl.get_parameter_string(glow::VERSION),
                major: gl.get_parameter_i32(glow::MAJOR_VERSION),
                minor: gl.get_parameter_i32(glow::MINOR_VERSION),
                profile_mask: gl.get_parameter_i32(glow::CONTEXT_PROFILE_MASK),
                context_flags: gl.get_parameter_i32(glow::CONTEXT_FLAGS),
            };

            match gl.get_error() {
                glow::NO_ERROR => Some(info),
                code => {
                    warn!(target: "platform::gl", "GL diagnostics unavailable (error 0x{:x})", code);
                    None
                }
            }
        }
    }

    pub fn profile_name(&self) -> &'static str {
        let mask = self.profile_mask as u32;
        if mask & glow::CONTEXT_CORE_PROFILE_BIT != 0 {
            "core"
        } else if mask & glow::CONTEXT_COMPATIBILITY_PROFILE_BIT != 0 {
            "compatibility"
        } else {
            "unknown"
        }
    }

    pub fn flag_names(&self) -> Vec<&'static str> {
        const FLAGS: &[(u32, &str)] = &[
            (glow::CONTEXT_FLAG_FORWARD_COMPATIBLE_BIT, "forward-compatible"),
            (glow::CONTEXT_FLAG_DEBUG_BIT, "debug"),
            (glow::CONTEXT_FLAG_ROBUST_ACCESS_BIT, "robust-access"),
        ];

        let flags = self.context_flags as u32;
        FLAGS
            .iter()
            .filter(|(bit, _)| flags & bit != 0)
            .map(|(_, name)| *name)
            .collect()
    }

    pub(crate) fn log(&self) {
        info!(target: "platform::gl", "GL_VERSION string: \"{}\"", self.version);
        info!(
            target: "platform::gl",
            "GL major/minor is {}/{}. profile: {:x} ({}), ctxflags: {:x} {:?}",
            self.major,
            self.minor,
            self.profile_mask,
            self.profile_name(),
            self.context_flags,
            self.flag_names()
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn info(profile_mask: u32, context_flags: u32) -> GlInfo {
        GlInfo {
            version: "3.3.0 Core Profile".into(),
            major: 3,
            minor: 3,
            profile_mask: profile_mask as i32,
            context_flags: context_flags as i32,
        }
    }

    #[test]
    fn core_profile_is_named() {
        assert_eq!(info(glow::CONTEXT_CORE_PROFILE_BIT, 0).profile_name(), "core");
    }

    #[test]
    fn compatibility_profile_is_named() {
        assert_eq!(
            info(glow::CONTEXT_COMPATIBILITY_PROFILE_BIT, 0).profile_name(),
            "compatibility"
        );
    }

    #[test]
    fn missing_profile_is_unknown() {
        assert_eq!(info(0, 0).profile_name(), "unknown");
    }

    #[test]
    fn flags_are_decoded_in_order() {
        let flags = glow::CONTEXT_FLAG_DEBUG_BIT | glow::CONTEXT_FLAG_FORWARD_COMPATIBLE_BIT;
        assert_eq!(info(0, flags).flag_names(), vec!["forward-compatible", "debug"]);
    }

    #[test]
    fn no_flags_decode_to_empty() {
        assert!(info(glow::CONTEXT_CORE_PROFILE_BIT, 0).flag_names().is_empty());
    }
}
