//=========================================================================
// Context Configuration
//=========================================================================
//
// Plain value describing the window and GL context to create.
// Produced by `ContextBuilder`; consumed by `Backend` openers.
//
//=========================================================================

//=== GlVersion ===========================================================

/// Requested OpenGL context version (core profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

//=== ContextConfig =======================================================

/// Window and GL context parameters.
///
/// # Default Values
///
/// - **GL version**: 3.3 core profile
/// - **Multisampling**: 1 buffer, 4 samples
/// - **Double buffering**: enabled
/// - **Swap interval**: 1 (vsync)
/// - **Window**: resizable, centered on its monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: GlVersion,
    pub multisample_buffers: u8,
    pub samples: u8,
    pub double_buffer: bool,
    pub swap_interval: u32,
    pub resizable: bool,
    pub centered: bool,
}

impl ContextConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            gl_version: GlVersion::default(),
            multisample_buffers: 1,
            samples: 4,
            double_buffer: true,
            swap_interval: 1,
            resizable: true,
            centered: true,
        }
    }

    /// Sample count to request from the display, `0` when multisampling
    /// is off.
    pub fn requested_samples(&self) -> u8 {
        if self.multisample_buffers == 0 {
            0
        } else {
            self.samples
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
    fn defaults_match_bootstrap_settings() {
        let config = ContextConfig::new("Test", 800, 600);
        assert_eq!(config.title, "Test");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.gl_version, GlVersion::new(3, 3));
        assert_eq!(config.multisample_buffers, 1);
        assert_eq!(config.samples, 4);
        assert!(config.double_buffer);
        assert_eq!(config.swap_interval, 1);
        assert!(config.resizable);
        assert!(config.centered);
    }

    #[test]
    fn no_multisample_buffers_means_no_samples() {
        let mut config = ContextConfig::new("Test", 800, 600);
        assert_eq!(config.requested_samples(), 4);

        config.multisample_buffers = 0;
        assert_eq!(config.requested_samples(), 0);
    }
}
