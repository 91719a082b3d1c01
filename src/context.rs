//=========================================================================
// Context
//
// Public facade over one window + GL context + optional controller.
//
// Architecture:
// ```text
//     ContextBuilder  ──build()──>  Context  ──flip_and_poll_events()──> bool
//         │                           │
//         ├─ with_size()              ├─ controller()
//         ├─ with_gl_version()        └─ terminate()  (also on Drop)
//         └─ with_multisampling()
// ```
//
// Lifecycle:
// ```text
//   Uninitialized ──init ok──> Initialized ──terminate──> Terminated
//         │                                                   │
//         └── init failed (resources released, error logged)  └── terminate: no-op
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::backend::Backend;
use crate::core::config::{ContextConfig, GlVersion};
use crate::core::controller::Controller;
use crate::core::error::ContextError;
use crate::core::event::{ContextEvent, WindowSize};
use crate::core::frame::FrameState;
use crate::platform::GlWindow;

//=== ContextBuilder ======================================================

/// Builder for configuring and creating a [`Context`].
///
/// # Default Values
///
/// - **Size**: 800x600
/// - **GL**: 3.3 core profile, double buffered, swap interval 1
/// - **Multisampling**: 1 buffer, 4 samples
/// - **Window**: resizable, centered
///
/// # Examples
///
/// ```no_run
/// use glcontext::ContextBuilder;
///
/// let mut context = ContextBuilder::new("Demo")
///     .with_size(1280, 720)
///     .with_multisampling(1, 8)
///     .build();
///
/// while context.flip_and_poll_events() {
///     // draw
/// }
/// context.terminate();
/// ```
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    config: ContextConfig,
}

impl ContextBuilder {
    /// Creates a builder with default settings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            config: ContextConfig::new(title, 800, 600),
        }
    }

    /// Sets the initial window size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Requests a core-profile context of the given version.
    /// Default: `3.3`.
    ///
    /// # Panics
    ///
    /// Panics if `major == 0`.
    pub fn with_gl_version(mut self, major: u8, minor: u8) -> Self {
        assert!(major > 0, "GL major version must be positive");
        self.config.gl_version = GlVersion::new(major, minor);
        self
    }

    /// Sets multisample buffers and samples per pixel. `buffers == 0`
    /// disables multisampling. Default: `1` buffer, `4` samples.
    pub fn with_multisampling(mut self, buffers: u8, samples: u8) -> Self {
        self.config.multisample_buffers = buffers;
        self.config.samples = samples;
        self
    }

    /// Double-buffered framebuffer. Default: `true`.
    pub fn with_double_buffer(mut self, enabled: bool) -> Self {
        self.config.double_buffer = enabled;
        self
    }

    /// Vertical syncs between swaps; `0` disables vsync. Default: `1`.
    pub fn with_swap_interval(mut self, interval: u32) -> Self {
        self.config.swap_interval = interval;
        self
    }

    /// Whether the user can resize the window. Default: `true`.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.config.resizable = resizable;
        self
    }

    /// Centers the window on its monitor before it is shown.
    /// Default: `true`.
    pub fn with_centered(mut self, centered: bool) -> Self {
        self.config.centered = centered;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Consumes the builder without opening anything.
    pub fn into_config(self) -> ContextConfig {
        self.config
    }

    /// Opens the window and GL context; see [`Context::init_config`].
    pub fn build(self) -> Context {
        Context::init_config(self.config)
    }

    /// Opens the window and GL context, returning the failure cause.
    pub fn try_build(self) -> Result<Context, ContextError> {
        Context::try_init(self.config)
    }
}

//=== ContextState ========================================================

/// Observable lifecycle state of a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Never initialized, or initialization failed.
    Uninitialized,
    Initialized,
    /// Terminal; further `terminate` calls are no-ops.
    Terminated,
}

enum Lifecycle<B> {
    Uninitialized,
    Initialized(B),
    Terminated,
}

//=== Context =============================================================

/// One window, its GL context and the first game controller found.
///
/// All methods must be called from the thread that created the context.
///
/// # Examples
///
/// ```no_run
/// use glcontext::Context;
///
/// let mut context = Context::init("Test", 800, 600);
/// if context.is_initialized() {
///     if let Some(controller) = context.controller() {
///         println!("Using {}", controller.name());
///     }
///     while context.flip_and_poll_events() {}
/// }
/// context.terminate();
/// ```
pub struct Context<B: Backend = GlWindow> {
    lifecycle: Lifecycle<B>,
    frame: FrameState,
    events: Vec<ContextEvent>,
}

impl Context<GlWindow> {
    //--- Initialization ---------------------------------------------------

    /// Opens a centered, resizable window with a 3.3 core GL context.
    ///
    /// Never fails loudly: on error the cause is logged, everything
    /// acquired so far is released, and the returned context is
    /// [`ContextState::Uninitialized`].
    pub fn init(title: &str, width: u32, height: u32) -> Self {
        Self::init_config(ContextConfig::new(title, width, height))
    }

    /// [`Context::init`] with full configuration.
    pub fn init_config(config: ContextConfig) -> Self {
        Self::init_with(config, GlWindow::open)
    }

    /// Opens the context, returning why it failed.
    ///
    /// # Errors
    ///
    /// Returns the [`ContextError`] of the first stage that failed.
    pub fn try_init(config: ContextConfig) -> Result<Self, ContextError> {
        Self::try_init_with(config, GlWindow::open)
    }
}

impl<B: Backend> Context<B> {
    //--- Initialization ---------------------------------------------------

    /// Opens a context over a custom backend, logging failures.
    pub fn init_with<F>(config: ContextConfig, open: F) -> Self
    where
        F: FnOnce(&ContextConfig) -> Result<B, ContextError>,
    {
        let size = WindowSize::new(config.width, config.height);

        match Self::try_init_with(config, open) {
            Ok(context) => context,
            Err(e) => {
                error!(target: "context", "{}", e);
                error!(target: "context", "Context initialization failed, quitting");
                Self::with_lifecycle(Lifecycle::Uninitialized, size)
            }
        }
    }

    /// Opens a context over a custom backend.
    ///
    /// # Errors
    ///
    /// [`ContextError::WindowCreation`] for a zero width or height
    /// (`open` is not called), otherwise whatever `open` returns.
    pub fn try_init_with<F>(config: ContextConfig, open: F) -> Result<Self, ContextError>
    where
        F: FnOnce(&ContextConfig) -> Result<B, ContextError>,
    {
        info!(
            target: "context",
            "Initializing context \"{}\" ({}x{}, GL {}.{} core)",
            config.title,
            config.width,
            config.height,
            config.gl_version.major,
            config.gl_version.minor
        );

        if config.width == 0 || config.height == 0 {
            return Err(ContextError::WindowCreation(format!(
                "Window size must be positive, got {}x{}",
                config.width, config.height
            )));
        }

        let backend = open(&config)?;
        let size = WindowSize::new(config.width, config.height);

        info!(target: "context", "Context initialized");
        Ok(Self::with_lifecycle(Lifecycle::Initialized(backend), size))
    }

    fn with_lifecycle(lifecycle: Lifecycle<B>, size: WindowSize) -> Self {
        Self {
            lifecycle,
            frame: FrameState::new(size),
            events: Vec::with_capacity(32),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> ContextState {
        match self.lifecycle {
            Lifecycle::Uninitialized => ContextState::Uninitialized,
            Lifecycle::Initialized(_) => ContextState::Initialized,
            Lifecycle::Terminated => ContextState::Terminated,
        }
    }

    /// `true` between a successful init and `terminate`.
    pub fn is_initialized(&self) -> bool {
        self.state() == ContextState::Initialized
    }

    /// The open game controller, or `None` when none was found (or the
    /// context is not initialized).
    pub fn controller(&self) -> Option<&Controller> {
        self.backend().and_then(Backend::controller)
    }

    /// Stored window size, updated on every resize event.
    pub fn size(&self) -> WindowSize {
        self.frame.size()
    }

    /// The backend while initialized, e.g. [`GlWindow::gl`] for drawing.
    pub fn backend(&self) -> Option<&B> {
        match &self.lifecycle {
            Lifecycle::Initialized(backend) => Some(backend),
            _ => None,
        }
    }

    /// Mutable access to the backend while initialized.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        match &mut self.lifecycle {
            Lifecycle::Initialized(backend) => Some(backend),
            _ => None,
        }
    }

    //--- Frame Loop -------------------------------------------------------

    /// Presents the frame, then drains every pending event.
    ///
    /// Returns `false` when a quit event or an Escape key press was
    /// drained, `true` otherwise. Resizes update [`Context::size`] and
    /// set the viewport to `(0, 0, width, height)`.
    ///
    /// On a context that is not initialized this returns `false`.
    pub fn flip_and_poll_events(&mut self) -> bool {
        let Lifecycle::Initialized(backend) = &mut self.lifecycle else {
            warn!(target: "context", "flip_and_poll_events on {:?} context", self.state());
            return false;
        };

        backend.swap_buffers();

        self.events.clear();
        backend.drain_events(&mut self.events);

        self.frame
            .apply(self.events.drain(..), |viewport| backend.set_viewport(viewport))
            .should_continue()
    }

    //--- Teardown ---------------------------------------------------------

    /// Closes the controller, destroys the GL context and the window,
    /// and shuts the windowing subsystem down.
    ///
    /// No-op when nothing was ever opened or after a previous call.
    pub fn terminate(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Terminated) {
            Lifecycle::Initialized(backend) => {
                info!(target: "context", "Terminating context");
                backend.shutdown();
                info!(target: "context", "Context terminated");
            }
            // Put back whatever was there.
            other => self.lifecycle = other,
        }
    }
}

impl<B: Backend> Default for Context<B> {
    /// A context that was never initialized.
    fn default() -> Self {
        Self::with_lifecycle(Lifecycle::Uninitialized, WindowSize::default())
    }
}

impl<B: Backend> Drop for Context<B> {
    fn drop(&mut self) {
        self.terminate();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
