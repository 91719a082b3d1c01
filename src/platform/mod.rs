//=========================================================================
// Platform Subsystem
//
// Default `Backend`: a Winit window with a glutin GL context, glow entry
// points and an optional gilrs controller.
//
// Architecture:
// ```text
//  GlWindow::open(config)                 Per frame (caller's thread):
//  ┌──────────────────────────────┐       ┌──────────────────────────┐
//  │ 1. Winit EventLoop           │       │ swap_buffers()           │
//  │ 2. Hidden window + GL config │       │   ↓                      │
//  │    (glutin-winit, MSAA)      │       │ drain_events()           │
//  │ 3. Core-profile GL context   │       │   ├─ pump Winit (0 ms)   │
//  │    + window surface, vsync   │       │   └─ drain gilrs         │
//  │    + entry points (glow)     │       │   ↓                      │
//  │    + diagnostics (logged)    │       │ set_viewport() on resize │
//  │ 4. Show window               │       └──────────────────────────┘
//  │ 5. First game controller     │
//  └──────────────────────────────┘
//  Teardown: controller → GL context → surface → window → event loop
// ```
//
// Key Design Decisions:
// - **Pumped event loop**: Winit normally owns the main loop; here the
//   caller owns it, so events are pumped with a zero timeout once per
//   frame (`EventLoopExtPumpEvents`, desktop platforms).
// - **Scoped acquisition**: stages run through `StageStack`; anything
//   acquired before a failing stage is dropped in reverse order.
// - **Hidden until ready**: the window is created invisible, centered
//   on its monitor, and shown only once the GL stage succeeded.
//
//=========================================================================

//=== Submodules ==========================================================

mod diagnostics;
mod event_mapper;
mod gamepads;
mod gl_loader;
mod placement;
mod stages;

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    PossiblyCurrentGlContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use log::*;
use raw_window_handle::HasWindowHandle;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::backend::Backend;
use crate::core::config::ContextConfig;
use crate::core::controller::Controller;
use crate::core::error::ContextError;
use crate::core::event::{ContextEvent, Viewport};

pub use diagnostics::GlInfo;
use gamepads::Gamepads;
use stages::{PlatformStages, Release, StageStack};

//=== GlWindow ============================================================

/// Window, GL context and controller owned by a [`Context`].
///
/// # Thread Safety
///
/// Not Send/Sync: the GL context is current on, and Winit events are
/// pumped from, the thread that opened it.
///
/// [`Context`]: crate::Context
pub struct GlWindow {
    stack: StageStack<Desktop>,
}

impl GlWindow {
    //--- Construction -----------------------------------------------------

    /// Creates window, GL context and controller in that order.
    ///
    /// # Errors
    ///
    /// Any [`ContextError`]; resources acquired before the failing stage
    /// are released before returning.
    pub fn open(config: &ContextConfig) -> Result<Self, ContextError> {
        let stack = StageStack::open(&mut Desktop, config)?;
        info!(target: "platform", "Platform subsystem initialized");
        Ok(Self { stack })
    }

    //--- Accessors --------------------------------------------------------

    /// glow function table for rendering on this context.
    pub fn gl(&self) -> &glow::Context {
        &self.stack.gl.gl
    }

    /// Negotiated version/profile, when the driver answered.
    pub fn gl_info(&self) -> Option<&GlInfo> {
        self.stack.gl.gl_info.as_ref()
    }

    pub fn window(&self) -> &Window {
        &self.stack.window.window
    }

    /// Live gilrs state of the open controller.
    pub fn gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
        self.stack.controller.as_ref().and_then(Gamepads::gamepad)
    }
}

//=== Backend =============================================================

impl Backend for GlWindow {
    fn swap_buffers(&mut self) {
        let gl = &self.stack.gl;
        if let Err(e) = gl.surface.swap_buffers(&gl.gl_context) {
            warn!(target: "platform::gl", "Buffer swap failed: {}", e);
        }
    }

    fn drain_events(&mut self, events: &mut Vec<ContextEvent>) {
        let mut pump = EventPump { events: &mut *events };

        if let PumpStatus::Exit(code) =
            self.stack.subsystem.pump_app_events(Some(Duration::ZERO), &mut pump)
        {
            debug!(target: "platform", "Event loop exited with code {}", code);
            events.push(ContextEvent::Quit);
        }

        if let Some(gamepads) = &mut self.stack.controller {
            gamepads.drain_events(events);
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        let gl = &self.stack.gl;

        // glutin surfaces on EGL/GLX track size explicitly; zero-sized
        // (minimized) windows keep their previous surface size.
        if let (Some(width), Some(height)) = (
            NonZeroU32::new(viewport.width.max(0) as u32),
            NonZeroU32::new(viewport.height.max(0) as u32),
        ) {
            gl.surface.resize(&gl.gl_context, width, height);
        }

        // SAFETY: the context is current on this thread.
        unsafe {
            gl.gl
                .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        }
    }

    fn controller(&self) -> Option<&Controller> {
        self.stack.controller.as_ref().and_then(Gamepads::controller)
    }

    fn shutdown(self) {
        self.stack.shutdown();
    }
}

//=== Desktop Stages ======================================================

/// Winit + glutin + gilrs implementation of the platform stages.
struct Desktop;

/// Window plus the framebuffer config it was created for.
struct PlatformWindow {
    window: Window,
    gl_config: Config,
}

/// GL context, its window surface and the loaded entry points.
// Field order is teardown order.
struct GlStack {
    gl: glow::Context,
    gl_info: Option<GlInfo>,
    gl_context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
}

impl PlatformStages for Desktop {
    type Subsystem = EventLoop<()>;
    type Window = PlatformWindow;
    type Gl = GlStack;
    type Controller = Gamepads;

    fn open_subsystem(&mut self) -> Result<EventLoop<()>, ContextError> {
        let event_loop =
            EventLoop::new().map_err(|e| ContextError::Subsystem(e.to_string()))?;
        debug!(target: "platform", "Winit event loop created");
        Ok(event_loop)
    }

    fn open_window(
        &mut self,
        event_loop: &EventLoop<()>,
        config: &ContextConfig,
    ) -> Result<PlatformWindow, ContextError> {
        let requested_samples = config.requested_samples();
        let mut template = ConfigTemplateBuilder::new()
            .with_single_buffering(!config.double_buffer);
        if requested_samples > 0 {
            template = template.with_multisampling(requested_samples);
        }

        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .with_visible(false);

        let (window, gl_config) = catch_empty_config_set(|| {
            DisplayBuilder::new()
                .with_window_attributes(Some(attributes))
                .build(event_loop, template, |configs| {
                    let samples = |config: &Config| config.num_samples();
                    choose_config(configs, samples, requested_samples)
                })
        })?
        .map_err(|e| ContextError::WindowCreation(e.to_string()))?;

        let window = window.ok_or_else(|| {
            ContextError::WindowCreation("display builder returned no window".into())
        })?;

        if config.centered {
            placement::center_on_monitor(&window);
        }

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI, {} samples",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor(),
            gl_config.num_samples()
        );

        Ok(PlatformWindow { window, gl_config })
    }

    fn open_gl(
        &mut self,
        window: &PlatformWindow,
        config: &ContextConfig,
    ) -> Result<GlStack, ContextError> {
        let PlatformWindow { window, gl_config } = window;

        let (gl_context, surface) = create_gl_context(config, window, gl_config)?;

        let interval = match NonZeroU32::new(config.swap_interval) {
            Some(n) => SwapInterval::Wait(n),
            None => SwapInterval::DontWait,
        };
        if let Err(e) = surface.set_swap_interval(&gl_context, interval) {
            warn!(
                target: "platform::gl",
                "Could not set swap interval {}: {}",
                config.swap_interval,
                e
            );
        }

        let display = gl_config.display();
        let gl = gl_loader::load_entry_points(|name| display.get_proc_address(name))?;

        // Diagnostics never fail the stage.
        let gl_info = GlInfo::query(&gl);
        if let Some(gl_info) = &gl_info {
            gl_info.log();
        }

        Ok(GlStack {
            gl,
            gl_info,
            gl_context,
            surface,
        })
    }

    fn show(&mut self, window: &PlatformWindow) {
        window.window.set_visible(true);
    }

    fn open_controller(&mut self) -> Option<Gamepads> {
        Gamepads::open()
    }
}

impl Release for EventLoop<()> {
    fn release(self) {
        drop(self);
        info!(target: "platform", "Platform subsystem shut down");
    }
}

impl Release for PlatformWindow {
    fn release(self) {
        drop(self);
        debug!(target: "platform", "Window destroyed");
    }
}

impl Release for GlStack {
    fn release(self) {
        let Self {
            gl,
            gl_info: _,
            gl_context,
            surface,
        } = self;

        drop(gl);
        match gl_context.make_not_current() {
            Ok(context) => drop(context),
            Err(e) => warn!(target: "platform::gl", "Could not release GL context: {}", e),
        }
        drop(surface);
        debug!(target: "platform::gl", "GL context destroyed");
    }
}

impl Release for Gamepads {
    fn release(self) {
        self.close();
    }
}

//=== Winit Integration ===================================================

/// Collects Winit events for one pump.
struct EventPump<'a> {
    events: &'a mut Vec<ContextEvent>,
}

impl ApplicationHandler for EventPump<'_> {
    // The window is created up front in `GlWindow::open`.
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let mapped = event_mapper::map_window_event(&event);
        trace!(target: "platform::input", "{:?} -> {:?}", event, mapped);
        self.events.push(mapped);
    }
}

//=== Helpers =============================================================

fn create_gl_context(
    config: &ContextConfig,
    window: &Window,
    gl_config: &Config,
) -> Result<(PossiblyCurrentContext, Surface<WindowSurface>), ContextError> {
    let raw_handle = window
        .window_handle()
        .map_err(|e| ContextError::GlContextCreation(e.to_string()))?
        .as_raw();

    let version = Version::new(config.gl_version.major, config.gl_version.minor);
    let context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .with_context_api(ContextApi::OpenGl(Some(version)))
        .build(Some(raw_handle));

    let display = gl_config.display();

    // SAFETY: `raw_handle` belongs to `window`, which outlives the context.
    let not_current = unsafe { display.create_context(gl_config, &context_attributes) }
        .map_err(|e| ContextError::GlContextCreation(e.to_string()))?;

    let surface_attributes = window
        .build_surface_attributes(Default::default())
        .map_err(|e| ContextError::GlContextCreation(e.to_string()))?;

    // SAFETY: as above, the surface never outlives `window`.
    let surface = unsafe { display.create_window_surface(gl_config, &surface_attributes) }
        .map_err(|e| ContextError::GlContextCreation(e.to_string()))?;

    let gl_context = not_current
        .make_current(&surface)
        .map_err(|e| ContextError::GlContextCreation(e.to_string()))?;

    debug!(
        target: "platform::gl",
        "GL {}.{} core context current",
        config.gl_version.major,
        config.gl_version.minor
    );
    Ok((gl_context, surface))
}

/// Unwind payload for an empty config set.
struct NoMatchingConfig;

/// Takes the config `preferred_config` picks.
///
/// glutin-winit's picker must return a config, so an empty set unwinds
/// with [`NoMatchingConfig`] for [`catch_empty_config_set`] to report.
fn choose_config<T>(
    configs: impl Iterator<Item = T>,
    sample_count: impl Fn(&T) -> u8,
    requested_samples: u8,
) -> T {
    let mut configs: Vec<T> = configs.collect();
    let samples: Vec<u8> = configs.iter().map(sample_count).collect();

    match preferred_config(&samples, requested_samples) {
        Some(index) => configs.swap_remove(index),
        None => panic::resume_unwind(Box::new(NoMatchingConfig)),
    }
}

/// Runs `build`, turning an empty config set into a `WindowCreation`
/// error. Other panics keep unwinding.
fn catch_empty_config_set<T>(build: impl FnOnce() -> T) -> Result<T, ContextError> {
    match panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(built) => Ok(built),
        Err(payload) if payload.is::<NoMatchingConfig>() => Err(ContextError::WindowCreation(
            "no GL config matches the requested framebuffer".into(),
        )),
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Index of the config whose sample count equals `requested`, else the
/// one with the most samples. Ties go to the earlier config.
fn preferred_config(samples: &[u8], requested: u8) -> Option<usize> {
    if let Some(exact) = samples.iter().position(|&s| s == requested) {
        return Some(exact);
    }

    samples
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u8)>, (index, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((index, count)),
        })
        .map(|(index, _)| index)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sample_count_is_preferred() {
        assert_eq!(preferred_config(&[0, 8, 4, 2], 4), Some(2));
    }

    #[test]
    fn highest_sample_count_when_no_exact_match() {
        assert_eq!(preferred_config(&[0, 2, 8, 8], 4), Some(2));
    }

    #[test]
    fn first_config_wins_ties() {
        assert_eq!(preferred_config(&[2, 2], 4), Some(0));
    }

    #[test]
    fn no_configs_no_choice() {
        assert_eq!(preferred_config(&[], 4), None);
    }

    #[test]
    fn multisampling_off_prefers_single_sample() {
        assert_eq!(preferred_config(&[4, 0], 0), Some(1));
    }

    #[test]
    fn chosen_config_is_the_preferred_one() {
        let samples = |config: &(&str, u8)| config.1;
        let chosen = choose_config([("none", 0), ("x8", 8), ("x4", 4)].into_iter(), samples, 4);
        assert_eq!(chosen.0, "x4");
    }

    #[test]
    fn empty_config_set_is_a_window_error() {
        let result = catch_empty_config_set(|| choose_config(std::iter::empty::<u8>(), |s| *s, 4));
        assert!(matches!(result, Err(ContextError::WindowCreation(_))));
    }

    #[test]
    fn config_search_without_panic_passes_through() {
        assert!(matches!(catch_empty_config_set(|| 7), Ok(7)));
    }

    #[test]
    #[should_panic(expected = "unrelated")]
    fn unrelated_panics_keep_unwinding() {
        let _ = catch_empty_config_set(|| panic!("unrelated"));
    }
}
