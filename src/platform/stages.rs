//=========================================================================
// Platform Stages
//=========================================================================
//
// Acquire/release order of the platform stack, independent of the
// resources themselves.
//
// ```text
//   open:      subsystem → window (hidden) → GL → show → controller
//   failure:   whatever was acquired is dropped newest first
//   shutdown:  controller → GL → window → subsystem
// ```
//
// `GlWindow` runs these stages with Winit/glutin/gilrs resources.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::config::ContextConfig;
use crate::core::error::ContextError;

//=== Traits ==============================================================

/// A resource with an explicit teardown step. Defaults to dropping it.
pub(crate) trait Release: Sized {
    fn release(self) {}
}

/// Opens each layer of the platform stack.
///
/// A missing controller is not a failure, so `open_controller` returns
/// `Option`. `show` runs once nothing else can fail.
pub(crate) trait PlatformStages {
    type Subsystem: Release;
    type Window: Release;
    type Gl: Release;
    type Controller: Release;

    fn open_subsystem(&mut self) -> Result<Self::Subsystem, ContextError>;

    fn open_window(
        &mut self,
        subsystem: &Self::Subsystem,
        config: &ContextConfig,
    ) -> Result<Self::Window, ContextError>;

    fn open_gl(
        &mut self,
        window: &Self::Window,
        config: &ContextConfig,
    ) -> Result<Self::Gl, ContextError>;

    fn show(&mut self, window: &Self::Window);

    fn open_controller(&mut self) -> Option<Self::Controller>;
}

//=== StageStack ==========================================================

/// Everything `PlatformStages` acquired.
// Field order is teardown order.
pub(crate) struct StageStack<S: PlatformStages> {
    pub(crate) controller: Option<S::Controller>,
    pub(crate) gl: S::Gl,
    pub(crate) window: S::Window,
    pub(crate) subsystem: S::Subsystem,
}

impl<S: PlatformStages> StageStack<S> {
    /// Runs every stage in order. On failure the stages already opened
    /// are dropped newest first before the error is returned.
    pub(crate) fn open(stages: &mut S, config: &ContextConfig) -> Result<Self, ContextError> {
        let subsystem = stages.open_subsystem()?;
        let window = stages.open_window(&subsystem, config)?;
        let gl = stages.open_gl(&window, config)?;
        stages.show(&window);
        let controller = stages.open_controller();

        Ok(Self {
            controller,
            gl,
            window,
            subsystem,
        })
    }

    /// Releases the controller first, then GL, window and subsystem.
    pub(crate) fn shutdown(self) {
        let Self {
            controller,
            gl,
            window,
            subsystem,
        } = self;

        if let Some(controller) = controller {
            controller.release();
        }
        gl.release();
        window.release();
        subsystem.release();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<String>>>;

    //=====================================================================
    // Recording Stages
    //=====================================================================

    /// Resource that logs when it goes away.
    struct Tracked {
        name: &'static str,
        log: CallLog,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("release {}", self.name));
        }
    }

    impl Release for Tracked {}

    #[derive(Clone, Copy, PartialEq)]
    enum Stage {
        Subsystem,
        Window,
        Gl,
    }

    struct Recorder {
        log: CallLog,
        fail_at: Option<Stage>,
        has_controller: bool,
    }

    impl Recorder {
        fn new(log: &CallLog) -> Self {
            Self {
                log: Rc::clone(log),
                fail_at: None,
                has_controller: true,
            }
        }

        fn failing_at(mut self, stage: Stage) -> Self {
            self.fail_at = Some(stage);
            self
        }

        fn without_controller(mut self) -> Self {
            self.has_controller = false;
            self
        }

        fn acquire(&self, stage: Stage, name: &'static str) -> Result<Tracked, ContextError> {
            if self.fail_at == Some(stage) {
                self.log.borrow_mut().push(format!("fail {}", name));
                return Err(ContextError::Subsystem(format!("{} unavailable", name)));
            }
            self.log.borrow_mut().push(format!("open {}", name));
            Ok(Tracked {
                name,
                log: Rc::clone(&self.log),
            })
        }
    }

    impl PlatformStages for Recorder {
        type Subsystem = Tracked;
        type Window = Tracked;
        type Gl = Tracked;
        type Controller = Tracked;

        fn open_subsystem(&mut self) -> Result<Tracked, ContextError> {
            self.acquire(Stage::Subsystem, "subsystem")
        }

        fn open_window(&mut self, _: &Tracked, _: &ContextConfig) -> Result<Tracked, ContextError> {
            self.acquire(Stage::Window, "window")
        }

        fn open_gl(&mut self, _: &Tracked, _: &ContextConfig) -> Result<Tracked, ContextError> {
            self.acquire(Stage::Gl, "gl")
        }

        fn show(&mut self, _: &Tracked) {
            self.log.borrow_mut().push("show window".into());
        }

        fn open_controller(&mut self) -> Option<Tracked> {
            self.log.borrow_mut().push("scan controllers".into());
            self.has_controller.then(|| Tracked {
                name: "controller",
                log: Rc::clone(&self.log),
            })
        }
    }

    fn calls() -> CallLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn config() -> ContextConfig {
        ContextConfig::new("Test", 800, 600)
    }

    //=====================================================================
    // Open Tests
    //=====================================================================

    #[test]
    fn stages_open_in_order_and_show_after_gl() {
        let log = calls();
        let stack = StageStack::open(&mut Recorder::new(&log), &config());

        assert!(stack.is_ok());
        assert_eq!(
            *log.borrow(),
            vec!["open subsystem", "open window", "open gl", "show window", "scan controllers"]
        );
    }

    #[test]
    fn subsystem_failure_acquires_nothing() {
        let log = calls();
        let result = StageStack::open(&mut Recorder::new(&log).failing_at(Stage::Subsystem), &config());

        assert!(matches!(result, Err(ContextError::Subsystem(_))));
        assert_eq!(*log.borrow(), vec!["fail subsystem"]);
    }

    #[test]
    fn window_failure_releases_subsystem() {
        let log = calls();
        let result = StageStack::open(&mut Recorder::new(&log).failing_at(Stage::Window), &config());

        assert!(result.is_err());
        assert_eq!(
            *log.borrow(),
            vec!["open subsystem", "fail window", "release subsystem"]
        );
    }

    #[test]
    fn gl_failure_releases_window_then_subsystem() {
        let log = calls();
        let result = StageStack::open(&mut Recorder::new(&log).failing_at(Stage::Gl), &config());

        assert!(result.is_err());
        assert_eq!(
            *log.borrow(),
            vec![
                "open subsystem",
                "open window",
                "fail gl",
                "release window",
                "release subsystem",
            ]
        );
    }

    #[test]
    fn failed_open_never_shows_the_window() {
        let log = calls();
        let _ = StageStack::open(&mut Recorder::new(&log).failing_at(Stage::Gl), &config());

        assert!(!log.borrow().iter().any(|call| call == "show window"));
    }

    //=====================================================================
    // Shutdown Tests
    //=====================================================================

    #[test]
    fn shutdown_closes_controller_before_gl() {
        let log = calls();
        let Ok(stack) = StageStack::open(&mut Recorder::new(&log), &config()) else {
            panic!("open failed");
        };
        log.borrow_mut().clear();

        stack.shutdown();

        assert_eq!(
            *log.borrow(),
            vec!["release controller", "release gl", "release window", "release subsystem"]
        );
    }

    #[test]
    fn shutdown_without_controller_skips_it() {
        let log = calls();
        let Ok(stack) = StageStack::open(&mut Recorder::new(&log).without_controller(), &config())
        else {
            panic!("open failed");
        };
        log.borrow_mut().clear();

        stack.shutdown();

        assert_eq!(
            *log.borrow(),
            vec!["release gl", "release window", "release subsystem"]
        );
    }

    #[test]
    fn dropped_stack_releases_in_teardown_order() {
        let log = calls();
        let Ok(stack) = StageStack::open(&mut Recorder::new(&log), &config()) else {
            panic!("open failed");
        };
        log.borrow_mut().clear();

        drop(stack);

        assert_eq!(
            *log.borrow(),
            vec!["release controller", "release gl", "release window", "release subsystem"]
        );
    }
}
