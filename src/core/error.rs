//=========================================================================
// Context Errors
//=========================================================================
//
// Failure taxonomy for context initialization. Every variant is fatal to
// `try_init`; `init` logs it and hands back an uninitialized context.
// The frame loop has no failure path.
//
//=========================================================================

use thiserror::Error;

//=== ContextError ========================================================

/// Fatal initialization errors.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Windowing/input subsystem could not start (no display server, ...).
    #[error("Windowing subsystem initialization failed: {0}")]
    Subsystem(String),

    /// The OS window could not be created.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// No GL context (or surface) could be bound to the window.
    #[error("GL context creation failed: {0}")]
    GlContextCreation(String),

    /// GL entry points could not be resolved.
    #[error("GL entry point loading failed: {0}")]
    EntryPointLoading(#[from] LoaderError),
}

//=== LoaderError =========================================================

/// Errors from resolving GL function pointers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoaderError {
    /// A required entry point resolved to null.
    #[error("missing GL entry point `{0}`")]
    MissingEntryPoint(String),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_error_is_error_trait() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ContextError>();
    }

    #[test]
    fn loader_error_converts_into_context_error() {
        let err: ContextError = LoaderError::MissingEntryPoint("glViewport".into()).into();
        assert_eq!(
            err.to_string(),
            "GL entry point loading failed: missing GL entry point `glViewport`"
        );
    }

    #[test]
    fn display_names_the_stage() {
        let err = ContextError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
