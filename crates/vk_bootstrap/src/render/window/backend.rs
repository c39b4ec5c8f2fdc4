//! Windowing collaborator contract
//!
//! The acquisition pipeline only needs a handful of things from the windowing
//! system: the instance extensions it requires, one window, and a way to wait
//! for that window to be closed. Backends implement [`WindowSystem`]; tests use
//! a recording fake.

use thiserror::Error;

use crate::config::WindowConfig;

/// Window management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The windowing subsystem could not be initialized
    #[error("Windowing system initialization failed")]
    InitializationFailed,

    /// Window creation failed
    #[error("Window creation failed")]
    CreationFailed,

    /// The windowing system cannot report Vulkan instance extensions
    #[error("Vulkan is not supported by the windowing system")]
    ExtensionsUnavailable,

    /// The windowing subsystem was already shut down
    #[error("Windowing system already shut down")]
    ShutDown,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Windowing system used by the bootstrap lifecycle
pub trait WindowSystem {
    /// Native window owned by this system
    type Window;

    /// Instance extensions the windowing system needs, in its preferred order
    fn required_instance_extensions(&self) -> WindowResult<Vec<String>>;

    /// Create a window without a client graphics API
    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Self::Window>;

    /// Whether the user has asked for `window` to close
    fn should_close(&self, window: &Self::Window) -> bool;

    /// Process pending window system events
    fn poll_events(&mut self);

    /// Destroy a window; consuming the handle prevents a second destroy
    fn destroy_window(&mut self, window: Self::Window);

    /// Shut the windowing subsystem down
    fn shutdown(&mut self);
}
