//! Rendering backend bootstrap
//!
//! Only device acquisition lives here for now: windowing contract plus the
//! Vulkan initialization path.

pub mod backends;
pub mod window;

pub use window::{WindowError, WindowResult, WindowSystem};
