//! Window management subsystem
//!
//! - **`backend`**: the [`WindowSystem`] contract the lifecycle depends on
//! - The GLFW implementation lives with the Vulkan initialization code
//!   (`backends/vulkan/initialization/window.rs`)

pub mod backend;

pub use backend::{WindowError, WindowResult, WindowSystem};
