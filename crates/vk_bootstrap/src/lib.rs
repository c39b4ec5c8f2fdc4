//! # vk_bootstrap
//!
//! Vulkan device acquisition for a GLFW window: instance creation with optional
//! validation, adapter scoring, graphics queue discovery and logical device
//! creation, plus strict reverse-order teardown.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_bootstrap::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     vk_bootstrap::foundation::logging::init();
//!
//!     let windowing = GlfwWindowSystem::init()?;
//!     let driver = AshDriver::load()?;
//!     Bootstrap::new(BootstrapConfig::default(), windowing, driver)?.run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod foundation;
pub mod render;

mod application;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use application::{AppState, Bootstrap, BootstrapError, BootstrapResult, LifecycleState};

/// Common imports for bootstrap users
pub mod prelude {
    pub use crate::{
        config::{BootstrapConfig, Config, ConfigError, DiagnosticsMode, WindowConfig},
        render::backends::vulkan::{
            AdapterDescriptor, AshDriver, Driver, GlfwWindowSystem, LogicalDevice, VulkanError,
        },
        render::window::{WindowError, WindowSystem},
        AppState, Bootstrap, BootstrapError, BootstrapResult, LifecycleState,
    };
}
