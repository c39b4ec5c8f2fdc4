//! Vulkan initialization
//!
//! Leaf-first: catalog, messenger, instance, adapter, queue, device. The
//! lifecycle that sequences them is [`crate::Bootstrap`].

pub mod adapter;
pub mod ash_driver;
pub mod catalog;
pub mod debug;
pub mod device;
pub mod driver;
pub mod error;
pub mod instance;
pub mod queue;
pub mod window;
