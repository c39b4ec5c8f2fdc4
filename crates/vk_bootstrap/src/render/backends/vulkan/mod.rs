//! Vulkan backend implementation

/// Vulkan initialization types (driver, instance, messenger, adapter, device, window)
pub mod initialization;

// Re-export core initialization types
pub use initialization::adapter::{AdapterDescriptor, AdapterScore};
pub use initialization::ash_driver::AshDriver;
pub use initialization::debug::DiagnosticConfig;
pub use initialization::device::LogicalDevice;
pub use initialization::driver::{DeviceRequest, Driver, InstanceRequest};
pub use initialization::error::{VulkanError, VulkanResult};
pub use initialization::queue::QueueFamilyIndices;
pub use initialization::window::{GlfwWindow, GlfwWindowSystem};
