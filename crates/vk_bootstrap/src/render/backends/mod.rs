//! Graphics API backends

/// Vulkan backend
pub mod vulkan;
