//! Acquisition error taxonomy
//!
//! Every variant is raised while acquiring driver resources and none of them is
//! transient: each one describes something missing from the environment.

use ash::vk;
use thiserror::Error;

/// Vulkan acquisition errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VulkanError {
    /// The Vulkan loader library could not be opened
    #[error("Vulkan loader unavailable: {0}")]
    LoaderUnavailable(String),

    /// Layer enumeration itself failed
    #[error("Failed to enumerate instance layers: {0:?}")]
    LayerEnumerationFailed(vk::Result),

    /// Validation layers were requested but the driver does not expose them
    #[error("Validation layers requested, but not available: {}", missing.join(", "))]
    LayersUnavailable {
        /// Names of the requested layers the driver did not report
        missing: Vec<String>,
    },

    /// The windowing system could not report its required instance extensions
    #[error("Failed to get required instance extensions: {0}")]
    RequiredExtensionsUnavailable(String),

    /// A dynamically resolved debug-utils entry point is absent
    #[error("Debug utils extension not present")]
    ExtensionNotPresent,

    /// Native instance creation returned a non-success result
    #[error("Failed to create instance: {0:?}")]
    InstanceCreateFailed(vk::Result),

    /// The driver reported no physical devices at all
    #[error("Failed to find GPUs with Vulkan support")]
    NoAdaptersFound,

    /// Every adapter was disqualified by the scoring pass
    #[error("Failed to find a suitable GPU")]
    NoSuitableAdapter,

    /// The chosen adapter has no graphics-capable queue family
    #[error("No graphics queue family found")]
    NoGraphicsQueue,

    /// Native logical device creation returned a non-success result
    #[error("Failed to create logical device: {0:?}")]
    DeviceCreateFailed(vk::Result),

    /// General Vulkan API error with result code
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;
