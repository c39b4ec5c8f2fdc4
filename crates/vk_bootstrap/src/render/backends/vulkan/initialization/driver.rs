//! Native driver boundary
//!
//! Every call into the Vulkan driver goes through [`Driver`]. The production
//! implementation is [`AshDriver`](super::ash_driver::AshDriver); tests use a
//! recording fake.

use ash::vk;
use std::ffi::c_char;

use super::debug::DiagnosticConfig;

/// Resolved `vkCreateDebugUtilsMessengerEXT`, bound to the instance it was looked up on
pub type CreateMessengerFn =
    Box<dyn FnOnce(&DiagnosticConfig) -> Result<vk::DebugUtilsMessengerEXT, vk::Result>>;

/// Resolved `vkDestroyDebugUtilsMessengerEXT`, bound to the instance it was looked up on
pub type DestroyMessengerFn = Box<dyn FnOnce(vk::DebugUtilsMessengerEXT)>;

/// Application and engine metadata reported to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationMetadata {
    /// Application name
    pub application_name: String,
    /// Packed application version
    pub application_version: u32,
    /// Engine name
    pub engine_name: String,
    /// Packed engine version
    pub engine_version: u32,
    /// Packed Vulkan API version
    pub api_version: u32,
}

/// Everything needed for one `vkCreateInstance` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRequest {
    /// Application metadata
    pub application: ApplicationMetadata,
    /// Instance layers to enable
    pub layers: Vec<String>,
    /// Instance extensions to enable, in order
    pub extensions: Vec<String>,
    /// Messenger configuration chained into the create info
    pub diagnostics: Option<DiagnosticConfig>,
}

/// Everything needed for one `vkCreateDevice` call
#[derive(Debug, Clone)]
pub struct DeviceRequest {
    /// Queue family the single queue is created from
    pub queue_family_index: u32,
    /// One priority per queue
    pub queue_priorities: Vec<f32>,
    /// Requested device features
    pub features: vk::PhysicalDeviceFeatures,
    /// Device layers, only honoured by older drivers
    pub layers: Vec<String>,
}

/// Native Vulkan driver operations used during device acquisition
pub trait Driver {
    /// Names of the instance layers the driver exposes
    fn enumerate_instance_layers(&self) -> Result<Vec<String>, vk::Result>;

    /// Names of the instance extensions the driver exposes
    fn enumerate_instance_extensions(&self) -> Result<Vec<String>, vk::Result>;

    /// Create the instance described by `request`
    fn create_instance(&mut self, request: &InstanceRequest) -> Result<vk::Instance, vk::Result>;

    /// Look up the messenger create entry point by name; `None` when absent
    fn resolve_create_messenger(&self, instance: vk::Instance) -> Option<CreateMessengerFn>;

    /// Look up the messenger destroy entry point by name; `None` when absent
    fn resolve_destroy_messenger(&self, instance: vk::Instance) -> Option<DestroyMessengerFn>;

    /// Physical devices in driver enumeration order
    fn enumerate_adapters(&self, instance: vk::Instance) -> Result<Vec<vk::PhysicalDevice>, vk::Result>;

    /// Properties and limits of one adapter
    fn adapter_properties(&self, adapter: vk::PhysicalDevice) -> Result<vk::PhysicalDeviceProperties, vk::Result>;

    /// Supported features of one adapter
    fn adapter_features(&self, adapter: vk::PhysicalDevice) -> Result<vk::PhysicalDeviceFeatures, vk::Result>;

    /// Queue family properties of one adapter, in family index order
    fn queue_family_properties(
        &self,
        adapter: vk::PhysicalDevice,
    ) -> Result<Vec<vk::QueueFamilyProperties>, vk::Result>;

    /// Create a logical device on `adapter`
    fn create_device(
        &mut self,
        adapter: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> Result<vk::Device, vk::Result>;

    /// Fetch a queue created together with `device`
    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> Result<vk::Queue, vk::Result>;

    /// Destroy a logical device; its queues become invalid
    fn destroy_device(&mut self, device: vk::Device);

    /// Destroy the instance
    fn destroy_instance(&mut self, instance: vk::Instance);
}

/// Read a fixed-size, NUL-terminated name array as used in Vulkan property structs
#[allow(clippy::cast_sign_loss)]
pub fn fixed_name_to_string(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Write `name` into a fixed-size name array, truncating if necessary
#[allow(clippy::cast_possible_wrap)]
pub fn string_to_fixed_name<const N: usize>(name: &str) -> [c_char; N] {
    let mut raw = [0 as c_char; N];
    for (slot, byte) in raw.iter_mut().zip(name.bytes().take(N.saturating_sub(1))) {
        *slot = byte as c_char;
    }
    raw
}
