//! Logical device creation

use ash::vk;

use super::adapter::AdapterDescriptor;
use super::driver::{DeviceRequest, Driver};
use super::error::{VulkanError, VulkanResult};

/// Logical device and its single graphics queue
///
/// The queue is only valid while the device is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalDevice {
    /// Vulkan logical device handle
    pub device: vk::Device,
    /// Graphics operations queue
    pub graphics_queue: vk::Queue,
    /// Index of the graphics queue family
    pub graphics_family: u32,
}

/// Build the device request for one queue on `queue_family_index`
pub fn device_request(queue_family_index: u32, validation_layers: Option<&[String]>) -> DeviceRequest {
    DeviceRequest {
        queue_family_index,
        queue_priorities: vec![1.0],
        features: vk::PhysicalDeviceFeatures::default(),
        layers: validation_layers.map(<[String]>::to_vec).unwrap_or_default(),
    }
}

/// Create the logical device and fetch its queue
///
/// `validation_layers` is `Some` when diagnostics are enabled; the names are
/// repeated on the device for drivers that predate instance-only layers.
pub fn create_logical_device<D: Driver>(
    driver: &mut D,
    adapter: &AdapterDescriptor,
    queue_family_index: u32,
    validation_layers: Option<&[String]>,
) -> VulkanResult<LogicalDevice> {
    let request = device_request(queue_family_index, validation_layers);

    let device = driver
        .create_device(adapter.handle, &request)
        .map_err(VulkanError::DeviceCreateFailed)?;

    let graphics_queue = match driver.device_queue(device, queue_family_index, 0) {
        Ok(queue) => queue,
        Err(result) => {
            driver.destroy_device(device);
            return Err(VulkanError::Api(result));
        }
    };

    Ok(LogicalDevice {
        device,
        graphics_queue,
        graphics_family: queue_family_index,
    })
}

/// Destroy a logical device; its queue becomes invalid
pub fn destroy_logical_device<D: Driver>(driver: &mut D, device: LogicalDevice) {
    driver.destroy_device(device.device);
}
