//! Queue family resolution

use ash::vk;

use super::adapter::AdapterDescriptor;

/// Queue family indices on a chosen adapter
///
/// `None` means no family qualified, which is distinct from family 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    /// Index of the first graphics-capable queue family
    pub graphics_family: Option<u32>,
}

impl QueueFamilyIndices {
    /// Whether every required family was found
    pub const fn is_complete(&self) -> bool {
        self.graphics_family.is_some()
    }
}

/// Find the first queue family supporting graphics submission
pub fn find_graphics_queue_family(adapter: &AdapterDescriptor) -> QueueFamilyIndices {
    let graphics_family = adapter
        .queue_families
        .iter()
        .position(|family| family.queue_flags.contains(vk::QueueFlags::GRAPHICS))
        .and_then(|index| u32::try_from(index).ok());

    QueueFamilyIndices { graphics_family }
}
