//! Physical device enumeration and scoring
//!
//! Every enumerated adapter is scored; the highest score wins and a score of
//! zero disqualifies. Disqualification is applied after the capability score is
//! computed so the log shows what each adapter would have scored.

use ash::vk;
use std::fmt;

use super::driver::{fixed_name_to_string, Driver};
use super::error::{VulkanError, VulkanResult};
use super::queue::find_graphics_queue_family;

/// Snapshot of one physical adapter
#[derive(Debug, Clone)]
pub struct AdapterDescriptor {
    /// Vulkan physical device handle
    pub handle: vk::PhysicalDevice,
    /// Device properties and limits
    pub properties: vk::PhysicalDeviceProperties,
    /// Supported device features
    pub features: vk::PhysicalDeviceFeatures,
    /// Available queue families, in family index order
    pub queue_families: Vec<vk::QueueFamilyProperties>,
}

impl AdapterDescriptor {
    /// Driver-reported device name
    pub fn name(&self) -> String {
        fixed_name_to_string(&self.properties.device_name)
    }

    /// Device class (discrete, integrated, virtual, CPU, other)
    pub const fn device_type(&self) -> vk::PhysicalDeviceType {
        self.properties.device_type
    }

    /// Largest supported 2D image dimension
    pub const fn max_image_dimension_2d(&self) -> u32 {
        self.properties.limits.max_image_dimension2_d
    }

    /// Whether geometry shaders are supported
    pub fn has_geometry_shader(&self) -> bool {
        self.features.geometry_shader == vk::TRUE
    }
}

/// Adapter ranking; higher is better and zero means disqualified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdapterScore(pub u32);

impl AdapterScore {
    /// Score of an adapter that must never be picked
    pub const DISQUALIFIED: Self = Self(0);

    /// Whether this score rules the adapter out
    pub const fn is_disqualified(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AdapterScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Describe every adapter the instance exposes, in enumeration order
pub fn enumerate_adapters<D: Driver>(driver: &D, instance: vk::Instance) -> VulkanResult<Vec<AdapterDescriptor>> {
    let handles = driver.enumerate_adapters(instance).map_err(VulkanError::Api)?;
    if handles.is_empty() {
        return Err(VulkanError::NoAdaptersFound);
    }

    handles
        .into_iter()
        .map(|handle| {
            Ok(AdapterDescriptor {
                handle,
                properties: driver.adapter_properties(handle).map_err(VulkanError::Api)?,
                features: driver.adapter_features(handle).map_err(VulkanError::Api)?,
                queue_families: driver.queue_family_properties(handle).map_err(VulkanError::Api)?,
            })
        })
        .collect()
}

/// Score from device class and image size alone, before disqualification
pub fn capability_score(adapter: &AdapterDescriptor) -> AdapterScore {
    let class_bonus = match adapter.device_type() {
        vk::PhysicalDeviceType::DISCRETE_GPU => 100,
        vk::PhysicalDeviceType::INTEGRATED_GPU => 50,
        _ => 0,
    };

    AdapterScore(class_bonus + adapter.max_image_dimension_2d().min(u32::MAX - class_bonus))
}

/// Final adapter score
///
/// Adapters without geometry shaders or without a graphics queue family score
/// zero whatever their capability score.
pub fn score(adapter: &AdapterDescriptor) -> AdapterScore {
    let capability = capability_score(adapter);

    if !adapter.has_geometry_shader() || !find_graphics_queue_family(adapter).is_complete() {
        return AdapterScore::DISQUALIFIED;
    }

    capability
}

/// Pick the highest-scoring adapter; the earliest one wins a tie
pub fn pick_best(adapters: Vec<AdapterDescriptor>) -> VulkanResult<AdapterDescriptor> {
    let mut best: Option<(AdapterScore, AdapterDescriptor)> = None;

    for adapter in adapters {
        let final_score = score(&adapter);
        log::debug!(
            "GPU '{}' ({:?}): capability score {}, final score {}",
            adapter.name(),
            adapter.device_type(),
            capability_score(&adapter),
            final_score
        );

        if best.as_ref().map_or(true, |(best_score, _)| final_score > *best_score) {
            best = Some((final_score, adapter));
        }
    }

    match best {
        Some((best_score, adapter)) if !best_score.is_disqualified() => {
            log::info!("Selected GPU: {} (score {})", adapter.name(), best_score);
            Ok(adapter)
        }
        _ => Err(VulkanError::NoSuitableAdapter),
    }
}
