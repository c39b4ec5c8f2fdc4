//! Layer and extension catalog
//!
//! Read-only introspection of what the driver and the windowing system offer.

use ash::extensions::ext::DebugUtils;
use std::collections::HashSet;

use super::driver::Driver;
use super::error::{VulkanError, VulkanResult};
use crate::render::window::WindowSystem;

/// Instance layers the driver exposes
pub fn list_available_layers<D: Driver>(driver: &D) -> VulkanResult<HashSet<String>> {
    let layers = driver
        .enumerate_instance_layers()
        .map_err(VulkanError::LayerEnumerationFailed)?;
    Ok(layers.into_iter().collect())
}

/// Requested layers the driver does not expose, in request order
pub fn missing_layers<D: Driver>(driver: &D, requested: &[String]) -> VulkanResult<Vec<String>> {
    let available = list_available_layers(driver)?;
    Ok(requested
        .iter()
        .filter(|name| !available.contains(name.as_str()))
        .cloned()
        .collect())
}

/// Whether every requested layer is available
pub fn has_all_layers<D: Driver>(driver: &D, requested: &[String]) -> VulkanResult<bool> {
    Ok(missing_layers(driver, requested)?.is_empty())
}

/// Instance extensions the driver exposes
pub fn list_available_extensions<D: Driver>(driver: &D) -> VulkanResult<Vec<String>> {
    driver.enumerate_instance_extensions().map_err(VulkanError::Api)
}

/// Name of the debug-utils instance extension
pub fn debug_utils_extension_name() -> String {
    DebugUtils::name().to_string_lossy().into_owned()
}

/// Whether the driver exposes the debug-utils instance extension
pub fn has_debug_utils_extension<D: Driver>(driver: &D) -> VulkanResult<bool> {
    let name = debug_utils_extension_name();
    Ok(list_available_extensions(driver)?.contains(&name))
}

/// Instance extensions required for this run
///
/// The windowing system's list comes first, in its order; the debug-utils
/// extension is appended last when diagnostics are enabled.
pub fn required_extensions<W: WindowSystem>(windowing: &W, diagnostics_enabled: bool) -> VulkanResult<Vec<String>> {
    let mut extensions = windowing
        .required_instance_extensions()
        .map_err(|e| VulkanError::RequiredExtensionsUnavailable(e.to_string()))?;

    if diagnostics_enabled {
        extensions.push(debug_utils_extension_name());
    }

    Ok(extensions)
}
