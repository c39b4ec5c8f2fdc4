//! Instance creation

use ash::vk;

use super::catalog;
use super::debug::{self, DiagnosticConfig};
use super::driver::{ApplicationMetadata, Driver, InstanceRequest};
use super::error::{VulkanError, VulkanResult};
use crate::config::BootstrapConfig;
use crate::render::window::WindowSystem;

/// A created instance and the messenger configuration chained into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedInstance {
    /// Vulkan instance handle
    pub handle: vk::Instance,
    /// Configuration chained into instance creation, `None` without diagnostics.
    /// Standalone messenger registration must reuse this value.
    pub diagnostics: Option<DiagnosticConfig>,
}

/// Application metadata for `config`
pub fn application_metadata(config: &BootstrapConfig) -> ApplicationMetadata {
    let (app_major, app_minor, app_patch) = config.application_version;
    let (engine_major, engine_minor, engine_patch) = config.engine_version;

    ApplicationMetadata {
        application_name: config.application_name.clone(),
        application_version: vk::make_api_version(0, app_major, app_minor, app_patch),
        engine_name: config.engine_name.clone(),
        engine_version: vk::make_api_version(0, engine_major, engine_minor, engine_patch),
        api_version: vk::API_VERSION_1_0,
    }
}

/// Create the Vulkan instance
///
/// With diagnostics enabled the validation layers must all be present, and the
/// messenger configuration is chained into the create request.
pub fn create_instance<D: Driver, W: WindowSystem>(
    driver: &mut D,
    windowing: &W,
    config: &BootstrapConfig,
    diagnostics_enabled: bool,
) -> VulkanResult<CreatedInstance> {
    if diagnostics_enabled {
        let missing = catalog::missing_layers(driver, &config.validation_layers)?;
        if !missing.is_empty() {
            return Err(VulkanError::LayersUnavailable { missing });
        }
    }

    let application = application_metadata(config);
    let extensions = catalog::required_extensions(windowing, diagnostics_enabled)?;
    let diagnostics = diagnostics_enabled.then(debug::build_config);
    let layers = if diagnostics_enabled {
        config.validation_layers.clone()
    } else {
        Vec::new()
    };

    let request = InstanceRequest {
        application,
        layers,
        extensions,
        diagnostics,
    };
    log::debug!("Instance extensions: {:?}", request.extensions);
    log::debug!("Instance layers: {:?}", request.layers);

    let handle = driver
        .create_instance(&request)
        .map_err(VulkanError::InstanceCreateFailed)?;

    Ok(CreatedInstance { handle, diagnostics })
}
