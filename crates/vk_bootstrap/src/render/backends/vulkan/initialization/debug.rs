//! Validation messenger configuration and registration
//!
//! The same [`DiagnosticConfig`] is chained into instance creation (so messages
//! emitted while the instance is being created are observed) and later handed to
//! the standalone messenger registration. Both come from [`build_config`].

use ash::vk;
use std::borrow::Cow;
use std::ffi::{c_void, CStr};
use std::fmt;

use super::driver::Driver;
use super::error::{VulkanError, VulkanResult};

/// Severity, category and callback of a debug-utils messenger
#[derive(Clone, Copy)]
pub struct DiagnosticConfig {
    /// Message severities delivered to the callback
    pub message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    /// Message categories delivered to the callback
    pub message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    /// Callback invoked synchronously by the driver
    pub user_callback: vk::PFN_vkDebugUtilsMessengerCallbackEXT,
}

impl DiagnosticConfig {
    /// Build the raw create info handed to the driver
    pub fn to_create_info(&self) -> vk::DebugUtilsMessengerCreateInfoEXT {
        vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(self.message_severity)
            .message_type(self.message_type)
            .pfn_user_callback(self.user_callback)
            .build()
    }

    fn callback_address(&self) -> Option<usize> {
        self.user_callback.map(|callback| callback as usize)
    }
}

impl PartialEq for DiagnosticConfig {
    fn eq(&self, other: &Self) -> bool {
        self.message_severity == other.message_severity
            && self.message_type == other.message_type
            && self.callback_address() == other.callback_address()
    }
}

impl Eq for DiagnosticConfig {}

impl fmt::Debug for DiagnosticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticConfig")
            .field("message_severity", &self.message_severity)
            .field("message_type", &self.message_type)
            .field("user_callback", &self.callback_address().map(|addr| addr as *const ()))
            .finish()
    }
}

/// Build the messenger configuration used everywhere diagnostics are wired in
pub fn build_config() -> DiagnosticConfig {
    DiagnosticConfig {
        message_severity: vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
            | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
        message_type: vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        user_callback: Some(debug_callback),
    }
}

/// Register a messenger on `instance`
///
/// The create entry point is looked up by name at the instance level. When the
/// driver does not expose it this returns [`VulkanError::ExtensionNotPresent`];
/// whether that is fatal is the caller's decision.
pub fn register<D: Driver>(
    driver: &D,
    instance: vk::Instance,
    config: &DiagnosticConfig,
) -> VulkanResult<vk::DebugUtilsMessengerEXT> {
    let create = driver
        .resolve_create_messenger(instance)
        .ok_or(VulkanError::ExtensionNotPresent)?;

    let messenger = create(config).map_err(VulkanError::Api)?;
    log::debug!("Debug messenger registered");
    Ok(messenger)
}

/// Destroy a messenger created by [`register`]
///
/// Never fails: an unresolvable destroy entry point is logged and skipped.
pub fn unregister<D: Driver>(driver: &D, instance: vk::Instance, messenger: vk::DebugUtilsMessengerEXT) {
    match driver.resolve_destroy_messenger(instance) {
        Some(destroy) => {
            destroy(messenger);
            log::debug!("Debug messenger destroyed");
        }
        None => log::warn!("vkDestroyDebugUtilsMessengerEXT unavailable, skipping messenger destruction"),
    }
}

/// Log level for a driver message severity
///
/// Verbose and info messages log at `Info` so the default filter shows them.
pub fn severity_level(severity: vk::DebugUtilsMessageSeverityFlagsEXT) -> log::Level {
    if severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::Level::Error
    } else if severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::Level::Warn
    } else {
        log::Level::Info
    }
}

/// Debug callback for validation layers
///
/// # Safety
/// Called by the driver with a valid (or null) callback data pointer.
pub unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    let message = if callback_data.is_null() || (*callback_data).p_message.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr((*callback_data).p_message).to_string_lossy()
    };

    log::log!(
        severity_level(message_severity),
        "validation layer: {:?} - {}",
        message_type,
        message
    );

    // Never abort the call that triggered the message
    vk::FALSE
}
