//! Driver implementation over `ash`
//!
//! Holds the loader entry plus the instance and device function tables for the
//! handles it created. Only one instance and one device are live at a time.

use ash::{vk, Device, Entry, Instance};
use std::ffi::{c_char, CString};

use super::debug::DiagnosticConfig;
use super::driver::{
    fixed_name_to_string, CreateMessengerFn, DestroyMessengerFn, DeviceRequest, Driver, InstanceRequest,
};
use super::error::{VulkanError, VulkanResult};

const CREATE_MESSENGER_NAME: &[u8] = b"vkCreateDebugUtilsMessengerEXT\0";
const DESTROY_MESSENGER_NAME: &[u8] = b"vkDestroyDebugUtilsMessengerEXT\0";

/// Vulkan driver backed by the system loader
pub struct AshDriver {
    entry: Entry,
    instance: Option<Instance>,
    device: Option<Device>,
}

impl AshDriver {
    /// Load the Vulkan loader library
    pub fn load() -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }
            .map_err(|e| VulkanError::LoaderUnavailable(format!("{e}")))?;

        Ok(Self {
            entry,
            instance: None,
            device: None,
        })
    }

    fn instance(&self) -> Result<&Instance, vk::Result> {
        self.instance.as_ref().ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)
    }

    fn device(&self, handle: vk::Device) -> Result<&Device, vk::Result> {
        self.device
            .as_ref()
            .filter(|device| device.handle() == handle)
            .ok_or(vk::Result::ERROR_DEVICE_LOST)
    }

    /// Look up an instance-level entry point by its NUL-terminated name
    fn proc_addr(&self, instance: vk::Instance, name: &[u8]) -> vk::PFN_vkVoidFunction {
        unsafe { self.entry.get_instance_proc_addr(instance, name.as_ptr().cast::<c_char>()) }
    }
}

fn to_cstrings(names: &[String]) -> Result<Vec<CString>, vk::Result> {
    names
        .iter()
        .map(|name| CString::new(name.as_str()).map_err(|_| vk::Result::ERROR_INITIALIZATION_FAILED))
        .collect()
}

fn to_pointers(names: &[CString]) -> Vec<*const c_char> {
    names.iter().map(|name| name.as_ptr()).collect()
}

impl Driver for AshDriver {
    #[allow(unused_unsafe)]
    fn enumerate_instance_layers(&self) -> Result<Vec<String>, vk::Result> {
        let layers = unsafe { self.entry.enumerate_instance_layer_properties() }?;
        Ok(layers.iter().map(|layer| fixed_name_to_string(&layer.layer_name)).collect())
    }

    #[allow(unused_unsafe)]
    fn enumerate_instance_extensions(&self) -> Result<Vec<String>, vk::Result> {
        let extensions = unsafe { self.entry.enumerate_instance_extension_properties(None) }?;
        Ok(extensions
            .iter()
            .map(|extension| fixed_name_to_string(&extension.extension_name))
            .collect())
    }

    fn create_instance(&mut self, request: &InstanceRequest) -> Result<vk::Instance, vk::Result> {
        if self.instance.is_some() {
            log::error!("Instance already created; only one instance is supported");
            return Err(vk::Result::ERROR_INITIALIZATION_FAILED);
        }

        let app_name = CString::new(request.application.application_name.as_str())
            .map_err(|_| vk::Result::ERROR_INITIALIZATION_FAILED)?;
        let engine_name = CString::new(request.application.engine_name.as_str())
            .map_err(|_| vk::Result::ERROR_INITIALIZATION_FAILED)?;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(request.application.application_version)
            .engine_name(&engine_name)
            .engine_version(request.application.engine_version)
            .api_version(request.application.api_version);

        let layer_names = to_cstrings(&request.layers)?;
        let layer_ptrs = to_pointers(&layer_names);
        let extension_names = to_cstrings(&request.extensions)?;
        let extension_ptrs = to_pointers(&extension_names);

        // Chained so messages raised during vkCreateInstance itself reach the callback
        let mut messenger_info = request.diagnostics.as_ref().map(DiagnosticConfig::to_create_info);

        let mut create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_layer_names(&layer_ptrs)
            .enabled_extension_names(&extension_ptrs);
        if let Some(info) = messenger_info.as_mut() {
            create_info = create_info.push_next(info);
        }

        let instance = unsafe { self.entry.create_instance(&create_info, None) }?;
        let handle = instance.handle();
        self.instance = Some(instance);
        Ok(handle)
    }

    fn resolve_create_messenger(&self, instance: vk::Instance) -> Option<CreateMessengerFn> {
        let raw = self.proc_addr(instance, CREATE_MESSENGER_NAME)?;
        let create = unsafe {
            std::mem::transmute::<unsafe extern "system" fn(), vk::PFN_vkCreateDebugUtilsMessengerEXT>(raw)
        };

        Some(Box::new(move |config: &DiagnosticConfig| {
            let create_info = config.to_create_info();
            let mut messenger = vk::DebugUtilsMessengerEXT::null();
            let result = unsafe { create(instance, &create_info, std::ptr::null(), &mut messenger) };
            result.result_with_success(messenger)
        }))
    }

    fn resolve_destroy_messenger(&self, instance: vk::Instance) -> Option<DestroyMessengerFn> {
        let raw = self.proc_addr(instance, DESTROY_MESSENGER_NAME)?;
        let destroy = unsafe {
            std::mem::transmute::<unsafe extern "system" fn(), vk::PFN_vkDestroyDebugUtilsMessengerEXT>(raw)
        };

        Some(Box::new(move |messenger: vk::DebugUtilsMessengerEXT| unsafe {
            destroy(instance, messenger, std::ptr::null());
        }))
    }

    fn enumerate_adapters(&self, instance: vk::Instance) -> Result<Vec<vk::PhysicalDevice>, vk::Result> {
        let loaded = self.instance()?;
        if loaded.handle() != instance {
            return Err(vk::Result::ERROR_INITIALIZATION_FAILED);
        }
        unsafe { loaded.enumerate_physical_devices() }
    }

    fn adapter_properties(&self, adapter: vk::PhysicalDevice) -> Result<vk::PhysicalDeviceProperties, vk::Result> {
        let instance = self.instance()?;
        Ok(unsafe { instance.get_physical_device_properties(adapter) })
    }

    fn adapter_features(&self, adapter: vk::PhysicalDevice) -> Result<vk::PhysicalDeviceFeatures, vk::Result> {
        let instance = self.instance()?;
        Ok(unsafe { instance.get_physical_device_features(adapter) })
    }

    fn queue_family_properties(
        &self,
        adapter: vk::PhysicalDevice,
    ) -> Result<Vec<vk::QueueFamilyProperties>, vk::Result> {
        let instance = self.instance()?;
        Ok(unsafe { instance.get_physical_device_queue_family_properties(adapter) })
    }

    fn create_device(
        &mut self,
        adapter: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> Result<vk::Device, vk::Result> {
        if self.device.is_some() {
            log::error!("Logical device already created; only one device is supported");
            return Err(vk::Result::ERROR_INITIALIZATION_FAILED);
        }

        let device = {
            let instance = self.instance()?;

            let queue_infos = [vk::DeviceQueueCreateInfo::builder()
                .queue_family_index(request.queue_family_index)
                .queue_priorities(&request.queue_priorities)
                .build()];

            let layer_names = to_cstrings(&request.layers)?;
            let layer_ptrs = to_pointers(&layer_names);

            // Device layers are ignored by current loaders but still read by old ones
            #[allow(deprecated)]
            let create_info = vk::DeviceCreateInfo::builder()
                .queue_create_infos(&queue_infos)
                .enabled_features(&request.features)
                .enabled_layer_names(&layer_ptrs);

            unsafe { instance.create_device(adapter, &create_info, None) }?
        };

        let handle = device.handle();
        self.device = Some(device);
        Ok(handle)
    }

    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> Result<vk::Queue, vk::Result> {
        let device = self.device(device)?;
        Ok(unsafe { device.get_device_queue(family_index, queue_index) })
    }

    fn destroy_device(&mut self, device: vk::Device) {
        match self.device.take() {
            Some(loaded) if loaded.handle() == device => unsafe {
                if let Err(result) = loaded.device_wait_idle() {
                    log::warn!("device_wait_idle failed before destroying the device: {result}");
                }
                loaded.destroy_device(None);
            },
            other => {
                log::warn!("destroy_device called with a handle this driver does not own");
                self.device = other;
            }
        }
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        match self.instance.take() {
            Some(loaded) if loaded.handle() == instance => unsafe {
                loaded.destroy_instance(None);
            },
            other => {
                log::warn!("destroy_instance called with a handle this driver does not own");
                self.instance = other;
            }
        }
    }
}
