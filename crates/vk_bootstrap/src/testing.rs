//! Recording doubles for the driver and windowing boundaries
//!
//! Both fakes can share one [`CallLog`] so tests can assert the relative order
//! of driver and window calls.

use ash::vk::{self, Handle};
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::WindowConfig;
use crate::render::backends::vulkan::initialization::adapter::AdapterDescriptor;
use crate::render::backends::vulkan::initialization::debug::DiagnosticConfig;
use crate::render::backends::vulkan::initialization::driver::{
    string_to_fixed_name, CreateMessengerFn, DestroyMessengerFn, DeviceRequest, Driver, InstanceRequest,
};
use crate::render::window::{WindowError, WindowResult, WindowSystem};

pub const INSTANCE_HANDLE: u64 = 0x100;
pub const MESSENGER_HANDLE: u64 = 0x200;
pub const DEVICE_HANDLE: u64 = 0x300;

/// One observed boundary call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EnumerateLayers,
    EnumerateExtensions,
    CreateInstance(InstanceRequest),
    ResolveCreateMessenger,
    CreateMessenger(DiagnosticConfig),
    ResolveDestroyMessenger,
    DestroyMessenger(vk::DebugUtilsMessengerEXT),
    EnumerateAdapters,
    CreateDevice {
        adapter: vk::PhysicalDevice,
        queue_family_index: u32,
        layers: Vec<String>,
    },
    DestroyDevice(vk::Device),
    DestroyInstance(vk::Instance),
    CreateWindow {
        width: u32,
        height: u32,
        title: String,
    },
    PollEvents,
    DestroyWindow(u64),
    Shutdown,
}

impl Call {
    /// Whether this call touches the debug messenger
    pub const fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Self::ResolveCreateMessenger
                | Self::CreateMessenger(_)
                | Self::ResolveDestroyMessenger
                | Self::DestroyMessenger(_)
        )
    }

    /// Whether this call releases a resource
    pub const fn is_teardown(&self) -> bool {
        matches!(
            self,
            Self::DestroyMessenger(_)
                | Self::DestroyDevice(_)
                | Self::DestroyInstance(_)
                | Self::DestroyWindow(_)
                | Self::Shutdown
        )
    }
}

/// Shared, ordered call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Release calls only, in order
    pub fn teardown_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_teardown).collect()
    }
}

/// Queue family with `flags` and one queue
pub fn queue_family(flags: vk::QueueFlags) -> vk::QueueFamilyProperties {
    vk::QueueFamilyProperties {
        queue_flags: flags,
        queue_count: 1,
        ..Default::default()
    }
}

/// Adapter descriptor built directly, for scoring and queue tests
pub fn adapter_descriptor(
    device_type: vk::PhysicalDeviceType,
    max_image_dimension_2d: u32,
    geometry_shader: bool,
    queue_families: Vec<vk::QueueFamilyProperties>,
) -> AdapterDescriptor {
    let adapter = FakeAdapter::new("test adapter", device_type)
        .with_max_image_dimension(max_image_dimension_2d)
        .with_geometry_shader(geometry_shader);

    AdapterDescriptor {
        handle: vk::PhysicalDevice::from_raw(1),
        properties: adapter.properties(),
        features: adapter.features(),
        queue_families,
    }
}

/// Physical device exposed by [`FakeDriver`]
#[derive(Debug, Clone)]
pub struct FakeAdapter {
    name: String,
    device_type: vk::PhysicalDeviceType,
    max_image_dimension_2d: u32,
    geometry_shader: bool,
    queue_families: Vec<vk::QueueFamilyProperties>,
}

impl FakeAdapter {
    /// Adapter with geometry shaders, 4096px images and one graphics family
    pub fn new(name: &str, device_type: vk::PhysicalDeviceType) -> Self {
        Self {
            name: name.to_string(),
            device_type,
            max_image_dimension_2d: 4096,
            geometry_shader: true,
            queue_families: vec![queue_family(vk::QueueFlags::GRAPHICS)],
        }
    }

    pub fn with_max_image_dimension(mut self, dimension: u32) -> Self {
        self.max_image_dimension_2d = dimension;
        self
    }

    pub fn with_geometry_shader(mut self, supported: bool) -> Self {
        self.geometry_shader = supported;
        self
    }

    pub fn with_queue_families(mut self, families: &[vk::QueueFlags]) -> Self {
        self.queue_families = families.iter().copied().map(queue_family).collect();
        self
    }

    fn properties(&self) -> vk::PhysicalDeviceProperties {
        vk::PhysicalDeviceProperties {
            device_type: self.device_type,
            device_name: string_to_fixed_name(&self.name),
            limits: vk::PhysicalDeviceLimits {
                max_image_dimension2_d: self.max_image_dimension_2d,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn features(&self) -> vk::PhysicalDeviceFeatures {
        vk::PhysicalDeviceFeatures {
            geometry_shader: vk::Bool32::from(self.geometry_shader),
            ..Default::default()
        }
    }
}

/// Recording driver; every creation succeeds unless configured otherwise
pub struct FakeDriver {
    log: CallLog,
    layers: Vec<String>,
    layer_error: Option<vk::Result>,
    extensions: Vec<String>,
    rejects_unknown_extensions: bool,
    adapters: Vec<FakeAdapter>,
    messenger_entry_points: bool,
    instance_result: vk::Result,
    device_result: vk::Result,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::with_log(CallLog::default())
    }

    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            layers: Vec::new(),
            layer_error: None,
            extensions: vec!["VK_KHR_surface".to_string(), "VK_EXT_debug_utils".to_string()],
            rejects_unknown_extensions: false,
            adapters: Vec::new(),
            messenger_entry_points: true,
            instance_result: vk::Result::SUCCESS,
            device_result: vk::Result::SUCCESS,
        }
    }

    pub fn with_layers(mut self, layers: &[&str]) -> Self {
        self.layers = layers.iter().map(|layer| (*layer).to_string()).collect();
        self
    }

    /// Expose exactly `extensions`; instance creation fails on any other name
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|name| (*name).to_string()).collect();
        self.rejects_unknown_extensions = true;
        self
    }

    pub fn with_layer_enumeration_error(mut self, result: vk::Result) -> Self {
        self.layer_error = Some(result);
        self
    }

    pub fn with_adapter(mut self, adapter: FakeAdapter) -> Self {
        self.adapters.push(adapter);
        self
    }

    pub fn without_messenger_entry_points(mut self) -> Self {
        self.messenger_entry_points = false;
        self
    }

    pub fn with_instance_result(mut self, result: vk::Result) -> Self {
        self.instance_result = result;
        self
    }

    pub fn with_device_result(mut self, result: vk::Result) -> Self {
        self.device_result = result;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.calls()
    }

    fn adapter(&self, handle: vk::PhysicalDevice) -> Result<&FakeAdapter, vk::Result> {
        usize::try_from(handle.as_raw())
            .ok()
            .and_then(|raw| raw.checked_sub(1))
            .and_then(|index| self.adapters.get(index))
            .ok_or(vk::Result::ERROR_DEVICE_LOST)
    }
}

impl Driver for FakeDriver {
    fn enumerate_instance_layers(&self) -> Result<Vec<String>, vk::Result> {
        self.log.record(Call::EnumerateLayers);
        match self.layer_error {
            Some(result) => Err(result),
            None => Ok(self.layers.clone()),
        }
    }

    fn enumerate_instance_extensions(&self) -> Result<Vec<String>, vk::Result> {
        self.log.record(Call::EnumerateExtensions);
        Ok(self.extensions.clone())
    }

    fn create_instance(&mut self, request: &InstanceRequest) -> Result<vk::Instance, vk::Result> {
        self.log.record(Call::CreateInstance(request.clone()));
        if self.rejects_unknown_extensions
            && request.extensions.iter().any(|name| !self.extensions.contains(name))
        {
            return Err(vk::Result::ERROR_EXTENSION_NOT_PRESENT);
        }
        self.instance_result
            .result_with_success(vk::Instance::from_raw(INSTANCE_HANDLE))
    }

    fn resolve_create_messenger(&self, _instance: vk::Instance) -> Option<CreateMessengerFn> {
        self.log.record(Call::ResolveCreateMessenger);
        if !self.messenger_entry_points {
            return None;
        }

        let log = self.log.clone();
        Some(Box::new(move |config: &DiagnosticConfig| {
            log.record(Call::CreateMessenger(*config));
            Ok(vk::DebugUtilsMessengerEXT::from_raw(MESSENGER_HANDLE))
        }))
    }

    fn resolve_destroy_messenger(&self, _instance: vk::Instance) -> Option<DestroyMessengerFn> {
        self.log.record(Call::ResolveDestroyMessenger);
        if !self.messenger_entry_points {
            return None;
        }

        let log = self.log.clone();
        Some(Box::new(move |messenger| log.record(Call::DestroyMessenger(messenger))))
    }

    fn enumerate_adapters(&self, _instance: vk::Instance) -> Result<Vec<vk::PhysicalDevice>, vk::Result> {
        self.log.record(Call::EnumerateAdapters);
        Ok((1..=self.adapters.len() as u64).map(vk::PhysicalDevice::from_raw).collect())
    }

    fn adapter_properties(&self, adapter: vk::PhysicalDevice) -> Result<vk::PhysicalDeviceProperties, vk::Result> {
        self.adapter(adapter).map(FakeAdapter::properties)
    }

    fn adapter_features(&self, adapter: vk::PhysicalDevice) -> Result<vk::PhysicalDeviceFeatures, vk::Result> {
        self.adapter(adapter).map(FakeAdapter::features)
    }

    fn queue_family_properties(
        &self,
        adapter: vk::PhysicalDevice,
    ) -> Result<Vec<vk::QueueFamilyProperties>, vk::Result> {
        self.adapter(adapter).map(|adapter| adapter.queue_families.clone())
    }

    fn create_device(
        &mut self,
        adapter: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> Result<vk::Device, vk::Result> {
        self.log.record(Call::CreateDevice {
            adapter,
            queue_family_index: request.queue_family_index,
            layers: request.layers.clone(),
        });
        self.device_result.result_with_success(vk::Device::from_raw(DEVICE_HANDLE))
    }

    fn device_queue(&self, _device: vk::Device, family_index: u32, queue_index: u32) -> Result<vk::Queue, vk::Result> {
        Ok(vk::Queue::from_raw(0x400 + u64::from(family_index) * 16 + u64::from(queue_index)))
    }

    fn destroy_device(&mut self, device: vk::Device) {
        self.log.record(Call::DestroyDevice(device));
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        self.log.record(Call::DestroyInstance(instance));
    }
}

/// Window handle issued by [`FakeWindowSystem`]
#[derive(Debug, PartialEq, Eq)]
pub struct FakeWindow(pub u64);

/// Recording windowing system that reports close after a number of polls
pub struct FakeWindowSystem {
    log: CallLog,
    extensions: Option<Vec<String>>,
    polls_before_close: usize,
    polls: usize,
    window_creation_fails: bool,
    next_window: u64,
}

impl FakeWindowSystem {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            extensions: Some(vec!["VK_KHR_surface".to_string(), "VK_KHR_xlib_surface".to_string()]),
            polls_before_close: 3,
            polls: 0,
            window_creation_fails: false,
            next_window: 1,
        }
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = Some(extensions.iter().map(|name| (*name).to_string()).collect());
        self
    }

    pub fn without_vulkan_support(mut self) -> Self {
        self.extensions = None;
        self
    }

    pub fn closing_after(mut self, polls: usize) -> Self {
        self.polls_before_close = polls;
        self
    }

    pub fn failing_window_creation(mut self) -> Self {
        self.window_creation_fails = true;
        self
    }
}

impl WindowSystem for FakeWindowSystem {
    type Window = FakeWindow;

    fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.extensions.clone().ok_or(WindowError::ExtensionsUnavailable)
    }

    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Self::Window> {
        self.log.record(Call::CreateWindow {
            width: config.width,
            height: config.height,
            title: config.title.clone(),
        });
        if self.window_creation_fails {
            return Err(WindowError::CreationFailed);
        }

        let window = FakeWindow(self.next_window);
        self.next_window += 1;
        Ok(window)
    }

    fn should_close(&self, _window: &Self::Window) -> bool {
        self.polls >= self.polls_before_close
    }

    fn poll_events(&mut self) {
        self.log.record(Call::PollEvents);
        self.polls += 1;
    }

    fn destroy_window(&mut self, window: Self::Window) {
        self.log.record(Call::DestroyWindow(window.0));
    }

    fn shutdown(&mut self) {
        self.log.record(Call::Shutdown);
    }
}
