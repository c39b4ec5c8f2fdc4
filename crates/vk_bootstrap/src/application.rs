//! Bootstrap lifecycle
//!
//! Sequences window creation, device acquisition, the idle loop and teardown.
//! A stage only runs once the previous one succeeded, and teardown releases
//! whatever was acquired in reverse order. The lifecycle state is the single
//! authority on what has been created, so nothing is destroyed twice.

use ash::vk;
use std::fmt;
use thiserror::Error;

use crate::config::{BootstrapConfig, ConfigError, DiagnosticsMode};
use crate::render::backends::vulkan::initialization::adapter::{self, AdapterDescriptor};
use crate::render::backends::vulkan::initialization::debug::{self, DiagnosticConfig};
use crate::render::backends::vulkan::initialization::device::{self, LogicalDevice};
use crate::render::backends::vulkan::initialization::driver::Driver;
use crate::render::backends::vulkan::initialization::error::VulkanError;
use crate::render::backends::vulkan::initialization::{catalog, instance, queue};
use crate::render::window::{WindowError, WindowSystem};

/// Lifecycle states, in the only order they can be entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    /// Nothing acquired yet
    Uninitialized,
    /// Window created
    WindowReady,
    /// Vulkan instance created
    InstanceReady,
    /// Debug messenger registered (skipped without diagnostics)
    DiagnosticsReady,
    /// Physical device selected
    AdapterChosen,
    /// Logical device and queue created
    DeviceReady,
    /// Idle loop running
    Running,
    /// Teardown in progress
    Closing,
    /// Everything released
    TornDown,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "Uninitialized",
            Self::WindowReady => "WindowReady",
            Self::InstanceReady => "InstanceReady",
            Self::DiagnosticsReady => "DiagnosticsReady",
            Self::AdapterChosen => "AdapterChosen",
            Self::DeviceReady => "DeviceReady",
            Self::Running => "Running",
            Self::Closing => "Closing",
            Self::TornDown => "Torn Down",
        };
        f.write_str(name)
    }
}

/// Bootstrap errors
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration rejected before anything was acquired
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window creation failed
    #[error("Window creation failed: {0}")]
    Window(#[from] WindowError),

    /// A device acquisition stage failed
    #[error("Failed to reach {stage}: {source}")]
    Acquisition {
        /// State the lifecycle was trying to enter
        stage: LifecycleState,
        /// Underlying Vulkan error
        source: VulkanError,
    },

    /// Operation called in a state that does not allow it
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        /// Attempted operation
        operation: &'static str,
        /// State at the time of the call
        state: LifecycleState,
    },
}

impl BootstrapError {
    /// The Vulkan error behind an acquisition failure, if any
    pub const fn vulkan_error(&self) -> Option<&VulkanError> {
        match self {
            Self::Acquisition { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;

fn failed_at(stage: LifecycleState) -> impl Fn(VulkanError) -> BootstrapError {
    move |source| BootstrapError::Acquisition { stage, source }
}

/// Everything acquired so far, populated in dependency order
pub struct AppState<Win> {
    lifecycle: LifecycleState,
    diagnostics_enabled: bool,
    window: Option<Win>,
    instance: Option<vk::Instance>,
    messenger: Option<vk::DebugUtilsMessengerEXT>,
    adapter: Option<AdapterDescriptor>,
    device: Option<LogicalDevice>,
}

impl<Win> AppState<Win> {
    const fn new() -> Self {
        Self {
            lifecycle: LifecycleState::Uninitialized,
            diagnostics_enabled: false,
            window: None,
            instance: None,
            messenger: None,
            adapter: None,
            device: None,
        }
    }

    /// Current lifecycle state
    pub const fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Whether validation layers were enabled on the instance
    pub const fn diagnostics_enabled(&self) -> bool {
        self.diagnostics_enabled
    }

    /// Vulkan instance handle
    pub const fn instance(&self) -> Option<vk::Instance> {
        self.instance
    }

    /// Debug messenger handle
    pub const fn messenger(&self) -> Option<vk::DebugUtilsMessengerEXT> {
        self.messenger
    }

    /// Chosen physical device
    pub const fn adapter(&self) -> Option<&AdapterDescriptor> {
        self.adapter.as_ref()
    }

    /// Logical device and graphics queue
    pub const fn device(&self) -> Option<&LogicalDevice> {
        self.device.as_ref()
    }

    /// Queue family the graphics queue was created from
    pub fn queue_family_index(&self) -> Option<u32> {
        self.device.map(|device| device.graphics_family)
    }
}

/// Drives device acquisition for one window
///
/// Owns the windowing system, the driver and everything acquired through them.
/// Dropping a `Bootstrap` tears down whatever is still alive.
pub struct Bootstrap<W: WindowSystem, D: Driver> {
    config: BootstrapConfig,
    windowing: W,
    driver: D,
    state: AppState<W::Window>,
}

impl<W: WindowSystem, D: Driver> Bootstrap<W, D> {
    /// Validate `config` and take ownership of the collaborators
    pub fn new(config: BootstrapConfig, windowing: W, driver: D) -> BootstrapResult<Self> {
        config.validate().map_err(ConfigError::Invalid)?;

        Ok(Self {
            config,
            windowing,
            driver,
            state: AppState::new(),
        })
    }

    /// Acquire everything, idle until the window closes, then tear down
    pub fn run(mut self) -> BootstrapResult<()> {
        self.initialize()?;
        self.run_until_closed()?;
        self.teardown();
        Ok(())
    }

    /// Run every acquisition stage up to `DeviceReady`
    ///
    /// On failure the stages already completed are torn down before the error
    /// is returned.
    pub fn initialize(&mut self) -> BootstrapResult<()> {
        if self.state.lifecycle != LifecycleState::Uninitialized {
            return Err(BootstrapError::InvalidState {
                operation: "initialize",
                state: self.state.lifecycle,
            });
        }

        if let Err(err) = self.acquire() {
            self.teardown();
            return Err(err);
        }

        Ok(())
    }

    fn acquire(&mut self) -> BootstrapResult<()> {
        let window = self.windowing.create_window(&self.config.window)?;
        self.state.window = Some(window);
        self.advance(LifecycleState::WindowReady);

        let diagnostics_enabled = self
            .diagnostics_wanted()
            .map_err(failed_at(LifecycleState::InstanceReady))?;
        let created = instance::create_instance(&mut self.driver, &self.windowing, &self.config, diagnostics_enabled)
            .map_err(failed_at(LifecycleState::InstanceReady))?;
        self.state.instance = Some(created.handle);
        self.state.diagnostics_enabled = diagnostics_enabled;
        self.advance(LifecycleState::InstanceReady);
        self.log_available_extensions();

        if let Some(diagnostics) = created.diagnostics {
            self.register_diagnostics(created.handle, &diagnostics)?;
        }

        let adapters = adapter::enumerate_adapters(&self.driver, created.handle)
            .map_err(failed_at(LifecycleState::AdapterChosen))?;
        let chosen = adapter::pick_best(adapters).map_err(failed_at(LifecycleState::AdapterChosen))?;
        self.state.adapter = Some(chosen.clone());
        self.advance(LifecycleState::AdapterChosen);

        let graphics_family = queue::find_graphics_queue_family(&chosen)
            .graphics_family
            .ok_or(VulkanError::NoGraphicsQueue)
            .map_err(failed_at(LifecycleState::DeviceReady))?;
        let layers = diagnostics_enabled.then_some(self.config.validation_layers.as_slice());
        let logical = device::create_logical_device(&mut self.driver, &chosen, graphics_family, layers)
            .map_err(failed_at(LifecycleState::DeviceReady))?;
        self.state.device = Some(logical);
        self.advance(LifecycleState::DeviceReady);

        log::info!(
            "Device ready on '{}', graphics queue family {}",
            chosen.name(),
            graphics_family
        );
        Ok(())
    }

    fn diagnostics_wanted(&self) -> Result<bool, VulkanError> {
        match self.config.diagnostics {
            DiagnosticsMode::Disabled => Ok(false),
            DiagnosticsMode::Required => Ok(true),
            DiagnosticsMode::Optional => {
                if !catalog::has_all_layers(&self.driver, &self.config.validation_layers)? {
                    log::warn!("Validation layers unavailable, continuing without diagnostics");
                    return Ok(false);
                }
                if !catalog::has_debug_utils_extension(&self.driver)? {
                    log::warn!("{} unavailable, continuing without diagnostics", catalog::debug_utils_extension_name());
                    return Ok(false);
                }
                Ok(true)
            }
        }
    }

    fn register_diagnostics(&mut self, instance: vk::Instance, diagnostics: &DiagnosticConfig) -> BootstrapResult<()> {
        match debug::register(&self.driver, instance, diagnostics) {
            Ok(messenger) => {
                self.state.messenger = Some(messenger);
                self.advance(LifecycleState::DiagnosticsReady);
                Ok(())
            }
            Err(VulkanError::ExtensionNotPresent) if self.config.diagnostics == DiagnosticsMode::Optional => {
                log::warn!("Debug messenger unavailable, continuing without it");
                Ok(())
            }
            Err(source) => Err(BootstrapError::Acquisition {
                stage: LifecycleState::DiagnosticsReady,
                source,
            }),
        }
    }

    fn log_available_extensions(&self) {
        match catalog::list_available_extensions(&self.driver) {
            Ok(extensions) => {
                log::info!("{} instance extensions available", extensions.len());
                for extension in &extensions {
                    log::info!("\t{extension}");
                }
            }
            Err(err) => log::warn!("Could not list instance extensions: {err}"),
        }
    }

    /// Poll the window until it is asked to close
    pub fn run_until_closed(&mut self) -> BootstrapResult<()> {
        if self.state.lifecycle != LifecycleState::DeviceReady {
            return Err(BootstrapError::InvalidState {
                operation: "run",
                state: self.state.lifecycle,
            });
        }
        self.advance(LifecycleState::Running);

        if let Some(window) = self.state.window.as_ref() {
            while !self.windowing.should_close(window) {
                self.windowing.poll_events();
                // Per-frame work goes here once a render pipeline exists
            }
        }

        log::info!("Window close requested");
        Ok(())
    }

    /// Release everything acquired, newest first
    ///
    /// Messenger, device, instance, window, then the windowing subsystem. Only
    /// stages that completed are released; calling this again is a no-op.
    pub fn teardown(&mut self) {
        if self.state.lifecycle == LifecycleState::TornDown {
            return;
        }
        if self.state.lifecycle < LifecycleState::Closing {
            self.advance(LifecycleState::Closing);
        }

        if let Some(messenger) = self.state.messenger.take() {
            if let Some(instance) = self.state.instance {
                debug::unregister(&self.driver, instance, messenger);
            }
        }

        if let Some(logical) = self.state.device.take() {
            device::destroy_logical_device(&mut self.driver, logical);
        }

        self.state.adapter = None;

        if let Some(instance) = self.state.instance.take() {
            self.driver.destroy_instance(instance);
        }

        if let Some(window) = self.state.window.take() {
            self.windowing.destroy_window(window);
        }

        self.windowing.shutdown();
        self.advance(LifecycleState::TornDown);
    }

    fn advance(&mut self, next: LifecycleState) {
        debug_assert!(
            next > self.state.lifecycle,
            "lifecycle cannot move from {} to {}",
            self.state.lifecycle,
            next
        );
        log::info!("Lifecycle: {} -> {}", self.state.lifecycle, next);
        self.state.lifecycle = next;
    }

    /// Everything acquired so far
    pub const fn state(&self) -> &AppState<W::Window> {
        &self.state
    }

    /// Current lifecycle state
    pub const fn lifecycle(&self) -> LifecycleState {
        self.state.lifecycle
    }
}

impl<W: WindowSystem, D: Driver> Drop for Bootstrap<W, D> {
    fn drop(&mut self) {
        self.teardown();
    }
}
