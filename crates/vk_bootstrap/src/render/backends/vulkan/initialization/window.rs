//! Window management using GLFW

use crate::render::window::{WindowError, WindowResult, WindowSystem};
use crate::config::WindowConfig;

/// GLFW windowing subsystem
pub struct GlfwWindowSystem {
    glfw: Option<glfw::Glfw>,
}

/// GLFW window with proper resource management
pub struct GlfwWindow {
    window: glfw::PWindow,
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindowSystem {
    /// Initialize GLFW
    pub fn init() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;
        Ok(Self { glfw: Some(glfw) })
    }

    fn glfw(&self) -> WindowResult<&glfw::Glfw> {
        self.glfw.as_ref().ok_or(WindowError::ShutDown)
    }
}

impl WindowSystem for GlfwWindowSystem {
    type Window = GlfwWindow;

    fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw()?
            .get_required_instance_extensions()
            .ok_or(WindowError::ExtensionsUnavailable)
    }

    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Self::Window> {
        let glfw = self.glfw.as_mut().ok_or(WindowError::ShutDown)?;

        // Configure for Vulkan (no OpenGL context)
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        log::info!("Created {}x{} window '{}'", config.width, config.height, config.title);
        Ok(GlfwWindow {
            window,
            _events: events,
        })
    }

    fn should_close(&self, window: &Self::Window) -> bool {
        window.window.should_close()
    }

    fn poll_events(&mut self) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.poll_events();
        }
    }

    fn destroy_window(&mut self, window: Self::Window) {
        drop(window);
        log::debug!("Window destroyed");
    }

    fn shutdown(&mut self) {
        // GLFW terminates once its last handle is dropped
        if self.glfw.take().is_some() {
            log::debug!("GLFW shut down");
        }
    }
}
