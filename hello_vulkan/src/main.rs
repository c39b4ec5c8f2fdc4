//! Opens a window, brings up a Vulkan device for it and idles until closed

use std::process::ExitCode;

use vk_bootstrap::foundation::logging;
use vk_bootstrap::prelude::*;

/// Fixed startup configuration; diagnostics follow the build profile
fn startup_config() -> BootstrapConfig {
    BootstrapConfig::default()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = startup_config();
    log::info!(
        "Starting {} (diagnostics: {:?})",
        config.application_name,
        config.diagnostics
    );

    let windowing = GlfwWindowSystem::init()?;
    let driver = AshDriver::load()?;
    Bootstrap::new(config, windowing, driver)?.run()?;
    Ok(())
}

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => {
            log::info!("Shut down cleanly");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_config_is_fixed() {
        let config = startup_config();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "Vulkan");
        assert!(!config.window.resizable);
        assert_eq!(config.diagnostics, DiagnosticsMode::from_build());
    }
}
