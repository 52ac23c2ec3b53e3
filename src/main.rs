use color_eyre::{eyre::eyre, Result};
use controlsandbox::device::{EguiKeySource, GilrsAxisSource};
use controlsandbox::sandbox::Sandbox;
use controlsandbox::settings::ControlSettings;
use controlsandbox::ui::SandboxUI;
use eframe::egui;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const WINDOW_SIZE: [f32; 2] = [1000.0, 500.0];

fn main() -> Result<()> {
    setup()?;

    info!(
        "Loading control settings from {}",
        ControlSettings::default_path().display()
    );
    let settings = ControlSettings::load_or_default()
        .map_err(|e| eyre!("Failed to load control settings: {}", e))?;

    // A missing gamepad backend only disables the gamepad controller
    let axes = match GilrsAxisSource::new() {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("Gamepad support disabled: {}", e);
            None
        }
    };

    let keys = EguiKeySource::new();
    let sandbox = Sandbox::from_settings(&settings, keys.clone(), axes)
        .map_err(|e| eyre!("Failed to set up controllers: {}", e))?;

    info!("Starting sandbox window");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Controls tests")
            .with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "controlsandbox",
        native_options,
        Box::new(move |cc| Ok(Box::new(SandboxUI::new(cc, sandbox, keys)))),
    )
    .map_err(|e| eyre!("Sandbox window failed: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();
}
