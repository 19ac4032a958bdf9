//! HR back-office - desktop client for the bank's human resources API.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bank_hr_backoffice as hr;

use hr::api::ApiClient;
use hr::config::{AppConfig, ConfigLoadResult};
use hr::prefs::Preferences;
use hr::ui::shell::apply_theme;
use hr::ui::{App, SetupApp, SetupWizard};

/// HR back-office for employee records, experience, discipline, training and certificates.
#[derive(Parser)]
#[command(name = "bank-hr-backoffice")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the API base URL from the config file
    #[arg(long)]
    api_url: Option<String>,
}

/// Application launch mode.
enum LaunchMode {
    /// Normal operation with valid config.
    Normal(AppConfig),
    /// Setup wizard for first run or invalid config.
    Setup(SetupWizard, Option<String>),
}

/// Log to stderr and to a daily file in the platform data directory.
///
/// The returned guard flushes the file writer on drop.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let Some(dirs) = Preferences::project_dirs() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(dirs.data_dir().join("logs"), "backoffice.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Some(guard)
}

fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    tracing::info!("HR back-office starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let launch_mode = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(mut config) => {
            tracing::info!("Config loaded successfully");
            if let Some(url) = cli.api_url {
                tracing::info!("API URL overridden: {}", url);
                config.api.base_url = url;
            }
            LaunchMode::Normal(config)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, starting setup wizard");
            LaunchMode::Setup(SetupWizard::new(), None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            LaunchMode::Setup(SetupWizard::new(), Some(e.to_string()))
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    match launch_mode {
        LaunchMode::Normal(config) => run_main_app(config, config_path, rt),
        LaunchMode::Setup(wizard, error) => run_setup_wizard(wizard, error, config_path, rt),
    }
}

/// Run the setup wizard.
fn run_setup_wizard(
    wizard: SetupWizard,
    initial_error: Option<String>,
    config_path: PathBuf,
    rt: tokio::runtime::Runtime,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HR Back-office - Setup")
            .with_inner_size([600.0, 500.0])
            .with_min_inner_size([500.0, 400.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "HR Back-office - Setup",
        options,
        Box::new(|_cc| Ok(Box::new(SetupApp::new(wizard, initial_error, config_path, rt)))),
    )
    .map_err(|e| anyhow::anyhow!("Setup window failed: {e}"))
}

/// Run the main application.
fn run_main_app(config: AppConfig, config_path: PathBuf, rt: tokio::runtime::Runtime) -> anyhow::Result<()> {
    let api = ApiClient::new(&config.api).context("Failed to create API client")?;
    tracing::info!("API: {}", api.base_url());

    let prefs_path = Preferences::default_path();
    let prefs = Preferences::load(&prefs_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HR Back-office")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HR Back-office",
        options,
        Box::new(move |cc| {
            install_fonts(&cc.egui_ctx);
            apply_theme(&cc.egui_ctx, prefs.theme);
            Ok(Box::new(App::new(rt, api, config, config_path, prefs, prefs_path)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application window failed: {e}"))
}
