//! First-run setup wizard for configuration.

use std::path::PathBuf;
use std::sync::mpsc;

use eframe::egui::{self, RichText};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::ui::components::colors;

/// Connection test state.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ConnectionTestState {
    #[default]
    NotTested,
    Testing,
    Success,
    Failed(String),
}

/// Setup wizard state.
pub struct SetupWizard {
    /// Current step (0-3).
    pub current_step: usize,
    /// Configuration being built.
    pub config: AppConfig,
    /// API connection test state.
    pub api_test_state: ConnectionTestState,
    /// Wizard completed flag.
    pub completed: bool,
    /// Tested URL, so edits after a successful test require a new one.
    tested_url: Option<String>,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Start from an existing (possibly invalid) configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            current_step: 0,
            config,
            api_test_state: ConnectionTestState::NotTested,
            completed: false,
            tested_url: None,
        }
    }

    /// Check if user can proceed to next step.
    pub fn can_proceed(&self) -> bool {
        match self.current_step {
            0 => true,
            1 => {
                self.api_test_state == ConnectionTestState::Success
                    && self.tested_url.as_deref() == Some(self.config.api.base_url.as_str())
            }
            2 => self.config.validate().is_ok(),
            3 => true,
            _ => false,
        }
    }

    fn mark_testing(&mut self) {
        self.api_test_state = ConnectionTestState::Testing;
        self.tested_url = Some(self.config.api.base_url.clone());
    }

    fn url_changed(&mut self) {
        self.api_test_state = ConnectionTestState::NotTested;
        self.tested_url = None;
    }

    /// Get step title.
    fn step_title(&self) -> &'static str {
        match self.current_step {
            0 => "Welcome",
            1 => "API Connection",
            2 => "Organization",
            3 => "Confirmation",
            _ => "Setup",
        }
    }

    /// Total number of steps.
    const TOTAL_STEPS: usize = 4;
}

/// Setup wizard application.
pub struct SetupApp {
    pub wizard: SetupWizard,
    pub initial_error: Option<String>,
    config_path: PathBuf,
    rt: tokio::runtime::Runtime,
    api_test_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl SetupApp {
    pub fn new(
        wizard: SetupWizard,
        initial_error: Option<String>,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        Self {
            wizard,
            initial_error,
            config_path,
            rt,
            api_test_rx: None,
        }
    }

    /// Test the API connection asynchronously.
    fn start_api_test(&mut self) {
        let api = match ApiClient::new(&self.wizard.config.api) {
            Ok(api) => api,
            Err(e) => {
                self.wizard.api_test_state = ConnectionTestState::Failed(e.to_string());
                return;
            }
        };
        let (tx, rx) = mpsc::channel();
        self.api_test_rx = Some(rx);
        self.wizard.mark_testing();

        self.rt.spawn(async move {
            let result = api.ping().await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
    }

    /// Check for async test results.
    fn poll_test_results(&mut self) {
        if let Some(rx) = &self.api_test_rx
            && let Ok(result) = rx.try_recv()
        {
            self.wizard.api_test_state = match result {
                Ok(()) => ConnectionTestState::Success,
                Err(e) => {
                    warn!("API connection test failed: {}", e);
                    ConnectionTestState::Failed(e)
                }
            };
            self.api_test_rx = None;
        }
    }
}

impl eframe::App for SetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async test results
        self.poll_test_results();

        // Request repaint while testing
        if self.wizard.api_test_state == ConnectionTestState::Testing {
            ctx.request_repaint();
        }

        // Show initial error dialog
        if let Some(err) = self.initial_error.clone() {
            egui::Window::new("Configuration Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, &err);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.initial_error = None;
                    }
                });
            return;
        }

        // Main wizard panel
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("HR Back-office Setup").size(24.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!(
                            "Step {} of {}",
                            self.wizard.current_step + 1,
                            SetupWizard::TOTAL_STEPS
                        ));
                    });
                });

                ui.separator();
                ui.add_space(10.0);

                // Step title
                ui.heading(self.wizard.step_title());
                ui.add_space(20.0);

                // Step content
                let needs_api_test = match self.wizard.current_step {
                    0 => {
                        show_welcome_step(ui);
                        false
                    }
                    1 => show_api_step(ui, &mut self.wizard),
                    2 => {
                        show_organization_step(ui, &mut self.wizard);
                        false
                    }
                    3 => {
                        show_confirmation_step(ui, &self.wizard, &self.config_path);
                        false
                    }
                    _ => false,
                };

                if needs_api_test {
                    self.start_api_test();
                }

                ui.add_space(30.0);
                ui.separator();

                // Navigation buttons
                ui.horizontal(|ui| {
                    if self.wizard.current_step > 0 && ui.button("< Back").clicked() {
                        self.wizard.current_step -= 1;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.wizard.current_step < SetupWizard::TOTAL_STEPS - 1 {
                            let btn_text = if self.wizard.current_step == 0 {
                                "Get Started >"
                            } else {
                                "Next >"
                            };
                            let enabled = self.wizard.can_proceed();
                            if ui.add_enabled(enabled, egui::Button::new(btn_text)).clicked() {
                                self.wizard.current_step += 1;
                            }
                        } else if ui.button("Save & Exit").clicked() {
                            self.wizard.completed = true;
                        }
                    });
                });
            });
        });

        // Handle completion
        if self.wizard.completed {
            match self.wizard.config.save(&self.config_path) {
                Ok(()) => {
                    info!("Configuration saved to {:?}", self.config_path);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                Err(e) => {
                    self.initial_error = Some(format!("Failed to save config: {e}"));
                    self.wizard.completed = false;
                }
            }
        }
    }
}

fn show_welcome_step(ui: &mut egui::Ui) {
    ui.label("Welcome to the HR back-office!");
    ui.add_space(10.0);
    ui.label("This wizard will help you configure the application.");
    ui.add_space(20.0);
    ui.label("You will need:");
    ui.add_space(5.0);
    ui.label("  - The address of the HR REST API");
    ui.label("  - The organization name printed on documents");
}

fn show_api_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) -> bool {
    let mut needs_test = false;

    egui::Grid::new("api_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Base URL:");
            if ui
                .add(egui::TextEdit::singleline(&mut wizard.config.api.base_url).desired_width(300.0))
                .changed()
            {
                wizard.url_changed();
            }
            ui.end_row();

            ui.label("Timeout (seconds):");
            ui.add(egui::DragValue::new(&mut wizard.config.api.timeout_secs).range(5..=300));
            ui.end_row();
        });

    ui.add_space(20.0);

    ui.horizontal(|ui| {
        let testing = wizard.api_test_state == ConnectionTestState::Testing;
        if ui.add_enabled(!testing, egui::Button::new("Test Connection")).clicked() {
            needs_test = true;
        }

        ui.add_space(10.0);

        match &wizard.api_test_state {
            ConnectionTestState::NotTested => {
                ui.label("Not tested");
            }
            ConnectionTestState::Testing => {
                ui.spinner();
                ui.label("Testing...");
            }
            ConnectionTestState::Success => {
                ui.colored_label(colors::SUCCESS, "API reachable!");
            }
            ConnectionTestState::Failed(e) => {
                ui.colored_label(colors::ERROR, format!("Failed: {e}"));
            }
        }
    });

    needs_test
}

fn show_organization_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) {
    ui.label("These values appear on printed certificates and requests.");
    ui.add_space(10.0);

    egui::Grid::new("organization_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Organization:");
            ui.add(egui::TextEdit::singleline(&mut wizard.config.ui.organization_name).desired_width(300.0));
            ui.end_row();

            ui.label("City:");
            ui.text_edit_singleline(&mut wizard.config.ui.city);
            ui.end_row();

            ui.label("Rows per page:");
            ui.add(egui::DragValue::new(&mut wizard.config.ui.page_size).range(5..=200));
            ui.end_row();
        });

    // Validation feedback
    if let Err(e) = wizard.config.validate() {
        ui.add_space(10.0);
        ui.colored_label(colors::ERROR, e.to_string());
    }
}

fn show_confirmation_step(ui: &mut egui::Ui, wizard: &SetupWizard, path: &std::path::Path) {
    ui.label("Review your configuration:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("API");
        ui.label(format!("  {}", wizard.config.api.base_url));
        ui.label(format!("  Timeout: {} s", wizard.config.api.timeout_secs));
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Organization");
        ui.label(format!("  {}", wizard.config.ui.organization_name));
        ui.label(format!("  City: {}", wizard.config.ui.city));
        ui.label(format!("  Rows per page: {}", wizard.config.ui.page_size));
    });

    ui.add_space(20.0);
    ui.label(format!("Settings will be written to {}.", path.display()));
    ui.label("You will need to restart the application after setup.");
}
