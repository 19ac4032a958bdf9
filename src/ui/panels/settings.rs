//! Settings panel for the API connection, cache, display and printed documents.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::PLUGS_CONNECTED;

use crate::config::AppConfig;
use crate::prefs::Theme;
use crate::ui::app::App;
use crate::ui::components::{colors, panel_header};
use crate::ui::shell::apply_theme;

/// Show the settings panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Settings", "");

    egui::ScrollArea::vertical().show(ui, |ui| {
        // API connection
        ui.group(|ui| {
            ui.heading("API Connection");
            ui.add_space(5.0);

            egui::Grid::new("api_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Base URL:");
                    if ui
                        .add(egui::TextEdit::singleline(&mut app.config.api.base_url).desired_width(320.0))
                        .changed()
                    {
                        app.config_modified = true;
                        app.connection_test = None;
                    }
                    ui.end_row();

                    ui.label("Timeout (seconds):");
                    if ui
                        .add(egui::DragValue::new(&mut app.config.api.timeout_secs).range(5..=300))
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();
                });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let button = egui::Button::new(format!("{PLUGS_CONNECTED} Test Connection"));
                if ui.add_enabled(!app.testing_connection, button).clicked() {
                    app.test_connection();
                }

                if app.testing_connection {
                    ui.spinner();
                }

                // Inline status indicator
                match &app.connection_test {
                    Some(Ok(())) => {
                        ui.label(RichText::new("Connected").color(colors::SUCCESS));
                    }
                    Some(Err(e)) => {
                        ui.label(RichText::new(format!("Failed: {e}")).color(colors::ERROR));
                    }
                    None => {}
                }
            });
        });

        ui.add_space(15.0);

        // Cache
        ui.group(|ui| {
            ui.heading("Data Refresh");
            ui.add_space(5.0);

            egui::Grid::new("cache_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Refetch lists after (seconds):");
                    if ui
                        .add(egui::DragValue::new(&mut app.config.cache.stale_after_secs).range(5..=3600))
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();
                });
        });

        ui.add_space(15.0);

        // Display
        ui.group(|ui| {
            ui.heading("Display");
            ui.add_space(5.0);

            egui::Grid::new("display_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Rows per page:");
                    if ui
                        .add(egui::DragValue::new(&mut app.config.ui.page_size).range(5..=200))
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();

                    // Preferences are saved immediately.
                    ui.label("Theme:");
                    ui.horizontal(|ui| {
                        for theme in [Theme::Light, Theme::Dark, Theme::System] {
                            if ui
                                .selectable_label(app.prefs.theme == theme, theme.label())
                                .clicked()
                                && app.prefs.theme != theme
                            {
                                app.prefs.theme = theme;
                                apply_theme(ui.ctx(), theme);
                                app.save_prefs();
                            }
                        }
                    });
                    ui.end_row();
                });
        });

        ui.add_space(15.0);

        // Printed documents
        ui.group(|ui| {
            ui.heading("Printed Documents");
            ui.add_space(5.0);

            egui::Grid::new("print_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Organization:");
                    if ui
                        .add(egui::TextEdit::singleline(&mut app.config.ui.organization_name).desired_width(320.0))
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();

                    ui.label("City:");
                    if ui
                        .add(egui::TextEdit::singleline(&mut app.config.ui.city).desired_width(200.0))
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();
                });
        });

        ui.add_space(20.0);

        // Action buttons
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new("Save Settings");
            if ui.add_enabled(app.config_modified, save_btn).clicked() {
                app.save_config();
            }

            if app.config_modified {
                ui.label(RichText::new("(unsaved changes)").color(colors::WARNING).italics());
            }

            if ui.button("Reset to Defaults").clicked() {
                app.config = AppConfig::default();
                app.config_modified = true;
                app.connection_test = None;
            }
        });

        ui.add_space(10.0);
        ui.label(
            RichText::new(format!("Config file: {}", app.config_path.display()))
                .small()
                .weak(),
        );
    });
}
