//! Login screen shown while no session is active.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{LOCK_KEY, SIGN_IN};

use crate::ui::app::App;
use crate::ui::components::{form_error, primary_button};

/// Show the login screen.
pub fn show(app: &mut App, ui: &mut Ui) {
    let mut submit = false;

    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() * 0.2).max(20.0));
        ui.label(RichText::new(LOCK_KEY).size(42.0));
        ui.add_space(8.0);
        ui.heading(RichText::new(&app.config.ui.organization_name).strong());
        ui.label(RichText::new("HR back-office").weak());
        ui.add_space(24.0);

        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(20))
            .show(ui, |ui| {
                ui.set_max_width(320.0);
                let pending = app.login_form.pending;

                egui::Grid::new("login_grid")
                    .num_columns(2)
                    .spacing([12.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Username:");
                        let username = ui.add_enabled(
                            !pending,
                            egui::TextEdit::singleline(&mut app.login_form.username).desired_width(200.0),
                        );
                        ui.end_row();

                        ui.label("Password:");
                        let password = ui.add_enabled(
                            !pending,
                            egui::TextEdit::singleline(&mut app.login_form.password)
                                .password(true)
                                .desired_width(200.0),
                        );
                        ui.end_row();

                        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if (username.lost_focus() || password.lost_focus()) && enter {
                            submit = true;
                        }
                    });

                form_error(ui, &app.login_form.error);
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    let clicked = ui
                        .add_enabled_ui(!pending, |ui| primary_button(ui, SIGN_IN, "Log in"))
                        .inner
                        .clicked();
                    if clicked {
                        submit = true;
                    }
                    if pending {
                        ui.spinner();
                    }
                });
            });

        ui.add_space(12.0);
        ui.label(RichText::new(format!("API: {}", app.api.base_url())).small().weak());
    });

    if submit && !app.login_form.pending {
        app.login();
    }
}
