//! Layout shell: header, sidebar, status bar, toasts and confirmation dialog.

use std::time::Instant;

use eframe::egui::{self, Align, Align2, Layout, RichText};
use egui_phosphor::regular::{DESKTOP, LIST, MOON, SIGN_OUT, SUN, USER_CIRCLE, WARNING, X};

use super::app::{App, Panel};
use super::components::{colors, level_color};
use crate::models::Choice;
use crate::prefs::Theme;

/// Apply a theme preference to the egui context.
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_theme(match theme {
        Theme::Light => egui::ThemePreference::Light,
        Theme::Dark => egui::ThemePreference::Dark,
        Theme::System => egui::ThemePreference::System,
    });
}

fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => SUN,
        Theme::Dark => MOON,
        Theme::System => DESKTOP,
    }
}

/// Render the header: sidebar toggle, panel title, user and theme controls.
pub fn show_header(app: &mut App, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").min_height(40.0).show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            if ui.button(LIST).on_hover_text("Toggle sidebar").clicked() {
                app.prefs.sidebar_collapsed = !app.prefs.sidebar_collapsed;
                app.save_prefs();
            }
            ui.add_space(8.0);
            ui.label(RichText::new(app.current_panel.name()).strong().size(16.0));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button(format!("{SIGN_OUT} Log out")).clicked() {
                    app.logout();
                    return;
                }

                let theme = app.prefs.theme;
                if ui
                    .button(theme_icon(theme))
                    .on_hover_text(format!("Theme: {}", theme.label()))
                    .clicked()
                {
                    app.prefs.theme = theme.cycle();
                    apply_theme(ctx, app.prefs.theme);
                    app.save_prefs();
                }

                if let Some(session) = &app.session {
                    ui.add_space(8.0);
                    ui.label(RichText::new(session.user.role.label()).small().weak());
                    ui.label(format!("{USER_CIRCLE} {}", session.user.full_name));
                }
            });
        });
    });
}

/// Render the navigation sidebar.
pub fn show_sidebar(app: &mut App, ctx: &egui::Context) {
    let collapsed = app.prefs.sidebar_collapsed;
    let role = app.role();

    egui::SidePanel::left("sidebar")
        .resizable(false)
        .exact_width(if collapsed { 52.0 } else { 220.0 })
        .show(ctx, |ui| {
            ui.add_space(10.0);
            if !collapsed {
                ui.label(RichText::new(&app.config.ui.organization_name).strong());
                ui.label(RichText::new("HR back-office").small().weak());
                ui.add_space(10.0);
                ui.separator();
            }
            ui.add_space(6.0);

            for panel in Panel::ALL.into_iter().filter(|p| p.is_allowed(role)) {
                if panel == Panel::Settings {
                    ui.separator();
                }
                let text = if collapsed {
                    RichText::new(panel.icon()).size(18.0)
                } else {
                    RichText::new(format!("{}  {}", panel.icon(), panel.name()))
                };
                let mut response = ui.selectable_label(app.current_panel == panel, text);
                if collapsed {
                    response = response.on_hover_text(panel.name());
                }
                if response.clicked() {
                    app.current_panel = panel;
                }
                ui.add_space(2.0);
            }
        });
}

/// Render status bar (display only, no interaction).
pub fn show_status_bar(app: &App, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar")
        .min_height(26.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("API: {}", app.api.base_url())).small().weak());

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new(concat!("v", env!("CARGO_PKG_VERSION"))).small().weak());
                    if app.is_busy() {
                        ui.add_space(10.0);
                        ui.label(RichText::new("Working...").small());
                        ui.spinner();
                    }
                });
            });
        });
}

/// Render the delete confirmation dialog.
pub fn show_delete_dialog(app: &mut App, ctx: &egui::Context) {
    let Some(target) = app.delete_target.clone() else {
        return;
    };

    egui::Window::new("Confirm Delete")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("{WARNING} Delete {}?", target.description));
            ui.label(RichText::new("This cannot be undone.").weak());
            if let Some(error) = &target.error {
                ui.add_space(5.0);
                ui.colored_label(colors::ERROR, error);
            }
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(!target.deleting, egui::Button::new("Cancel")).clicked() {
                    app.delete_target = None;
                }
                let label = if target.error.is_some() { "Retry" } else { "Delete" };
                let delete = egui::Button::new(RichText::new(label).color(colors::ERROR));
                if ui.add_enabled(!target.deleting, delete).clicked() {
                    app.confirm_delete();
                }
                if target.deleting {
                    ui.spinner();
                }
            });
        });
}

/// Render toasts in the bottom-right corner.
pub fn show_toasts(app: &mut App, ctx: &egui::Context) {
    if !app.notifications.has_toasts() {
        return;
    }

    let now = Instant::now();
    let mut dismiss = None;

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -36.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, toast) in app.notifications.toasts().enumerate() {
                let fade = 0.4 + 0.6 * toast.remaining(now);
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, level_color(toast.level).gamma_multiply(fade)))
                    .show(ui, |ui| {
                        ui.set_max_width(340.0);
                        ui.horizontal(|ui| {
                            ui.colored_label(level_color(toast.level).gamma_multiply(fade), &toast.message);
                            if ui.small_button(X).clicked() {
                                dismiss = Some(index);
                            }
                        });
                    });
                ui.add_space(4.0);
            }
        });

    if let Some(index) = dismiss {
        app.notifications.dismiss(index);
    }
}
