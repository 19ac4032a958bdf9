//! Shared UI components.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, Response, RichText, Sense, StrokeKind, Ui};

use crate::models::{Choice, InformationSheet};
use crate::toast::LogLevel;

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);

        // Scale factor based on width (200 is the reference size)
        let scale = size.x / 200.0;

        // Card background
        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        // Icon (top area)
        let icon_pos = egui::pos2(rect.center().x, rect.top() + size.y * 0.23);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(36.0 * scale),
            visuals.text_color(),
        );

        // Title (middle)
        let title_pos = egui::pos2(rect.center().x, rect.center().y + size.y * 0.07);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(18.0 * scale),
            visuals.text_color(),
        );

        // Description (bottom)
        let desc_pos = egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(egui::Margin::same(15))
        .outer_margin(egui::Margin::same(5))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const INFO: Color32 = Color32::from_rgb(100, 150, 230);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(0x44, 0x72, 0xC4);
}

/// Color of a notification or log entry.
pub fn level_color(level: LogLevel) -> Color32 {
    match level {
        LogLevel::Info => colors::INFO,
        LogLevel::Success => colors::SUCCESS,
        LogLevel::Warning => colors::WARNING,
        LogLevel::Error => colors::ERROR,
    }
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).size(24.0));
    if !subtitle.is_empty() {
        ui.label(RichText::new(subtitle).weak());
    }
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Button with a leading phosphor icon.
pub fn icon_button(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.button(format!("{icon} {text}"))
}

/// Filled button for the main action of a toolbar or dialog.
pub fn primary_button(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(egui::Button::new(RichText::new(label).color(Color32::WHITE)).fill(colors::PRIMARY))
}

/// Small icon-only row action with a tooltip.
pub fn row_action(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(icon).on_hover_text(tooltip)
}

/// Row action rendered in the error color.
pub fn danger_row_action(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.small_button(RichText::new(icon).color(colors::ERROR))
        .on_hover_text(tooltip)
}

/// Colored status text for table cells.
pub fn status_badge(ui: &mut Ui, text: &str, color: Color32) {
    ui.label(RichText::new(text).color(color).strong());
}

/// Combo box over every value of a [`Choice`].
pub fn choice_combo<C: Choice>(ui: &mut Ui, id: &str, value: &mut C) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .width(200.0)
        .selected_text(value.label())
        .show_ui(ui, |ui| {
            for option in C::ALL {
                if ui.selectable_label(*value == *option, option.label()).clicked() {
                    *value = *option;
                    changed = true;
                }
            }
        });
    changed
}

/// Required date.
pub fn date_field(ui: &mut Ui, id: &str, date: &mut NaiveDate) {
    ui.add(egui_extras::DatePickerButton::new(date).id_salt(id));
}

/// Optional date: a checkbox enables the picker.
pub fn optional_date_field(ui: &mut Ui, id: &str, date: &mut Option<NaiveDate>) {
    ui.horizontal(|ui| {
        let mut enabled = date.is_some();
        if ui.checkbox(&mut enabled, "").changed() {
            *date = enabled.then(|| Local::now().date_naive());
        }
        match date {
            Some(d) => {
                ui.add(egui_extras::DatePickerButton::new(d).id_salt(id));
            }
            None => {
                ui.weak("Not set");
            }
        }
    });
}

/// Single-line text input of fixed width.
pub fn text_field(ui: &mut Ui, value: &mut String, hint: &str) -> Response {
    ui.add(egui::TextEdit::singleline(value).desired_width(260.0).hint_text(hint))
}

/// Information sheet selector. `None` means all sheets when `allow_all` is set.
pub fn sheet_picker(
    ui: &mut Ui,
    id: &str,
    sheets: &[InformationSheet],
    selected: &mut Option<i64>,
    allow_all: bool,
) -> bool {
    let selected_text = selected
        .and_then(|id| sheets.iter().find(|s| s.id == id))
        .map(|s| format!("{} {}", s.employee_number(), s.full_name()))
        .unwrap_or_else(|| if allow_all { "All employees".to_string() } else { "Select...".to_string() });

    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .width(260.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            if allow_all && ui.selectable_label(selected.is_none(), "All employees").clicked() {
                *selected = None;
                changed = true;
            }
            for sheet in sheets {
                let label = format!("{} {}", sheet.employee_number(), sheet.full_name());
                if ui.selectable_label(*selected == Some(sheet.id), label).clicked() {
                    *selected = Some(sheet.id);
                    changed = true;
                }
            }
        });
    changed
}

/// Inline validation error under a form.
pub fn form_error(ui: &mut Ui, error: &Option<String>) {
    if let Some(e) = error {
        ui.add_space(5.0);
        ui.colored_label(colors::ERROR, e);
    }
}

/// Button clicked in a form window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    None,
    Cancel,
    Save,
}

/// Centered form window with a scrollable body and Cancel/Save buttons.
pub fn form_window(
    ctx: &egui::Context,
    title: &str,
    saving: bool,
    error: &Option<String>,
    body: impl FnOnce(&mut Ui),
) -> FormResult {
    let mut result = FormResult::None;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(480.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::ScrollArea::vertical().max_height(460.0).show(ui, |ui| {
                egui::Grid::new(format!("{title}_grid"))
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, body);
            });

            form_error(ui, error);

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    result = FormResult::Cancel;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let save = ui.add_enabled_ui(!saving, |ui| primary_button(ui, "", "Save")).inner;
                    if save.clicked() {
                        result = FormResult::Save;
                    }
                    if saving {
                        ui.spinner();
                    }
                });
            });
        });

    result
}

/// One labelled row of a form grid.
pub fn form_row(ui: &mut Ui, label: &str, add: impl FnOnce(&mut Ui)) {
    ui.label(label);
    add(ui);
    ui.end_row();
}
