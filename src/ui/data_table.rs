//! Rendering of [`DataTable`]: toolbar, grid and pagination footer.

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    CARET_DOUBLE_LEFT, CARET_DOUBLE_RIGHT, CARET_DOWN, CARET_LEFT, CARET_RIGHT, CARET_UP, COLUMNS, FUNNEL,
    MAGNIFYING_GLASS, TRASH, X,
};

use super::components::colors;
use crate::table::{DataTable, SortDirection, TableRow};

/// Page sizes offered in the footer.
const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// What the user asked for while the table was drawn.
pub struct TableOutput<A> {
    /// Action returned by a row's action cell.
    pub action: Option<A>,
    /// The bulk delete button was clicked.
    pub delete_selected: bool,
}

/// Draw a full data table over `rows`.
///
/// `row_actions` draws the trailing cell of each row and returns the action
/// the user picked, if any. Nothing is mutated here beyond the table state;
/// callers apply the returned actions once the rows are no longer borrowed.
pub fn show<T: TableRow, A>(
    ui: &mut Ui,
    id: &str,
    table: &mut DataTable<'_, T>,
    rows: &[T],
    can_delete: bool,
    mut row_actions: impl FnMut(&mut Ui, &T) -> Option<A>,
) -> TableOutput<A> {
    table.sync_selection(rows);

    let delete_selected = toolbar(ui, id, table, rows, can_delete);
    ui.add_space(8.0);

    let filtered = table.filtered(rows);
    let page = table.state.page_rows(&filtered);
    let columns = table.visible_columns();
    let mut action = None;

    if rows.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| ui.weak("No records yet."));
    } else if filtered.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| ui.weak("No results match the current filters."));
    } else {
        ScrollArea::both()
            .id_salt(format!("{id}_scroll"))
            .max_height((ui.available_height() - 36.0).max(120.0))
            .show(ui, |ui| {
                egui::Grid::new(format!("{id}_grid"))
                    .num_columns(columns.len() + 2)
                    .striped(true)
                    .min_col_width(24.0)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        // Header
                        let page_ids: Vec<i64> = page.iter().map(|r| r.row_id()).collect();
                        let mut all = !page_ids.is_empty() && page_ids.iter().all(|id| table.state.is_selected(*id));
                        if ui.checkbox(&mut all, "").on_hover_text("Select page").clicked() {
                            table.state.toggle_all(&page_ids);
                        }
                        for column in &columns {
                            if column.sortable {
                                let arrow = match table.state.sort() {
                                    Some((sorted, SortDirection::Ascending)) if sorted == column.id => CARET_UP,
                                    Some((sorted, SortDirection::Descending)) if sorted == column.id => CARET_DOWN,
                                    _ => "",
                                };
                                let title = RichText::new(format!("{} {arrow}", column.title)).strong();
                                if ui.add(egui::Button::new(title).frame(false)).clicked() {
                                    table.state.toggle_sort(column.id);
                                }
                            } else {
                                ui.strong(column.title);
                            }
                        }
                        ui.strong("Actions");
                        ui.end_row();

                        // Data rows
                        for row in page {
                            let mut selected = table.state.is_selected(row.row_id());
                            if ui.checkbox(&mut selected, "").clicked() {
                                table.state.toggle_row(row.row_id());
                            }
                            for column in &columns {
                                ui.label(column.cell(row));
                            }
                            ui.horizontal(|ui| {
                                if let Some(picked) = row_actions(ui, row) {
                                    action = Some(picked);
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
    }

    ui.add_space(6.0);
    footer(ui, id, table, filtered.len());

    TableOutput { action, delete_selected }
}

/// Search box, facet menus, reset, column menu and bulk delete.
fn toolbar<T: TableRow>(ui: &mut Ui, id: &str, table: &mut DataTable<'_, T>, rows: &[T], can_delete: bool) -> bool {
    let mut delete_selected = false;
    let columns = table.columns;

    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        let hint = format!("Filter by {}...", table.search_title().to_lowercase());
        let response = ui.add(
            egui::TextEdit::singleline(table.state.search_mut())
                .id_salt(format!("{id}_search"))
                .desired_width(220.0)
                .hint_text(hint),
        );
        if response.changed() {
            table.state.filters_changed();
        }

        for column in columns {
            let Some(options) = &column.facet else { continue };
            let counts = table.facet_counts(column.id, rows);
            let active = table.state.facet_selection(column.id).map_or(0, |s| s.len());
            let title = if active > 0 {
                format!("{FUNNEL} {} ({active})", column.title)
            } else {
                format!("{FUNNEL} {}", column.title)
            };

            ui.menu_button(title, |ui| {
                for option in options {
                    let mut checked = table.state.is_facet_selected(column.id, &option.value);
                    let count = counts.get(&option.value).copied().unwrap_or(0);
                    if ui.checkbox(&mut checked, format!("{} ({count})", option.label)).clicked() {
                        table.state.toggle_facet(column.id, &option.value);
                    }
                }
                if active > 0 {
                    ui.separator();
                    if ui.button("Clear filter").clicked() {
                        table.state.clear_facet(column.id);
                        ui.close();
                    }
                }
            });
        }

        if table.state.is_filtered() && ui.button(format!("{X} Reset")).clicked() {
            table.state.reset_filters();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.menu_button(format!("{COLUMNS} View"), |ui| {
                ui.label(RichText::new("Toggle columns").small().weak());
                for column in columns.iter().filter(|c| c.hideable) {
                    let mut visible = table.state.is_visible(column);
                    if ui.checkbox(&mut visible, column.title).clicked() {
                        table.state.toggle_column(column);
                    }
                }
            });

            let selected = table.state.selected_count();
            if can_delete && selected > 0 {
                let label = RichText::new(format!("{TRASH} Delete {selected}")).color(colors::ERROR);
                if ui.button(label).clicked() {
                    delete_selected = true;
                }
            }
        });
    });

    delete_selected
}

/// Selection summary, page size and page navigation.
fn footer<T: TableRow>(ui: &mut Ui, id: &str, table: &mut DataTable<'_, T>, filtered: usize) {
    let state = &mut *table.state;
    let page_count = state.page_count(filtered);
    let current = state.current_page(filtered);

    ui.horizontal(|ui| {
        ui.weak(format!("{} of {filtered} row(s) selected.", state.selected_count()));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .add_enabled(current + 1 < page_count, egui::Button::new(CARET_DOUBLE_RIGHT))
                .clicked()
            {
                state.set_page(page_count - 1);
            }
            if ui
                .add_enabled(current + 1 < page_count, egui::Button::new(CARET_RIGHT))
                .clicked()
            {
                state.set_page(current + 1);
            }
            if ui.add_enabled(current > 0, egui::Button::new(CARET_LEFT)).clicked() {
                state.set_page(current - 1);
            }
            if ui.add_enabled(current > 0, egui::Button::new(CARET_DOUBLE_LEFT)).clicked() {
                state.set_page(0);
            }

            ui.label(format!("Page {} of {page_count}", current + 1));
            ui.add_space(12.0);

            let mut size = state.page_size();
            egui::ComboBox::from_id_salt(format!("{id}_page_size"))
                .width(60.0)
                .selected_text(size.to_string())
                .show_ui(ui, |ui| {
                    for option in PAGE_SIZES {
                        ui.selectable_value(&mut size, option, option.to_string());
                    }
                });
            if size != state.page_size() {
                state.set_page_size(size);
            }
            ui.label("Rows per page");
        });
    });
}
