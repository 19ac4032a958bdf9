//! Feature panels and the helpers they share.

pub mod bank_experiences;
pub mod dashboard;
pub mod disciplinary_actions;
pub mod information_sheets;
pub mod login;
pub mod non_bank_experiences;
pub mod print_reports;
pub mod settings;
pub mod trainings;
pub mod users;

use eframe::egui::{self, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_XLS, PENCIL, PLUS, TRASH};

use super::app::App;
use super::components::{danger_row_action, icon_button, primary_button, row_action, sheet_picker};
use super::store::Store;
use crate::api::Resource;
use crate::export;
use crate::models::*;
use crate::table::{DataTable, TableRow};
use crate::toast::Notifications;

/// Records that belong to one information sheet.
pub trait SheetRecord: Resource + TableRow {
    fn sheet_id(&self) -> i64;
}

impl SheetRecord for BankExperience {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

impl SheetRecord for NonBankExperience {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

impl SheetRecord for DisciplinaryAction {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

impl SheetRecord for ProfessionalTraining {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

impl SheetRecord for WorkCertificateRequest {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

impl SheetRecord for DairaInvestigationRequest {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

impl SheetRecord for WilayaInvestigationRequest {
    fn sheet_id(&self) -> i64 {
        self.data.information_sheet_id
    }
}

/// A record joined with the information sheet it belongs to.
pub struct Linked<'a, R> {
    pub record: &'a R,
    pub sheet: Option<&'a InformationSheet>,
}

impl<R: TableRow> TableRow for Linked<'_, R> {
    fn row_id(&self) -> i64 {
        self.record.row_id()
    }
}

impl<R: SheetRecord> Linked<'_, R> {
    /// Employee full name, or the sheet id while sheets are loading.
    pub fn employee(&self) -> String {
        self.sheet
            .map(|s| s.full_name())
            .unwrap_or_else(|| format!("#{}", self.record.sheet_id()))
    }

    pub fn employee_number(&self) -> String {
        self.sheet.map(|s| s.employee_number().to_string()).unwrap_or_default()
    }
}

/// Rows of `R` for `scope`, each joined with its sheet.
pub fn linked_rows<R: SheetRecord>(store: &Store, scope: Option<i64>) -> Vec<Linked<'_, R>> {
    store
        .list::<R>(scope)
        .iter()
        .map(|record| Linked {
            record,
            sheet: store.sheet(record.sheet_id()),
        })
        .collect()
}

/// Clone of the record with `id`, if loaded.
pub fn find_record<R: Resource>(store: &Store, scope: Option<i64>, id: i64) -> Option<R> {
    store.list::<R>(scope).iter().find(|r| r.id() == id).cloned()
}

/// Row action shared by the record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(i64),
    Delete(i64),
}

/// Edit and delete buttons of a row. Viewers get none.
pub fn edit_delete_actions(ui: &mut Ui, id: i64, can_edit: bool) -> Option<RowAction> {
    if !can_edit {
        return None;
    }
    let mut action = None;
    ui.add_space(4.0);
    if row_action(ui, PENCIL, "Edit").clicked() {
        action = Some(RowAction::Edit(id));
    }
    ui.add_space(4.0);
    if danger_row_action(ui, TRASH, "Delete").clicked() {
        action = Some(RowAction::Delete(id));
    }
    action
}

/// Apply a row action. Deletes go to the confirmation dialog; the record to
/// edit is returned so the caller can open its form.
pub fn take_row_action<R: Resource>(app: &mut App, scope: Option<i64>, action: Option<RowAction>) -> Option<R> {
    match action? {
        RowAction::Edit(id) => find_record::<R>(&app.store, scope, id),
        RowAction::Delete(id) => {
            let label = find_record::<R>(&app.store, scope, id)
                .map(|r| r.label())
                .unwrap_or_else(|| format!("#{id}"));
            app.request_delete(R::KIND, vec![id], format!("{} '{label}'", R::NAME.to_lowercase()));
            None
        }
    }
}

/// Ask to delete the selected rows of a table.
pub fn request_bulk_delete<R: Resource>(app: &mut App, ids: Vec<i64>) {
    let description = format!("{} selected {}", ids.len(), R::KIND.label());
    app.request_delete(R::KIND, ids, description);
}

/// Buttons clicked in a record panel toolbar.
#[derive(Debug, Default, Clone, Copy)]
pub struct Toolbar {
    pub add: bool,
    pub refresh: bool,
    pub export: bool,
}

/// Add, Refresh and Export buttons.
pub fn record_toolbar(ui: &mut Ui, add_label: &str, can_edit: bool, loading: bool) -> Toolbar {
    let mut toolbar = Toolbar::default();
    ui.horizontal(|ui| {
        if can_edit && primary_button(ui, PLUS, add_label).clicked() {
            toolbar.add = true;
        }

        ui.add_space(10.0);

        if ui
            .add_enabled(!loading, egui::Button::new(format!("{ARROWS_CLOCKWISE} Refresh")))
            .clicked()
        {
            toolbar.refresh = true;
        }

        ui.add_space(10.0);

        if icon_button(ui, FILE_XLS, "Export to Excel").clicked() {
            toolbar.export = true;
        }

        if loading {
            ui.add_space(10.0);
            ui.spinner();
        }
    });
    toolbar
}

/// Employee picker restricting the child panels.
pub fn sheet_filter(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label("Employee:");
        sheet_picker(ui, "sheet_filter", app.store.sheets(), &mut app.selected_sheet, true);
    });
    ui.add_space(8.0);
}

/// Export the filtered rows and visible columns of `table` to Excel.
pub fn export_rows<T: TableRow>(
    notifications: &mut Notifications,
    title: &str,
    prefix: &str,
    table: &DataTable<'_, T>,
    rows: &[T],
) {
    let filtered = table.filtered(rows);
    if filtered.is_empty() {
        notifications.warning("Nothing to export");
        return;
    }

    let Some(path) = export::show_save_dialog(&export::generate_export_filename(prefix)) else {
        return;
    };

    match export::export_rows_to_excel(title, &table.visible_columns(), &filtered, &path) {
        Ok(()) => notifications.success(format!("Exported {} rows to {}", filtered.len(), path.display())),
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            notifications.error(format!("Export failed: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResourceKind;
    use crate::cache::QueryKey;
    use crate::models::bank_experience::fixtures::bank_experience;
    use crate::models::information_sheet::fixtures::sheet;

    #[test]
    fn test_linked_rows_join_sheets() {
        let mut store = Store::new();
        store.insert(
            QueryKey::all(ResourceKind::InformationSheets),
            InformationSheet::into_records(vec![sheet(1, "Benali", "Karim", Gender::Male)]),
        );
        store.insert(
            QueryKey::all(ResourceKind::BankExperiences),
            BankExperience::into_records(vec![
                bank_experience(10, 1, (2010, 9, 1), None),
                bank_experience(11, 2, (2012, 1, 1), None),
            ]),
        );

        let rows = linked_rows::<BankExperience>(&store, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].employee(), "BENALI Karim");
        assert_eq!(rows[0].employee_number(), "M00001");
        assert_eq!(rows[1].employee(), "#2");
        assert_eq!(rows[1].row_id(), 11);
    }

    #[test]
    fn test_find_record() {
        let mut store = Store::new();
        store.insert(
            QueryKey::scoped(ResourceKind::BankExperiences, Some(1)),
            BankExperience::into_records(vec![bank_experience(10, 1, (2010, 9, 1), None)]),
        );
        assert!(find_record::<BankExperience>(&store, Some(1), 10).is_some());
        assert!(find_record::<BankExperience>(&store, None, 10).is_none());
    }
}
