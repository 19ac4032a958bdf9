//! Work certificates and administrative investigation requests, with the
//! print preview that renders them.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{EYE, FLOPPY_DISK, WARNING};

use super::{
    Linked, RowAction, SheetRecord, edit_delete_actions, export_rows, find_record, linked_rows, record_toolbar,
    request_bulk_delete, take_row_action,
};
use crate::api::{Resource, ResourceKind};
use crate::cache::{QueryCache, QueryKey};
use crate::dates::format_date_short;
use crate::models::*;
use crate::print::{self, PrintDocument};
use crate::table::{Column, DataTable, TableRow};
use crate::ui::app::{App, PreviewTarget, PrintTab};
use crate::ui::components::{
    FormResult, choice_combo, colors, date_field, form_row, form_window, panel_header, primary_button, row_action,
    sheet_picker, status_badge, text_field,
};
use crate::ui::data_table;
use crate::ui::forms::{CertificateForm, FormDialog, InvestigationForm};
use crate::ui::store::Store;

/// Row action of a request table.
enum RequestAction<S> {
    Row(RowAction),
    Preview(i64),
    Transition(i64, S),
}

/// Daira and wilaya requests share one payload and one table layout.
trait Investigation: SheetRecord<Input = InvestigationRequestInput> {
    const LEVEL: InvestigationLevel;
    const TITLE: &'static str;
    const FILE_PREFIX: &'static str;

    fn data(&self) -> &InvestigationRequestInput;
}

impl Investigation for DairaInvestigationRequest {
    const LEVEL: InvestigationLevel = InvestigationLevel::Daira;
    const TITLE: &'static str = "Daira Investigation Requests";
    const FILE_PREFIX: &'static str = "daira_requests";

    fn data(&self) -> &InvestigationRequestInput {
        &self.data
    }
}

impl Investigation for WilayaInvestigationRequest {
    const LEVEL: InvestigationLevel = InvestigationLevel::Wilaya;
    const TITLE: &'static str = "Wilaya Investigation Requests";
    const FILE_PREFIX: &'static str = "wilaya_requests";

    fn data(&self) -> &InvestigationRequestInput {
        &self.data
    }
}

fn investigation_form(app: &mut App, level: InvestigationLevel) -> &mut FormDialog<InvestigationForm> {
    match level {
        InvestigationLevel::Daira => &mut app.daira_form,
        InvestigationLevel::Wilaya => &mut app.wilaya_form,
    }
}

/// Show the print reports panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Print Reports", "Work certificates and administrative investigation requests");

    ui.horizontal(|ui| {
        ui.selectable_value(&mut app.print_tab, PrintTab::WorkCertificates, "Work Certificates");
        ui.selectable_value(&mut app.print_tab, PrintTab::Daira, "Daira Requests");
        ui.selectable_value(&mut app.print_tab, PrintTab::Wilaya, "Wilaya Requests");
    });
    ui.separator();
    ui.add_space(10.0);

    app.ensure_loaded::<InformationSheet>(None);

    match app.print_tab {
        PrintTab::WorkCertificates => certificates(app, ui),
        PrintTab::Daira => investigations::<DairaInvestigationRequest>(app, ui),
        PrintTab::Wilaya => investigations::<WilayaInvestigationRequest>(app, ui),
    }

    let ctx = ui.ctx().clone();
    show_certificate_form(app, &ctx);
    show_investigation_form(app, &ctx, InvestigationLevel::Daira);
    show_investigation_form(app, &ctx, InvestigationLevel::Wilaya);
    show_preview(app, &ctx);
}

/// Edit, delete, preview and status transition buttons of a request row.
fn request_actions<S: Choice>(
    ui: &mut Ui,
    id: i64,
    next: &'static [S],
    can_edit: bool,
) -> Option<RequestAction<S>> {
    let mut action = None;
    if row_action(ui, EYE, "Preview and print").clicked() {
        action = Some(RequestAction::Preview(id));
    }
    if can_edit {
        for status in next {
            ui.add_space(4.0);
            if ui.small_button(status.label()).on_hover_text("Change status").clicked() {
                action = Some(RequestAction::Transition(id, *status));
            }
        }
    }
    if let Some(row) = edit_delete_actions(ui, id, can_edit) {
        action = Some(RequestAction::Row(row));
    }
    action
}

// -------------------------------------------------------------------------
// Work certificates
// -------------------------------------------------------------------------

type CertificateRow<'a> = Linked<'a, WorkCertificateRequest>;

fn certificate_columns<'a>() -> Vec<Column<CertificateRow<'a>>> {
    vec![
        Column::new("employee", "Employee", |r: &CertificateRow<'a>| r.employee()).fixed(),
        Column::new("number", "Number", |r: &CertificateRow<'a>| r.employee_number()),
        Column::new("request_date", "Requested", |r: &CertificateRow<'a>| {
            format_date_short(r.record.data.request_date)
        })
        .keyed(|r: &CertificateRow<'a>| r.record.data.request_date.to_string()),
        Column::new("purpose", "Purpose", |r: &CertificateRow<'a>| r.record.data.purpose.clone()).unsortable(),
        Column::new("status", "Status", |r: &CertificateRow<'a>| r.record.data.status.label().to_string())
            .faceted(CertificateStatus::facet_options(), |r: &CertificateRow<'a>| {
                r.record.data.status.key().to_string()
            }),
    ]
}

fn certificates(app: &mut App, ui: &mut Ui) {
    app.ensure_loaded::<WorkCertificateRequest>(None);

    let can_edit = app.can_edit();
    let toolbar = record_toolbar(
        ui,
        "New Request",
        can_edit,
        app.is_loading(ResourceKind::WorkCertificateRequests),
    );
    ui.add_space(10.0);

    let columns = certificate_columns();
    let rows = linked_rows::<WorkCertificateRequest>(&app.store, None);
    let mut table = DataTable::new(&columns, &mut app.tables.certificates);

    if toolbar.export {
        export_rows(&mut app.notifications, "Work Certificate Requests", "work_certificates", &table, &rows);
    }

    let output = data_table::show(ui, "certificates", &mut table, &rows, can_edit, |ui, row| {
        request_actions(ui, row.row_id(), row.record.data.status.next_statuses(), can_edit)
    });
    let selected = table.state.selected_ids();

    let row_action = match output.action {
        Some(RequestAction::Row(action)) => Some(action),
        Some(RequestAction::Preview(id)) => {
            app.preview = Some(PreviewTarget::Certificate(id));
            None
        }
        Some(RequestAction::Transition(id, status)) => {
            if let Some(request) = find_record::<WorkCertificateRequest>(&app.store, None, id) {
                let mut input = request.data;
                input.status = status;
                app.save::<WorkCertificateRequest>(Some(id), input);
            }
            None
        }
        None => None,
    };

    if let Some(request) = take_row_action::<WorkCertificateRequest>(app, None, row_action) {
        app.certificate_form.open_edit(request.id, CertificateForm::edit(&request));
    }
    if output.delete_selected {
        request_bulk_delete::<WorkCertificateRequest>(app, selected);
    }
    if toolbar.add {
        app.certificate_form.open_new(CertificateForm::new(app.selected_sheet, app.today()));
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::WorkCertificateRequests);
    }
}

fn show_certificate_form(app: &mut App, ctx: &egui::Context) {
    if !app.certificate_form.is_open {
        return;
    }

    let sheets = app.store.sheets();
    let dialog = &mut app.certificate_form;
    let title = if dialog.is_editing() { "Edit Work Certificate Request" } else { "New Work Certificate Request" };
    let error = dialog.error.clone();
    let editing = dialog.is_editing();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Employee:", |ui| {
            sheet_picker(ui, "certificate_form_sheet", sheets, &mut f.sheet_id, false);
        });
        form_row(ui, "Request date:", |ui| date_field(ui, "certificate_form_date", &mut f.request_date));
        form_row(ui, "Purpose:", |ui| {
            text_field(ui, &mut f.purpose, "e.g. Dossier de prêt immobilier");
        });
        if editing {
            form_row(ui, "Status:", |ui| {
                choice_combo(ui, "certificate_form_status", &mut f.status);
            });
        }
    });

    match result {
        FormResult::Cancel => app.certificate_form.reset(),
        FormResult::Save => match app.certificate_form.fields.to_input() {
            Ok(input) => {
                let id = app.certificate_form.begin_save();
                app.save::<WorkCertificateRequest>(id, input);
            }
            Err(e) => app.certificate_form.error = Some(e),
        },
        FormResult::None => {}
    }
}

// -------------------------------------------------------------------------
// Investigation requests
// -------------------------------------------------------------------------

fn investigation_columns<'a, R: Investigation>() -> Vec<Column<Linked<'a, R>>> {
    vec![
        Column::new("reference", "Reference", |r: &Linked<'a, R>| r.record.data().reference_number.clone()),
        Column::new("employee", "Employee", |r: &Linked<'a, R>| r.employee()).fixed(),
        Column::new("number", "Number", |r: &Linked<'a, R>| r.employee_number()),
        Column::new("authority", "Authority", |r: &Linked<'a, R>| r.record.data().authority.clone()),
        Column::new("subject", "Subject", |r: &Linked<'a, R>| r.record.data().subject.clone()).unsortable(),
        Column::new("request_date", "Requested", |r: &Linked<'a, R>| {
            format_date_short(r.record.data().request_date)
        })
        .keyed(|r: &Linked<'a, R>| r.record.data().request_date.to_string()),
        Column::new("status", "Status", |r: &Linked<'a, R>| r.record.data().status.label().to_string())
            .faceted(InvestigationStatus::facet_options(), |r: &Linked<'a, R>| {
                r.record.data().status.key().to_string()
            }),
    ]
}

fn investigations<R: Investigation>(app: &mut App, ui: &mut Ui) {
    app.ensure_loaded::<R>(None);

    let can_edit = app.can_edit();
    let toolbar = record_toolbar(ui, "New Request", can_edit, app.is_loading(R::KIND));
    ui.add_space(10.0);

    let columns = investigation_columns::<R>();
    let rows = linked_rows::<R>(&app.store, None);
    let mut table = DataTable::new(&columns, app.tables.for_kind(R::KIND));

    if toolbar.export {
        export_rows(&mut app.notifications, R::TITLE, R::FILE_PREFIX, &table, &rows);
    }

    let table_id = format!("{:?}", R::LEVEL).to_lowercase();
    let output = data_table::show(ui, &table_id, &mut table, &rows, can_edit, |ui, row| {
        request_actions(ui, row.row_id(), row.record.data().status.next_statuses(), can_edit)
    });
    let selected = table.state.selected_ids();

    let row_action = match output.action {
        Some(RequestAction::Row(action)) => Some(action),
        Some(RequestAction::Preview(id)) => {
            app.preview = Some(PreviewTarget::Investigation(R::LEVEL, id));
            None
        }
        Some(RequestAction::Transition(id, status)) => {
            if let Some(request) = find_record::<R>(&app.store, None, id) {
                let mut input = request.data().clone();
                input.status = status;
                app.save::<R>(Some(id), input);
            }
            None
        }
        None => None,
    };

    if let Some(request) = take_row_action::<R>(app, None, row_action) {
        let fields = InvestigationForm::edit(request.data());
        investigation_form(app, R::LEVEL).open_edit(request.id(), fields);
    }
    if output.delete_selected {
        request_bulk_delete::<R>(app, selected);
    }
    if toolbar.add {
        let fields = InvestigationForm::new(app.selected_sheet, app.today());
        investigation_form(app, R::LEVEL).open_new(fields);
    }
    if toolbar.refresh {
        app.refresh(R::KIND);
    }
}

fn show_investigation_form(app: &mut App, ctx: &egui::Context, level: InvestigationLevel) {
    let sheets = app.store.sheets();
    let dialog = match level {
        InvestigationLevel::Daira => &mut app.daira_form,
        InvestigationLevel::Wilaya => &mut app.wilaya_form,
    };
    if !dialog.is_open {
        return;
    }

    let (title, authority_hint) = match (level, dialog.is_editing()) {
        (InvestigationLevel::Daira, false) => ("New Daira Request", "Daira name"),
        (InvestigationLevel::Daira, true) => ("Edit Daira Request", "Daira name"),
        (InvestigationLevel::Wilaya, false) => ("New Wilaya Request", "Wilaya name"),
        (InvestigationLevel::Wilaya, true) => ("Edit Wilaya Request", "Wilaya name"),
    };
    let error = dialog.error.clone();
    let editing = dialog.is_editing();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Employee:", |ui| {
            sheet_picker(ui, &format!("{title}_sheet"), sheets, &mut f.sheet_id, false);
        });
        form_row(ui, "Reference number:", |ui| {
            text_field(ui, &mut f.reference_number, "e.g. DRH/ENQ/2024/031");
        });
        form_row(ui, "Authority:", |ui| {
            text_field(ui, &mut f.authority, authority_hint);
        });
        form_row(ui, "Subject:", |ui| {
            text_field(ui, &mut f.subject, "");
        });
        form_row(ui, "Request date:", |ui| date_field(ui, &format!("{title}_date"), &mut f.request_date));
        if editing {
            form_row(ui, "Status:", |ui| {
                choice_combo(ui, &format!("{title}_status"), &mut f.status);
            });
        }
    });

    match result {
        FormResult::Cancel => investigation_form(app, level).reset(),
        FormResult::Save => {
            let dialog = investigation_form(app, level);
            match dialog.fields.to_input() {
                Ok(input) => {
                    let id = dialog.begin_save();
                    match level {
                        InvestigationLevel::Daira => app.save::<DairaInvestigationRequest>(id, input),
                        InvestigationLevel::Wilaya => app.save::<WilayaInvestigationRequest>(id, input),
                    }
                }
                Err(e) => dialog.error = Some(e),
            }
        }
        FormResult::None => {}
    }
}

// -------------------------------------------------------------------------
// Preview
// -------------------------------------------------------------------------

/// State of the document behind the preview window.
enum Preview {
    Ready {
        document: PrintDocument,
        file_prefix: &'static str,
        status: &'static str,
        warning: Option<&'static str>,
    },
    Loading,
    Missing,
}

/// A sheet missing from the store is still loading, unless the sheet list
/// has already arrived without it or failed to load.
fn absent_sheet(store: &Store, cache: &QueryCache) -> Preview {
    let key = QueryKey::all(ResourceKind::InformationSheets);
    if store.contains(key) || cache.has_failed(key) {
        Preview::Missing
    } else {
        Preview::Loading
    }
}

fn build_preview(app: &mut App, target: PreviewTarget) -> Preview {
    let today = app.today();
    let issuer = app.issuer();

    match target {
        PreviewTarget::Certificate(id) => {
            let Some(request) = find_record::<WorkCertificateRequest>(&app.store, None, id) else {
                return Preview::Missing;
            };
            let sheet_id = request.data.information_sheet_id;
            app.ensure_loaded::<BankExperience>(Some(sheet_id));

            let key = QueryKey::scoped(ResourceKind::BankExperiences, Some(sheet_id));
            let experiences_ready = app.store.contains(key) || app.cache.has_failed(key);
            let Some(sheet) = app.store.sheet(sheet_id) else {
                return absent_sheet(&app.store, &app.cache);
            };
            if !experiences_ready {
                return Preview::Loading;
            }

            let experiences = app.store.list::<BankExperience>(Some(sheet_id));
            Preview::Ready {
                document: print::work_certificate(sheet, experiences, &request, &issuer, today),
                file_prefix: "attestation_travail",
                status: request.data.status.label(),
                warning: (request.data.status != CertificateStatus::Approved)
                    .then_some("This request is not approved yet."),
            }
        }
        PreviewTarget::Investigation(level, id) => {
            let data = match level {
                InvestigationLevel::Daira => {
                    find_record::<DairaInvestigationRequest>(&app.store, None, id).map(|r| r.data)
                }
                InvestigationLevel::Wilaya => {
                    find_record::<WilayaInvestigationRequest>(&app.store, None, id).map(|r| r.data)
                }
            };
            let Some(data) = data else {
                return Preview::Missing;
            };
            let Some(sheet) = app.store.sheet(data.information_sheet_id) else {
                return absent_sheet(&app.store, &app.cache);
            };

            let file_prefix = match level {
                InvestigationLevel::Daira => "enquete_daira",
                InvestigationLevel::Wilaya => "enquete_wilaya",
            };
            Preview::Ready {
                document: print::investigation_request(level, sheet, &data, &issuer, today),
                file_prefix,
                status: data.status.label(),
                warning: (data.status == InvestigationStatus::Cancelled).then_some("This request was cancelled."),
            }
        }
    }
}

fn show_preview(app: &mut App, ctx: &egui::Context) {
    let Some(target) = app.preview else {
        return;
    };

    let preview = build_preview(app, target);
    let mut open = true;
    let mut save = false;

    egui::Window::new("Print Preview")
        .open(&mut open)
        .collapsible(false)
        .default_size([640.0, 720.0])
        .show(ctx, |ui| match &preview {
            Preview::Ready {
                document,
                status,
                warning,
                ..
            } => {
                ui.horizontal(|ui| {
                    if primary_button(ui, FLOPPY_DISK, "Save for printing").clicked() {
                        save = true;
                    }
                    ui.add_space(10.0);
                    let color = if warning.is_some() { colors::WARNING } else { colors::NEUTRAL };
                    status_badge(ui, status, color);
                    if let Some(warning) = warning {
                        ui.add_space(10.0);
                        ui.colored_label(colors::WARNING, format!("{WARNING} {warning}"));
                    }
                });
                ui.separator();
                ScrollArea::vertical().show(ui, |ui| {
                    ui.add(egui::Label::new(RichText::new(document.to_plain_text()).monospace()).wrap());
                });
            }
            Preview::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading employee record...");
                });
            }
            Preview::Missing => {
                ui.weak("This request or its employee record is no longer available.");
            }
        });

    if !open {
        app.preview = None;
    }

    if save && let Preview::Ready { document, file_prefix, .. } = &preview {
        let Some(path) = print::show_save_dialog(&print::generate_document_filename(file_prefix)) else {
            return;
        };
        match print::save_html(document, &path) {
            Ok(()) => {
                tracing::info!("Document saved to {:?}", path);
                app.notifications
                    .success(format!("Saved {}, open it in a browser to print", path.display()));
            }
            Err(e) => {
                tracing::error!("Failed to save document: {}", e);
                app.notifications.error(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::information_sheet::fixtures::sheet;

    fn sheets_key() -> QueryKey {
        QueryKey::all(ResourceKind::InformationSheets)
    }

    #[test]
    fn test_absent_sheet_loading_until_list_settles() {
        let store = Store::new();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        assert!(matches!(absent_sheet(&store, &cache), Preview::Loading));

        cache.mark_fetching(sheets_key());
        assert!(matches!(absent_sheet(&store, &cache), Preview::Loading));
    }

    #[test]
    fn test_absent_sheet_missing_when_list_failed() {
        let store = Store::new();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        cache.mark_fetching(sheets_key());
        cache.mark_failed(sheets_key());
        assert!(matches!(absent_sheet(&store, &cache), Preview::Missing));
    }

    #[test]
    fn test_absent_sheet_missing_when_deleted() {
        let mut store = Store::new();
        store.insert(
            sheets_key(),
            InformationSheet::into_records(vec![sheet(1, "Benali", "Karim", Gender::Male)]),
        );
        let cache = QueryCache::new(Duration::from_secs(60));
        assert!(store.sheet(2).is_none());
        assert!(matches!(absent_sheet(&store, &cache), Preview::Missing));
    }
}
