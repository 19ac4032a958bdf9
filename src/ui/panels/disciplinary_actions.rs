//! Disciplinary sanctions.

use eframe::egui::{self, Ui};

use super::{
    Linked, edit_delete_actions, export_rows, linked_rows, record_toolbar, request_bulk_delete, sheet_filter,
    take_row_action,
};
use crate::api::ResourceKind;
use crate::dates::{format_date_short, format_opt_date};
use crate::models::{Choice, DisciplinaryAction, DisciplinaryDegree, DisciplinaryStatus, InformationSheet};
use crate::table::{Column, DataTable, TableRow};
use crate::ui::app::App;
use crate::ui::components::{
    FormResult, choice_combo, date_field, form_row, form_window, optional_date_field, panel_header, sheet_picker,
    text_field,
};
use crate::ui::data_table;
use crate::ui::forms::DisciplinaryForm;

type Row<'a> = Linked<'a, DisciplinaryAction>;

fn columns<'a>() -> Vec<Column<Row<'a>>> {
    vec![
        Column::new("employee", "Employee", |r: &Row<'a>| r.employee()).fixed(),
        Column::new("number", "Number", |r: &Row<'a>| r.employee_number()),
        Column::new("degree", "Degree", |r: &Row<'a>| r.record.data.degree.label().to_string())
            .faceted(DisciplinaryDegree::facet_options(), |r: &Row<'a>| {
                r.record.data.degree.key().to_string()
            }),
        Column::new("sanction", "Sanction", |r: &Row<'a>| r.record.data.sanction.clone()),
        Column::new("reason", "Reason", |r: &Row<'a>| r.record.data.reason.clone()).unsortable(),
        Column::new("decision_number", "Decision", |r: &Row<'a>| r.record.data.decision_number.clone()),
        Column::new("decision_date", "Decided", |r: &Row<'a>| format_date_short(r.record.data.decision_date))
            .keyed(|r: &Row<'a>| r.record.data.decision_date.to_string()),
        Column::new("effective_date", "Effective", |r: &Row<'a>| format_opt_date(r.record.data.effective_date))
            .keyed(|r: &Row<'a>| r.record.data.effective_date.map(|d| d.to_string()).unwrap_or_default()),
        Column::new("status", "Status", |r: &Row<'a>| r.record.data.status.label().to_string())
            .faceted(DisciplinaryStatus::facet_options(), |r: &Row<'a>| {
                r.record.data.status.key().to_string()
            }),
    ]
}

/// Show the disciplinary actions panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Disciplinary Actions", "Sanctions by degree and decision");

    let can_edit = app.can_edit();
    let toolbar = record_toolbar(ui, "Add Sanction", can_edit, app.is_loading(ResourceKind::DisciplinaryActions));
    ui.add_space(10.0);
    sheet_filter(app, ui);

    let scope = app.selected_sheet;
    app.ensure_loaded::<InformationSheet>(None);
    app.ensure_loaded::<DisciplinaryAction>(scope);

    let columns = columns();
    let rows = linked_rows::<DisciplinaryAction>(&app.store, scope);
    let mut table = DataTable::new(&columns, &mut app.tables.disciplinary);

    if toolbar.export {
        export_rows(&mut app.notifications, "Disciplinary Actions", "disciplinary_actions", &table, &rows);
    }

    let output = data_table::show(ui, "disciplinary", &mut table, &rows, can_edit, |ui, row| {
        edit_delete_actions(ui, row.row_id(), can_edit)
    });
    let selected = table.state.selected_ids();

    if let Some(action) = take_row_action::<DisciplinaryAction>(app, scope, output.action) {
        app.disciplinary_form.open_edit(action.id, DisciplinaryForm::edit(&action));
    }
    if output.delete_selected {
        request_bulk_delete::<DisciplinaryAction>(app, selected);
    }
    if toolbar.add {
        app.disciplinary_form.open_new(DisciplinaryForm::new(scope, app.today()));
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::DisciplinaryActions);
    }

    show_form(app, ui.ctx());
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    if !app.disciplinary_form.is_open {
        return;
    }

    let sheets = app.store.sheets();
    let dialog = &mut app.disciplinary_form;
    let title = if dialog.is_editing() { "Edit Disciplinary Action" } else { "New Disciplinary Action" };
    let error = dialog.error.clone();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Employee:", |ui| {
            sheet_picker(ui, "disciplinary_form_sheet", sheets, &mut f.sheet_id, false);
        });
        form_row(ui, "Degree:", |ui| {
            choice_combo(ui, "disciplinary_form_degree", &mut f.degree);
        });
        form_row(ui, "Sanction:", |ui| {
            text_field(ui, &mut f.sanction, "e.g. Avertissement, Blâme");
        });
        form_row(ui, "Reason:", |ui| {
            ui.add(egui::TextEdit::multiline(&mut f.reason).desired_width(260.0).desired_rows(3));
        });
        form_row(ui, "Decision number:", |ui| {
            text_field(ui, &mut f.decision_number, "");
        });
        form_row(ui, "Decision date:", |ui| date_field(ui, "disciplinary_form_decided", &mut f.decision_date));
        form_row(ui, "Effective date:", |ui| {
            optional_date_field(ui, "disciplinary_form_effective", &mut f.effective_date)
        });
        form_row(ui, "Status:", |ui| {
            choice_combo(ui, "disciplinary_form_status", &mut f.status);
        });
    });

    match result {
        FormResult::Cancel => app.disciplinary_form.reset(),
        FormResult::Save => match app.disciplinary_form.fields.to_input() {
            Ok(input) => {
                let id = app.disciplinary_form.begin_save();
                app.save::<DisciplinaryAction>(id, input);
            }
            Err(e) => app.disciplinary_form.error = Some(e),
        },
        FormResult::None => {}
    }
}
