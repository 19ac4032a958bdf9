//! Professional training sessions.

use eframe::egui::{self, Ui};

use super::{
    Linked, edit_delete_actions, export_rows, linked_rows, record_toolbar, request_bulk_delete, sheet_filter,
    take_row_action,
};
use crate::api::ResourceKind;
use crate::dates::{format_date_short, format_opt_date};
use crate::models::{Choice, InformationSheet, ProfessionalTraining, TrainingStatus, TrainingType};
use crate::table::{Column, DataTable, FacetOption, TableRow};
use crate::ui::app::App;
use crate::ui::components::{
    FormResult, choice_combo, date_field, form_row, form_window, optional_date_field, panel_header, sheet_picker,
    text_field,
};
use crate::ui::data_table;
use crate::ui::forms::TrainingForm;

type Row<'a> = Linked<'a, ProfessionalTraining>;

fn columns<'a>() -> Vec<Column<Row<'a>>> {
    vec![
        Column::new("employee", "Employee", |r: &Row<'a>| r.employee()).fixed(),
        Column::new("number", "Number", |r: &Row<'a>| r.employee_number()),
        Column::new("title", "Title", |r: &Row<'a>| r.record.data.title.clone()),
        Column::new("organization", "Organization", |r: &Row<'a>| r.record.data.organization.clone()),
        Column::new("type", "Type", |r: &Row<'a>| r.record.data.training_type.label().to_string())
            .faceted(TrainingType::facet_options(), |r: &Row<'a>| {
                r.record.data.training_type.key().to_string()
            }),
        Column::new("start", "Start", |r: &Row<'a>| format_date_short(r.record.data.start_date))
            .keyed(|r: &Row<'a>| r.record.data.start_date.to_string()),
        Column::new("end", "End", |r: &Row<'a>| format_opt_date(r.record.data.end_date))
            .keyed(|r: &Row<'a>| r.record.data.end_date.map(|d| d.to_string()).unwrap_or_default()),
        Column::new("days", "Days", |r: &Row<'a>| {
            r.record.length_days().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        })
        .keyed(|r: &Row<'a>| r.record.length_days().unwrap_or(0).to_string()),
        Column::new("status", "Status", |r: &Row<'a>| r.record.data.status.label().to_string())
            .faceted(TrainingStatus::facet_options(), |r: &Row<'a>| {
                r.record.data.status.key().to_string()
            }),
        Column::new("certificate", "Certificate", |r: &Row<'a>| {
            let label = if r.record.data.certificate_obtained { "Yes" } else { "No" };
            label.to_string()
        })
        .faceted(
            vec![FacetOption::new("yes", "Yes"), FacetOption::new("no", "No")],
            |r: &Row<'a>| {
                let key = if r.record.data.certificate_obtained { "yes" } else { "no" };
                key.to_string()
            },
        ),
    ]
}

/// Show the professional training panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Training", "Professional training sessions and certificates");

    let can_edit = app.can_edit();
    let toolbar = record_toolbar(ui, "Add Training", can_edit, app.is_loading(ResourceKind::ProfessionalTrainings));
    ui.add_space(10.0);
    sheet_filter(app, ui);

    let scope = app.selected_sheet;
    app.ensure_loaded::<InformationSheet>(None);
    app.ensure_loaded::<ProfessionalTraining>(scope);

    let columns = columns();
    let rows = linked_rows::<ProfessionalTraining>(&app.store, scope);
    let mut table = DataTable::new(&columns, &mut app.tables.trainings);

    if toolbar.export {
        export_rows(&mut app.notifications, "Professional Training", "trainings", &table, &rows);
    }

    let output = data_table::show(ui, "trainings", &mut table, &rows, can_edit, |ui, row| {
        edit_delete_actions(ui, row.row_id(), can_edit)
    });
    let selected = table.state.selected_ids();

    if let Some(training) = take_row_action::<ProfessionalTraining>(app, scope, output.action) {
        app.training_form.open_edit(training.id, TrainingForm::edit(&training));
    }
    if output.delete_selected {
        request_bulk_delete::<ProfessionalTraining>(app, selected);
    }
    if toolbar.add {
        app.training_form.open_new(TrainingForm::new(scope, app.today()));
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::ProfessionalTrainings);
    }

    show_form(app, ui.ctx());
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    if !app.training_form.is_open {
        return;
    }

    let sheets = app.store.sheets();
    let dialog = &mut app.training_form;
    let title = if dialog.is_editing() { "Edit Training" } else { "New Training" };
    let error = dialog.error.clone();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Employee:", |ui| {
            sheet_picker(ui, "training_form_sheet", sheets, &mut f.sheet_id, false);
        });
        form_row(ui, "Title:", |ui| {
            text_field(ui, &mut f.title, "");
        });
        form_row(ui, "Organization:", |ui| {
            text_field(ui, &mut f.organization, "Training provider");
        });
        form_row(ui, "Type:", |ui| {
            choice_combo(ui, "training_form_type", &mut f.training_type);
        });
        form_row(ui, "Start date:", |ui| date_field(ui, "training_form_start", &mut f.start_date));
        form_row(ui, "End date:", |ui| optional_date_field(ui, "training_form_end", &mut f.end_date));
        form_row(ui, "Status:", |ui| {
            choice_combo(ui, "training_form_status", &mut f.status);
        });
        if f.status != TrainingStatus::Completed {
            f.certificate_obtained = false;
        }
        form_row(ui, "Certificate obtained:", |ui| {
            ui.add_enabled(
                f.status == TrainingStatus::Completed,
                egui::Checkbox::without_text(&mut f.certificate_obtained),
            );
        });
    });

    match result {
        FormResult::Cancel => app.training_form.reset(),
        FormResult::Save => match app.training_form.fields.to_input() {
            Ok(input) => {
                let id = app.training_form.begin_save();
                app.save::<ProfessionalTraining>(id, input);
            }
            Err(e) => app.training_form.error = Some(e),
        },
        FormResult::None => {}
    }
}
