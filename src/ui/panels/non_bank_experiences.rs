//! Experience acquired outside the banking sector.

use chrono::Local;
use eframe::egui::{self, Ui};

use super::{
    Linked, edit_delete_actions, export_rows, linked_rows, record_toolbar, request_bulk_delete, sheet_filter,
    take_row_action,
};
use crate::api::ResourceKind;
use crate::dates::{format_date_short, format_opt_date};
use crate::models::{Choice, InformationSheet, NonBankExperience, Sector};
use crate::table::{Column, DataTable, TableRow};
use crate::ui::app::App;
use crate::ui::components::{
    FormResult, choice_combo, date_field, form_row, form_window, optional_date_field, panel_header, sheet_picker,
    text_field,
};
use crate::ui::data_table;
use crate::ui::forms::NonBankExperienceForm;

type Row<'a> = Linked<'a, NonBankExperience>;

fn columns<'a>() -> Vec<Column<Row<'a>>> {
    vec![
        Column::new("employee", "Employee", |r: &Row<'a>| r.employee()).fixed(),
        Column::new("number", "Number", |r: &Row<'a>| r.employee_number()),
        Column::new("employer", "Employer", |r: &Row<'a>| r.record.data.employer.clone()),
        Column::new("sector", "Sector", |r: &Row<'a>| r.record.data.sector.label().to_string())
            .faceted(Sector::facet_options(), |r: &Row<'a>| r.record.data.sector.key().to_string()),
        Column::new("job_title", "Job title", |r: &Row<'a>| r.record.data.job_title.clone()),
        Column::new("start", "Start", |r: &Row<'a>| format_date_short(r.record.data.start_date))
            .keyed(|r: &Row<'a>| r.record.data.start_date.to_string()),
        Column::new("end", "End", |r: &Row<'a>| format_opt_date(r.record.data.end_date))
            .keyed(|r: &Row<'a>| r.record.data.end_date.map(|d| d.to_string()).unwrap_or_default()),
        Column::new("duration", "Duration", |r: &Row<'a>| {
            r.record.duration(Local::now().date_naive()).to_short()
        })
        .unsortable(),
        Column::new("attestation", "Attestation", |r: &Row<'a>| {
            r.record.data.attestation_reference.clone().unwrap_or_default()
        }),
    ]
}

/// Show the non-bank experience panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Non-bank Experience", "Prior experience in the public and private sectors");

    let can_edit = app.can_edit();
    let toolbar = record_toolbar(ui, "Add Experience", can_edit, app.is_loading(ResourceKind::NonBankExperiences));
    ui.add_space(10.0);
    sheet_filter(app, ui);

    let scope = app.selected_sheet;
    app.ensure_loaded::<InformationSheet>(None);
    app.ensure_loaded::<NonBankExperience>(scope);

    let columns = columns();
    let rows = linked_rows::<NonBankExperience>(&app.store, scope);
    let mut table = DataTable::new(&columns, &mut app.tables.non_bank);

    if toolbar.export {
        export_rows(&mut app.notifications, "Non-bank Experience", "non_bank_experience", &table, &rows);
    }

    let output = data_table::show(ui, "non_bank", &mut table, &rows, can_edit, |ui, row| {
        edit_delete_actions(ui, row.row_id(), can_edit)
    });
    let selected = table.state.selected_ids();

    if let Some(exp) = take_row_action::<NonBankExperience>(app, scope, output.action) {
        app.non_bank_form.open_edit(exp.id, NonBankExperienceForm::edit(&exp));
    }
    if output.delete_selected {
        request_bulk_delete::<NonBankExperience>(app, selected);
    }
    if toolbar.add {
        app.non_bank_form.open_new(NonBankExperienceForm::new(scope, app.today()));
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::NonBankExperiences);
    }

    show_form(app, ui.ctx());
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    if !app.non_bank_form.is_open {
        return;
    }

    let sheets = app.store.sheets();
    let dialog = &mut app.non_bank_form;
    let title = if dialog.is_editing() { "Edit Non-bank Experience" } else { "New Non-bank Experience" };
    let error = dialog.error.clone();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Employee:", |ui| {
            sheet_picker(ui, "non_bank_form_sheet", sheets, &mut f.sheet_id, false);
        });
        form_row(ui, "Employer:", |ui| {
            text_field(ui, &mut f.employer, "");
        });
        form_row(ui, "Sector:", |ui| {
            choice_combo(ui, "non_bank_form_sector", &mut f.sector);
        });
        form_row(ui, "Job title:", |ui| {
            text_field(ui, &mut f.job_title, "");
        });
        form_row(ui, "Start date:", |ui| date_field(ui, "non_bank_form_start", &mut f.start_date));
        form_row(ui, "End date:", |ui| optional_date_field(ui, "non_bank_form_end", &mut f.end_date));
        form_row(ui, "Attestation reference:", |ui| {
            text_field(ui, &mut f.attestation_reference, "Optional");
        });
    });

    match result {
        FormResult::Cancel => app.non_bank_form.reset(),
        FormResult::Save => match app.non_bank_form.fields.to_input() {
            Ok(input) => {
                let id = app.non_bank_form.begin_save();
                app.save::<NonBankExperience>(id, input);
            }
            Err(e) => app.non_bank_form.error = Some(e),
        },
        FormResult::None => {}
    }
}
