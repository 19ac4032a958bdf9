//! Positions held within the banking sector.

use chrono::Local;
use eframe::egui::{self, Ui};

use super::{
    Linked, edit_delete_actions, export_rows, linked_rows, record_toolbar, request_bulk_delete, sheet_filter,
    take_row_action,
};
use crate::api::ResourceKind;
use crate::dates::{format_date_short, format_opt_date};
use crate::models::{BankExperience, InformationSheet};
use crate::table::{Column, DataTable, FacetOption, TableRow};
use crate::ui::app::App;
use crate::ui::components::{
    FormResult, date_field, form_row, form_window, optional_date_field, panel_header, sheet_picker, text_field,
};
use crate::ui::data_table;
use crate::ui::forms::BankExperienceForm;

type Row<'a> = Linked<'a, BankExperience>;

fn columns<'a>() -> Vec<Column<Row<'a>>> {
    vec![
        Column::new("employee", "Employee", |r: &Row<'a>| r.employee()).fixed(),
        Column::new("number", "Number", |r: &Row<'a>| r.employee_number()),
        Column::new("institution", "Institution", |r: &Row<'a>| r.record.data.institution.clone()),
        Column::new("job_title", "Job title", |r: &Row<'a>| r.record.data.job_title.clone()),
        Column::new("structure", "Structure", |r: &Row<'a>| r.record.data.structure.clone()),
        Column::new("start", "Start", |r: &Row<'a>| format_date_short(r.record.data.start_date))
            .keyed(|r: &Row<'a>| r.record.data.start_date.to_string()),
        Column::new("end", "End", |r: &Row<'a>| format_opt_date(r.record.data.end_date)).keyed(|r: &Row<'a>| {
            r.record
                .data
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "9999-12-31".to_string())
        }),
        Column::new("duration", "Duration", |r: &Row<'a>| {
            r.record.duration(Local::now().date_naive()).to_short()
        })
        .keyed(|r: &Row<'a>| {
            let end = r.record.data.end_date.unwrap_or_else(|| Local::now().date_naive());
            format!("{:06}", (end - r.record.data.start_date).num_days().max(0))
        }),
        Column::new("current", "Current", |r: &Row<'a>| {
            let label = if r.record.is_current() { "Current" } else { "Past" };
            label.to_string()
        })
        .faceted(
            vec![FacetOption::new("current", "Current"), FacetOption::new("past", "Past")],
            |r: &Row<'a>| {
                let key = if r.record.is_current() { "current" } else { "past" };
                key.to_string()
            },
        ),
        Column::new("classification", "Classification", |r: &Row<'a>| {
            r.record.data.classification.clone().unwrap_or_default()
        }),
        Column::new("decision", "Decision", |r: &Row<'a>| {
            r.record.data.decision_reference.clone().unwrap_or_default()
        })
        .unsortable(),
    ]
}

/// Show the bank experience panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Bank Experience", "Positions held within the banking sector");

    let can_edit = app.can_edit();
    let toolbar = record_toolbar(ui, "Add Experience", can_edit, app.is_loading(ResourceKind::BankExperiences));
    ui.add_space(10.0);
    sheet_filter(app, ui);

    let scope = app.selected_sheet;
    app.ensure_loaded::<InformationSheet>(None);
    app.ensure_loaded::<BankExperience>(scope);

    let columns = columns();
    let rows = linked_rows::<BankExperience>(&app.store, scope);
    let mut table = DataTable::new(&columns, &mut app.tables.bank);

    if toolbar.export {
        export_rows(&mut app.notifications, "Bank Experience", "bank_experience", &table, &rows);
    }

    let output = data_table::show(ui, "bank", &mut table, &rows, can_edit, |ui, row| {
        edit_delete_actions(ui, row.row_id(), can_edit)
    });
    let selected = table.state.selected_ids();

    if let Some(exp) = take_row_action::<BankExperience>(app, scope, output.action) {
        app.bank_form.open_edit(exp.id, BankExperienceForm::edit(&exp));
    }
    if output.delete_selected {
        request_bulk_delete::<BankExperience>(app, selected);
    }
    if toolbar.add {
        app.bank_form.open_new(BankExperienceForm::new(scope, app.today()));
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::BankExperiences);
    }

    show_form(app, ui.ctx());
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    if !app.bank_form.is_open {
        return;
    }

    let sheets = app.store.sheets();
    let dialog = &mut app.bank_form;
    let title = if dialog.is_editing() { "Edit Bank Experience" } else { "New Bank Experience" };
    let error = dialog.error.clone();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Employee:", |ui| {
            sheet_picker(ui, "bank_form_sheet", sheets, &mut f.sheet_id, false);
        });
        form_row(ui, "Institution:", |ui| {
            text_field(ui, &mut f.institution, "e.g. BNA, CPA, BADR");
        });
        form_row(ui, "Job title:", |ui| {
            text_field(ui, &mut f.job_title, "");
        });
        form_row(ui, "Structure:", |ui| {
            text_field(ui, &mut f.structure, "Branch or department");
        });
        form_row(ui, "Start date:", |ui| date_field(ui, "bank_form_start", &mut f.start_date));
        form_row(ui, "End date:", |ui| optional_date_field(ui, "bank_form_end", &mut f.end_date));
        form_row(ui, "Classification:", |ui| {
            text_field(ui, &mut f.classification, "Optional");
        });
        form_row(ui, "Decision reference:", |ui| {
            text_field(ui, &mut f.decision_reference, "Optional");
        });
    });

    match result {
        FormResult::Cancel => app.bank_form.reset(),
        FormResult::Save => match app.bank_form.fields.to_input() {
            Ok(input) => {
                let id = app.bank_form.begin_save();
                app.save::<BankExperience>(id, input);
            }
            Err(e) => app.bank_form.error = Some(e),
        },
        FormResult::None => {}
    }
}
