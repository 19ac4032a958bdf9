//! Employee information sheets: table, create/edit dialog and navigation to
//! the records attached to a sheet.

use chrono::Local;
use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::FOLDER_OPEN;

use super::{RowAction, edit_delete_actions, export_rows, record_toolbar};
use crate::api::ResourceKind;
use crate::dates::format_date_short;
use crate::models::{Choice, FamilyStatus, Gender, InformationSheet};
use crate::table::{Column, DataTable, FacetOption, TableRow};
use crate::ui::app::{App, Panel};
use crate::ui::components::{
    FormResult, choice_combo, date_field, form_row, form_window, optional_date_field, panel_header, text_field,
};
use crate::ui::data_table;
use crate::ui::forms::SheetForm;

/// Panels listing records attached to one sheet.
const RECORD_PANELS: [Panel; 4] = [
    Panel::BankExperiences,
    Panel::NonBankExperiences,
    Panel::DisciplinaryActions,
    Panel::Trainings,
];

enum SheetAction {
    Row(RowAction),
    Open(Panel, i64),
}

fn status_key(sheet: &InformationSheet) -> String {
    let key = if sheet.is_suspended() { "suspended" } else { "active" };
    key.to_string()
}

fn columns() -> Vec<Column<InformationSheet>> {
    vec![
        Column::new("number", "Number", |s: &InformationSheet| s.employee_number().to_string()),
        Column::new("name", "Name", InformationSheet::full_name).fixed(),
        Column::new("job_title", "Job title", |s: &InformationSheet| s.data.position.job_title.clone()),
        Column::new("structure", "Structure", |s: &InformationSheet| s.data.position.structure.clone()),
        Column::new("category", "Category", |s: &InformationSheet| s.data.classification.category.clone()),
        Column::new("gender", "Gender", |s: &InformationSheet| s.gender().label().to_string())
            .faceted(Gender::facet_options(), |s: &InformationSheet| s.gender().key().to_string()),
        Column::new("family_status", "Family status", |s: &InformationSheet| {
            s.data.identification.family_status.label().to_string()
        })
        .faceted(FamilyStatus::facet_options(), |s: &InformationSheet| {
            s.data.identification.family_status.key().to_string()
        }),
        Column::new("recruited", "Recruited", |s: &InformationSheet| {
            format_date_short(s.data.experience.recruitment_date)
        })
        .keyed(|s: &InformationSheet| s.data.experience.recruitment_date.to_string()),
        Column::new("seniority", "Seniority", |s: &InformationSheet| {
            s.seniority(Local::now().date_naive()).to_short()
        })
        .keyed(|s: &InformationSheet| {
            let today = Local::now().date_naive();
            let days = (s.service_end(today) - s.data.experience.recruitment_date).num_days();
            format!("{:06}", days.max(0))
        }),
        Column::new("status", "Status", |s: &InformationSheet| {
            let label = if s.is_suspended() { "Suspended" } else { "Active" };
            label.to_string()
        })
        .faceted(
            vec![FacetOption::new("active", "Active"), FacetOption::new("suspended", "Suspended")],
            status_key,
        ),
    ]
}

/// Show the information sheets panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Information Sheets", "Employee master records");

    app.ensure_loaded::<InformationSheet>(None);

    let can_edit = app.can_edit();
    let loading = app.is_loading(ResourceKind::InformationSheets) || app.fetching_sheet.is_some();
    let toolbar = record_toolbar(ui, "Add Employee", can_edit, loading);
    ui.add_space(10.0);

    let columns = columns();
    let rows = app.store.sheets();
    let mut table = DataTable::new(&columns, &mut app.tables.sheets);

    if toolbar.export {
        export_rows(&mut app.notifications, "Information Sheets", "information_sheets", &table, rows);
    }

    let output = data_table::show(ui, "sheets", &mut table, rows, can_edit, |ui, sheet| {
        let mut action = edit_delete_actions(ui, sheet.row_id(), can_edit).map(SheetAction::Row);
        ui.add_space(4.0);
        ui.menu_button(FOLDER_OPEN, |ui| {
            for panel in RECORD_PANELS {
                if ui.button(format!("{} {}", panel.icon(), panel.name())).clicked() {
                    action = Some(SheetAction::Open(panel, sheet.id));
                    ui.close();
                }
            }
        });
        action
    });
    let selected = table.state.selected_ids();

    match output.action {
        Some(SheetAction::Row(RowAction::Edit(id))) => app.edit_sheet(id),
        Some(SheetAction::Row(RowAction::Delete(id))) => {
            let label = app.store.sheet_label(id);
            app.request_delete(
                ResourceKind::InformationSheets,
                vec![id],
                format!("information sheet '{label}' and all its records"),
            );
        }
        Some(SheetAction::Open(panel, id)) => {
            app.selected_sheet = Some(id);
            app.current_panel = panel;
        }
        None => {}
    }

    if output.delete_selected {
        let count = selected.len();
        app.request_delete(
            ResourceKind::InformationSheets,
            selected,
            format!("{count} information sheet(s) and all their records"),
        );
    }

    if toolbar.add {
        app.sheet_form.open_new(SheetForm::new(app.today()));
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::InformationSheets);
    }

    show_form(app, ui.ctx());
}

fn section(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong());
    ui.end_row();
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    let dialog = &mut app.sheet_form;
    if !dialog.is_open {
        return;
    }

    let title = if dialog.is_editing() { "Edit Information Sheet" } else { "New Information Sheet" };
    let error = dialog.error.clone();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        section(ui, "Identification");
        form_row(ui, "Employee number:", |ui| {
            text_field(ui, &mut f.employee_number, "e.g. M00125");
        });
        form_row(ui, "Last name:", |ui| {
            text_field(ui, &mut f.last_name, "");
        });
        form_row(ui, "First name:", |ui| {
            text_field(ui, &mut f.first_name, "");
        });
        form_row(ui, "Birth date:", |ui| date_field(ui, "sheet_birth", &mut f.birth_date));
        form_row(ui, "Birth place:", |ui| {
            text_field(ui, &mut f.birth_place, "");
        });
        form_row(ui, "Gender:", |ui| {
            choice_combo(ui, "sheet_gender", &mut f.gender);
        });
        form_row(ui, "Family status:", |ui| {
            choice_combo(ui, "sheet_family", &mut f.family_status);
        });
        form_row(ui, "Children:", |ui| {
            text_field(ui, &mut f.children_count, "0");
        });
        form_row(ui, "National ID:", |ui| {
            text_field(ui, &mut f.national_id_number, "Digits only");
        });
        form_row(ui, "Social security:", |ui| {
            text_field(ui, &mut f.social_security_number, "Digits only");
        });
        form_row(ui, "Address:", |ui| {
            text_field(ui, &mut f.address, "");
        });
        form_row(ui, "Phone:", |ui| {
            text_field(ui, &mut f.phone, "");
        });

        section(ui, "Career");
        form_row(ui, "Recruitment date:", |ui| date_field(ui, "sheet_recruited", &mut f.recruitment_date));
        form_row(ui, "Prior experience (years):", |ui| {
            text_field(ui, &mut f.prior_experience_years, "0");
        });
        form_row(ui, "Job title:", |ui| {
            text_field(ui, &mut f.job_title, "");
        });
        form_row(ui, "Function:", |ui| {
            text_field(ui, &mut f.function, "Optional");
        });
        form_row(ui, "Structure:", |ui| {
            text_field(ui, &mut f.structure, "");
        });
        form_row(ui, "Category:", |ui| {
            text_field(ui, &mut f.category, "");
        });
        form_row(ui, "Section:", |ui| {
            text_field(ui, &mut f.section, "Optional");
        });
        form_row(ui, "Grade:", |ui| {
            text_field(ui, &mut f.grade, "Optional");
        });

        section(ui, "Assignment and decision");
        form_row(ui, "Assigned to:", |ui| {
            text_field(ui, &mut f.assignment_structure, "Optional");
        });
        form_row(ui, "Assignment date:", |ui| {
            optional_date_field(ui, "sheet_assignment", &mut f.assignment_date)
        });
        form_row(ui, "Decision number:", |ui| {
            text_field(ui, &mut f.decision_number, "Optional");
        });
        form_row(ui, "Decision date:", |ui| optional_date_field(ui, "sheet_decision", &mut f.decision_date));

        section(ui, "Suspension");
        form_row(ui, "Suspended:", |ui| {
            ui.checkbox(&mut f.is_suspended, "");
        });
        if f.is_suspended {
            form_row(ui, "Suspension date:", |ui| {
                optional_date_field(ui, "sheet_suspension", &mut f.suspension_date)
            });
            form_row(ui, "Reason:", |ui| {
                text_field(ui, &mut f.suspension_reason, "Optional");
            });
        }
    });

    match result {
        FormResult::Cancel => app.sheet_form.reset(),
        FormResult::Save => match app.sheet_form.fields.to_input() {
            Ok(input) => {
                let id = app.sheet_form.begin_save();
                app.save::<InformationSheet>(id, input);
            }
            Err(e) => app.sheet_form.error = Some(e),
        },
        FormResult::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::information_sheet::fixtures::sheet;
    use crate::table::TableState;

    #[test]
    fn test_status_facet() {
        let mut suspended = sheet(2, "Haddad", "Samia", Gender::Female);
        suspended.data.suspension.is_suspended = true;
        let rows = vec![sheet(1, "Benali", "Karim", Gender::Male), suspended];

        let columns = columns();
        let mut state = TableState::new("name", 20);
        state.toggle_facet("status", "suspended");
        let table = DataTable::new(&columns, &mut state);

        let filtered = table.filtered(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
        assert_eq!(table.search_title(), "Name");
    }

    #[test]
    fn test_search_by_name() {
        let rows = vec![
            sheet(1, "Benali", "Karim", Gender::Male),
            sheet(2, "Haddad", "Samia", Gender::Female),
        ];
        let columns = columns();
        let mut state = TableState::new("name", 20);
        state.set_search("hadd");
        let table = DataTable::new(&columns, &mut state);
        assert_eq!(table.filtered(&rows).len(), 1);
    }
}
