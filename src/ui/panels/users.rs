//! Back-office accounts, administrators only.

use eframe::egui::{self, Ui};
use egui_phosphor::regular::PENCIL;

use super::{RowAction, edit_delete_actions, export_rows, record_toolbar, request_bulk_delete, take_row_action};
use crate::api::ResourceKind;
use crate::models::{Choice, Role, User};
use crate::table::{Column, DataTable, FacetOption};
use crate::ui::app::App;
use crate::ui::components::{FormResult, choice_combo, form_row, form_window, panel_header, row_action, text_field};
use crate::ui::data_table;
use crate::ui::forms::{MIN_PASSWORD_LEN, UserForm};

fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("username", "Username", |u: &User| u.username.clone()),
        Column::new("full_name", "Full name", |u: &User| u.full_name.clone()).fixed(),
        Column::new("email", "Email", |u: &User| u.email.clone().unwrap_or_default()),
        Column::new("role", "Role", |u: &User| u.role.label().to_string())
            .faceted(Role::facet_options(), |u: &User| u.role.key().to_string()),
        Column::new("active", "Active", |u: &User| {
            let label = if u.is_active { "Active" } else { "Disabled" };
            label.to_string()
        })
        .faceted(
            vec![FacetOption::new("active", "Active"), FacetOption::new("disabled", "Disabled")],
            |u: &User| {
                let key = if u.is_active { "active" } else { "disabled" };
                key.to_string()
            },
        ),
    ]
}

/// Show the users panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Users", "Accounts allowed to use the back-office");

    if !app.role().can_manage_users() {
        ui.weak("Only administrators can manage users.");
        return;
    }

    app.ensure_loaded::<User>(None);

    let me = app.session.as_ref().map(|s| s.user.id);
    let toolbar = record_toolbar(ui, "Add User", true, app.is_loading(ResourceKind::Users));
    ui.add_space(10.0);

    let columns = columns();
    let rows = app.store.list::<User>(None);
    let mut table = DataTable::new(&columns, &mut app.tables.users);

    if toolbar.export {
        export_rows(&mut app.notifications, "Users", "users", &table, rows);
    }

    let output = data_table::show(ui, "users", &mut table, rows, true, |ui, user| {
        // No deleting the account in use.
        if Some(user.id) == me {
            ui.add_space(4.0);
            return row_action(ui, PENCIL, "Edit").clicked().then_some(RowAction::Edit(user.id));
        }
        edit_delete_actions(ui, user.id, true)
    });
    let selected: Vec<i64> = table
        .state
        .selected_ids()
        .into_iter()
        .filter(|id| Some(*id) != me)
        .collect();

    if let Some(user) = take_row_action::<User>(app, None, output.action) {
        app.user_form.open_edit(user.id, UserForm::edit(&user));
    }
    if output.delete_selected {
        if selected.is_empty() {
            app.notifications.warning("You cannot delete your own account");
        } else {
            request_bulk_delete::<User>(app, selected);
        }
    }
    if toolbar.add {
        app.user_form.open_new(UserForm::new());
    }
    if toolbar.refresh {
        app.refresh(ResourceKind::Users);
    }

    show_form(app, ui.ctx());
}

fn show_form(app: &mut App, ctx: &egui::Context) {
    let dialog = &mut app.user_form;
    if !dialog.is_open {
        return;
    }

    let creating = !dialog.is_editing();
    let title = if creating { "New User" } else { "Edit User" };
    let error = dialog.error.clone();
    let f = &mut dialog.fields;

    let result = form_window(ctx, title, dialog.saving, &error, |ui| {
        form_row(ui, "Username:", |ui| {
            text_field(ui, &mut f.username, "No spaces");
        });
        form_row(ui, "Full name:", |ui| {
            text_field(ui, &mut f.full_name, "");
        });
        form_row(ui, "Email:", |ui| {
            text_field(ui, &mut f.email, "Optional");
        });
        form_row(ui, "Role:", |ui| {
            choice_combo(ui, "user_form_role", &mut f.role);
        });
        form_row(ui, "Active:", |ui| {
            ui.checkbox(&mut f.is_active, "");
        });
        if creating {
            form_row(ui, "Password:", |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut f.password)
                        .password(true)
                        .desired_width(260.0)
                        .hint_text(format!("At least {MIN_PASSWORD_LEN} characters")),
                );
            });
            form_row(ui, "Confirm password:", |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut f.password_confirm)
                        .password(true)
                        .desired_width(260.0),
                );
            });
        }
    });

    match result {
        FormResult::Cancel => app.user_form.reset(),
        FormResult::Save => match app.user_form.fields.to_input(creating) {
            Ok(input) => {
                let id = app.user_form.begin_save();
                app.save::<User>(id, input);
            }
            Err(e) => app.user_form.error = Some(e),
        },
        FormResult::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableState;

    fn user(id: i64, username: &str, role: Role, is_active: bool) -> User {
        User {
            id,
            username: username.to_string(),
            full_name: username.to_uppercase(),
            email: None,
            role,
            is_active,
        }
    }

    #[test]
    fn test_role_and_active_facets_combine() {
        let rows = vec![
            user(1, "admin", Role::Admin, true),
            user(2, "amine", Role::HrAgent, true),
            user(3, "nadia", Role::HrAgent, false),
        ];
        let columns = columns();
        let mut state = TableState::new("full_name", 20);
        state.toggle_facet("role", "hr_agent");
        state.toggle_facet("active", "active");
        let table = DataTable::new(&columns, &mut state);

        let filtered = table.filtered(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].username, "amine");
    }
}
