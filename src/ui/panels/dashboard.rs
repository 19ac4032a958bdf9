//! Dashboard panel with module counts, navigation cards, quick actions and
//! the activity log.

use eframe::egui::{self, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{GAVEL, GRADUATION_CAP, IDENTIFICATION_CARD, PRINTER};

use crate::api::ResourceKind;
use crate::models::*;
use crate::ui::app::{App, Panel, PrintTab};
use crate::ui::components::{dashboard_card, level_color, stat_card};
use crate::ui::forms::{CertificateForm, SheetForm};
use crate::ui::store::Store;

/// Figures shown in the stat cards. `None` until the list is loaded.
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub employees: Option<usize>,
    pub suspended: usize,
    pub bank_experiences: Option<usize>,
    pub non_bank_experiences: Option<usize>,
    pub disciplinary: Option<usize>,
    pub active_sanctions: usize,
    pub trainings: Option<usize>,
    pub trainings_in_progress: usize,
    pub pending_certificates: Option<usize>,
    pub open_investigations: Option<usize>,
    pub users: Option<usize>,
}

impl Summary {
    pub fn from_store(store: &Store) -> Self {
        let certificates = store.count(ResourceKind::WorkCertificateRequests).map(|_| {
            store
                .list::<WorkCertificateRequest>(None)
                .iter()
                .filter(|r| r.data.status == CertificateStatus::Pending)
                .count()
        });

        let open_daira = store
            .count(ResourceKind::DairaInvestigationRequests)
            .map(|_| {
                store
                    .list::<DairaInvestigationRequest>(None)
                    .iter()
                    .filter(|r| !r.data.status.is_terminal())
                    .count()
            });
        let open_wilaya = store
            .count(ResourceKind::WilayaInvestigationRequests)
            .map(|_| {
                store
                    .list::<WilayaInvestigationRequest>(None)
                    .iter()
                    .filter(|r| !r.data.status.is_terminal())
                    .count()
            });
        let open_investigations = match (open_daira, open_wilaya) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
        };

        Self {
            employees: store.count(ResourceKind::InformationSheets),
            suspended: store.sheets().iter().filter(|s| s.is_suspended()).count(),
            bank_experiences: store.count(ResourceKind::BankExperiences),
            non_bank_experiences: store.count(ResourceKind::NonBankExperiences),
            disciplinary: store.count(ResourceKind::DisciplinaryActions),
            active_sanctions: store
                .list::<DisciplinaryAction>(None)
                .iter()
                .filter(|a| a.is_active())
                .count(),
            trainings: store.count(ResourceKind::ProfessionalTrainings),
            trainings_in_progress: store
                .list::<ProfessionalTraining>(None)
                .iter()
                .filter(|t| t.data.status == TrainingStatus::InProgress)
                .count(),
            pending_certificates: certificates,
            open_investigations,
            users: store.count(ResourceKind::Users),
        }
    }
}

fn figure(value: Option<usize>) -> String {
    value.map_or_else(|| "...".to_string(), |n| n.to_string())
}

fn load_all(app: &mut App) {
    app.ensure_loaded::<InformationSheet>(None);
    app.ensure_loaded::<BankExperience>(None);
    app.ensure_loaded::<NonBankExperience>(None);
    app.ensure_loaded::<DisciplinaryAction>(None);
    app.ensure_loaded::<ProfessionalTraining>(None);
    app.ensure_loaded::<WorkCertificateRequest>(None);
    app.ensure_loaded::<DairaInvestigationRequest>(None);
    app.ensure_loaded::<WilayaInvestigationRequest>(None);
    if app.role().can_manage_users() {
        app.ensure_loaded::<User>(None);
    }
}

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    load_all(app);
    let summary = Summary::from_store(&app.store);

    ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);

            // Header
            ui.label(RichText::new(&app.config.ui.organization_name).size(28.0).strong());
            ui.add_space(5.0);
            ui.label(RichText::new("Human resources back-office").size(14.0).weak());

            ui.add_space(20.0);
        });

        // Stat cards
        ui.horizontal_wrapped(|ui| {
            stat_card(
                ui,
                "Employees",
                &figure(summary.employees),
                &format!("{} suspended", summary.suspended),
            );
            stat_card(
                ui,
                "Bank Experience",
                &figure(summary.bank_experiences),
                "Positions in the sector",
            );
            stat_card(
                ui,
                "Non-bank Experience",
                &figure(summary.non_bank_experiences),
                "Prior positions",
            );
            stat_card(
                ui,
                "Disciplinary Actions",
                &figure(summary.disciplinary),
                &format!("{} applied", summary.active_sanctions),
            );
            stat_card(
                ui,
                "Training",
                &figure(summary.trainings),
                &format!("{} in progress", summary.trainings_in_progress),
            );
            stat_card(
                ui,
                "Work Certificates",
                &figure(summary.pending_certificates),
                "Pending requests",
            );
            stat_card(
                ui,
                "Investigations",
                &figure(summary.open_investigations),
                "Open daira and wilaya requests",
            );
            if app.role().can_manage_users() {
                stat_card(ui, "Users", &figure(summary.users), "Back-office accounts");
            }
        });

        ui.add_space(25.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 4.0;
        let spacing = 30.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
        let card_size = egui::vec2(card_width, card_width * 0.75);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            if dashboard_card(ui, "Employees", "Information sheets", IDENTIFICATION_CARD, card_size).clicked() {
                next_panel = Some(Panel::InformationSheets);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "Discipline", "Sanctions and decisions", GAVEL, card_size).clicked() {
                next_panel = Some(Panel::DisciplinaryActions);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "Training", "Sessions and certificates", GRADUATION_CAP, card_size).clicked() {
                next_panel = Some(Panel::Trainings);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "Print Reports", "Certificates and requests", PRINTER, card_size).clicked() {
                next_panel = Some(Panel::PrintReports);
            }
        });

        ui.add_space(25.0);

        // Two-column layout: Quick Actions | Recent Activity
        let column_width = ((ui.available_width() - 40.0) / 2.0).max(200.0);

        ui.horizontal(|ui| {
            ui.add_space(10.0);

            // Left column - Quick Actions
            ui.vertical(|ui| {
                ui.set_width(column_width);

                egui::Frame::new()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(Margin::same(15))
                    .corner_radius(CornerRadius::same(8))
                    .show(ui, |ui| {
                        ui.set_min_width(column_width - 30.0);

                        ui.label(RichText::new("Quick Actions").strong());
                        ui.add_space(10.0);

                        if app.can_edit() {
                            if ui.button("Add Employee").clicked() {
                                app.sheet_form.open_new(SheetForm::new(app.today()));
                                next_panel = Some(Panel::InformationSheets);
                            }

                            ui.add_space(5.0);

                            if ui.button("New Work Certificate Request").clicked() {
                                app.certificate_form.open_new(CertificateForm::new(None, app.today()));
                                app.print_tab = PrintTab::WorkCertificates;
                                next_panel = Some(Panel::PrintReports);
                            }

                            ui.add_space(5.0);
                        }

                        if ui.button("Refresh All Data").clicked() {
                            app.cache.invalidate_all();
                        }
                    });
            });

            ui.add_space(20.0);

            // Right column - Recent Activity
            ui.vertical(|ui| {
                ui.set_width(column_width);

                egui::Frame::new()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(Margin::same(15))
                    .corner_radius(CornerRadius::same(8))
                    .show(ui, |ui| {
                        ui.set_min_width(column_width - 30.0);

                        ui.horizontal(|ui| {
                            ui.label(RichText::new("Recent Activity").strong());
                            if ui.small_button("Clear").clicked() {
                                app.notifications.clear_log();
                            }
                        });
                        ui.add_space(10.0);

                        ScrollArea::vertical()
                            .id_salt("recent_activity")
                            .max_height(180.0)
                            .show(ui, |ui| {
                                let mut empty = true;
                                for entry in app.notifications.recent(10) {
                                    empty = false;
                                    ui.horizontal(|ui| {
                                        ui.label(
                                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                                .small()
                                                .weak(),
                                        );
                                        ui.label(RichText::new(&entry.message).color(level_color(entry.level)));
                                    });
                                }
                                if empty {
                                    ui.label(RichText::new("No recent activity").weak());
                                }
                            });
                    });
            });
        });
    });

    next_panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;
    use crate::cache::QueryKey;
    use crate::models::information_sheet::fixtures::sheet;

    fn request(id: i64, status: InvestigationStatus) -> DairaInvestigationRequest {
        DairaInvestigationRequest {
            id,
            data: InvestigationRequestInput {
                information_sheet_id: 1,
                reference_number: format!("ENQ/{id}"),
                authority: "Hussein Dey".to_string(),
                subject: "Enquête administrative".to_string(),
                request_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                status,
            },
        }
    }

    #[test]
    fn test_summary_unloaded() {
        let summary = Summary::from_store(&Store::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(figure(summary.employees), "...");
    }

    #[test]
    fn test_summary_counts() {
        let mut store = Store::new();
        let mut suspended = sheet(2, "Haddad", "Samia", Gender::Female);
        suspended.data.suspension.is_suspended = true;
        store.insert(
            QueryKey::all(ResourceKind::InformationSheets),
            InformationSheet::into_records(vec![sheet(1, "Benali", "Karim", Gender::Male), suspended]),
        );
        store.insert(
            QueryKey::all(ResourceKind::DairaInvestigationRequests),
            DairaInvestigationRequest::into_records(vec![
                request(1, InvestigationStatus::Pending),
                request(2, InvestigationStatus::Completed),
                request(3, InvestigationStatus::InProgress),
            ]),
        );

        let summary = Summary::from_store(&store);
        assert_eq!(summary.employees, Some(2));
        assert_eq!(summary.suspended, 1);
        assert_eq!(summary.open_investigations, Some(2));
        assert_eq!(summary.pending_certificates, None);
        assert_eq!(figure(summary.employees), "2");
    }
}
