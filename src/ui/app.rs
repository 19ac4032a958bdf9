//! Main application state and the async plumbing behind it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use eframe::egui;
use egui_phosphor::regular::{BANK, BRIEFCASE, GAVEL, GEAR, GRADUATION_CAP, HOUSE, IDENTIFICATION_CARD, PRINTER, USERS};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, Records, Resource, ResourceKind};
use crate::cache::{QueryCache, QueryKey};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::*;
use crate::prefs::Preferences;
use crate::print::Issuer;
use crate::table::TableState;
use crate::toast::Notifications;

use super::forms::*;
use super::panels;
use super::shell;
use super::store::Store;

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    InformationSheets,
    BankExperiences,
    NonBankExperiences,
    DisciplinaryActions,
    Trainings,
    PrintReports,
    Users,
    Settings,
}

impl Panel {
    pub const ALL: [Panel; 9] = [
        Panel::Dashboard,
        Panel::InformationSheets,
        Panel::BankExperiences,
        Panel::NonBankExperiences,
        Panel::DisciplinaryActions,
        Panel::Trainings,
        Panel::PrintReports,
        Panel::Users,
        Panel::Settings,
    ];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::InformationSheets => "Information Sheets",
            Panel::BankExperiences => "Bank Experience",
            Panel::NonBankExperiences => "Non-bank Experience",
            Panel::DisciplinaryActions => "Disciplinary Actions",
            Panel::Trainings => "Training",
            Panel::PrintReports => "Print Reports",
            Panel::Users => "Users",
            Panel::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Panel::Dashboard => HOUSE,
            Panel::InformationSheets => IDENTIFICATION_CARD,
            Panel::BankExperiences => BANK,
            Panel::NonBankExperiences => BRIEFCASE,
            Panel::DisciplinaryActions => GAVEL,
            Panel::Trainings => GRADUATION_CAP,
            Panel::PrintReports => PRINTER,
            Panel::Users => USERS,
            Panel::Settings => GEAR,
        }
    }

    /// Whether a user with `role` may open this panel.
    pub fn is_allowed(&self, role: Role) -> bool {
        match self {
            Panel::Users => role.can_manage_users(),
            _ => true,
        }
    }
}

/// Print reports tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintTab {
    #[default]
    WorkCertificates,
    Daira,
    Wilaya,
}

/// Document shown in the print preview window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTarget {
    Certificate(i64),
    Investigation(InvestigationLevel, i64),
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Queries, tagged with the session generation that issued them
    Loaded {
        generation: u64,
        key: QueryKey,
        records: Records,
    },
    LoadFailed {
        generation: u64,
        key: QueryKey,
        error: AppError,
    },
    SheetFetched {
        generation: u64,
        sheet: InformationSheet,
    },
    SheetFetchFailed {
        generation: u64,
        id: i64,
        error: AppError,
    },

    // Mutations
    Saved { kind: ResourceKind, message: String },
    Deleted {
        kind: ResourceKind,
        count: usize,
        error: Option<AppError>,
    },
    MutationFailed { kind: ResourceKind, error: AppError },

    // Auth
    LoggedIn(Session),
    LoginFailed(AppError),
    SessionRestored(User),
    SessionCheckFailed(AppError),

    // Settings
    ConnectionTested(Result<(), String>),
}

/// Target for delete confirmation dialog.
#[derive(Clone, Debug)]
pub struct DeleteTarget {
    pub kind: ResourceKind,
    pub ids: Vec<i64>,
    pub description: String,
    /// The delete request is running.
    pub deleting: bool,
    /// Error of the last attempt; the dialog stays open with it.
    pub error: Option<String>,
}

/// Filter and selection state of every table.
pub struct Tables {
    pub sheets: TableState,
    pub bank: TableState,
    pub non_bank: TableState,
    pub disciplinary: TableState,
    pub trainings: TableState,
    pub certificates: TableState,
    pub daira: TableState,
    pub wilaya: TableState,
    pub users: TableState,
}

impl Tables {
    pub fn new(page_size: usize) -> Self {
        Self {
            sheets: TableState::new("name", page_size),
            bank: TableState::new("job_title", page_size),
            non_bank: TableState::new("employer", page_size),
            disciplinary: TableState::new("sanction", page_size),
            trainings: TableState::new("title", page_size),
            certificates: TableState::new("employee", page_size),
            daira: TableState::new("reference", page_size),
            wilaya: TableState::new("reference", page_size),
            users: TableState::new("full_name", page_size),
        }
    }

    pub fn for_kind(&mut self, kind: ResourceKind) -> &mut TableState {
        match kind {
            ResourceKind::InformationSheets => &mut self.sheets,
            ResourceKind::BankExperiences => &mut self.bank,
            ResourceKind::NonBankExperiences => &mut self.non_bank,
            ResourceKind::DisciplinaryActions => &mut self.disciplinary,
            ResourceKind::ProfessionalTrainings => &mut self.trainings,
            ResourceKind::WorkCertificateRequests => &mut self.certificates,
            ResourceKind::DairaInvestigationRequests => &mut self.daira,
            ResourceKind::WilayaInvestigationRequests => &mut self.wilaya,
            ResourceKind::Users => &mut self.users,
        }
    }

    pub fn set_page_size(&mut self, size: usize) {
        for kind in ResourceKind::ALL {
            self.for_kind(kind).set_page_size(size);
        }
    }
}

/// Main application state.
pub struct App {
    // Runtime
    pub rt: tokio::runtime::Runtime,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Data services
    pub api: ApiClient,
    pub cache: QueryCache,
    pub store: Store,
    pub notifications: Notifications,

    // Configuration
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_modified: bool,
    pub prefs: Preferences,
    pub prefs_path: PathBuf,

    // Session
    pub session: Option<Session>,
    pub login_form: LoginForm,
    checking_session: bool,
    /// Bumped on logout so results of older requests are dropped.
    session_generation: u64,

    // Navigation
    pub current_panel: Panel,

    // Tables
    pub tables: Tables,
    /// Information sheet the child panels are restricted to.
    pub selected_sheet: Option<i64>,

    // Print reports
    pub print_tab: PrintTab,
    pub preview: Option<PreviewTarget>,

    // Forms
    /// Information sheet being fetched before its edit form opens.
    pub fetching_sheet: Option<i64>,
    pub sheet_form: FormDialog<SheetForm>,
    pub bank_form: FormDialog<BankExperienceForm>,
    pub non_bank_form: FormDialog<NonBankExperienceForm>,
    pub disciplinary_form: FormDialog<DisciplinaryForm>,
    pub training_form: FormDialog<TrainingForm>,
    pub certificate_form: FormDialog<CertificateForm>,
    pub daira_form: FormDialog<InvestigationForm>,
    pub wilaya_form: FormDialog<InvestigationForm>,
    pub user_form: FormDialog<UserForm>,

    // Dialogs
    pub delete_target: Option<DeleteTarget>,

    // Settings connection test
    pub connection_test: Option<Result<(), String>>,
    pub testing_connection: bool,

    pending_mutations: usize,
}

impl App {
    pub fn new(
        rt: tokio::runtime::Runtime,
        api: ApiClient,
        config: AppConfig,
        config_path: PathBuf,
        prefs: Preferences,
        prefs_path: PathBuf,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            tx,
            rx,
            api,
            cache: QueryCache::new(config.cache.stale_after()),
            store: Store::new(),
            notifications: Notifications::new(),
            tables: Tables::new(config.ui.page_size),
            config,
            config_path,
            config_modified: false,
            prefs,
            prefs_path,
            session: None,
            login_form: LoginForm::default(),
            checking_session: false,
            session_generation: 0,
            current_panel: Panel::default(),
            selected_sheet: None,
            print_tab: PrintTab::default(),
            preview: None,
            fetching_sheet: None,
            sheet_form: FormDialog::default(),
            bank_form: FormDialog::default(),
            non_bank_form: FormDialog::default(),
            disciplinary_form: FormDialog::default(),
            training_form: FormDialog::default(),
            certificate_form: FormDialog::default(),
            daira_form: FormDialog::default(),
            wilaya_form: FormDialog::default(),
            user_form: FormDialog::default(),
            delete_target: None,
            connection_test: None,
            testing_connection: false,
            pending_mutations: 0,
        };

        app.restore_session();
        app
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn role(&self) -> Role {
        self.session.as_ref().map(|s| s.user.role).unwrap_or_default()
    }

    pub fn can_edit(&self) -> bool {
        self.role().can_edit()
    }

    /// Organization and signatory printed on documents.
    pub fn issuer(&self) -> Issuer {
        Issuer::new(&self.config.ui.organization_name, &self.config.ui.city)
    }

    /// Any request still running.
    pub fn is_busy(&self) -> bool {
        self.pending_mutations > 0
            || self.cache.any_in_flight()
            || self.login_form.pending
            || self.checking_session
            || self.testing_connection
            || self.fetching_sheet.is_some()
            || self.delete_target.as_ref().is_some_and(|t| t.deleting)
    }

    // ---------------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------------

    /// Reuse the saved session and check it in the background.
    fn restore_session(&mut self) {
        let Some(session) = self.prefs.session.clone() else {
            return;
        };
        info!("Restoring session for {}", session.user.username);
        self.api.set_token(Some(session.token.clone()));
        self.session = Some(session);
        self.checking_session = true;

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let msg = match api.me().await {
                Ok(user) => UiMessage::SessionRestored(user),
                Err(e) => UiMessage::SessionCheckFailed(e),
            };
            let _ = tx.send(msg);
        });
    }

    pub fn login(&mut self) {
        if let Err(e) = self.login_form.validate() {
            self.login_form.error = Some(e);
            return;
        }
        self.login_form.pending = true;
        self.login_form.error = None;

        let mut api = self.api.clone();
        api.set_token(None);
        let username = self.login_form.username.clone();
        let password = self.login_form.password.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let msg = match api.login(&username, &password).await {
                Ok(session) => UiMessage::LoggedIn(session),
                Err(e) => UiMessage::LoginFailed(e),
            };
            let _ = tx.send(msg);
        });
    }

    fn start_session(&mut self, session: Session) {
        info!("Session started for {}", session.user.username);
        self.api.set_token(Some(session.token.clone()));
        self.notifications.success(format!("Welcome, {}", session.user.full_name));
        self.prefs.session = Some(session.clone());
        self.session = Some(session);
        self.save_prefs();
        self.login_form = LoginForm::default();
        self.current_panel = Panel::Dashboard;
    }

    pub fn logout(&mut self) {
        let api = self.api.clone();
        self.rt.spawn(async move {
            if let Err(e) = api.logout().await {
                warn!("Logout request failed: {}", e);
            }
        });
        info!("Logged out");
        self.end_session();
        self.notifications.info("Logged out");
    }

    /// The API rejected our token.
    fn expire_session(&mut self) {
        warn!("Session rejected by the API");
        self.end_session();
        self.notifications.warning("Your session has expired, please log in again");
    }

    fn end_session(&mut self) {
        self.session_generation += 1;
        self.session = None;
        self.checking_session = false;
        self.api.set_token(None);
        self.prefs.session = None;
        self.save_prefs();

        self.cache.clear();
        self.store.clear();
        self.tables = Tables::new(self.config.ui.page_size);
        self.close_all_forms();
        self.delete_target = None;
        self.preview = None;
        self.fetching_sheet = None;
        self.selected_sheet = None;
        self.current_panel = Panel::Dashboard;
    }

    /// Clear the session when `error` says it is no longer valid.
    fn handle_unauthorized(&mut self, error: &AppError) -> bool {
        if error.is_unauthorized() && self.session.is_some() {
            self.expire_session();
            true
        } else {
            false
        }
    }

    pub fn save_prefs(&mut self) {
        if let Err(e) = self.prefs.save(&self.prefs_path) {
            error!("Failed to save preferences: {}", e);
            self.notifications.warning(format!("Could not save preferences: {e}"));
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Fetch `R` for `scope` unless a fresh copy is held or a fetch is running.
    pub fn ensure_loaded<R: Resource>(&mut self, scope: Option<i64>) {
        if self.session.is_none() {
            return;
        }
        let key = QueryKey::scoped(R::KIND, scope);
        if !self.cache.needs_fetch(key, Instant::now()) {
            return;
        }
        self.cache.mark_fetching(key);

        let generation = self.session_generation;
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let msg = match api.list::<R>(scope).await {
                Ok(items) => UiMessage::Loaded {
                    generation,
                    key,
                    records: R::into_records(items),
                },
                Err(error) => UiMessage::LoadFailed { generation, key, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Refetch every list of `kind` on next access.
    pub fn refresh(&mut self, kind: ResourceKind) {
        debug!("Refreshing {}", kind.label());
        self.cache.invalidate(kind);
    }

    pub fn is_loading(&self, kind: ResourceKind) -> bool {
        self.cache.is_fetching_kind(kind)
    }

    /// Fetch the server copy of a sheet, then open it for editing.
    pub fn edit_sheet(&mut self, id: i64) {
        if self.fetching_sheet.is_some() {
            return;
        }
        self.fetching_sheet = Some(id);

        let generation = self.session_generation;
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let msg = match api.get::<InformationSheet>(id).await {
                Ok(sheet) => UiMessage::SheetFetched { generation, sheet },
                Err(error) => UiMessage::SheetFetchFailed { generation, id, error },
            };
            let _ = tx.send(msg);
        });
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Create (`id` is `None`) or update a record.
    pub fn save<R: Resource>(&mut self, id: Option<i64>, input: R::Input) {
        self.pending_mutations += 1;
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = match id {
                Some(id) => api.update::<R>(id, &input).await,
                None => api.create::<R>(&input).await,
            };
            let msg = match result {
                Ok(record) => UiMessage::Saved {
                    kind: R::KIND,
                    message: format!("{} '{}' saved", R::NAME, record.label()),
                },
                Err(error) => UiMessage::MutationFailed { kind: R::KIND, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Delete records one by one, stopping at the first failure.
    pub fn delete_records<R: Resource>(&mut self, ids: Vec<i64>) {
        self.pending_mutations += 1;
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let mut count = 0;
            let mut error = None;
            for id in ids {
                match api.delete::<R>(id).await {
                    Ok(()) => count += 1,
                    Err(e) => {
                        error = Some(e);
                        break;
                    }
                }
            }
            let _ = tx.send(UiMessage::Deleted {
                kind: R::KIND,
                count,
                error,
            });
        });
    }

    fn delete_by_kind(&mut self, kind: ResourceKind, ids: Vec<i64>) {
        match kind {
            ResourceKind::InformationSheets => self.delete_records::<InformationSheet>(ids),
            ResourceKind::BankExperiences => self.delete_records::<BankExperience>(ids),
            ResourceKind::NonBankExperiences => self.delete_records::<NonBankExperience>(ids),
            ResourceKind::DisciplinaryActions => self.delete_records::<DisciplinaryAction>(ids),
            ResourceKind::ProfessionalTrainings => self.delete_records::<ProfessionalTraining>(ids),
            ResourceKind::WorkCertificateRequests => self.delete_records::<WorkCertificateRequest>(ids),
            ResourceKind::DairaInvestigationRequests => self.delete_records::<DairaInvestigationRequest>(ids),
            ResourceKind::WilayaInvestigationRequests => self.delete_records::<WilayaInvestigationRequest>(ids),
            ResourceKind::Users => self.delete_records::<User>(ids),
        }
    }

    /// Ask for confirmation before deleting `ids`.
    pub fn request_delete(&mut self, kind: ResourceKind, ids: Vec<i64>, description: impl Into<String>) {
        if ids.is_empty() {
            return;
        }
        self.delete_target = Some(DeleteTarget {
            kind,
            ids,
            description: description.into(),
            deleting: false,
            error: None,
        });
    }

    /// Execute the confirmed delete operation. The dialog stays open until
    /// the result arrives.
    pub fn confirm_delete(&mut self) {
        let Some(target) = &mut self.delete_target else {
            return;
        };
        if target.deleting {
            return;
        }
        target.deleting = true;
        target.error = None;
        let (kind, ids) = (target.kind, target.ids.clone());

        info!("Deleting {} {}", ids.len(), kind.label());
        self.delete_by_kind(kind, ids);
    }

    /// Close the dialog on success. On failure keep it open with the ids
    /// that were not deleted.
    fn finish_delete(&mut self, kind: ResourceKind, count: usize, error: Option<String>) {
        let Some(target) = &mut self.delete_target else {
            return;
        };
        if target.kind != kind || !target.deleting {
            return;
        }
        match error {
            None => self.delete_target = None,
            Some(error) => {
                let done = count.min(target.ids.len());
                target.ids.drain(..done);
                target.deleting = false;
                target.error = Some(error);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    /// Validate, save and apply the edited configuration.
    pub fn save_config(&mut self) {
        if let Err(e) = self.config.validate() {
            self.notifications.error(e.to_string());
            return;
        }
        if let Err(e) = self.config.save(&self.config_path) {
            error!("Failed to save config: {}", e);
            self.notifications.error(format!("Failed to save config: {e}"));
            return;
        }

        match ApiClient::new(&self.config.api) {
            Ok(mut api) => {
                api.set_token(self.session.as_ref().map(|s| s.token.clone()));
                if api.base_url() != self.api.base_url() {
                    self.cache.invalidate_all();
                }
                self.api = api;
            }
            Err(e) => {
                error!("Failed to rebuild API client: {}", e);
                self.notifications.error(format!("Failed to apply API settings: {e}"));
                return;
            }
        }

        self.cache.set_stale_after(self.config.cache.stale_after());
        self.tables.set_page_size(self.config.ui.page_size);
        self.config_modified = false;
        info!("Configuration saved to {:?}", self.config_path);
        self.notifications.success("Settings saved");
    }

    /// Ping the API URL currently typed in the settings.
    pub fn test_connection(&mut self) {
        let api = match ApiClient::new(&self.config.api) {
            Ok(api) => api,
            Err(e) => {
                self.connection_test = Some(Err(e.to_string()));
                return;
            }
        };
        self.testing_connection = true;
        self.connection_test = None;

        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let result = api.ping().await.map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::ConnectionTested(result));
        });
    }

    // ---------------------------------------------------------------------
    // Message handling
    // ---------------------------------------------------------------------

    fn close_all_forms(&mut self) {
        self.sheet_form.reset();
        self.bank_form.reset();
        self.non_bank_form.reset();
        self.disciplinary_form.reset();
        self.training_form.reset();
        self.certificate_form.reset();
        self.daira_form.reset();
        self.wilaya_form.reset();
        self.user_form.reset();
    }

    /// Close the form of `kind` on success, or keep it open with `error`.
    fn finish_form(&mut self, kind: ResourceKind, error: Option<String>) {
        fn finish<F: Default>(form: &mut FormDialog<F>, error: Option<String>) {
            match error {
                None => form.reset(),
                Some(e) if form.is_open => form.failed(e),
                Some(_) => {}
            }
        }

        match kind {
            ResourceKind::InformationSheets => finish(&mut self.sheet_form, error),
            ResourceKind::BankExperiences => finish(&mut self.bank_form, error),
            ResourceKind::NonBankExperiences => finish(&mut self.non_bank_form, error),
            ResourceKind::DisciplinaryActions => finish(&mut self.disciplinary_form, error),
            ResourceKind::ProfessionalTrainings => finish(&mut self.training_form, error),
            ResourceKind::WorkCertificateRequests => finish(&mut self.certificate_form, error),
            ResourceKind::DairaInvestigationRequests => finish(&mut self.daira_form, error),
            ResourceKind::WilayaInvestigationRequests => finish(&mut self.wilaya_form, error),
            ResourceKind::Users => finish(&mut self.user_form, error),
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::Loaded {
                    generation,
                    key,
                    records,
                } => {
                    // A fetch that outlived its session.
                    if generation != self.session_generation || self.session.is_none() {
                        debug!("Discarding {} loaded by an earlier session", key.kind.label());
                        continue;
                    }
                    debug!("Loaded {} {} (scope {:?})", records.len(), key.kind.label(), key.scope);
                    self.cache.mark_fetched(key, Instant::now());
                    self.store.insert(key, records);
                }
                UiMessage::LoadFailed { generation, key, error } => {
                    if generation != self.session_generation {
                        continue;
                    }
                    self.cache.mark_failed(key);
                    if !self.handle_unauthorized(&error) && self.session.is_some() {
                        warn!("Failed to load {}: {}", key.kind.label(), error);
                        self.notifications
                            .error(format!("Failed to load {}: {error}", key.kind.label()));
                    }
                }
                UiMessage::Saved { kind, message } => {
                    self.pending_mutations = self.pending_mutations.saturating_sub(1);
                    info!("{}", message);
                    self.notifications.success(message);
                    self.finish_form(kind, None);
                    self.cache.invalidate(kind);
                }
                UiMessage::Deleted { kind, count, error } => {
                    self.pending_mutations = self.pending_mutations.saturating_sub(1);
                    if count > 0 {
                        info!("Deleted {} {}", count, kind.label());
                        self.notifications.success(format!("Deleted {count} {}", kind.label()));
                        self.tables.for_kind(kind).clear_selection();
                        // Child records go with their information sheet.
                        if kind == ResourceKind::InformationSheets {
                            self.cache.invalidate_all();
                        } else {
                            self.cache.invalidate(kind);
                        }
                    }
                    match error {
                        None => self.finish_delete(kind, count, None),
                        Some(error) => {
                            if !self.handle_unauthorized(&error) {
                                warn!("Delete failed after {} record(s): {}", count, error);
                                self.notifications.error(format!("Delete failed: {error}"));
                                self.cache.invalidate(kind);
                                self.finish_delete(kind, count, Some(error.to_string()));
                            }
                        }
                    }
                }
                UiMessage::SheetFetched { generation, sheet } => {
                    if generation != self.session_generation {
                        continue;
                    }
                    self.fetching_sheet = None;
                    self.sheet_form.open_edit(sheet.id, SheetForm::edit(&sheet));
                }
                UiMessage::SheetFetchFailed { generation, id, error } => {
                    if generation != self.session_generation {
                        continue;
                    }
                    self.fetching_sheet = None;
                    if self.handle_unauthorized(&error) {
                        continue;
                    }
                    if matches!(error, AppError::NotFound(_)) {
                        self.notifications.warning("This information sheet no longer exists");
                        self.cache.invalidate(ResourceKind::InformationSheets);
                        continue;
                    }
                    // Fall back to the copy already listed.
                    warn!("Could not refresh information sheet {}: {}", id, error);
                    match self.store.sheet(id).cloned() {
                        Some(sheet) => {
                            self.notifications
                                .warning(format!("Editing the last loaded copy: {error}"));
                            self.sheet_form.open_edit(id, SheetForm::edit(&sheet));
                        }
                        None => self.notifications.error(error.to_string()),
                    }
                }
                UiMessage::MutationFailed { kind, error } => {
                    self.pending_mutations = self.pending_mutations.saturating_sub(1);
                    if !self.handle_unauthorized(&error) {
                        warn!("Saving {} failed: {}", kind.label(), error);
                        self.notifications.error(error.to_string());
                        self.finish_form(kind, Some(error.to_string()));
                    }
                }
                UiMessage::LoggedIn(session) => self.start_session(session),
                UiMessage::LoginFailed(error) => {
                    self.login_form.pending = false;
                    self.login_form.error = Some(match error {
                        AppError::Unauthorized => "Invalid username or password".to_string(),
                        other => other.to_string(),
                    });
                }
                UiMessage::SessionRestored(user) => {
                    self.checking_session = false;
                    if let Some(session) = &mut self.session {
                        info!("Session restored for {}", user.username);
                        session.user = user;
                        self.prefs.session = Some(session.clone());
                    }
                    self.save_prefs();
                }
                UiMessage::SessionCheckFailed(error) => {
                    self.checking_session = false;
                    if !self.handle_unauthorized(&error) && self.session.is_some() {
                        warn!("Could not verify saved session: {}", error);
                        self.notifications
                            .warning(format!("Could not verify the saved session: {error}"));
                    }
                }
                UiMessage::ConnectionTested(result) => {
                    self.testing_connection = false;
                    self.connection_test = Some(result);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();
        self.notifications.prune(Instant::now());

        // Request repaint during async operations and while toasts fade
        if self.is_busy() || self.notifications.has_toasts() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(self.config.cache.stale_after());
        }

        if self.session.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| panels::login::show(self, ui));
            shell::show_toasts(self, ctx);
            return;
        }

        if !self.current_panel.is_allowed(self.role()) {
            self.current_panel = Panel::Dashboard;
        }

        shell::show_header(self, ctx);
        shell::show_status_bar(self, ctx);
        shell::show_sidebar(self, ctx);
        shell::show_delete_dialog(self, ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = panels::dashboard::show(self, ui) {
                    self.current_panel = next;
                }
            }
            Panel::InformationSheets => panels::information_sheets::show(self, ui),
            Panel::BankExperiences => panels::bank_experiences::show(self, ui),
            Panel::NonBankExperiences => panels::non_bank_experiences::show(self, ui),
            Panel::DisciplinaryActions => panels::disciplinary_actions::show(self, ui),
            Panel::Trainings => panels::trainings::show(self, ui),
            Panel::PrintReports => panels::print_reports::show(self, ui),
            Panel::Users => panels::users::show(self, ui),
            Panel::Settings => panels::settings::show(self, ui),
        });

        shell::show_toasts(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::information_sheet::fixtures::sheet;

    /// App pointed at a closed local port, logged in as an administrator.
    fn test_app(dir: &tempfile::TempDir) -> App {
        let mut config = AppConfig::default();
        config.api.base_url = "http://127.0.0.1:1/api".to_string();
        config.api.timeout_secs = 5;
        let rt = tokio::runtime::Runtime::new().unwrap();
        let api = ApiClient::new(&config.api).unwrap();
        let mut app = App::new(
            rt,
            api,
            config,
            dir.path().join("config.toml"),
            Preferences::default(),
            dir.path().join("prefs.toml"),
        );
        app.session = Some(Session {
            token: "token".to_string(),
            user: User {
                id: 1,
                username: "admin".to_string(),
                full_name: "Administrateur".to_string(),
                email: None,
                role: Role::Admin,
                is_active: true,
            },
        });
        app
    }

    fn fetched(app: &mut App, key: QueryKey) {
        app.cache.mark_fetching(key);
        app.cache.mark_fetched(key, Instant::now());
        assert!(!app.cache.needs_fetch(key, Instant::now()));
    }

    fn deliver(app: &mut App, msg: UiMessage) {
        assert!(app.tx.send(msg).is_ok());
        app.poll_async_results();
    }

    #[test]
    fn test_saved_closes_form_and_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let key = QueryKey::all(ResourceKind::InformationSheets);
        fetched(&mut app, key);

        app.sheet_form.open_new(SheetForm::new(app.today()));
        app.sheet_form.begin_save();
        deliver(
            &mut app,
            UiMessage::Saved {
                kind: ResourceKind::InformationSheets,
                message: "Information sheet 'BENALI Karim' saved".to_string(),
            },
        );

        assert!(!app.sheet_form.is_open);
        assert!(app.cache.needs_fetch(key, Instant::now()));
    }

    #[test]
    fn test_failed_save_keeps_form_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        app.bank_form.open_edit(4, BankExperienceForm::default());
        app.bank_form.begin_save();
        deliver(
            &mut app,
            UiMessage::MutationFailed {
                kind: ResourceKind::BankExperiences,
                error: AppError::validation("end_date is before start_date"),
            },
        );

        assert!(app.bank_form.is_open);
        assert!(!app.bank_form.saving);
        assert!(app.bank_form.error.as_deref().is_some_and(|e| e.contains("end_date")));
        assert!(app.session.is_some());
    }

    #[test]
    fn test_unauthorized_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.current_panel = Panel::Trainings;
        app.training_form.open_new(TrainingForm::default());

        let generation = app.session_generation;
        deliver(
            &mut app,
            UiMessage::LoadFailed {
                generation,
                key: QueryKey::all(ResourceKind::ProfessionalTrainings),
                error: AppError::Unauthorized,
            },
        );

        assert!(app.session.is_none());
        assert_eq!(app.current_panel, Panel::Dashboard);
        assert!(!app.training_form.is_open);
    }

    #[test]
    fn test_unauthorized_mutation_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);

        deliver(
            &mut app,
            UiMessage::MutationFailed {
                kind: ResourceKind::Users,
                error: AppError::Unauthorized,
            },
        );

        assert!(app.session.is_none());
    }

    #[test]
    fn test_sheet_delete_invalidates_every_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let sheets = QueryKey::all(ResourceKind::InformationSheets);
        let trainings = QueryKey::scoped(ResourceKind::ProfessionalTrainings, Some(3));
        fetched(&mut app, sheets);
        fetched(&mut app, trainings);

        deliver(
            &mut app,
            UiMessage::Deleted {
                kind: ResourceKind::InformationSheets,
                count: 1,
                error: None,
            },
        );

        assert!(app.cache.needs_fetch(sheets, Instant::now()));
        assert!(app.cache.needs_fetch(trainings, Instant::now()));
    }

    #[test]
    fn test_delete_dialog_closes_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.request_delete(ResourceKind::Users, vec![7], "user 'nadia'");
        if let Some(target) = &mut app.delete_target {
            target.deleting = true;
        }

        deliver(
            &mut app,
            UiMessage::Deleted {
                kind: ResourceKind::Users,
                count: 1,
                error: None,
            },
        );

        assert!(app.delete_target.is_none());
    }

    #[test]
    fn test_delete_dialog_keeps_remaining_ids_on_partial_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.request_delete(ResourceKind::DisciplinaryActions, vec![1, 2, 3], "3 selected");
        if let Some(target) = &mut app.delete_target {
            target.deleting = true;
        }

        deliver(
            &mut app,
            UiMessage::Deleted {
                kind: ResourceKind::DisciplinaryActions,
                count: 1,
                error: Some(AppError::validation("action 2 is applied")),
            },
        );

        let target = app.delete_target.as_ref().unwrap();
        assert_eq!(target.ids, vec![2, 3]);
        assert!(!target.deleting);
        assert!(target.error.as_deref().is_some_and(|e| e.contains("applied")));
    }

    #[test]
    fn test_delete_dialog_stays_open_when_request_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.request_delete(ResourceKind::Users, vec![7], "user 'nadia'");

        app.confirm_delete();
        assert!(app.delete_target.as_ref().is_some_and(|t| t.deleting));
        assert!(app.is_busy());

        for _ in 0..100 {
            std::thread::sleep(Duration::from_millis(100));
            app.poll_async_results();
            if app.delete_target.as_ref().is_some_and(|t| !t.deleting) {
                break;
            }
        }

        let target = app.delete_target.as_ref().unwrap();
        assert!(!target.deleting);
        assert!(target.error.is_some());
        assert_eq!(target.ids, vec![7]);
    }

    #[test]
    fn test_results_from_earlier_session_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let key = QueryKey::all(ResourceKind::InformationSheets);
        let old_generation = app.session_generation;
        let session = app.session.clone();

        app.end_session();
        app.session = session;
        deliver(
            &mut app,
            UiMessage::Loaded {
                generation: old_generation,
                key,
                records: InformationSheet::into_records(vec![sheet(1, "Benali", "Karim", Gender::Male)]),
            },
        );

        assert!(!app.store.contains(key));
        assert!(app.cache.last_fetched(key).is_none());
    }

    #[test]
    fn test_fetched_sheet_opens_edit_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.fetching_sheet = Some(5);

        let generation = app.session_generation;
        deliver(
            &mut app,
            UiMessage::SheetFetched {
                generation,
                sheet: sheet(5, "Haddad", "Samia", Gender::Female),
            },
        );

        assert_eq!(app.fetching_sheet, None);
        assert!(app.sheet_form.is_open);
        assert_eq!(app.sheet_form.id, Some(5));
    }

    #[test]
    fn test_missing_sheet_not_opened() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.fetching_sheet = Some(5);

        let generation = app.session_generation;
        deliver(
            &mut app,
            UiMessage::SheetFetchFailed {
                generation,
                id: 5,
                error: AppError::not_found("Information sheet 5"),
            },
        );

        assert_eq!(app.fetching_sheet, None);
        assert!(!app.sheet_form.is_open);
    }

    #[test]
    fn test_users_panel_admin_only() {
        assert!(Panel::Users.is_allowed(Role::Admin));
        assert!(!Panel::Users.is_allowed(Role::HrManager));
        assert!(Panel::Settings.is_allowed(Role::Viewer));
    }

    #[test]
    fn test_tables_follow_kind_and_page_size() {
        let mut tables = Tables::new(20);
        tables.for_kind(ResourceKind::Users).toggle_row(3);
        assert_eq!(tables.users.selected_count(), 1);

        tables.set_page_size(50);
        for kind in ResourceKind::ALL {
            assert_eq!(tables.for_kind(kind).page_size(), 50);
        }
    }
}
