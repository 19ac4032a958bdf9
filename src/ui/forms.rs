//! Form state for the create/edit dialogs and its validation.
//!
//! Each form keeps raw user input and turns it into an API payload with
//! `to_input`, which returns the first validation error as a message.

use chrono::NaiveDate;

use crate::models::*;

/// Dialog wrapper shared by every form.
#[derive(Default)]
pub struct FormDialog<F> {
    pub fields: F,
    /// Record being edited; `None` when creating.
    pub id: Option<i64>,
    pub is_open: bool,
    /// A save request is in flight.
    pub saving: bool,
    pub error: Option<String>,
}

impl<F: Default> FormDialog<F> {
    pub fn open_new(&mut self, fields: F) {
        *self = Self {
            fields,
            id: None,
            is_open: true,
            saving: false,
            error: None,
        };
    }

    pub fn open_edit(&mut self, id: i64, fields: F) {
        *self = Self {
            fields,
            id: Some(id),
            is_open: true,
            saving: false,
            error: None,
        };
    }

    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Mark the form as saving and return the id to update, if any.
    pub fn begin_save(&mut self) -> Option<i64> {
        self.saving = true;
        self.error = None;
        self.id
    }

    /// Keep the dialog open with an error after a failed save.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.saving = false;
        self.error = Some(message.into());
    }
}

fn required(value: &str, field: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn sheet_required(sheet: Option<i64>) -> Result<i64, String> {
    sheet.ok_or_else(|| "Employee is required".to_string())
}

fn parse_count(value: &str, field: &str) -> Result<u32, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| format!("{field} must be a whole number"))
}

fn check_period(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), String> {
    match end {
        Some(end) if end < start => Err("End date cannot be before start date".to_string()),
        _ => Ok(()),
    }
}

fn check_digits(value: &Option<String>, field: &str) -> Result<(), String> {
    match value {
        Some(v) if !v.chars().all(|c| c.is_ascii_digit()) => Err(format!("{field} must contain digits only")),
        _ => Ok(()),
    }
}

/// Information sheet form.
#[derive(Debug, Clone, Default)]
pub struct SheetForm {
    pub employee_number: String,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub gender: Gender,
    pub family_status: FamilyStatus,
    pub children_count: String,
    pub national_id_number: String,
    pub social_security_number: String,
    pub address: String,
    pub phone: String,
    pub recruitment_date: NaiveDate,
    pub prior_experience_years: String,
    pub job_title: String,
    pub function: String,
    pub structure: String,
    pub category: String,
    pub section: String,
    pub grade: String,
    pub assignment_structure: String,
    pub assignment_date: Option<NaiveDate>,
    pub decision_number: String,
    pub decision_date: Option<NaiveDate>,
    pub is_suspended: bool,
    pub suspension_date: Option<NaiveDate>,
    pub suspension_reason: String,
}

impl SheetForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(today),
            recruitment_date: today,
            children_count: "0".to_string(),
            prior_experience_years: "0".to_string(),
            ..Default::default()
        }
    }

    pub fn edit(sheet: &InformationSheet) -> Self {
        let d = &sheet.data;
        let id = &d.identification;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            employee_number: id.employee_number.clone(),
            last_name: id.last_name.clone(),
            first_name: id.first_name.clone(),
            birth_date: id.birth_date,
            birth_place: id.birth_place.clone(),
            gender: id.gender,
            family_status: id.family_status,
            children_count: id.children_count.to_string(),
            national_id_number: text(&id.national_id_number),
            social_security_number: text(&id.social_security_number),
            address: text(&id.address),
            phone: text(&id.phone),
            recruitment_date: d.experience.recruitment_date,
            prior_experience_years: d.experience.prior_experience_years.to_string(),
            job_title: d.position.job_title.clone(),
            function: text(&d.position.function),
            structure: d.position.structure.clone(),
            category: d.classification.category.clone(),
            section: text(&d.classification.section),
            grade: text(&d.classification.grade),
            assignment_structure: text(&d.assignment.assignment_structure),
            assignment_date: d.assignment.assignment_date,
            decision_number: text(&d.decision.decision_number),
            decision_date: d.decision.decision_date,
            is_suspended: d.suspension.is_suspended,
            suspension_date: d.suspension.suspension_date,
            suspension_reason: text(&d.suspension.suspension_reason),
        }
    }

    pub fn to_input(&self) -> Result<InformationSheetInput, String> {
        let national_id_number = optional(&self.national_id_number);
        check_digits(&national_id_number, "National ID number")?;
        let social_security_number = optional(&self.social_security_number);
        check_digits(&social_security_number, "Social security number")?;

        let phone = optional(&self.phone);
        if let Some(p) = &phone
            && !p.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '.'))
        {
            return Err("Phone number contains invalid characters".to_string());
        }

        if self.birth_date >= self.recruitment_date {
            return Err("Birth date must be before recruitment date".to_string());
        }

        let suspension_date = if self.is_suspended {
            let date = self
                .suspension_date
                .ok_or_else(|| "Suspension date is required for a suspended employee".to_string())?;
            if date < self.recruitment_date {
                return Err("Suspension date cannot be before recruitment date".to_string());
            }
            Some(date)
        } else {
            None
        };

        Ok(InformationSheetInput {
            identification: Identification {
                employee_number: required(&self.employee_number, "Employee number")?,
                last_name: required(&self.last_name, "Last name")?,
                first_name: required(&self.first_name, "First name")?,
                birth_date: self.birth_date,
                birth_place: required(&self.birth_place, "Birth place")?,
                gender: self.gender,
                family_status: self.family_status,
                children_count: parse_count(&self.children_count, "Children count")?,
                national_id_number,
                social_security_number,
                address: optional(&self.address),
                phone,
            },
            experience: ProfessionalExperience {
                recruitment_date: self.recruitment_date,
                prior_experience_years: parse_count(&self.prior_experience_years, "Prior experience")?,
            },
            position: Position {
                job_title: required(&self.job_title, "Job title")?,
                function: optional(&self.function),
                structure: required(&self.structure, "Structure")?,
            },
            classification: Classification {
                category: required(&self.category, "Category")?,
                section: optional(&self.section),
                grade: optional(&self.grade),
            },
            assignment: Assignment {
                assignment_structure: optional(&self.assignment_structure),
                assignment_date: self.assignment_date,
            },
            decision: Decision {
                decision_number: optional(&self.decision_number),
                decision_date: self.decision_date,
            },
            suspension: Suspension {
                is_suspended: self.is_suspended,
                suspension_date,
                suspension_reason: if self.is_suspended { optional(&self.suspension_reason) } else { None },
            },
        })
    }
}

/// Bank experience form.
#[derive(Debug, Clone, Default)]
pub struct BankExperienceForm {
    pub sheet_id: Option<i64>,
    pub institution: String,
    pub job_title: String,
    pub structure: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub classification: String,
    pub decision_reference: String,
}

impl BankExperienceForm {
    pub fn new(sheet_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            sheet_id,
            start_date: today,
            ..Default::default()
        }
    }

    pub fn edit(exp: &BankExperience) -> Self {
        let d = &exp.data;
        Self {
            sheet_id: Some(d.information_sheet_id),
            institution: d.institution.clone(),
            job_title: d.job_title.clone(),
            structure: d.structure.clone(),
            start_date: d.start_date,
            end_date: d.end_date,
            classification: d.classification.clone().unwrap_or_default(),
            decision_reference: d.decision_reference.clone().unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> Result<BankExperienceInput, String> {
        let information_sheet_id = sheet_required(self.sheet_id)?;
        check_period(self.start_date, self.end_date)?;
        Ok(BankExperienceInput {
            information_sheet_id,
            institution: required(&self.institution, "Institution")?,
            job_title: required(&self.job_title, "Job title")?,
            structure: required(&self.structure, "Structure")?,
            start_date: self.start_date,
            end_date: self.end_date,
            classification: optional(&self.classification),
            decision_reference: optional(&self.decision_reference),
        })
    }
}

/// Non-bank experience form.
#[derive(Debug, Clone, Default)]
pub struct NonBankExperienceForm {
    pub sheet_id: Option<i64>,
    pub employer: String,
    pub sector: Sector,
    pub job_title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub attestation_reference: String,
}

impl NonBankExperienceForm {
    pub fn new(sheet_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            sheet_id,
            start_date: today,
            ..Default::default()
        }
    }

    pub fn edit(exp: &NonBankExperience) -> Self {
        let d = &exp.data;
        Self {
            sheet_id: Some(d.information_sheet_id),
            employer: d.employer.clone(),
            sector: d.sector,
            job_title: d.job_title.clone(),
            start_date: d.start_date,
            end_date: d.end_date,
            attestation_reference: d.attestation_reference.clone().unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> Result<NonBankExperienceInput, String> {
        let information_sheet_id = sheet_required(self.sheet_id)?;
        check_period(self.start_date, self.end_date)?;
        Ok(NonBankExperienceInput {
            information_sheet_id,
            employer: required(&self.employer, "Employer")?,
            sector: self.sector,
            job_title: required(&self.job_title, "Job title")?,
            start_date: self.start_date,
            end_date: self.end_date,
            attestation_reference: optional(&self.attestation_reference),
        })
    }
}

/// Disciplinary action form.
#[derive(Debug, Clone, Default)]
pub struct DisciplinaryForm {
    pub sheet_id: Option<i64>,
    pub degree: DisciplinaryDegree,
    pub sanction: String,
    pub reason: String,
    pub decision_number: String,
    pub decision_date: NaiveDate,
    pub effective_date: Option<NaiveDate>,
    pub status: DisciplinaryStatus,
}

impl DisciplinaryForm {
    pub fn new(sheet_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            sheet_id,
            decision_date: today,
            ..Default::default()
        }
    }

    pub fn edit(action: &DisciplinaryAction) -> Self {
        let d = &action.data;
        Self {
            sheet_id: Some(d.information_sheet_id),
            degree: d.degree,
            sanction: d.sanction.clone(),
            reason: d.reason.clone(),
            decision_number: d.decision_number.clone(),
            decision_date: d.decision_date,
            effective_date: d.effective_date,
            status: d.status,
        }
    }

    pub fn to_input(&self) -> Result<DisciplinaryActionInput, String> {
        let information_sheet_id = sheet_required(self.sheet_id)?;
        if let Some(effective) = self.effective_date
            && effective < self.decision_date
        {
            return Err("Effective date cannot be before decision date".to_string());
        }
        Ok(DisciplinaryActionInput {
            information_sheet_id,
            degree: self.degree,
            sanction: required(&self.sanction, "Sanction")?,
            reason: required(&self.reason, "Reason")?,
            decision_number: required(&self.decision_number, "Decision number")?,
            decision_date: self.decision_date,
            effective_date: self.effective_date,
            status: self.status,
        })
    }
}

/// Professional training form.
#[derive(Debug, Clone, Default)]
pub struct TrainingForm {
    pub sheet_id: Option<i64>,
    pub title: String,
    pub organization: String,
    pub training_type: TrainingType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub certificate_obtained: bool,
    pub status: TrainingStatus,
}

impl TrainingForm {
    pub fn new(sheet_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            sheet_id,
            start_date: today,
            ..Default::default()
        }
    }

    pub fn edit(training: &ProfessionalTraining) -> Self {
        let d = &training.data;
        Self {
            sheet_id: Some(d.information_sheet_id),
            title: d.title.clone(),
            organization: d.organization.clone(),
            training_type: d.training_type,
            start_date: d.start_date,
            end_date: d.end_date,
            certificate_obtained: d.certificate_obtained,
            status: d.status,
        }
    }

    pub fn to_input(&self) -> Result<ProfessionalTrainingInput, String> {
        let information_sheet_id = sheet_required(self.sheet_id)?;
        check_period(self.start_date, self.end_date)?;
        if self.status == TrainingStatus::Completed && self.end_date.is_none() {
            return Err("A completed training needs an end date".to_string());
        }
        if self.certificate_obtained && self.status != TrainingStatus::Completed {
            return Err("A certificate can only be recorded for a completed training".to_string());
        }
        Ok(ProfessionalTrainingInput {
            information_sheet_id,
            title: required(&self.title, "Title")?,
            organization: required(&self.organization, "Organization")?,
            training_type: self.training_type,
            start_date: self.start_date,
            end_date: self.end_date,
            certificate_obtained: self.certificate_obtained,
            status: self.status,
        })
    }
}

/// Work certificate request form.
#[derive(Debug, Clone, Default)]
pub struct CertificateForm {
    pub sheet_id: Option<i64>,
    pub request_date: NaiveDate,
    pub purpose: String,
    pub status: CertificateStatus,
}

impl CertificateForm {
    pub fn new(sheet_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            sheet_id,
            request_date: today,
            ..Default::default()
        }
    }

    pub fn edit(request: &WorkCertificateRequest) -> Self {
        let d = &request.data;
        Self {
            sheet_id: Some(d.information_sheet_id),
            request_date: d.request_date,
            purpose: d.purpose.clone(),
            status: d.status,
        }
    }

    pub fn to_input(&self) -> Result<WorkCertificateRequestInput, String> {
        Ok(WorkCertificateRequestInput {
            information_sheet_id: sheet_required(self.sheet_id)?,
            request_date: self.request_date,
            purpose: self.purpose.trim().to_string(),
            status: self.status,
        })
    }
}

/// Daira or wilaya investigation request form.
#[derive(Debug, Clone, Default)]
pub struct InvestigationForm {
    pub sheet_id: Option<i64>,
    pub reference_number: String,
    pub authority: String,
    pub subject: String,
    pub request_date: NaiveDate,
    pub status: InvestigationStatus,
}

impl InvestigationForm {
    pub fn new(sheet_id: Option<i64>, today: NaiveDate) -> Self {
        Self {
            sheet_id,
            request_date: today,
            subject: "Enquête administrative".to_string(),
            ..Default::default()
        }
    }

    pub fn edit(data: &InvestigationRequestInput) -> Self {
        Self {
            sheet_id: Some(data.information_sheet_id),
            reference_number: data.reference_number.clone(),
            authority: data.authority.clone(),
            subject: data.subject.clone(),
            request_date: data.request_date,
            status: data.status,
        }
    }

    pub fn to_input(&self) -> Result<InvestigationRequestInput, String> {
        Ok(InvestigationRequestInput {
            information_sheet_id: sheet_required(self.sheet_id)?,
            reference_number: required(&self.reference_number, "Reference number")?,
            authority: required(&self.authority, "Authority")?,
            subject: required(&self.subject, "Subject")?,
            request_date: self.request_date,
            status: self.status,
        })
    }
}

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// User account form. Passwords are only set when creating.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub password: String,
    pub password_confirm: String,
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            role: Role::HrAgent,
            is_active: true,
            ..Default::default()
        }
    }

    pub fn edit(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            role: user.role,
            is_active: user.is_active,
            ..Default::default()
        }
    }

    pub fn to_input(&self, creating: bool) -> Result<UserInput, String> {
        let username = required(&self.username, "Username")?;
        if username.chars().any(char::is_whitespace) {
            return Err("Username cannot contain spaces".to_string());
        }
        let email = optional(&self.email);
        if let Some(e) = &email
            && !e.contains('@')
        {
            return Err("Email address is not valid".to_string());
        }

        let password = if creating {
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
            }
            if self.password != self.password_confirm {
                return Err("Passwords do not match".to_string());
            }
            Some(self.password.clone())
        } else {
            None
        };

        Ok(UserInput {
            username,
            full_name: required(&self.full_name, "Full name")?,
            email,
            role: self.role,
            is_active: self.is_active,
            password,
        })
    }
}

/// Login screen state.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub pending: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err("Enter your username and password".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::information_sheet::fixtures::sheet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_dialog_lifecycle() {
        let mut dialog: FormDialog<CertificateForm> = FormDialog::default();
        dialog.open_edit(4, CertificateForm::new(Some(1), d(2024, 1, 1)));
        assert!(dialog.is_open && dialog.is_editing());

        dialog.error = Some("stale".to_string());
        assert_eq!(dialog.begin_save(), Some(4));
        assert!(dialog.saving && dialog.error.is_none());

        dialog.failed("Validation error: purpose too long");
        assert!(dialog.is_open);
        assert!(!dialog.saving);

        dialog.reset();
        assert!(!dialog.is_open);
        assert!(dialog.error.is_none());
    }

    #[test]
    fn test_sheet_edit_round_trip() {
        let s = sheet(3, "Benali", "Karim", Gender::Male);
        let input = SheetForm::edit(&s).to_input().unwrap();
        assert_eq!(input, s.data);
    }

    #[test]
    fn test_sheet_requires_names() {
        let mut form = SheetForm::edit(&sheet(3, "Benali", "Karim", Gender::Male));
        form.last_name = "   ".to_string();
        assert_eq!(form.to_input().unwrap_err(), "Last name is required");
    }

    #[test]
    fn test_sheet_birth_before_recruitment() {
        let mut form = SheetForm::edit(&sheet(3, "Benali", "Karim", Gender::Male));
        form.birth_date = d(2011, 1, 1);
        assert!(form.to_input().is_err());
    }

    #[test]
    fn test_sheet_suspension_needs_date() {
        let mut form = SheetForm::edit(&sheet(3, "Benali", "Karim", Gender::Male));
        form.is_suspended = true;
        assert!(form.to_input().is_err());

        form.suspension_date = Some(d(2009, 1, 1));
        assert!(form.to_input().is_err());

        form.suspension_date = Some(d(2021, 6, 1));
        form.suspension_reason = "Mise en disponibilité".to_string();
        let input = form.to_input().unwrap();
        assert!(input.suspension.is_suspended);
        assert_eq!(input.suspension.suspension_reason.as_deref(), Some("Mise en disponibilité"));
    }

    #[test]
    fn test_sheet_unsuspended_drops_suspension_fields() {
        let mut form = SheetForm::edit(&sheet(3, "Benali", "Karim", Gender::Male));
        form.suspension_date = Some(d(2021, 6, 1));
        form.suspension_reason = "leftover".to_string();
        let input = form.to_input().unwrap();
        assert_eq!(input.suspension, Suspension::default());
    }

    #[test]
    fn test_sheet_numeric_fields() {
        let mut form = SheetForm::edit(&sheet(3, "Benali", "Karim", Gender::Male));
        form.children_count = "two".to_string();
        assert_eq!(form.to_input().unwrap_err(), "Children count must be a whole number");

        form.children_count = String::new();
        form.national_id_number = "1098-7012".to_string();
        assert!(form.to_input().is_err());

        form.national_id_number = "109870123456789012".to_string();
        form.phone = "+213 555 12 34 56".to_string();
        let input = form.to_input().unwrap();
        assert_eq!(input.identification.children_count, 0);
        assert_eq!(input.identification.phone.as_deref(), Some("+213 555 12 34 56"));
    }

    #[test]
    fn test_child_forms_need_employee() {
        let today = d(2024, 3, 1);
        let mut form = BankExperienceForm::new(None, today);
        form.institution = "BNA".to_string();
        form.job_title = "Caissier".to_string();
        form.structure = "Agence Hydra".to_string();
        assert_eq!(form.to_input().unwrap_err(), "Employee is required");

        form.sheet_id = Some(5);
        assert_eq!(form.to_input().unwrap().information_sheet_id, 5);
    }

    #[test]
    fn test_period_order() {
        let mut form = NonBankExperienceForm::new(Some(1), d(2020, 1, 1));
        form.employer = "Sonatrach".to_string();
        form.job_title = "Comptable".to_string();
        form.end_date = Some(d(2019, 12, 31));
        assert!(form.to_input().is_err());

        form.end_date = Some(d(2020, 1, 1));
        assert!(form.to_input().is_ok());
    }

    #[test]
    fn test_disciplinary_effective_after_decision() {
        let mut form = DisciplinaryForm::new(Some(1), d(2024, 2, 1));
        form.sanction = "Avertissement".to_string();
        form.reason = "Absence".to_string();
        form.decision_number = "D-12".to_string();
        form.effective_date = Some(d(2024, 1, 15));
        assert!(form.to_input().is_err());

        form.effective_date = Some(d(2024, 2, 15));
        let input = form.to_input().unwrap();
        assert_eq!(input.status, DisciplinaryStatus::Pending);
    }

    #[test]
    fn test_training_completion_rules() {
        let mut form = TrainingForm::new(Some(1), d(2023, 5, 1));
        form.title = "Conformité bancaire".to_string();
        form.organization = "IFID".to_string();
        form.certificate_obtained = true;
        assert!(form.to_input().is_err());

        form.status = TrainingStatus::Completed;
        assert_eq!(form.to_input().unwrap_err(), "A completed training needs an end date");

        form.end_date = Some(d(2023, 5, 20));
        assert!(form.to_input().unwrap().certificate_obtained);
    }

    #[test]
    fn test_investigation_required_fields() {
        let mut form = InvestigationForm::new(Some(2), d(2024, 3, 1));
        form.authority = "Blida".to_string();
        assert_eq!(form.to_input().unwrap_err(), "Reference number is required");

        form.reference_number = "DRH/ENQ/2024/031".to_string();
        let input = form.to_input().unwrap();
        assert_eq!(input.subject, "Enquête administrative");
        assert_eq!(InvestigationForm::edit(&input).to_input().unwrap(), input);
    }

    #[test]
    fn test_user_password_only_on_create() {
        let mut form = UserForm::new();
        form.username = "samia".to_string();
        form.full_name = "Samia Haddad".to_string();
        form.password = "short".to_string();
        form.password_confirm = "short".to_string();
        assert!(form.to_input(true).is_err());

        form.password = "long enough".to_string();
        assert_eq!(form.to_input(true).unwrap_err(), "Passwords do not match");

        form.password_confirm = "long enough".to_string();
        assert_eq!(form.to_input(true).unwrap().password.as_deref(), Some("long enough"));
        assert_eq!(form.to_input(false).unwrap().password, None);
    }

    #[test]
    fn test_user_username_and_email() {
        let mut form = UserForm::new();
        form.username = "samia h".to_string();
        form.full_name = "Samia Haddad".to_string();
        assert!(form.to_input(false).is_err());

        form.username = "samia".to_string();
        form.email = "samia.example.dz".to_string();
        assert!(form.to_input(false).is_err());

        form.email = "samia@example.dz".to_string();
        assert!(form.to_input(false).is_ok());
    }

    #[test]
    fn test_login_validation() {
        let mut form = LoginForm::default();
        assert!(form.validate().is_err());
        form.username = "admin".to_string();
        form.password = "secret".to_string();
        assert!(form.validate().is_ok());
    }
}
