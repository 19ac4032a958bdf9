//! Binding of each record type to its REST endpoint.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::*;
use crate::table::TableRow;

/// Every resource the client can fetch or mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    InformationSheets,
    BankExperiences,
    NonBankExperiences,
    DisciplinaryActions,
    ProfessionalTrainings,
    WorkCertificateRequests,
    DairaInvestigationRequests,
    WilayaInvestigationRequests,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        Self::InformationSheets,
        Self::BankExperiences,
        Self::NonBankExperiences,
        Self::DisciplinaryActions,
        Self::ProfessionalTrainings,
        Self::WorkCertificateRequests,
        Self::DairaInvestigationRequests,
        Self::WilayaInvestigationRequests,
        Self::Users,
    ];

    /// Plural name used in notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::InformationSheets => "information sheets",
            Self::BankExperiences => "bank experiences",
            Self::NonBankExperiences => "non-bank experiences",
            Self::DisciplinaryActions => "disciplinary actions",
            Self::ProfessionalTrainings => "trainings",
            Self::WorkCertificateRequests => "work certificate requests",
            Self::DairaInvestigationRequests => "daira investigation requests",
            Self::WilayaInvestigationRequests => "wilaya investigation requests",
            Self::Users => "users",
        }
    }

    /// Records of this kind belong to one information sheet.
    pub fn is_sheet_scoped(self) -> bool {
        matches!(
            self,
            Self::BankExperiences | Self::NonBankExperiences | Self::DisciplinaryActions | Self::ProfessionalTrainings
        )
    }
}

/// A list result, tagged by resource.
#[derive(Debug, Clone)]
pub enum Records {
    InformationSheets(Vec<InformationSheet>),
    BankExperiences(Vec<BankExperience>),
    NonBankExperiences(Vec<NonBankExperience>),
    DisciplinaryActions(Vec<DisciplinaryAction>),
    ProfessionalTrainings(Vec<ProfessionalTraining>),
    WorkCertificateRequests(Vec<WorkCertificateRequest>),
    DairaInvestigationRequests(Vec<DairaInvestigationRequest>),
    WilayaInvestigationRequests(Vec<WilayaInvestigationRequest>),
    Users(Vec<User>),
}

impl Records {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::InformationSheets(_) => ResourceKind::InformationSheets,
            Self::BankExperiences(_) => ResourceKind::BankExperiences,
            Self::NonBankExperiences(_) => ResourceKind::NonBankExperiences,
            Self::DisciplinaryActions(_) => ResourceKind::DisciplinaryActions,
            Self::ProfessionalTrainings(_) => ResourceKind::ProfessionalTrainings,
            Self::WorkCertificateRequests(_) => ResourceKind::WorkCertificateRequests,
            Self::DairaInvestigationRequests(_) => ResourceKind::DairaInvestigationRequests,
            Self::WilayaInvestigationRequests(_) => ResourceKind::WilayaInvestigationRequests,
            Self::Users(_) => ResourceKind::Users,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::InformationSheets(v) => v.len(),
            Self::BankExperiences(v) => v.len(),
            Self::NonBankExperiences(v) => v.len(),
            Self::DisciplinaryActions(v) => v.len(),
            Self::ProfessionalTrainings(v) => v.len(),
            Self::WorkCertificateRequests(v) => v.len(),
            Self::DairaInvestigationRequests(v) => v.len(),
            Self::WilayaInvestigationRequests(v) => v.len(),
            Self::Users(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record type served by a REST collection.
pub trait Resource: DeserializeOwned + Clone + Send + 'static {
    /// Body of create and update requests.
    type Input: Serialize + Clone + Send + Sync + 'static;

    const KIND: ResourceKind;
    /// Collection path relative to the API base URL.
    const PATH: &'static str;
    /// Singular display name used in notifications.
    const NAME: &'static str;

    fn id(&self) -> i64;

    /// Short description used in notifications and confirmations.
    fn label(&self) -> String;

    fn into_records(items: Vec<Self>) -> Records;

    /// The records of this type held by `records`, if it is of this kind.
    fn from_records(records: &Records) -> Option<&[Self]>;
}

impl Resource for InformationSheet {
    type Input = InformationSheetInput;
    const KIND: ResourceKind = ResourceKind::InformationSheets;
    const PATH: &'static str = "/information-sheets";
    const NAME: &'static str = "Information sheet";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.employee_number(), self.full_name())
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::InformationSheets(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::InformationSheets(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for BankExperience {
    type Input = BankExperienceInput;
    const KIND: ResourceKind = ResourceKind::BankExperiences;
    const PATH: &'static str = "/bank-experiences";
    const NAME: &'static str = "Bank experience";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.data.job_title, self.data.institution)
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::BankExperiences(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::BankExperiences(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for NonBankExperience {
    type Input = NonBankExperienceInput;
    const KIND: ResourceKind = ResourceKind::NonBankExperiences;
    const PATH: &'static str = "/non-bank-experiences";
    const NAME: &'static str = "Non-bank experience";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.data.job_title, self.data.employer)
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::NonBankExperiences(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::NonBankExperiences(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for DisciplinaryAction {
    type Input = DisciplinaryActionInput;
    const KIND: ResourceKind = ResourceKind::DisciplinaryActions;
    const PATH: &'static str = "/disciplinary-actions";
    const NAME: &'static str = "Disciplinary action";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.data.sanction, self.data.decision_number)
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::DisciplinaryActions(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::DisciplinaryActions(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for ProfessionalTraining {
    type Input = ProfessionalTrainingInput;
    const KIND: ResourceKind = ResourceKind::ProfessionalTrainings;
    const PATH: &'static str = "/professional-trainings";
    const NAME: &'static str = "Training";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.data.title.clone()
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::ProfessionalTrainings(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::ProfessionalTrainings(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for WorkCertificateRequest {
    type Input = WorkCertificateRequestInput;
    const KIND: ResourceKind = ResourceKind::WorkCertificateRequests;
    const PATH: &'static str = "/work-certificate-requests";
    const NAME: &'static str = "Work certificate request";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("#{} ({})", self.id, self.data.purpose)
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::WorkCertificateRequests(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::WorkCertificateRequests(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for DairaInvestigationRequest {
    type Input = InvestigationRequestInput;
    const KIND: ResourceKind = ResourceKind::DairaInvestigationRequests;
    const PATH: &'static str = "/daira-investigation-requests";
    const NAME: &'static str = "Daira investigation request";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.data.reference_number.clone()
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::DairaInvestigationRequests(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::DairaInvestigationRequests(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for WilayaInvestigationRequest {
    type Input = InvestigationRequestInput;
    const KIND: ResourceKind = ResourceKind::WilayaInvestigationRequests;
    const PATH: &'static str = "/wilaya-investigation-requests";
    const NAME: &'static str = "Wilaya investigation request";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.data.reference_number.clone()
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::WilayaInvestigationRequests(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::WilayaInvestigationRequests(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Resource for User {
    type Input = UserInput;
    const KIND: ResourceKind = ResourceKind::Users;
    const PATH: &'static str = "/users";
    const NAME: &'static str = "User";

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.username.clone()
    }

    fn into_records(items: Vec<Self>) -> Records {
        Records::Users(items)
    }

    fn from_records(records: &Records) -> Option<&[Self]> {
        match records {
            Records::Users(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl TableRow for InformationSheet {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for BankExperience {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for NonBankExperience {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for DisciplinaryAction {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for ProfessionalTraining {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for WorkCertificateRequest {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for DairaInvestigationRequest {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for WilayaInvestigationRequest {
    fn row_id(&self) -> i64 {
        self.id
    }
}

impl TableRow for User {
    fn row_id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::information_sheet::fixtures::sheet;

    #[test]
    fn test_records_round_trip_by_kind() {
        let records = InformationSheet::into_records(vec![sheet(1, "Benali", "Karim", Gender::Male)]);
        assert_eq!(records.kind(), ResourceKind::InformationSheets);
        assert_eq!(records.len(), 1);
        assert_eq!(InformationSheet::from_records(&records).map(<[_]>::len), Some(1));
        assert!(BankExperience::from_records(&records).is_none());
    }

    #[test]
    fn test_child_kinds_are_sheet_scoped() {
        let scoped: Vec<_> = ResourceKind::ALL.into_iter().filter(|k| k.is_sheet_scoped()).collect();
        assert_eq!(
            scoped,
            vec![
                ResourceKind::BankExperiences,
                ResourceKind::NonBankExperiences,
                ResourceKind::DisciplinaryActions,
                ResourceKind::ProfessionalTrainings,
            ]
        );
    }

    #[test]
    fn test_paths_are_distinct() {
        let mut paths = vec![
            InformationSheet::PATH,
            BankExperience::PATH,
            NonBankExperience::PATH,
            DisciplinaryAction::PATH,
            ProfessionalTraining::PATH,
            WorkCertificateRequest::PATH,
            DairaInvestigationRequest::PATH,
            WilayaInvestigationRequest::PATH,
            User::PATH,
        ];
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), ResourceKind::ALL.len());
    }
}
