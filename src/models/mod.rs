//! Records exchanged with the HR API.

pub mod bank_experience;
pub mod choice;
pub mod disciplinary_action;
pub mod information_sheet;
pub mod non_bank_experience;
pub mod professional_training;
pub mod requests;
pub mod user;

pub use bank_experience::{BankExperience, BankExperienceInput};
pub use choice::Choice;
pub use disciplinary_action::{DisciplinaryAction, DisciplinaryActionInput, DisciplinaryDegree, DisciplinaryStatus};
pub use information_sheet::{
    Assignment, Classification, Decision, FamilyStatus, Gender, Identification, InformationSheet,
    InformationSheetInput, Position, ProfessionalExperience, Suspension,
};
pub use non_bank_experience::{NonBankExperience, NonBankExperienceInput, Sector};
pub use professional_training::{ProfessionalTraining, ProfessionalTrainingInput, TrainingStatus, TrainingType};
pub use requests::{
    CertificateStatus, DairaInvestigationRequest, InvestigationLevel, InvestigationRequestInput, InvestigationStatus,
    WilayaInvestigationRequest, WorkCertificateRequest, WorkCertificateRequestInput,
};
pub use user::{LoginRequest, Role, Session, User, UserInput};
