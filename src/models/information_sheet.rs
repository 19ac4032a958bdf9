//! Employee master record, composed of flattened sub-shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::choice::Choice;
use crate::dates::{ServiceDuration, service_duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn key(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyStatus {
    #[default]
    Single,
    Married,
    Divorced,
    Widowed,
}

impl Choice for FamilyStatus {
    const ALL: &'static [Self] = &[Self::Single, Self::Married, Self::Divorced, Self::Widowed];

    fn key(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::Divorced => "divorced",
            Self::Widowed => "widowed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married",
            Self::Divorced => "Divorced",
            Self::Widowed => "Widowed",
        }
    }
}

/// Civil identity of the employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    pub employee_number: String,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub gender: Gender,
    pub family_status: FamilyStatus,
    #[serde(default)]
    pub children_count: u32,
    #[serde(default)]
    pub national_id_number: Option<String>,
    #[serde(default)]
    pub social_security_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalExperience {
    pub recruitment_date: NaiveDate,
    #[serde(default)]
    pub prior_experience_years: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub job_title: String,
    #[serde(default)]
    pub function: Option<String>,
    pub structure: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub assignment_structure: Option<String>,
    #[serde(default)]
    pub assignment_date: Option<NaiveDate>,
}

/// Appointment decision.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub decision_number: Option<String>,
    #[serde(default)]
    pub decision_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Suspension {
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub suspension_date: Option<NaiveDate>,
    #[serde(default)]
    pub suspension_reason: Option<String>,
}

/// Fields shared by the record and its create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationSheetInput {
    #[serde(flatten)]
    pub identification: Identification,
    #[serde(flatten)]
    pub experience: ProfessionalExperience,
    #[serde(flatten)]
    pub position: Position,
    #[serde(flatten)]
    pub classification: Classification,
    #[serde(flatten)]
    pub assignment: Assignment,
    #[serde(flatten)]
    pub decision: Decision,
    #[serde(flatten)]
    pub suspension: Suspension,
}

/// Employee information sheet as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationSheet {
    pub id: i64,
    #[serde(flatten)]
    pub data: InformationSheetInput,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InformationSheet {
    /// `LAST_NAME First`, the form used on printed documents.
    pub fn full_name(&self) -> String {
        let id = &self.data.identification;
        format!("{} {}", id.last_name.trim().to_uppercase(), id.first_name.trim())
    }

    pub fn employee_number(&self) -> &str {
        &self.data.identification.employee_number
    }

    pub fn gender(&self) -> Gender {
        self.data.identification.gender
    }

    pub fn is_suspended(&self) -> bool {
        self.data.suspension.is_suspended
    }

    /// Last day of active service: suspension date if suspended, else `today`.
    pub fn service_end(&self, today: NaiveDate) -> NaiveDate {
        match (self.is_suspended(), self.data.suspension.suspension_date) {
            (true, Some(date)) if date < today => date,
            _ => today,
        }
    }

    /// Seniority in the bank from recruitment to [`Self::service_end`].
    pub fn seniority(&self, today: NaiveDate) -> ServiceDuration {
        service_duration(self.data.experience.recruitment_date, self.service_end(today))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sheet(id: i64, last: &str, first: &str, gender: Gender) -> InformationSheet {
        InformationSheet {
            id,
            data: InformationSheetInput {
                identification: Identification {
                    employee_number: format!("M{id:05}"),
                    last_name: last.to_string(),
                    first_name: first.to_string(),
                    birth_date: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
                    birth_place: "Blida".to_string(),
                    gender,
                    family_status: FamilyStatus::Married,
                    children_count: 2,
                    national_id_number: None,
                    social_security_number: None,
                    address: None,
                    phone: None,
                },
                experience: ProfessionalExperience {
                    recruitment_date: NaiveDate::from_ymd_opt(2010, 9, 1).unwrap(),
                    prior_experience_years: 0,
                },
                position: Position {
                    job_title: "Chargé de clientèle".to_string(),
                    function: None,
                    structure: "Agence Didouche Mourad".to_string(),
                },
                classification: Classification {
                    category: "Maîtrise".to_string(),
                    section: None,
                    grade: Some("12".to_string()),
                },
                assignment: Assignment::default(),
                decision: Decision::default(),
                suspension: Suspension::default(),
            },
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sheet;
    use super::*;

    #[test]
    fn test_full_name() {
        let s = sheet(1, " Benali ", "Karim", Gender::Male);
        assert_eq!(s.full_name(), "BENALI Karim");
    }

    #[test]
    fn test_flattened_json_shape() {
        let s = sheet(7, "Haddad", "Samia", Gender::Female);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["last_name"], "Haddad");
        assert_eq!(json["gender"], "female");
        assert_eq!(json["recruitment_date"], "2010-09-01");
        assert_eq!(json["is_suspended"], false);

        let back: InformationSheet = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = serde_json::json!({
            "id": 3,
            "employee_number": "M00003",
            "last_name": "Ould",
            "first_name": "Ali",
            "birth_date": "1990-01-01",
            "birth_place": "Oran",
            "gender": "male",
            "family_status": "single",
            "recruitment_date": "2015-02-01",
            "job_title": "Caissier",
            "structure": "Agence Oran",
            "category": "Exécution"
        });
        let s: InformationSheet = serde_json::from_value(json).unwrap();
        assert!(!s.is_suspended());
        assert_eq!(s.data.identification.children_count, 0);
        assert_eq!(s.data.decision.decision_number, None);
    }

    #[test]
    fn test_seniority_stops_at_suspension() {
        let mut s = sheet(1, "Benali", "Karim", Gender::Male);
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(s.seniority(today).years, 14);

        s.data.suspension.is_suspended = true;
        s.data.suspension.suspension_date = NaiveDate::from_ymd_opt(2020, 9, 1);
        assert_eq!(s.seniority(today).years, 10);
        assert_eq!(s.service_end(today), NaiveDate::from_ymd_opt(2020, 9, 1).unwrap());
    }
}
