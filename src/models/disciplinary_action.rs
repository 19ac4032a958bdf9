//! Disciplinary sanctions recorded against an employee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::Choice;

/// Sanction degree, first being the lightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplinaryDegree {
    #[default]
    First,
    Second,
    Third,
    Fourth,
}

impl Choice for DisciplinaryDegree {
    const ALL: &'static [Self] = &[Self::First, Self::Second, Self::Third, Self::Fourth];

    fn key(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::First => "1st degree",
            Self::Second => "2nd degree",
            Self::Third => "3rd degree",
            Self::Fourth => "4th degree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplinaryStatus {
    #[default]
    Pending,
    Applied,
    Cancelled,
}

impl Choice for DisciplinaryStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Applied, Self::Cancelled];

    fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Applied => "applied",
            Self::Cancelled => "cancelled",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Applied => "Applied",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplinaryActionInput {
    pub information_sheet_id: i64,
    pub degree: DisciplinaryDegree,
    pub sanction: String,
    pub reason: String,
    pub decision_number: String,
    pub decision_date: NaiveDate,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: DisciplinaryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplinaryAction {
    pub id: i64,
    #[serde(flatten)]
    pub data: DisciplinaryActionInput,
}

impl DisciplinaryAction {
    /// Applied sanctions count against the employee's record.
    pub fn is_active(&self) -> bool {
        self.data.status == DisciplinaryStatus::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending() {
        let json = serde_json::json!({
            "id": 1,
            "information_sheet_id": 4,
            "degree": "second",
            "sanction": "Blâme",
            "reason": "Absences répétées",
            "decision_number": "DRH/2023/118",
            "decision_date": "2023-05-02"
        });
        let action: DisciplinaryAction = serde_json::from_value(json).unwrap();
        assert_eq!(action.data.status, DisciplinaryStatus::Pending);
        assert_eq!(action.data.degree, DisciplinaryDegree::Second);
        assert!(!action.is_active());
    }

    #[test]
    fn test_degree_ordering() {
        assert!(DisciplinaryDegree::First < DisciplinaryDegree::Fourth);
    }
}
