//! Professional training sessions followed by an employee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    #[default]
    Internal,
    External,
    Abroad,
}

impl Choice for TrainingType {
    const ALL: &'static [Self] = &[Self::Internal, Self::External, Self::Abroad];

    fn key(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Abroad => "abroad",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::External => "External",
            Self::Abroad => "Abroad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl Choice for TrainingStatus {
    const ALL: &'static [Self] = &[Self::Planned, Self::InProgress, Self::Completed, Self::Cancelled];

    fn key(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalTrainingInput {
    pub information_sheet_id: i64,
    pub title: String,
    pub organization: String,
    pub training_type: TrainingType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub certificate_obtained: bool,
    #[serde(default)]
    pub status: TrainingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalTraining {
    pub id: i64,
    #[serde(flatten)]
    pub data: ProfessionalTrainingInput,
}

impl ProfessionalTraining {
    /// Length in calendar days, both ends included.
    pub fn length_days(&self) -> Option<i64> {
        self.data
            .end_date
            .map(|end| (end - self.data.start_date).num_days() + 1)
            .filter(|days| *days > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_key() {
        let json = serde_json::to_string(&TrainingStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(TrainingStatus::InProgress.key(), "in_progress");
    }

    #[test]
    fn test_length_days() {
        let training = ProfessionalTraining {
            id: 1,
            data: ProfessionalTrainingInput {
                information_sheet_id: 1,
                title: "Conformité AML".to_string(),
                organization: "Institut bancaire".to_string(),
                training_type: TrainingType::External,
                start_date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 2, 9),
                certificate_obtained: true,
                status: TrainingStatus::Completed,
            },
        };
        assert_eq!(training.length_days(), Some(5));
    }
}
