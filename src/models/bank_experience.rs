//! Work experience inside the banking sector.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{ServiceDuration, service_duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankExperienceInput {
    pub information_sheet_id: i64,
    pub institution: String,
    pub job_title: String,
    pub structure: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub decision_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankExperience {
    pub id: i64,
    #[serde(flatten)]
    pub data: BankExperienceInput,
}

impl BankExperience {
    /// Open-ended positions run until `today`.
    pub fn duration(&self, today: NaiveDate) -> ServiceDuration {
        service_duration(self.data.start_date, self.data.end_date.unwrap_or(today))
    }

    pub fn is_current(&self) -> bool {
        self.data.end_date.is_none()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn bank_experience(id: i64, sheet_id: i64, start: (i32, u32, u32), end: Option<(i32, u32, u32)>) -> BankExperience {
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        BankExperience {
            id,
            data: BankExperienceInput {
                information_sheet_id: sheet_id,
                institution: "BNA".to_string(),
                job_title: format!("Poste {id}"),
                structure: "Agence Hydra".to_string(),
                start_date: date(start),
                end_date: end.map(date),
                classification: None,
                decision_reference: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::bank_experience;
    use super::*;

    #[test]
    fn test_open_ended_duration() {
        let exp = bank_experience(1, 1, (2020, 1, 1), None);
        let today = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
        assert!(exp.is_current());
        assert_eq!(exp.duration(today).to_short(), "2y 6m 0d");
    }

    #[test]
    fn test_closed_duration_ignores_today() {
        let exp = bank_experience(1, 1, (2012, 3, 1), Some((2015, 3, 1)));
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(exp.duration(today).years, 3);
    }
}
