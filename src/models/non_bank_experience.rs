//! Work experience outside the banking sector.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::Choice;
use crate::dates::{ServiceDuration, service_duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    #[default]
    Public,
    Private,
}

impl Choice for Sector {
    const ALL: &'static [Self] = &[Self::Public, Self::Private];

    fn key(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBankExperienceInput {
    pub information_sheet_id: i64,
    pub employer: String,
    pub sector: Sector,
    pub job_title: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub attestation_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBankExperience {
    pub id: i64,
    #[serde(flatten)]
    pub data: NonBankExperienceInput,
}

impl NonBankExperience {
    pub fn duration(&self, today: NaiveDate) -> ServiceDuration {
        service_duration(self.data.start_date, self.data.end_date.unwrap_or(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let json = serde_json::json!({
            "id": 12,
            "information_sheet_id": 3,
            "employer": "Sonelgaz",
            "sector": "public",
            "job_title": "Comptable",
            "start_date": "2005-01-01",
            "end_date": "2009-06-30"
        });
        let exp: NonBankExperience = serde_json::from_value(json).unwrap();
        assert_eq!(exp.data.sector, Sector::Public);
        assert_eq!(exp.data.attestation_reference, None);
        assert_eq!(exp.duration(NaiveDate::MAX).years, 4);
    }
}
