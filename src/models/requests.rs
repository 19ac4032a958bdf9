//! Document-generation requests: work certificates and administrative
//! investigation requests addressed to a daira or a wilaya.
//!
//! Status values only drive what the UI offers; the API is the authority.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CertificateStatus {
    /// Statuses the UI offers from this one.
    pub fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl Choice for CertificateStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected];

    fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationStatus {
    #[default]
    Pending,
    Submitted,
    InProgress,
    Completed,
    Cancelled,
}

impl InvestigationStatus {
    /// Forward step plus cancellation while the request is open.
    pub fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Submitted, Self::Cancelled],
            Self::Submitted => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl Choice for InvestigationStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Submitted,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCertificateRequestInput {
    pub information_sheet_id: i64,
    pub request_date: NaiveDate,
    pub purpose: String,
    #[serde(default)]
    pub status: CertificateStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCertificateRequest {
    pub id: i64,
    #[serde(flatten)]
    pub data: WorkCertificateRequestInput,
}

/// Payload shared by daira and wilaya requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationRequestInput {
    pub information_sheet_id: i64,
    pub reference_number: String,
    /// Name of the daira or wilaya addressed.
    pub authority: String,
    pub subject: String,
    pub request_date: NaiveDate,
    #[serde(default)]
    pub status: InvestigationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DairaInvestigationRequest {
    pub id: i64,
    #[serde(flatten)]
    pub data: InvestigationRequestInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WilayaInvestigationRequest {
    pub id: i64,
    #[serde(flatten)]
    pub data: InvestigationRequestInput,
}

/// Which administrative level an investigation request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestigationLevel {
    Daira,
    Wilaya,
}
