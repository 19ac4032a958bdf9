//! Back-office user accounts and the authenticated session.

use serde::{Deserialize, Serialize};

use super::choice::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    HrManager,
    HrAgent,
    #[default]
    Viewer,
}

impl Role {
    pub fn can_edit(self) -> bool {
        !matches!(self, Self::Viewer)
    }

    pub fn can_manage_users(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Choice for Role {
    const ALL: &'static [Self] = &[Self::Admin, Self::HrManager, Self::HrAgent, Self::Viewer];

    fn key(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::HrManager => "hr_manager",
            Self::HrAgent => "hr_agent",
            Self::Viewer => "viewer",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::HrManager => "HR manager",
            Self::HrAgent => "HR agent",
            Self::Viewer => "Viewer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create/update payload. The password is only sent when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticated session, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_users());
        assert!(!Role::HrManager.can_manage_users());
        assert!(Role::HrAgent.can_edit());
        assert!(!Role::Viewer.can_edit());
    }

    #[test]
    fn test_password_omitted_when_unset() {
        let input = UserInput {
            username: "amine".to_string(),
            full_name: "Amine Zerrouki".to_string(),
            email: None,
            role: Role::HrAgent,
            is_active: true,
            password: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "hr_agent");
    }
}
