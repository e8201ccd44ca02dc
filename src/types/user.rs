use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Account role as reported by the backend.
///
/// Unrecognized roles are preserved verbatim rather than rejected, matching
/// the lenient handling of legacy repair statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Employer,
    Technician,
    Unknown(String),
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Self::Admin,
            "employer" => Self::Employer,
            "technician" => Self::Technician,
            _ => Self::Unknown(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_owned(),
            Role::Employer => "employer".to_owned(),
            Role::Technician => "technician".to_owned(),
            Role::Unknown(s) => s,
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Employer => "employer",
            Self::Technician => "technician",
            Self::Unknown(s) => s,
        }
    }

    /// Roles allowed to accept and process tickets.
    pub fn can_process_repairs(&self) -> bool {
        matches!(self, Self::Admin | Self::Technician)
    }
}

// ---------------------------------------------------------------------------
// User domain type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    pub agency_id: Option<String>,
    pub agency_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_parse() {
        assert_eq!(Role::from("admin".to_owned()), Role::Admin);
        assert_eq!(Role::from("employer".to_owned()), Role::Employer);
        assert_eq!(Role::from("technician".to_owned()), Role::Technician);
    }

    #[test]
    fn unknown_role_is_preserved() {
        let role = Role::from("superintendent".to_owned());
        assert_eq!(role, Role::Unknown("superintendent".to_owned()));
        assert_eq!(role.as_str(), "superintendent");
        assert!(!role.can_process_repairs());
    }

    #[test]
    fn processing_permissions() {
        assert!(Role::Admin.can_process_repairs());
        assert!(Role::Technician.can_process_repairs());
        assert!(!Role::Employer.can_process_repairs());
    }
}
