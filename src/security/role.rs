//! Caller roles and their capabilities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of platform roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Regular campus user; may book resources.
    User,
    ResourceManager,
    /// Manages facilities and approves bookings.
    FacilityManager,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid user role: {0}")]
pub struct InvalidRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::User,
        UserRole::ResourceManager,
        UserRole::FacilityManager,
        UserRole::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::ResourceManager => "RESOURCE_MANAGER",
            UserRole::FacilityManager => "FACILITY_MANAGER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn can_manage_resources(&self) -> bool {
        matches!(
            self,
            UserRole::Admin | UserRole::ResourceManager | UserRole::FacilityManager
        )
    }

    pub fn can_approve_bookings(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::FacilityManager)
    }
}

impl FromStr for UserRole {
    type Err = InvalidRole;

    /// Case-insensitive. A blank label is the default role, `USER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.is_empty() {
            return Ok(UserRole::User);
        }
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| InvalidRole(s.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(
            "Resource_Manager".parse::<UserRole>().unwrap(),
            UserRole::ResourceManager
        );
        assert_eq!(
            "FACILITY_MANAGER".parse::<UserRole>().unwrap(),
            UserRole::FacilityManager
        );
    }

    #[test]
    fn test_blank_defaults_to_user() {
        assert_eq!("".parse::<UserRole>().unwrap(), UserRole::User);
        assert_eq!("  ".parse::<UserRole>().unwrap(), UserRole::User);
    }

    #[test]
    fn test_unknown_label_is_error() {
        let err = "SUPERUSER".parse::<UserRole>().unwrap_err();
        assert_eq!(err, InvalidRole("SUPERUSER".into()));
    }

    #[test]
    fn test_capabilities() {
        let managers: Vec<_> = UserRole::ALL
            .into_iter()
            .filter(UserRole::can_manage_resources)
            .collect();
        assert_eq!(
            managers,
            vec![
                UserRole::ResourceManager,
                UserRole::FacilityManager,
                UserRole::Admin
            ]
        );

        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::ResourceManager.is_admin());
        assert!(UserRole::FacilityManager.can_approve_bookings());
        assert!(!UserRole::ResourceManager.can_approve_bookings());
        assert!(!UserRole::User.can_approve_bookings());
    }
}
