//! Caller privilege levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Privilege classification of a caller.
///
/// Ordered by privilege so authorization checks can compare against a
/// minimum: `None < Admin < SuperAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    None,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self >= Self::Admin
    }

    /// The registry role this classification corresponds to, if any.
    pub fn as_admin_role(self) -> Option<AdminRole> {
        match self {
            Self::None => None,
            Self::Admin => Some(AdminRole::Admin),
            Self::SuperAdmin => Some(AdminRole::SuperAdmin),
        }
    }
}

/// Role stored in the admin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl From<AdminRole> for Role {
    fn from(role: AdminRole) -> Self {
        match role {
            AdminRole::Admin => Self::Admin,
            AdminRole::SuperAdmin => Self::SuperAdmin,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown admin role: {0}")]
pub struct ParseAdminRoleError(pub String);

impl FromStr for AdminRole {
    type Err = ParseAdminRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(ParseAdminRoleError(other.to_owned())),
        }
    }
}
