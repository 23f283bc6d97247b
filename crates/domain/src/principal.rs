//! Principal — an authenticated actor and its role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForbiddenError;
use crate::id::UserId;

/// Role granted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "admin" => Ok(Self::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// An authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub fn guest(id: UserId) -> Self {
        Self {
            id,
            role: Role::Guest,
        }
    }

    #[must_use]
    pub fn admin(id: UserId) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// # Errors
    ///
    /// Returns [`ForbiddenError::AdminRequired`] for non-administrators.
    pub fn require_admin(&self) -> Result<(), ForbiddenError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ForbiddenError::AdminRequired)
        }
    }

    /// Administrators may act on anything; everyone else only on what they own.
    #[must_use]
    pub fn may_act_for(&self, owner: UserId) -> bool {
        self.is_admin() || self.id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_let_admin_act_for_anyone() {
        let admin = Principal::admin(UserId::new());
        assert!(admin.may_act_for(UserId::new()));
        assert!(admin.require_admin().is_ok());
    }

    #[test]
    fn should_let_guest_act_only_for_self() {
        let guest = Principal::guest(UserId::new());
        assert!(guest.may_act_for(guest.id));
        assert!(!guest.may_act_for(UserId::new()));
        assert_eq!(guest.require_admin(), Err(ForbiddenError::AdminRequired));
    }

    #[test]
    fn should_parse_roles() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("guest".parse::<Role>().unwrap(), Role::Guest);
        assert!("staff".parse::<Role>().is_err());
    }
}
