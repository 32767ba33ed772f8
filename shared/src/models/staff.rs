//! Staff Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Staff role, drives endpoint authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Waiter,
    Cook,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Waiter => "waiter",
            Role::Cook => "cook",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "waiter" => Ok(Role::Waiter),
            "cook" => Ok(Role::Cook),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Staff entity as stored, including the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    /// Argon2 PHC string, never serialized out of the storage layer
    pub password_hash: String,
    pub is_active: bool,
}

impl Staff {
    /// Strip credentials for API responses
    pub fn to_public(&self) -> StaffPublic {
        StaffPublic {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// Staff view returned by the API, without the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffPublic {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::Waiter, Role::Cook] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn public_view_drops_the_hash() {
        let staff = Staff {
            id: 7,
            username: "mesero1".into(),
            display_name: "Juan Pérez".into(),
            role: Role::Waiter,
            password_hash: "$argon2id$...".into(),
            is_active: true,
        };
        let json = serde_json::to_string(&staff.to_public()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("mesero1"));
    }
}
