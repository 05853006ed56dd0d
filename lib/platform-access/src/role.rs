//! Role types for role-based access to the platform.
//!
//! Every participant in the supply chain acts under exactly one role. The
//! role decides which dashboard a user lands on and which navigation
//! sections they can see.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supply-chain persona a connected wallet acts as.
///
/// Serialized as its lowercase token (`"admin"`, `"manufacturer"`, ...),
/// which is also the first path segment of the role's section routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Registers and ships products.
    Manufacturer,
    /// Audits the chain and tracks issues.
    Regulator,
    /// Moves shipments between parties.
    Distributor,
    /// Anyone else. The default for unknown wallets.
    #[default]
    Public,
}

impl Role {
    /// All roles, in navigation order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Manufacturer,
        Role::Regulator,
        Role::Distributor,
        Role::Public,
    ];

    /// Returns the lowercase token used in storage and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manufacturer => "manufacturer",
            Self::Regulator => "regulator",
            Self::Distributor => "distributor",
            Self::Public => "public",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manufacturer => "Manufacturer",
            Self::Regulator => "Regulator",
            Self::Distributor => "Distributor",
            Self::Public => "Public",
        }
    }

    /// Parses a role token. Only the exact lowercase tokens are accepted.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == token)
    }

    /// Returns the role named by the first segment of a route path, if any.
    ///
    /// `/manufacturer/dashboard` yields `Manufacturer`; `/profile` and `/`
    /// yield `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        path.split('/')
            .find(|segment| !segment.is_empty())
            .and_then(Self::from_token)
    }

    /// Returns the route of this role's dashboard.
    #[must_use]
    pub fn dashboard_route(&self) -> String {
        format!("/{}/dashboard", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the five role tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {:?}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| ParseRoleError {
            input: s.to_string(),
        })
    }
}
