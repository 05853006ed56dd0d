//! Wallet address to role registry.
//!
//! The registry is a fixed lookup table consulted once per wallet
//! connection. Lookups are exact: addresses are neither trimmed nor
//! case-folded, so `0xABC` and `0xabc` are different wallets.

use drugledger_core::WalletAddress;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::role::Role;

/// A single address-to-role assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRoleEntry {
    /// The wallet address, matched verbatim.
    pub address: WalletAddress,
    /// The role granted to that address.
    pub role: Role,
}

impl AddressRoleEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(address: impl Into<WalletAddress>, role: Role) -> Self {
        Self {
            address: address.into(),
            role,
        }
    }
}

/// Demo wallets shipped with the application, one per privileged role.
pub const DEMO_WALLETS: [(&str, Role); 4] = [
    ("0x123", Role::Admin),
    ("0x456", Role::Manufacturer),
    ("0x789", Role::Regulator),
    ("0xabc", Role::Distributor),
];

/// Static mapping from wallet addresses to roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRegistry {
    entries: HashMap<WalletAddress, Role>,
}

impl AddressRegistry {
    /// Creates a registry from a list of entries.
    ///
    /// When an address appears more than once, the last entry wins.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = AddressRoleEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.address, entry.role))
                .collect(),
        }
    }

    /// Creates a registry holding only the demo wallets.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(
            DEMO_WALLETS
                .iter()
                .map(|(address, role)| AddressRoleEntry::new(*address, *role)),
        )
    }

    /// Resolves the role for a connected address.
    ///
    /// Never fails: an address without an entry acts as [`Role::Public`].
    #[must_use]
    pub fn resolve_role(&self, address: &str) -> Role {
        match self.entries.get(address) {
            Some(role) => *role,
            None => {
                debug!(address, "address not in registry, defaulting to public");
                Role::Public
            }
        }
    }

    /// Returns the number of registered addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no addresses are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AddressRegistry {
    fn default() -> Self {
        Self::demo()
    }
}

static DEMO_REGISTRY: LazyLock<AddressRegistry> = LazyLock::new(AddressRegistry::demo);

/// Resolves an address against the demo registry.
#[must_use]
pub fn resolve_role(address: &str) -> Role {
    DEMO_REGISTRY.resolve_role(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_addresses_resolve_to_their_roles() {
        let registry = AddressRegistry::demo();
        assert_eq!(registry.resolve_role("0x123"), Role::Admin);
        assert_eq!(registry.resolve_role("0x456"), Role::Manufacturer);
        assert_eq!(registry.resolve_role("0x789"), Role::Regulator);
        assert_eq!(registry.resolve_role("0xabc"), Role::Distributor);
    }

    #[test]
    fn unmapped_addresses_resolve_to_public() {
        let registry = AddressRegistry::demo();
        for address in ["0xDEADBEEF", "", "0x", "not-an-address", "0x1234"] {
            assert_eq!(registry.resolve_role(address), Role::Public, "{address}");
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = AddressRegistry::demo();
        for (address, role) in DEMO_WALLETS {
            assert_eq!(registry.resolve_role(address), role);
            assert_eq!(registry.resolve_role(address), role);
        }
    }

    #[test]
    fn matching_is_exact() {
        let registry = AddressRegistry::demo();
        assert_eq!(registry.resolve_role("0xABC"), Role::Public);
        assert_eq!(registry.resolve_role(" 0x123"), Role::Public);
        assert_eq!(registry.resolve_role("0x123 "), Role::Public);
    }

    #[test]
    fn later_entries_override_earlier_ones() {
        let registry = AddressRegistry::new([
            AddressRoleEntry::new("0x1", Role::Admin),
            AddressRoleEntry::new("0x1", Role::Regulator),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve_role("0x1"), Role::Regulator);
    }

    #[test]
    fn empty_registry_resolves_everything_to_public() {
        let registry = AddressRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.resolve_role("0x123"), Role::Public);
    }

    #[test]
    fn free_function_uses_demo_registry() {
        assert_eq!(resolve_role("0x123"), Role::Admin);
        assert_eq!(resolve_role("0xDEADBEEF"), Role::Public);
    }

    #[test]
    fn default_is_demo() {
        assert_eq!(AddressRegistry::default(), AddressRegistry::demo());
    }
}
