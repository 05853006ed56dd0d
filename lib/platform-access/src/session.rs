//! Session state for the connected wallet.
//!
//! A session records which role the current device acts as. It is created
//! when a wallet connects, read by every role-aware view, and cleared on
//! logout. The role outlives page reloads by living in a [`KeyValueStore`].
//!
//! Role resolution for a page render follows one policy: a role token in
//! the first path segment wins over the stored role and is written back,
//! so that bookmarks and hard refreshes on `/regulator/...` restore the
//! regulator view. See [`effective_role`].

use drugledger_core::WalletAddress;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::role::Role;
use crate::storage::{GuardedStore, KeyValueStore};

/// Storage key holding the role token.
pub const USER_ROLE_KEY: &str = "userRole";
/// Storage key holding the JSON profile.
pub const USER_PROFILE_KEY: &str = "userProfile";
/// Storage key holding the connected wallet address.
pub const WALLET_ADDRESS_KEY: &str = "walletAddress";

/// Every key owned by a session. Logout removes all of them.
pub const SESSION_KEYS: [&str; 3] = [USER_ROLE_KEY, USER_PROFILE_KEY, WALLET_ADDRESS_KEY];

/// Minimal user profile shown in the sidebar and on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Profile {
    /// Creates a profile.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// On-disk shape of `userProfile`: the profile plus the role it was saved under.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileRecord {
    name: String,
    email: String,
    #[serde(default)]
    role: Option<Role>,
}

/// The resolved identity of the current device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    role: Role,
    address: Option<WalletAddress>,
    profile: Option<Profile>,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(role: Role, address: Option<WalletAddress>, profile: Option<Profile>) -> Self {
        Self {
            role,
            address,
            profile,
        }
    }

    /// Returns the session role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the connected wallet address.
    ///
    /// Absent when the role was restored from a route rather than a wallet
    /// connection.
    #[must_use]
    pub fn address(&self) -> Option<&WalletAddress> {
        self.address.as_ref()
    }

    /// Returns the stored profile, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Returns the name to display for this session. Blank names show as "User".
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
    }

    /// Returns the route of this session's dashboard.
    #[must_use]
    pub fn dashboard_route(&self) -> String {
        self.role.dashboard_route()
    }
}

/// Where the role for a render came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    /// The first path segment named a role.
    Path(Role),
    /// No role in the path; the stored role was used.
    Storage(Role),
    /// Neither the path nor storage produced a role.
    Unresolved,
}

impl RoleSource {
    /// Returns the resolved role, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Path(role) | Self::Storage(role) => Some(*role),
            Self::Unresolved => None,
        }
    }
}

/// Decides the role for a render from the current path and the stored role.
///
/// The path is authoritative: when it names a role, that role is used even
/// if storage disagrees.
#[must_use]
pub fn effective_role(path: &str, stored: Option<Role>) -> RoleSource {
    match (Role::from_path(path), stored) {
        (Some(role), _) => RoleSource::Path(role),
        (None, Some(role)) => RoleSource::Storage(role),
        (None, None) => RoleSource::Unresolved,
    }
}

/// Persists session state through a key-value backend.
///
/// Backend failures never surface: the store degrades to memory for the
/// rest of its lifetime, which in the browser is one page load.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: GuardedStore<S>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Creates a session store over a backend.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self {
            storage: GuardedStore::new(backend),
        }
    }

    /// Returns true if storage failed and state is memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.storage.is_degraded()
    }

    /// Records a new session, replacing any previous one.
    ///
    /// Without a profile, any previously stored profile is removed.
    #[instrument(skip(self, profile), fields(role = %role))]
    pub fn create_session(
        &self,
        address: &WalletAddress,
        role: Role,
        profile: Option<Profile>,
    ) -> Session {
        self.storage.set(USER_ROLE_KEY, role.as_str());
        self.storage.set(WALLET_ADDRESS_KEY, address.as_str());
        match &profile {
            Some(profile) => self.write_profile(profile, role),
            None => self.storage.remove(USER_PROFILE_KEY),
        }
        debug!("session created");
        Session::new(role, Some(address.clone()), profile)
    }

    /// Returns the stored role.
    ///
    /// Absent or unrecognized values read as `None`.
    #[must_use]
    pub fn read_role(&self) -> Option<Role> {
        let raw = self.storage.get(USER_ROLE_KEY)?;
        let role = Role::from_token(&raw);
        if role.is_none() {
            warn!(value = %raw, "ignoring unrecognized stored role");
        }
        role
    }

    /// Stores a role on its own, keeping address and profile.
    pub fn write_role(&self, role: Role) {
        self.storage.set(USER_ROLE_KEY, role.as_str());
    }

    /// Returns the stored wallet address.
    #[must_use]
    pub fn read_address(&self) -> Option<WalletAddress> {
        self.storage.get(WALLET_ADDRESS_KEY).map(WalletAddress::from)
    }

    /// Returns the stored profile. Unparseable values read as `None`.
    #[must_use]
    pub fn read_profile(&self) -> Option<Profile> {
        let raw = self.storage.get(USER_PROFILE_KEY)?;
        match serde_json::from_str::<ProfileRecord>(&raw) {
            Ok(record) => {
                debug!(saved_role = ?record.role, "profile loaded");
                Some(Profile {
                    name: record.name,
                    email: record.email,
                })
            }
            Err(e) => {
                warn!(error = %e, "ignoring unparseable stored profile");
                None
            }
        }
    }

    /// Saves the profile under the current role.
    pub fn save_profile(&self, profile: &Profile) {
        let role = self.read_role().unwrap_or_default();
        self.write_profile(profile, role);
    }

    fn write_profile(&self, profile: &Profile, role: Role) {
        let record = ProfileRecord {
            name: profile.name.clone(),
            email: profile.email.clone(),
            role: Some(role),
        };
        match serde_json::to_string(&record) {
            Ok(json) => self.storage.set(USER_PROFILE_KEY, &json),
            Err(e) => warn!(error = %e, "failed to encode profile"),
        }
    }

    /// Returns the stored session, if a valid role is stored.
    #[must_use]
    pub fn read_session(&self) -> Option<Session> {
        let role = self.read_role()?;
        Some(Session::new(role, self.read_address(), self.read_profile()))
    }

    /// Removes every session key. Safe to call without a session.
    #[instrument(skip(self))]
    pub fn clear_session(&self) {
        for key in SESSION_KEYS {
            self.storage.remove(key);
        }
        debug!("session cleared");
    }

    /// Resolves the role for rendering `path`.
    ///
    /// A role named by the path is written back to storage when it differs
    /// from the stored one.
    #[instrument(skip(self))]
    pub fn resolve_role_for_path(&self, path: &str) -> Option<Role> {
        let stored = self.read_role();
        let source = effective_role(path, stored);
        if let RoleSource::Path(role) = source {
            if stored != Some(role) {
                debug!(role = %role, "restoring role from path");
                self.write_role(role);
            }
        }
        source.role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AddressRegistry;
    use crate::storage::{MemoryStore, RejectingStore, UnavailableStore};

    fn addr(s: &str) -> WalletAddress {
        WalletAddress::new(s)
    }

    #[test]
    fn create_then_read_role_for_every_role() {
        for role in Role::ALL {
            let store = SessionStore::new(MemoryStore::new());
            store.create_session(&addr("0x1"), role, None);
            assert_eq!(store.read_role(), Some(role));
        }
    }

    #[test]
    fn clear_session_is_idempotent() {
        let store = SessionStore::new(MemoryStore::new());
        store.create_session(&addr("0x123"), Role::Admin, Some(Profile::new("A", "a@x")));

        store.clear_session();
        assert_eq!(store.read_role(), None);
        assert_eq!(store.read_profile(), None);
        assert_eq!(store.read_address(), None);

        store.clear_session();
        assert_eq!(store.read_session(), None);
    }

    #[test]
    fn clear_session_without_session() {
        let store = SessionStore::new(MemoryStore::new());
        store.clear_session();
        assert_eq!(store.read_role(), None);
    }

    #[test]
    fn corrupted_role_reads_as_none() {
        let backend = MemoryStore::new();
        backend.set(USER_ROLE_KEY, "superadmin").expect("set");
        let store = SessionStore::new(&backend);
        assert_eq!(store.read_role(), None);
        assert_eq!(store.read_session(), None);

        backend.set(USER_ROLE_KEY, "Admin").expect("set");
        assert_eq!(store.read_role(), None);
    }

    #[test]
    fn corrupted_profile_reads_as_none() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(&backend);
        store.create_session(&addr("0x456"), Role::Manufacturer, None);
        backend.set(USER_PROFILE_KEY, "{\"name\":").expect("set");

        assert_eq!(store.read_profile(), None);
        let session = store.read_session().expect("role still valid");
        assert_eq!(session.role(), Role::Manufacturer);
        assert_eq!(session.display_name(), "User");
    }

    #[test]
    fn last_session_wins() {
        let store = SessionStore::new(MemoryStore::new());
        store.create_session(&addr("0x123"), Role::Admin, Some(Profile::new("Ann", "ann@x")));
        store.create_session(&addr("0x789"), Role::Regulator, None);

        let session = store.read_session().expect("session");
        assert_eq!(session.role(), Role::Regulator);
        assert_eq!(session.address(), Some(&addr("0x789")));
        assert_eq!(session.profile(), None);
    }

    #[test]
    fn profile_is_stored_with_role() {
        let backend = MemoryStore::new();
        let store = SessionStore::new(&backend);
        let profile = Profile::new("Dana", "dana@example.com");
        store.create_session(&addr("0xabc"), Role::Distributor, Some(profile.clone()));

        let raw = backend.get(USER_PROFILE_KEY).expect("get").expect("stored");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["name"], "Dana");
        assert_eq!(value["email"], "dana@example.com");
        assert_eq!(value["role"], "distributor");

        assert_eq!(store.read_profile(), Some(profile));
    }

    #[test]
    fn profile_without_role_field_is_accepted() {
        let backend = MemoryStore::new();
        backend
            .set(USER_PROFILE_KEY, r#"{"name":"Lee","email":"lee@x"}"#)
            .expect("set");
        let store = SessionStore::new(&backend);
        assert_eq!(store.read_profile(), Some(Profile::new("Lee", "lee@x")));
    }

    #[test]
    fn save_profile_keeps_role() {
        let store = SessionStore::new(MemoryStore::new());
        store.create_session(&addr("0x789"), Role::Regulator, None);
        store.save_profile(&Profile::new("Rae", "rae@x"));

        let session = store.read_session().expect("session");
        assert_eq!(session.role(), Role::Regulator);
        assert_eq!(session.display_name(), "Rae");
    }

    #[test]
    fn admin_scenario() {
        let registry = AddressRegistry::demo();
        assert_eq!(registry.resolve_role("0x123"), Role::Admin);
        assert_eq!(registry.resolve_role("0xDEADBEEF"), Role::Public);

        let store = SessionStore::new(MemoryStore::new());
        let session = store.create_session(&addr("0x123"), Role::Admin, None);
        assert_eq!(session.dashboard_route(), "/admin/dashboard");
        assert_eq!(store.read_role(), Some(Role::Admin));
    }

    #[test]
    fn effective_role_prefers_path() {
        assert_eq!(
            effective_role("/regulator/audit", Some(Role::Admin)),
            RoleSource::Path(Role::Regulator)
        );
        assert_eq!(
            effective_role("/settings", Some(Role::Admin)),
            RoleSource::Storage(Role::Admin)
        );
        assert_eq!(effective_role("/profile", None), RoleSource::Unresolved);
        assert_eq!(RoleSource::Unresolved.role(), None);
    }

    #[test]
    fn path_role_is_written_back() {
        let store = SessionStore::new(MemoryStore::new());
        assert_eq!(
            store.resolve_role_for_path("/regulator/dashboard"),
            Some(Role::Regulator)
        );
        assert_eq!(store.read_role(), Some(Role::Regulator));
    }

    #[test]
    fn path_role_overrides_disagreeing_storage() {
        let store = SessionStore::new(MemoryStore::new());
        store.create_session(&addr("0x123"), Role::Admin, None);

        assert_eq!(
            store.resolve_role_for_path("/public/search"),
            Some(Role::Public)
        );
        assert_eq!(store.read_role(), Some(Role::Public));
        assert_eq!(store.read_address(), Some(addr("0x123")));
    }

    #[test]
    fn utility_path_uses_stored_role() {
        let store = SessionStore::new(MemoryStore::new());
        store.create_session(&addr("0x456"), Role::Manufacturer, None);
        assert_eq!(
            store.resolve_role_for_path("/settings"),
            Some(Role::Manufacturer)
        );
    }

    #[test]
    fn utility_path_without_session_is_unresolved() {
        let store = SessionStore::new(MemoryStore::new());
        assert_eq!(store.resolve_role_for_path("/profile"), None);
        assert_eq!(store.read_role(), None);
    }

    #[test]
    fn unavailable_storage_degrades_to_memory() {
        let store = SessionStore::new(UnavailableStore);
        assert_eq!(store.read_role(), None);

        store.create_session(&addr("0x123"), Role::Admin, None);
        assert!(store.is_degraded());
        assert_eq!(store.read_role(), Some(Role::Admin));

        store.clear_session();
        store.clear_session();
        assert_eq!(store.read_role(), None);
    }

    #[test]
    fn rejected_address_write_keeps_the_session() {
        let store = SessionStore::new(RejectingStore::rejecting(&[WALLET_ADDRESS_KEY]));

        store.create_session(&addr("0x123"), Role::Admin, None);

        assert!(store.is_degraded());
        assert_eq!(store.read_role(), Some(Role::Admin));
        assert_eq!(store.read_address(), Some(addr("0x123")));
    }

    #[test]
    fn rejected_profile_write_keeps_the_persisted_role() {
        let backend = RejectingStore::rejecting(&[USER_PROFILE_KEY]);
        backend.inner.set(USER_ROLE_KEY, "regulator").expect("seed");
        let store = SessionStore::new(&backend);

        store.save_profile(&Profile::new("Rita", "rita@example.com"));

        assert_eq!(store.read_role(), Some(Role::Regulator));
        assert_eq!(store.resolve_role_for_path("/settings"), Some(Role::Regulator));
        assert_eq!(store.read_profile().map(|p| p.name), Some("Rita".to_string()));
    }

    #[test]
    fn logout_after_degrading_clears_the_backend() {
        let backend = RejectingStore::rejecting(&[WALLET_ADDRESS_KEY]);
        let store = SessionStore::new(&backend);
        store.create_session(&addr("0x456"), Role::Manufacturer, None);

        store.clear_session();

        assert_eq!(store.read_role(), None);
        assert_eq!(backend.inner.get(USER_ROLE_KEY).expect("get"), None);
        // A fresh store over the same backend (the next page load) sees no session.
        assert_eq!(SessionStore::new(&backend).read_role(), None);
    }

    #[test]
    fn session_display_name_defaults() {
        let session = Session::new(Role::Public, None, None);
        assert_eq!(session.display_name(), "User");
        assert_eq!(session.address(), None);

        let blank = Session::new(Role::Public, None, Some(Profile::new("", "a@b.c")));
        assert_eq!(blank.display_name(), "User");
    }
}
