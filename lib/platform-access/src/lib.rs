//! Wallet-based access for DrugLedger.
//!
//! This crate provides:
//! - Roles and the address-to-role registry (`Role`, `AddressRegistry`)
//! - Persisted session state (`SessionStore`, `Session`)
//! - Role-aware sidebar navigation (`compute_navigation`)
//! - The simulated wallet connection flow (`ConnectFlow`)
//! - Language and avatar preferences (`PreferenceStore`)
//!
//! # Access Model
//!
//! There is no authentication. Connecting a wallet looks its address up in
//! a fixed registry; unknown addresses get the `public` role. The role is
//! persisted client-side and only decides which navigation entries are
//! shown.
//!
//! # Example
//!
//! ```
//! use drugledger_platform_access::{
//!     compute_visible_entries, AddressRegistry, MemoryStore, Role, SessionStore,
//! };
//! use drugledger_core::WalletAddress;
//!
//! let registry = AddressRegistry::demo();
//! let address = WalletAddress::new("0x789");
//! let role = registry.resolve_role(address.as_str());
//! assert_eq!(role, Role::Regulator);
//!
//! let store = SessionStore::new(MemoryStore::new());
//! let session = store.create_session(&address, role, None);
//! assert_eq!(session.dashboard_route(), "/regulator/dashboard");
//!
//! let entries = compute_visible_entries(store.read_role(), "/regulator/audit");
//! assert!(entries.iter().any(|e| e.route == "/regulator/audit" && e.active));
//! assert!(entries.iter().all(|e| !e.route.starts_with("/admin")));
//! ```

pub mod connect;
pub mod error;
pub mod navigation;
pub mod preferences;
pub mod registry;
pub mod role;
pub mod session;
pub mod storage;

// Re-export main types at crate root
pub use connect::{
    ConnectFlow, ConnectPhase, ConnectTiming, ConnectionMethod, generate_address,
    validate_address,
};
pub use error::{AddressError, ConnectError, StorageError};
pub use navigation::{
    NavigationEntry, NavigationGroup, compute_navigation, compute_visible_entries,
    sidebar_visible,
};
pub use preferences::{AVATARS, Avatar, Language, PreferenceStore, avatar_by_id};
pub use registry::{AddressRegistry, AddressRoleEntry, resolve_role};
pub use role::Role;
pub use session::{Profile, Session, SessionStore};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
pub use storage::{GuardedStore, KeyValueStore, MemoryStore};
