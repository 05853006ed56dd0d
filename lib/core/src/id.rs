//! Strongly-typed identifier types for domain entities.
//!
//! Identifiers in DrugLedger are opaque strings supplied by the outside
//! world (a wallet) or by static configuration (the avatar catalogue).
//! They are compared byte-for-byte: no trimming, no case folding.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Macro to generate a strongly-typed wrapper around an opaque string.
macro_rules! define_string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from a string, exactly as given.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A wallet address as entered by the user or reported by the wallet.
    ///
    /// No format is enforced here; callers that want to reject obviously
    /// malformed input validate before constructing one.
    WalletAddress
);

define_string_id!(
    /// Identifier of an avatar in the avatar catalogue (e.g. `avatar3`).
    AvatarId
);

impl WalletAddress {
    /// Returns the shortened form shown in the UI: the first six characters,
    /// an ellipsis, and the last four.
    ///
    /// Addresses too short to shorten are returned whole.
    #[must_use]
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_display_is_verbatim() {
        let addr = WalletAddress::new(" 0xAbC ");
        assert_eq!(addr.to_string(), " 0xAbC ");
        assert_eq!(addr.as_str(), " 0xAbC ");
    }

    #[test]
    fn equality_is_case_sensitive() {
        assert_ne!(WalletAddress::from("0xabc"), WalletAddress::from("0xABC"));
        assert_eq!(WalletAddress::from("0xabc"), WalletAddress::from("0xabc"));
    }

    #[test]
    fn abbreviated_long_address() {
        let addr = WalletAddress::new("0x1a2b3c4d5e6f");
        assert_eq!(addr.abbreviated(), "0x1a2b...5e6f");
    }

    #[test]
    fn abbreviated_short_address_is_whole() {
        let addr = WalletAddress::new("0x123");
        assert_eq!(addr.abbreviated(), "0x123");
    }

    #[test]
    fn borrow_allows_str_lookup() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(WalletAddress::from("0x456"), 1);
        assert_eq!(map.get("0x456"), Some(&1));
        assert_eq!(map.get("0X456"), None);
    }

    #[test]
    fn id_serde_is_transparent() {
        let id = AvatarId::new("avatar3");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"avatar3\"");
        let parsed: AvatarId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
