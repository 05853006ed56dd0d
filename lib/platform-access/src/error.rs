//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `StorageError`: Failures of a key-value storage backend
//! - `AddressError`: Manually entered wallet addresses that fail validation
//! - `ConnectError`: Failures of the simulated wallet connection flow
//!
//! Storage errors never reach the UI. The session and preference stores
//! catch them at their boundary and degrade to in-memory state.

use std::fmt;

/// Errors from a key-value storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend cannot be used at all (disabled, missing, sandboxed).
    Unavailable { reason: String },
    /// Reading a key failed.
    ReadFailed { key: String, reason: String },
    /// Writing a key failed.
    WriteFailed { key: String, reason: String },
    /// Removing a key failed.
    RemoveFailed { key: String, reason: String },
    /// The backing file could not be decoded.
    Corrupt { location: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => {
                write!(f, "storage unavailable: {reason}")
            }
            Self::ReadFailed { key, reason } => {
                write!(f, "failed to read '{key}': {reason}")
            }
            Self::WriteFailed { key, reason } => {
                write!(f, "failed to write '{key}': {reason}")
            }
            Self::RemoveFailed { key, reason } => {
                write!(f, "failed to remove '{key}': {reason}")
            }
            Self::Corrupt { location, reason } => {
                write!(f, "storage at {location} is corrupt: {reason}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Validation failures for a manually entered wallet address.
///
/// The `Display` output is the message shown under the address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Nothing was entered.
    Missing,
    /// The input does not look like a wallet address.
    Malformed { address: String },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Please enter a wallet address"),
            Self::Malformed { .. } => write!(f, "Please enter a valid wallet address"),
        }
    }
}

impl std::error::Error for AddressError {}

/// Errors from the simulated wallet connection flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The manually entered address was rejected.
    InvalidAddress(AddressError),
    /// No randomness source was available to generate an address.
    RandomnessUnavailable { reason: String },
    /// An event arrived that the current phase does not accept.
    InvalidTransition {
        phase: &'static str,
        event: &'static str,
    },
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(err) => write!(f, "{err}"),
            Self::RandomnessUnavailable { reason } => {
                write!(f, "could not generate a wallet address: {reason}")
            }
            Self::InvalidTransition { phase, event } => {
                write!(f, "cannot handle '{event}' while {phase}")
            }
        }
    }
}

impl std::error::Error for ConnectError {}

impl From<AddressError> for ConnectError {
    fn from(err: AddressError) -> Self {
        Self::InvalidAddress(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_unavailable_display() {
        let err = StorageError::Unavailable {
            reason: "localStorage disabled".to_string(),
        };
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("localStorage disabled"));
    }

    #[test]
    fn storage_error_write_failed_display() {
        let err = StorageError::WriteFailed {
            key: "userRole".to_string(),
            reason: "quota exceeded".to_string(),
        };
        assert!(err.to_string().contains("userRole"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn address_error_messages_are_user_facing() {
        assert_eq!(
            AddressError::Missing.to_string(),
            "Please enter a wallet address"
        );
        let err = AddressError::Malformed {
            address: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Please enter a valid wallet address");
    }

    #[test]
    fn connect_error_wraps_address_error_message() {
        let err: ConnectError = AddressError::Missing.into();
        assert_eq!(err.to_string(), "Please enter a wallet address");
    }

    #[test]
    fn connect_error_invalid_transition_display() {
        let err = ConnectError::InvalidTransition {
            phase: "idle",
            event: "detect",
        };
        assert!(err.to_string().contains("detect"));
        assert!(err.to_string().contains("idle"));
    }
}
