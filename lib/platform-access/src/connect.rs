//! Simulated wallet connection.
//!
//! No wallet is contacted. A connection picks an address (random, or typed
//! by the user), waits out a few fixed delays standing in for network
//! round trips, resolves the address's role, records the session, and
//! hands back the dashboard to redirect to.
//!
//! [`ConnectFlow`] holds the phase machine; the delays are driven by the UI
//! using [`ConnectTiming`].

use drugledger_core::WalletAddress;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{AddressError, ConnectError};
use crate::registry::AddressRegistry;
use crate::role::Role;
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;

/// Number of random bytes in a generated address (12 hex characters).
const GENERATED_ADDRESS_BYTES: usize = 6;

/// Shortest manually entered address accepted, including the `0x` prefix.
const MIN_ADDRESS_LEN: usize = 4;

/// How the wallet address is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMethod {
    /// A random address is generated.
    #[default]
    Auto,
    /// The user types an address.
    Manual,
}

/// Delays of the simulated connection, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectTiming {
    /// Wait before the wallet reports connected.
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
    /// Wait between connecting and detecting the role.
    #[serde(default = "default_detect_delay_ms")]
    pub detect_delay_ms: u64,
    /// Wait between detecting the role and redirecting.
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

fn default_connect_delay_ms() -> u64 {
    1500
}

fn default_detect_delay_ms() -> u64 {
    1000
}

fn default_redirect_delay_ms() -> u64 {
    1000
}

impl Default for ConnectTiming {
    fn default() -> Self {
        Self {
            connect_delay_ms: default_connect_delay_ms(),
            detect_delay_ms: default_detect_delay_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl ConnectTiming {
    /// Returns the connect delay.
    #[must_use]
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    /// Returns the role-detection delay.
    #[must_use]
    pub fn detect_delay(&self) -> Duration {
        Duration::from_millis(self.detect_delay_ms)
    }

    /// Returns the redirect delay.
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Checks that a typed address looks like a wallet address.
///
/// Only the shape is checked: a `0x` prefix and at least four characters.
///
/// # Errors
///
/// Returns [`AddressError::Missing`] for empty input and
/// [`AddressError::Malformed`] otherwise.
pub fn validate_address(input: &str) -> Result<WalletAddress, AddressError> {
    if input.is_empty() {
        return Err(AddressError::Missing);
    }
    if !input.starts_with("0x") || input.len() < MIN_ADDRESS_LEN {
        return Err(AddressError::Malformed {
            address: input.to_string(),
        });
    }
    Ok(WalletAddress::new(input))
}

/// Generates a random `0x`-prefixed address of twelve lowercase hex digits.
///
/// # Errors
///
/// Returns an error if the platform has no randomness source.
pub fn generate_address() -> Result<WalletAddress, Report<ConnectError>> {
    let mut bytes = [0u8; GENERATED_ADDRESS_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| ConnectError::RandomnessUnavailable {
        reason: e.to_string(),
    })?;

    let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
    Ok(WalletAddress::new(format!("0x{hex}")))
}

/// Where a connection attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectPhase {
    /// Waiting for the user.
    #[default]
    Idle,
    /// Address chosen; waiting for the wallet to report connected.
    Connecting { address: WalletAddress },
    /// Wallet connected; waiting to detect the role.
    Detecting { address: WalletAddress },
    /// Role detected and session recorded; waiting to redirect.
    Redirecting {
        address: WalletAddress,
        role: Role,
        route: String,
    },
}

impl ConnectPhase {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting { .. } => "connecting",
            Self::Detecting { .. } => "detecting",
            Self::Redirecting { .. } => "redirecting",
        }
    }

    /// Returns the address once one has been chosen.
    #[must_use]
    pub fn address(&self) -> Option<&WalletAddress> {
        match self {
            Self::Idle => None,
            Self::Connecting { address }
            | Self::Detecting { address }
            | Self::Redirecting { address, .. } => Some(address),
        }
    }

    /// Returns true while a connection attempt is underway.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Phase machine for one login view.
///
/// `begin` → `connected` → `detect` walk the phases in order. Calling a step
/// out of order is an error and leaves the phase unchanged. A rejected
/// `begin` records the error for display and stays idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectFlow {
    method: ConnectionMethod,
    phase: ConnectPhase,
    error: Option<ConnectError>,
}

impl ConnectFlow {
    /// Creates an idle flow using `method`.
    #[must_use]
    pub fn new(method: ConnectionMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Returns the selected connection method.
    #[must_use]
    pub fn method(&self) -> ConnectionMethod {
        self.method
    }

    /// Switches the connection method. Ignored while busy.
    pub fn set_method(&mut self, method: ConnectionMethod) {
        if !self.phase.is_busy() {
            self.method = method;
            self.error = None;
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> &ConnectPhase {
        &self.phase
    }

    /// Returns the last error, for display.
    #[must_use]
    pub fn error(&self) -> Option<&ConnectError> {
        self.error.as_ref()
    }

    fn transition_error(&self, event: &'static str) -> Report<ConnectError> {
        ConnectError::InvalidTransition {
            phase: self.phase.name(),
            event,
        }
        .into()
    }

    fn fail(&mut self, err: ConnectError) -> Report<ConnectError> {
        self.error = Some(err.clone());
        err.into()
    }

    /// Starts connecting.
    ///
    /// `manual_input` is validated when the method is manual and ignored
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Fails when not idle, when the manual address is invalid, or when no
    /// address can be generated.
    pub fn begin(&mut self, manual_input: &str) -> Result<WalletAddress, Report<ConnectError>> {
        if self.phase.is_busy() {
            return Err(self.transition_error("begin"));
        }
        self.error = None;

        let method = self.method;
        let address = match method {
            ConnectionMethod::Manual => {
                validate_address(manual_input).map_err(|e| self.fail(e.into()))?
            }
            ConnectionMethod::Auto => match generate_address() {
                Ok(address) => address,
                Err(report) => {
                    self.error = Some(ConnectError::RandomnessUnavailable {
                        reason: report.to_string(),
                    });
                    return Err(report);
                }
            },
        };

        debug!(?method, address = %address, "connecting wallet");
        self.phase = ConnectPhase::Connecting {
            address: address.clone(),
        };
        Ok(address)
    }

    /// Marks the wallet as connected.
    ///
    /// # Errors
    ///
    /// Fails unless connecting.
    pub fn connected(&mut self) -> Result<WalletAddress, Report<ConnectError>> {
        let ConnectPhase::Connecting { address } = &self.phase else {
            return Err(self.transition_error("connected"));
        };
        let address = address.clone();
        info!(address = %address.abbreviated(), "wallet connected");
        self.phase = ConnectPhase::Detecting {
            address: address.clone(),
        };
        Ok(address)
    }

    /// Resolves the role, records the session, and returns it.
    ///
    /// The redirect target is the session's dashboard.
    ///
    /// # Errors
    ///
    /// Fails unless detecting.
    pub fn detect<S: KeyValueStore>(
        &mut self,
        registry: &AddressRegistry,
        store: &SessionStore<S>,
    ) -> Result<Session, Report<ConnectError>> {
        let ConnectPhase::Detecting { address } = &self.phase else {
            return Err(self.transition_error("detect"));
        };
        let address = address.clone();
        let role = registry.resolve_role(address.as_str());
        let session = store.create_session(&address, role, None);
        info!(role = %role, "role detected");

        self.phase = ConnectPhase::Redirecting {
            address,
            role,
            route: session.dashboard_route(),
        };
        Ok(session)
    }

    /// Returns to idle, clearing any error. The method is kept.
    pub fn reset(&mut self) {
        self.phase = ConnectPhase::Idle;
        self.error = None;
    }
}
