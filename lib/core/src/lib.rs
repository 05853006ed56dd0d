//! Core domain types and utilities for the DrugLedger platform.
//!
//! This crate provides the foundational types and error handling shared by
//! the platform-access library and the web application.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{AvatarId, WalletAddress};
