//! DrugLedger web server and UI.
//!
//! This crate provides the Leptos-based web interface for the DrugLedger
//! supply chain dashboard: wallet connection, role-aware navigation, and
//! per-role pages.

#![allow(non_snake_case)]

pub mod app;
pub mod client;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error;
pub mod pages;
pub mod sidebar;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
