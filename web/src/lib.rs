#![recursion_limit = "512"]

pub mod actions;
pub mod api;
pub mod app;
pub mod calendar;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
