//! Document Verify Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
pub mod local_store;

use wasm_bindgen::prelude::*;

/// tracingのイベントをブラウザのコンソールに出す
fn init_logging() {
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(tracing::Level::INFO)
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    leptos::mount::mount_to_body(app::App);
}
