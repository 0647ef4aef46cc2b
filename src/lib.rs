pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use wasm_bindgen::prelude::*;

use app::{App, AppProps};
use config::AppConfig;

#[wasm_bindgen(start)]
pub fn run_app() {
    utils::set_panic_hook();
    let config = AppConfig::load();
    logging::init(&config);
    tracing::info!(api = %config.api_base_url, "starting");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
