//! Sauron/WebAssembly site for the student task tracker.
//!
//! All domain behavior lives in `tracker-shared`; this crate renders it and
//! supplies the browser implementations of its seams: `fetch` for the
//! record store, `localStorage` for the session and theme, `window.confirm`
//! for destructive actions.

use sauron::prelude::*;
use tracker_shared::ClientConfig;

mod app;
mod browser;
mod fetch;
mod logger;
mod view;

use app::Model;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();

    let config = ClientConfig::from_build_env();
    log::info!("event=start module=frontend api={}", config.api_base_url);
    Program::mount_to_body(Model::new(&config));
}
