//! Thin wrappers over the browser globals the app touches.

use std::time::Duration;

use js_sys::Promise;
use log::warn;
use tracker_shared::{widgets::Theme, Confirm, KeyValueStorage};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

/// `window.localStorage`. Missing storage (private mode, sandboxed
/// frames) reads as empty and drops writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn handle() -> Option<web_sys::Storage> {
        window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::handle()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let stored = Self::handle().map(|storage| storage.set_item(key, value));
        if !matches!(stored, Some(Ok(()))) {
            warn!("event=storage_write module=browser status=error key={key}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::handle() {
            let _ = storage.remove_item(key);
        }
    }
}

/// `window.confirm`; a missing window counts as "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

/// Resolves after `duration` on the browser timer queue.
pub async fn sleep(duration: Duration) {
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(window) = window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Sets `data-theme` on `<body>` so the stylesheet can switch palettes.
pub fn apply_theme(theme: Theme) {
    let body = window()
        .and_then(|window| window.document())
        .and_then(|document| document.body());
    match body {
        Some(body) => {
            let _ = body.set_attribute("data-theme", theme.as_str());
        }
        None => warn!("event=theme_apply module=browser status=error reason=no_body"),
    }
}

pub fn current_path() -> String {
    window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

/// Updates the address bar without reloading.
pub fn push_path(path: &str) {
    if let Some(history) = window().and_then(|window| window.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}
