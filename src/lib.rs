//! Lil Lil Kids core crate.
//!
//! Content packs with swipe navigation and narration, a coloring book, a
//! freehand drawing pad and five mini-games. Everything under the public
//! modules is plain state and runs natively in tests; the private `app`
//! module is the browser glue that mirrors that state into the DOM.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod canvas;
pub mod catalog;
pub mod error;
pub mod games;
pub mod router;
pub mod settings;
pub mod viewer;

mod app;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (hot reload) only fails to replace the logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Boot the app once the page's DOM has been parsed. The menu appears after
/// the splash delay.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    log::info!("starting, menu in {}ms", app::STARTUP_DELAY_MS);
    app::start()
}

/// Packs, coloring pages and palette as JSON, for pages that render their
/// own pack list.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn catalog_json() -> Result<String, JsValue> {
    serde_json::to_string(&catalog::catalog_view()).map_err(|e| JsValue::from_str(&e.to_string()))
}
