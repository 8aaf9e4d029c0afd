//! Browser shell for the folio site.
//!
//! Scans the page markup into a [`folio_core::SiteLayout`], forwards DOM
//! events to [`folio_core::App`] and applies the returned
//! [`folio_protocol::DomCommand`]s.

pub mod attrs;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod emailjs;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod renderer;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(target_arch = "wasm32")]
mod scan;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    if let Err(e) = runtime::boot() {
        tracing::error!("failed to start folio: {e:#}");
        return Err(JsValue::from_str(&format!("{e:#}")));
    }
    Ok(())
}
