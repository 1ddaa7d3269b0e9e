//! WASM entry point for the texreader LaTeX viewer.
//!
//! Call `mount()` once the page (and layui, latex.js, html2canvas) is loaded.
//! It wires the editor, window, converter and quote views to the DOM and
//! returns a [`TexReader`] handle. Keep the handle alive: dropping it
//! detaches every event listener.
//!
//! Configuration comes from the argument to `mount`, else from
//! `window.TEXREADER_CONFIG`, else defaults.

mod app;
mod converter;
mod editor;
mod quote;
mod types;
mod windows;

pub use types::*;

use std::rc::Rc;

use texreader_browser::{AppMode, load_config};
use wasm_bindgen::prelude::*;

use crate::app::App;

/// Install the panic hook and the console tracing layer.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();
}

fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host page may already have installed a subscriber.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Wire the page and return the handle that keeps it wired.
///
/// `config` is an optional plain object; see `ReaderConfig` for its fields.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<TexReader, JsError> {
    let config = load_config(Some(config));
    let app = App::mount(config).map_err(|e| {
        tracing::error!("mount failed: {e}");
        JsError::new(&e.to_string())
    })?;
    Ok(TexReader { app })
}

/// Handle to a mounted viewer.
#[wasm_bindgen]
pub struct TexReader {
    app: Rc<App>,
}

#[wasm_bindgen]
impl TexReader {
    /// Switch the visible mode by name.
    #[wasm_bindgen(js_name = switchMode)]
    pub fn switch_mode(&self, name: &str) -> Result<(), JsError> {
        let mode: AppMode = name
            .parse()
            .map_err(|_| JsError::new(&format!("unknown mode `{name}`")))?;
        self.app.switch_mode(mode);
        Ok(())
    }

    /// Name of the visible mode.
    pub fn mode(&self) -> String {
        self.app.mode().to_string()
    }

    /// Current windows with their names, rectangles and tabs.
    pub fn workspace(&self) -> WorkspaceSnapshot {
        self.app
            .windows()
            .map(|w| w.snapshot())
            .unwrap_or_default()
    }

    /// The `.mlatex` JSON for the open windows.
    #[wasm_bindgen(js_name = exportLayout)]
    pub fn export_layout(&self) -> Result<String, JsError> {
        let windows = self.app.windows().ok_or_else(not_mounted)?;
        Ok(windows.layout().to_json_pretty()?)
    }

    /// Replace the open windows with those in `json`. Returns how many
    /// windows were created.
    #[wasm_bindgen(js_name = importLayout)]
    pub fn import_layout(&self, json: &str) -> Result<usize, JsError> {
        let windows = self.app.windows().ok_or_else(not_mounted)?;
        Ok(windows.import_json(json)?)
    }
}

fn not_mounted() -> JsError {
    JsError::new("window mode is not mounted on this page")
}
