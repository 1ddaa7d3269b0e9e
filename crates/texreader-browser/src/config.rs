use texreader_core::ReaderConfig;
use wasm_bindgen::JsValue;

/// Page-level global consulted when `mount` gets no configuration.
pub const CONFIG_GLOBAL: &str = "TEXREADER_CONFIG";

/// Resolve configuration from an explicit object, else the page global,
/// else defaults. Invalid objects are logged and replaced by defaults.
pub fn load_config(explicit: Option<JsValue>) -> ReaderConfig {
    let value = explicit
        .filter(|v| !v.is_undefined() && !v.is_null())
        .or_else(|| {
            let global = js_sys::Reflect::get(&js_sys::global(), &CONFIG_GLOBAL.into()).ok()?;
            (!global.is_undefined() && !global.is_null()).then_some(global)
        });

    match value {
        Some(value) => serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("invalid texreader configuration, using defaults: {e}");
            ReaderConfig::default()
        }),
        None => ReaderConfig::default(),
    }
}
