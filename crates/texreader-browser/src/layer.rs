//! layui `layer` bindings: toasts, loading indicators and confirm dialogs.
//!
//! Every call degrades to a log line when layui is not loaded.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["layui", "layer"], js_name = msg, catch)]
    fn layer_msg(content: &str, options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["layui", "layer"], js_name = load, catch)]
    fn layer_load(icon: u32, options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["layui", "layer"], js_name = close, catch)]
    fn layer_close(index: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["layui", "layer"], js_name = confirm, catch)]
    fn layer_confirm(
        content: &str,
        options: &JsValue,
        yes: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;
}

fn object(entries: &[(&str, JsValue)]) -> JsValue {
    let obj = js_sys::Object::new();
    for (key, value) in entries {
        let _ = js_sys::Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

/// Short message toast.
pub fn toast(message: &str) {
    if layer_msg(message, &JsValue::UNDEFINED).is_err() {
        tracing::info!("{message}");
    }
}

/// Toast with the spinner icon, shown for `millis`.
pub fn toast_busy(message: &str, millis: u32) {
    let options = object(&[("icon", 16.into()), ("time", millis.into())]);
    if layer_msg(message, &options).is_err() {
        tracing::info!("{message}");
    }
}

/// Modal loading indicator, closed on drop.
#[must_use = "the indicator closes when dropped"]
pub struct Loading {
    index: Option<JsValue>,
}

impl Loading {
    pub fn show() -> Self {
        let options = object(&[("shade", 0.3.into())]);
        Self {
            index: layer_load(2, &options).ok(),
        }
    }
}

impl Drop for Loading {
    fn drop(&mut self) {
        if let Some(index) = self.index.take() {
            let _ = layer_close(&index);
        }
    }
}

/// Confirm dialog. `on_confirm` runs once if the user accepts.
///
/// Without layui the dialog cannot be shown and the action is skipped.
pub fn confirm(
    title: &str,
    content: &str,
    confirm_label: &str,
    cancel_label: &str,
    on_confirm: impl FnOnce() + 'static,
) {
    let buttons = js_sys::Array::of2(&confirm_label.into(), &cancel_label.into());
    let options = object(&[
        ("icon", 3.into()),
        ("title", title.into()),
        ("btn", buttons.into()),
        ("closeBtn", 1.into()),
    ]);

    let yes = Closure::once_into_js(move |index: JsValue| {
        let _ = layer_close(&index);
        on_confirm();
    });

    if let Err(e) = layer_confirm(content, &options, yes.unchecked_ref()) {
        tracing::warn!(
            "confirm dialog unavailable: {}",
            crate::error::describe_js(&e)
        );
    }
}
