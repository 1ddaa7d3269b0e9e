use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ConfigError;

/// Runtime configuration. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
    /// Base URL latex.js loads its stylesheets and scripts from.
    pub renderer_assets: String,
    /// Compile service endpoints offered by the converter form.
    pub compile_servers: Vec<String>,
    /// Delay between the last keystroke and the editor re-render.
    pub render_debounce_ms: u32,
    /// Delay before re-clamping windows after the viewport resizes.
    pub resize_debounce_ms: u32,
    /// Generated window names are `<prefix> <n>`.
    pub window_name_prefix: SmolStr,
    pub image_scale: f64,
    pub image_background: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            renderer_assets: "https://cdn.jsdelivr.net/npm/latex.js@0.12.4/dist/".to_owned(),
            compile_servers: vec!["https://latexonline.cc/compile".to_owned()],
            render_debounce_ms: 500,
            resize_debounce_ms: 100,
            window_name_prefix: SmolStr::new_static("Window"),
            image_scale: 2.0,
            image_background: "#ffffff".to_owned(),
        }
    }
}

impl ReaderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// First configured compile server, if any.
    pub fn default_compile_server(&self) -> Option<&str> {
        self.compile_servers.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config = ReaderConfig::from_json(r#"{"renderDebounceMs": 250, "windowNamePrefix": "Pane"}"#).unwrap();
        assert_eq!(config.render_debounce_ms, 250);
        assert_eq!(config.window_name_prefix, "Pane");
        assert_eq!(config.resize_debounce_ms, 100);
        assert_eq!(
            config.default_compile_server(),
            Some("https://latexonline.cc/compile")
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(ReaderConfig::from_json(r#"{"renderDebounceMs": "soon"}"#).is_err());
        assert_eq!(ReaderConfig::from_json("{}").unwrap(), ReaderConfig::default());
    }
}
