//! `.mlatex` workspace layout files.
//!
//! A flat JSON document: a version string and one record per window, in
//! creation order.

use serde::{Deserialize, Deserializer, Serialize};
use smol_str::SmolStr;

use crate::error::LayoutError;

pub const LAYOUT_VERSION: &str = "1.0";
pub const LAYOUT_EXTENSION: &str = "mlatex";
pub const LAYOUT_MIME: &str = "application/json";
/// `accept` attribute for the import file picker.
pub const LAYOUT_ACCEPT: &str = ".mlatex,application/json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    #[serde(default = "default_version")]
    pub version: SmolStr,
    pub windows: Vec<WindowRecord>,
}

fn default_version() -> SmolStr {
    SmolStr::new_static(LAYOUT_VERSION)
}

/// One window as stored on disk.
///
/// Every field is optional on import; missing ones take the workspace
/// defaults (cascade position, default size, generated name, empty text).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,
    #[serde(default, deserialize_with = "lenient_px", skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, deserialize_with = "lenient_px", skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, deserialize_with = "lenient_px", skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, deserialize_with = "lenient_px", skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default)]
    pub latex: String,
}

/// Accept any JSON number (or null) and truncate toward zero.
fn lenient_px<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).map(|v| v.trunc() as i32))
}

impl LayoutFile {
    pub fn new(windows: Vec<WindowRecord>) -> Self {
        Self {
            version: default_version(),
            windows,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile = serde_json::from_str(json).map_err(LayoutError::parse)?;
        if file.version != LAYOUT_VERSION {
            tracing::warn!(
                "layout file version {} differs from {LAYOUT_VERSION}, importing anyway",
                file.version
            );
        }
        Ok(file)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        serde_json::to_string_pretty(self).map_err(LayoutError::Serialize)
    }
}

/// `<prefix>-<unix millis>.<ext>`, the naming used for every download.
pub fn timestamped_file_name(prefix: &str, extension: &str) -> String {
    let millis = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{prefix}-{millis}.{extension}")
}

pub fn layout_file_name() -> String {
    timestamped_file_name("latex-windows", LAYOUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_snapshot() {
        let file = LayoutFile::new(vec![WindowRecord {
            name: Some("Window 0".into()),
            x: Some(50),
            y: Some(50),
            width: Some(400),
            height: Some(300),
            latex: "$E=mc^2$".into(),
        }]);
        insta::assert_snapshot!(file.to_json_pretty().unwrap(), @r#"
        {
          "version": "1.0",
          "windows": [
            {
              "name": "Window 0",
              "x": 50,
              "y": 50,
              "width": 400,
              "height": 300,
              "latex": "$E=mc^2$"
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_import_lenient_fields() {
        let json = r#"{
            "windows": [
                { "name": "a", "x": 12.9, "y": -3.5, "width": 500, "latex": "x" },
                { "height": null }
            ]
        }"#;
        let file = LayoutFile::from_json(json).unwrap();
        assert_eq!(file.version, LAYOUT_VERSION);
        assert_eq!(file.windows.len(), 2);

        let a = &file.windows[0];
        assert_eq!(a.x, Some(12));
        assert_eq!(a.y, Some(-3));
        assert_eq!(a.width, Some(500));
        assert_eq!(a.height, None);

        assert_eq!(file.windows[1], WindowRecord::default());
    }

    #[test]
    fn test_import_other_version_accepted() {
        let file = LayoutFile::from_json(r#"{"version":"2.0","windows":[]}"#).unwrap();
        assert_eq!(file.version, "2.0");
        assert!(file.windows.is_empty());
    }

    #[test]
    fn test_import_errors() {
        assert!(matches!(
            LayoutFile::from_json("{}"),
            Err(LayoutError::Parse { .. })
        ));
        assert!(matches!(
            LayoutFile::from_json(r#"{"windows":[{"x":"left"}]}"#),
            Err(LayoutError::Parse { .. })
        ));
        let err = LayoutFile::from_json("{\n  \"windows\": [").unwrap_err();
        assert!(err.to_string().starts_with("invalid layout file"));
    }

    #[test]
    fn test_file_names() {
        let name = layout_file_name();
        assert!(name.starts_with("latex-windows-"));
        assert!(name.ends_with(".mlatex"));
        let stamp = &name["latex-windows-".len()..name.len() - ".mlatex".len()];
        assert!(stamp.parse::<u128>().is_ok());
    }
}
