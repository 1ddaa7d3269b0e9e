//! Top-level application modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::editor::FontScale;
use crate::params::QueryParams;

/// One of the mutually exclusive top-level views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Editor,
    Window,
    Converter,
    Reference,
    Quote,
}

impl AppMode {
    pub const ALL: [AppMode; 5] = [
        AppMode::Editor,
        AppMode::Window,
        AppMode::Converter,
        AppMode::Reference,
        AppMode::Quote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppMode::Editor => "editor",
            AppMode::Window => "window",
            AppMode::Converter => "converter",
            AppMode::Reference => "reference",
            AppMode::Quote => "quote",
        }
    }

    /// DOM id of the mode's container, e.g. `editor-mode`.
    pub fn container_id(self) -> &'static str {
        match self {
            AppMode::Editor => "editor-mode",
            AppMode::Window => "window-mode",
            AppMode::Converter => "converter-mode",
            AppMode::Reference => "reference-mode",
            AppMode::Quote => "quote-mode",
        }
    }

    /// Mode requested by the page URL.
    ///
    /// Content parameters without an explicit `mode` open the editor. An
    /// unrecognized `mode` is ignored.
    pub fn from_params(params: &QueryParams) -> Option<AppMode> {
        let has_content = params.contains("base64") || params.contains("url");
        match params.get_nonempty("mode") {
            None if has_content => Some(AppMode::Editor),
            None => None,
            Some(raw) => match raw.parse() {
                Ok(mode) => Some(mode),
                Err(UnknownMode) => {
                    tracing::warn!("ignoring unknown mode {raw:?}");
                    None
                }
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownMode;

impl FromStr for AppMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(UnknownMode)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-wide state outside the workspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub editor_font: FontScale,
}

impl AppState {
    /// Record a mode switch. Returns `false` when already in `mode`.
    pub fn switch_mode(&mut self, mode: AppMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        tracing::debug!("mode -> {mode}");
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode_for(query: &str) -> Option<AppMode> {
        AppMode::from_params(&QueryParams::parse(query))
    }

    #[test]
    fn test_initial_mode() {
        assert_eq!(mode_for(""), None);
        assert_eq!(mode_for("mode=window"), Some(AppMode::Window));
        assert_eq!(mode_for("base64=eA"), Some(AppMode::Editor));
        assert_eq!(mode_for("url=x&mode=quote"), Some(AppMode::Quote));
        assert_eq!(mode_for("mode=settings"), None);
        assert_eq!(mode_for("mode=settings&base64=eA"), None);
    }

    #[test]
    fn test_round_trip_names() {
        for mode in AppMode::ALL {
            assert_eq!(mode.as_str().parse::<AppMode>(), Ok(mode));
            assert_eq!(mode.container_id(), format!("{mode}-mode"));
        }
    }

    #[test]
    fn test_switch_mode() {
        let mut state = AppState::default();
        assert!(!state.switch_mode(AppMode::Editor));
        assert!(state.switch_mode(AppMode::Reference));
        assert_eq!(state.mode, AppMode::Reference);
    }
}
