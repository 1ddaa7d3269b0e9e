//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use texreader_browser::{LatexWindow, Workspace};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Read-only view of the window workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub windows: Vec<WindowSnapshot>,
    /// DOM id of the active window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    pub temp_preview: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub id: String,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// `"editor"` or `"preview"`.
    pub tab: String,
    pub z_index: u32,
}

impl From<&LatexWindow> for WindowSnapshot {
    fn from(window: &LatexWindow) -> Self {
        Self {
            id: window.id.to_string(),
            name: window.name.to_string(),
            x: window.rect.x,
            y: window.rect.y,
            width: window.rect.width,
            height: window.rect.height,
            tab: window.tab.as_str().to_owned(),
            z_index: window.z_index,
        }
    }
}

impl From<&Workspace> for WorkspaceSnapshot {
    fn from(workspace: &Workspace) -> Self {
        Self {
            windows: workspace.iter().map(WindowSnapshot::from).collect(),
            active: workspace.active().map(|id| id.to_string()),
            temp_preview: workspace.is_temp_preview(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texreader_browser::{Bounds, WindowTab};

    #[test]
    fn test_snapshot_mirrors_workspace() {
        let mut workspace = Workspace::default();
        let a = workspace.create_window(None, Bounds::new(1200, 800));
        let b = workspace.create_window(None, Bounds::new(1200, 800));
        workspace.select_tab(a, WindowTab::Preview).unwrap();

        let snapshot = WorkspaceSnapshot::from(&workspace);
        assert_eq!(snapshot.windows.len(), 2);
        assert_eq!(snapshot.windows[0].id, "window-1");
        assert_eq!(snapshot.windows[0].tab, "preview");
        assert_eq!(snapshot.windows[1].x, 80);
        assert_eq!(snapshot.active, Some(b.to_string()));
        assert!(!snapshot.temp_preview);
    }
}
