//! Multi-window workspace state.
//!
//! Tracks every floating window, its rectangle, its text and which tab it
//! shows, plus z-order and the workspace-wide temporary preview. The browser
//! layer mirrors this state into the DOM; nothing here touches the DOM.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};

use crate::error::WorkspaceError;
use crate::geometry::{Bounds, DEFAULT_HEIGHT, DEFAULT_WIDTH, Point, Rect};
use crate::layout::{LayoutFile, WindowRecord};

/// Stable window identity, rendered as `window-<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    pub fn get(self) -> u32 {
        self.0
    }

    /// DOM id for the window element.
    pub fn dom_id(self) -> SmolStr {
        format_smolstr!("window-{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("window-")
            .and_then(|n| n.parse().ok())
            .map(WindowId)
            .ok_or(())
    }
}

/// Which pane a window shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowTab {
    #[default]
    Editor,
    Preview,
}

impl WindowTab {
    /// Value of the tab element's `data-tab` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            WindowTab::Editor => "editor",
            WindowTab::Preview => "preview",
        }
    }
}

impl FromStr for WindowTab {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" => Ok(WindowTab::Editor),
            "preview" => Ok(WindowTab::Preview),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LatexWindow {
    pub id: WindowId,
    pub name: SmolStr,
    pub rect: Rect,
    pub latex: String,
    pub tab: WindowTab,
    pub z_index: u32,
}

impl LatexWindow {
    pub fn to_record(&self) -> WindowRecord {
        WindowRecord {
            name: Some(self.name.clone()),
            x: Some(self.rect.x),
            y: Some(self.rect.y),
            width: Some(self.rect.width),
            height: Some(self.rect.height),
            latex: self.latex.clone(),
        }
    }
}

/// Tab change that the view has to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabChange {
    pub id: WindowId,
    pub tab: WindowTab,
}

impl TabChange {
    /// Previews render lazily, on every switch to the preview tab.
    pub fn needs_render(&self) -> bool {
        self.tab == WindowTab::Preview
    }
}

#[derive(Debug)]
pub struct Workspace {
    windows: Vec<LatexWindow>,
    next_id: u32,
    z_counter: u32,
    active: Option<WindowId>,
    /// Tabs remembered when temporary preview was switched on.
    temp_preview: Option<HashMap<WindowId, WindowTab>>,
    name_prefix: SmolStr,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new("Window")
    }
}

impl Workspace {
    pub fn new(name_prefix: impl Into<SmolStr>) -> Self {
        Self {
            windows: Vec::new(),
            next_id: 1,
            z_counter: 1,
            active: None,
            temp_preview: None,
            name_prefix: name_prefix.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &LatexWindow> {
        self.windows.iter()
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id).collect()
    }

    pub fn get(&self, id: WindowId) -> Option<&LatexWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Result<&mut LatexWindow, WorkspaceError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| WorkspaceError::UnknownWindow {
                id: id.dom_id(),
            })
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn is_temp_preview(&self) -> bool {
        self.temp_preview.is_some()
    }

    fn name_taken(&self, name: &str, except: Option<WindowId>) -> bool {
        self.windows
            .iter()
            .any(|w| Some(w.id) != except && w.name == name)
    }

    /// First free name: `base`, then `base (1)`, `base (2)`, ...
    fn unique_name(&self, base: &str) -> SmolStr {
        let mut candidate = SmolStr::new(base);
        let mut counter = 1;
        while self.name_taken(&candidate, None) {
            candidate = format_smolstr!("{base} ({counter})");
            counter += 1;
        }
        candidate
    }

    /// Open a new window, optionally seeded from a layout record.
    ///
    /// The window is constrained to `bounds`, starts on the editor tab and
    /// becomes active.
    pub fn create_window(&mut self, record: Option<&WindowRecord>, bounds: Bounds) -> WindowId {
        let open = self.windows.len();
        let base = match record
            .and_then(|r| r.name.as_ref())
            .filter(|name| !name.is_empty())
        {
            Some(name) => name.clone(),
            None => format_smolstr!("{} {open}", self.name_prefix),
        };
        let name = self.unique_name(&base);

        let cascade = Rect::cascade(open);
        let rect = Rect::new(
            record.and_then(|r| r.x).unwrap_or(cascade.x),
            record.and_then(|r| r.y).unwrap_or(cascade.y),
            record.and_then(|r| r.width).unwrap_or(DEFAULT_WIDTH),
            record.and_then(|r| r.height).unwrap_or(DEFAULT_HEIGHT),
        )
        .constrain(bounds);

        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.z_counter += 1;

        self.windows.push(LatexWindow {
            id,
            name,
            rect,
            latex: record.map(|r| r.latex.clone()).unwrap_or_default(),
            tab: WindowTab::Editor,
            z_index: self.z_counter,
        });
        tracing::debug!("created {id} ({} open)", self.windows.len());

        self.activate(id);
        id
    }

    /// Bring a window to the front and make it the only active one.
    ///
    /// Returns the new z-index, or `None` for an unknown window.
    pub fn activate(&mut self, id: WindowId) -> Option<u32> {
        let z = self.z_counter + 1;
        let window = self.get_mut(id).ok()?;
        window.z_index = z;
        self.z_counter = z;
        self.active = Some(id);
        Some(z)
    }

    pub fn close_window(&mut self, id: WindowId) -> Option<LatexWindow> {
        let idx = self.windows.iter().position(|w| w.id == id)?;
        let window = self.windows.remove(idx);
        if self.active == Some(id) {
            self.active = None;
        }
        if let Some(saved) = self.temp_preview.as_mut() {
            saved.remove(&id);
        }
        tracing::debug!("closed {id}");
        Some(window)
    }

    pub fn close_all(&mut self) {
        for id in self.ids() {
            self.close_window(id);
        }
    }

    /// Rename a window. The name is trimmed; it must not belong to another
    /// window. On error the stored name is unchanged.
    pub fn rename(&mut self, id: WindowId, name: &str) -> Result<&SmolStr, WorkspaceError> {
        let name = name.trim();
        if self.name_taken(name, Some(id)) {
            return Err(WorkspaceError::DuplicateName { name: name.into() });
        }
        let window = self.get_mut(id)?;
        window.name = name.into();
        Ok(&window.name)
    }

    pub fn set_latex(&mut self, id: WindowId, latex: impl Into<String>) -> Result<(), WorkspaceError> {
        self.get_mut(id)?.latex = latex.into();
        Ok(())
    }

    /// Unclamped move while dragging.
    pub fn move_to(&mut self, id: WindowId, origin: Point) -> Result<Rect, WorkspaceError> {
        let window = self.get_mut(id)?;
        window.rect.x = origin.x;
        window.rect.y = origin.y;
        Ok(window.rect)
    }

    /// Resize while dragging the handle. Only the minimum size applies.
    pub fn resize_to(&mut self, id: WindowId, width: i32, height: i32) -> Result<Rect, WorkspaceError> {
        let window = self.get_mut(id)?;
        window.rect.width = width;
        window.rect.height = height;
        Ok(window.rect)
    }

    /// Clamp position after a drag ends.
    pub fn finish_drag(&mut self, id: WindowId, bounds: Bounds) -> Result<Rect, WorkspaceError> {
        let window = self.get_mut(id)?;
        window.rect = window.rect.constrain_position(bounds);
        Ok(window.rect)
    }

    /// Clamp size, then position, after a resize ends.
    pub fn finish_resize(&mut self, id: WindowId, bounds: Bounds) -> Result<Rect, WorkspaceError> {
        let window = self.get_mut(id)?;
        window.rect = window.rect.constrain(bounds);
        Ok(window.rect)
    }

    /// Re-clamp every window, e.g. after the viewport shrank.
    pub fn constrain_all(&mut self, bounds: Bounds) {
        for window in &mut self.windows {
            window.rect = window.rect.constrain(bounds);
        }
    }

    pub fn select_tab(&mut self, id: WindowId, tab: WindowTab) -> Result<TabChange, WorkspaceError> {
        self.get_mut(id)?.tab = tab;
        Ok(TabChange { id, tab })
    }

    /// Put every window on `tab`.
    pub fn switch_all(&mut self, tab: WindowTab) -> Vec<TabChange> {
        self.windows
            .iter_mut()
            .map(|w| {
                w.tab = tab;
                TabChange { id: w.id, tab }
            })
            .collect()
    }

    /// Toggle the workspace-wide temporary preview.
    ///
    /// Switching on remembers each window's tab and shows every preview.
    /// Switching off restores the remembered tabs; windows opened in between
    /// keep whatever they show.
    pub fn toggle_temp_preview(&mut self) -> Vec<TabChange> {
        match self.temp_preview.take() {
            None => {
                let saved = self.windows.iter().map(|w| (w.id, w.tab)).collect();
                self.temp_preview = Some(saved);
                self.switch_all(WindowTab::Preview)
            }
            Some(saved) => self
                .windows
                .iter_mut()
                .filter_map(|w| {
                    let tab = *saved.get(&w.id)?;
                    w.tab = tab;
                    Some(TabChange { id: w.id, tab })
                })
                .collect(),
        }
    }

    pub fn export_layout(&self) -> LayoutFile {
        LayoutFile::new(self.windows.iter().map(LatexWindow::to_record).collect())
    }

    /// Replace every window with the windows of `layout`.
    pub fn import_layout(&mut self, layout: &LayoutFile, bounds: Bounds) -> Vec<WindowId> {
        self.close_all();
        layout
            .windows
            .iter()
            .map(|record| self.create_window(Some(record), bounds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Bounds = Bounds {
        width: 1200,
        height: 800,
    };

    fn named(name: &str) -> WindowRecord {
        WindowRecord {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_window_id_format() {
        let mut ws = Workspace::default();
        let id = ws.create_window(None, SCREEN);
        assert_eq!(id.to_string(), "window-1");
        assert_eq!("window-1".parse::<WindowId>(), Ok(id));
        assert!("pane-1".parse::<WindowId>().is_err());
    }

    #[test]
    fn test_create_defaults_cascade() {
        let mut ws = Workspace::default();
        let a = ws.create_window(None, SCREEN);
        let b = ws.create_window(None, SCREEN);

        let a = ws.get(a).unwrap();
        let b = ws.get(b).unwrap();
        assert_eq!(a.name, "Window 0");
        assert_eq!(b.name, "Window 1");
        assert_eq!(a.rect, Rect::new(50, 50, 400, 300));
        assert_eq!(b.rect, Rect::new(80, 80, 400, 300));
        assert_eq!(a.tab, WindowTab::Editor);
        assert!(a.latex.is_empty());
    }

    #[test]
    fn test_ids_never_reused() {
        let mut ws = Workspace::default();
        let a = ws.create_window(None, SCREEN);
        ws.close_window(a);
        let b = ws.create_window(None, SCREEN);
        assert_ne!(a, b);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let mut ws = Workspace::default();
        ws.create_window(Some(&named("Notes")), SCREEN);
        let b = ws.create_window(Some(&named("Notes")), SCREEN);
        let c = ws.create_window(Some(&named("Notes")), SCREEN);
        assert_eq!(ws.get(b).unwrap().name, "Notes (1)");
        assert_eq!(ws.get(c).unwrap().name, "Notes (2)");
    }

    #[test]
    fn test_generated_name_collision() {
        let mut ws = Workspace::default();
        let first = ws.create_window(None, SCREEN);
        ws.create_window(None, SCREEN);
        ws.close_window(first);
        // One window open, so the generated name is "Window 1", which is taken.
        let id = ws.create_window(None, SCREEN);
        assert_eq!(ws.get(id).unwrap().name, "Window 1 (1)");
    }

    #[test]
    fn test_empty_record_name_is_generated() {
        let mut ws = Workspace::default();
        let a = ws.create_window(Some(&named("")), SCREEN);
        let b = ws.create_window(Some(&named("")), SCREEN);
        assert_eq!(ws.get(a).unwrap().name, "Window 0");
        assert_eq!(ws.get(b).unwrap().name, "Window 1");
    }

    #[test]
    fn test_create_constrains_record() {
        let mut ws = Workspace::default();
        let record = WindowRecord {
            x: Some(5000),
            y: Some(-40),
            width: Some(100),
            height: Some(5000),
            ..Default::default()
        };
        let id = ws.create_window(Some(&record), SCREEN);
        assert_eq!(ws.get(id).unwrap().rect, Rect::new(1150, 0, 300, 800));
    }

    #[test]
    fn test_activation_z_order() {
        let mut ws = Workspace::default();
        let a = ws.create_window(None, SCREEN);
        let b = ws.create_window(None, SCREEN);
        assert_eq!(ws.active(), Some(b));
        assert!(ws.get(b).unwrap().z_index > ws.get(a).unwrap().z_index);

        let z = ws.activate(a).unwrap();
        assert_eq!(ws.active(), Some(a));
        assert_eq!(ws.get(a).unwrap().z_index, z);
        assert!(z > ws.get(b).unwrap().z_index);

        ws.close_window(a);
        assert_eq!(ws.active(), None);
        assert_eq!(ws.activate(a), None);
    }

    #[test]
    fn test_rename() {
        let mut ws = Workspace::default();
        let a = ws.create_window(Some(&named("alpha")), SCREEN);
        let b = ws.create_window(Some(&named("beta")), SCREEN);

        assert_eq!(ws.rename(a, "  gamma ").unwrap(), "gamma");
        // Renaming to its own name is fine.
        assert!(ws.rename(a, "gamma").is_ok());
        assert_eq!(
            ws.rename(b, "gamma"),
            Err(WorkspaceError::DuplicateName {
                name: "gamma".into()
            })
        );
        assert_eq!(ws.get(b).unwrap().name, "beta");
        assert!(ws.rename(b, "").is_ok());
    }

    #[test]
    fn test_unknown_window_errors() {
        let mut ws = Workspace::default();
        let id = ws.create_window(None, SCREEN);
        ws.close_window(id);
        assert!(matches!(
            ws.set_latex(id, "x"),
            Err(WorkspaceError::UnknownWindow { .. })
        ));
        assert!(ws.close_window(id).is_none());
    }

    #[test]
    fn test_drag_then_finish() {
        let mut ws = Workspace::default();
        let id = ws.create_window(None, SCREEN);
        let moved = ws.move_to(id, Point::new(-1000, 2000)).unwrap();
        assert_eq!(moved.origin(), Point::new(-1000, 2000));
        let rect = ws.finish_drag(id, SCREEN).unwrap();
        assert_eq!(rect.origin(), Point::new(-350, 760));
    }

    #[test]
    fn test_resize_then_finish() {
        let mut ws = Workspace::default();
        let id = ws.create_window(None, SCREEN);
        ws.move_to(id, Point::new(1100, 10)).unwrap();
        ws.resize_to(id, 1500, 250).unwrap();
        let rect = ws.finish_resize(id, SCREEN).unwrap();
        assert_eq!(rect, Rect::new(1100, 10, 1200, 250));
    }

    #[test]
    fn test_constrain_all_after_viewport_shrink() {
        let mut ws = Workspace::default();
        let id = ws.create_window(Some(&WindowRecord {
            x: Some(1000),
            y: Some(700),
            ..Default::default()
        }), SCREEN);
        ws.constrain_all(Bounds::new(600, 400));
        assert_eq!(ws.get(id).unwrap().rect, Rect::new(550, 360, 400, 300));
    }

    #[test]
    fn test_tabs_and_switch_all() {
        let mut ws = Workspace::default();
        let a = ws.create_window(None, SCREEN);
        let b = ws.create_window(None, SCREEN);

        let change = ws.select_tab(a, WindowTab::Preview).unwrap();
        assert!(change.needs_render());

        let changes = ws.switch_all(WindowTab::Editor);
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| !c.needs_render()));
        assert_eq!(ws.get(a).unwrap().tab, WindowTab::Editor);
        assert_eq!(ws.get(b).unwrap().tab, WindowTab::Editor);
    }

    #[test]
    fn test_temp_preview_restores_tabs() {
        let mut ws = Workspace::default();
        let a = ws.create_window(None, SCREEN);
        let b = ws.create_window(None, SCREEN);
        ws.select_tab(b, WindowTab::Preview).unwrap();

        let on = ws.toggle_temp_preview();
        assert!(ws.is_temp_preview());
        assert_eq!(on.len(), 2);
        assert!(ws.iter().all(|w| w.tab == WindowTab::Preview));

        let late = ws.create_window(None, SCREEN);
        ws.close_window(b);

        let off = ws.toggle_temp_preview();
        assert!(!ws.is_temp_preview());
        assert_eq!(off, vec![TabChange {
            id: a,
            tab: WindowTab::Editor
        }]);
        assert_eq!(ws.get(a).unwrap().tab, WindowTab::Editor);
        assert_eq!(ws.get(late).unwrap().tab, WindowTab::Editor);
    }

    #[test]
    fn test_layout_round_trip() {
        let mut ws = Workspace::new("Pane");
        let a = ws.create_window(Some(&named("first")), SCREEN);
        ws.set_latex(a, r"\frac{1}{2}").unwrap();
        ws.create_window(None, SCREEN);

        let layout = ws.export_layout();
        assert_eq!(layout.windows.len(), 2);
        assert_eq!(layout.windows[1].name.as_deref(), Some("Pane 1"));

        let json = layout.to_json_pretty().unwrap();
        let parsed = LayoutFile::from_json(&json).unwrap();

        let mut other = Workspace::default();
        other.create_window(None, SCREEN);
        let ids = other.import_layout(&parsed, SCREEN);
        assert_eq!(ids.len(), 2);
        assert_eq!(other.len(), 2);

        let restored: Vec<_> = other.iter().map(|w| w.to_record()).collect();
        assert_eq!(restored, layout.windows);
        assert_eq!(other.active(), Some(ids[1]));
    }
}
