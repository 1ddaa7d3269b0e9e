//! Multi-window workspace: floating LaTeX windows with drag, resize,
//! per-window tabs and `.mlatex` import/export.
//!
//! All state lives in a core [`Workspace`]; this module mirrors it into the
//! DOM. One document-level `mousemove`/`mouseup` pair drives every drag and
//! resize, so closing a window leaves no listeners behind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use texreader_browser::files::{download_text, pick_file, read_text};
use texreader_browser::layout::{LAYOUT_ACCEPT, LAYOUT_MIME};
use texreader_browser::{
    Bounds, Debouncer, DomError, DragSession, LatexJsRenderer, LatexWindow, LayoutError,
    LayoutFile, Point, ReaderConfig, RenderOptions, ResizeSession, TabChange, WindowId,
    WindowRecord, WindowTab, Workspace, WorkspaceError, dom, layout_file_name, render_into, toast,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent};

use crate::types::WorkspaceSnapshot;

/// Inner markup of a window. Values are filled in through DOM properties.
const WINDOW_SKELETON: &str = r#"
<div class="window-header">
  <div class="window-title"><input type="text" maxlength="50"></div>
  <div class="window-controls">
    <button class="layui-btn layui-btn-xs layui-btn-danger close-btn"><i class="layui-icon layui-icon-close"></i></button>
  </div>
</div>
<div class="window-content">
  <div class="window-tabs">
    <div class="window-tab active" data-tab="editor">Edit</div>
    <div class="window-tab" data-tab="preview">Preview</div>
  </div>
  <div class="window-tab-content">
    <textarea class="window-editor" placeholder="Enter LaTeX..."></textarea>
    <div class="window-preview" style="display: none;"></div>
  </div>
</div>
<div class="window-resize-handle"></div>
"#;

struct WindowView {
    root: HtmlElement,
    header: HtmlElement,
    editor: HtmlTextAreaElement,
    preview: HtmlElement,
    tabs: Vec<(WindowTab, HtmlElement)>,
    _listeners: Vec<EventListener>,
}

impl WindowView {
    fn show_tab(&self, tab: WindowTab) {
        for (kind, element) in &self.tabs {
            dom::set_class(element, "active", *kind == tab);
        }
        dom::set_block(&self.editor, tab == WindowTab::Editor);
        dom::set_block(&self.preview, tab == WindowTab::Preview);
    }
}

#[derive(Clone, Copy, Debug)]
enum Interaction {
    Drag(WindowId, DragSession),
    Resize(WindowId, ResizeSession),
}

#[derive(Default)]
struct Inner {
    workspace: Workspace,
    views: HashMap<WindowId, WindowView>,
    interaction: Option<Interaction>,
}

impl Inner {
    fn sync_rect(&self, id: WindowId) {
        if let (Some(window), Some(view)) = (self.workspace.get(id), self.views.get(&id)) {
            dom::set_rect(&view.root, window.rect);
        }
    }

    /// Mirror z-order and the active marker.
    fn sync_stacking(&self) {
        let active = self.workspace.active();
        for window in self.workspace.iter() {
            if let Some(view) = self.views.get(&window.id) {
                dom::set_z_index(&view.root, window.z_index);
                dom::set_class(&view.root, "active", Some(window.id) == active);
            }
        }
    }

    fn apply_tab(&self, change: TabChange, renderer: &LatexJsRenderer) {
        let (Some(window), Some(view)) = (self.workspace.get(change.id), self.views.get(&change.id))
        else {
            return;
        };
        view.show_tab(change.tab);
        if change.needs_render() {
            render_into(renderer, &window.latex, &view.preview, &RenderOptions::default());
        }
    }
}

struct Shared {
    this: Weak<Shared>,
    container: HtmlElement,
    temp_button: Option<HtmlElement>,
    renderer: LatexJsRenderer,
    resize_debounce: Debouncer,
    /// Listener of the most recent import picker.
    picker: RefCell<Option<EventListener>>,
    inner: RefCell<Inner>,
}

impl Shared {
    fn bounds(&self) -> Bounds {
        dom::bounds_of(&self.container)
    }

    /// Listener that forwards to `handler` while the controller is alive.
    fn listen(
        &self,
        target: &EventTarget,
        event: &'static str,
        prevent_default: bool,
        handler: impl Fn(&Shared, &Event) + 'static,
    ) -> EventListener {
        let this = self.this.clone();
        let callback = move |event: &Event| {
            if let Some(shared) = this.upgrade() {
                handler(&shared, event);
            }
        };
        if prevent_default {
            EventListener::new_with_options(
                target,
                event,
                EventListenerOptions::enable_prevent_default(),
                callback,
            )
        } else {
            EventListener::new(target, event, callback)
        }
    }

    fn create_window(&self, record: Option<&WindowRecord>) -> Result<WindowId, DomError> {
        let bounds = self.bounds();
        let id = self.inner.borrow_mut().workspace.create_window(record, bounds);
        if let Err(e) = self.mount_view(id) {
            self.inner.borrow_mut().workspace.close_window(id);
            return Err(e);
        }
        self.inner.borrow().sync_stacking();
        Ok(id)
    }

    fn mount_view(&self, id: WindowId) -> Result<(), DomError> {
        let window = self
            .inner
            .borrow()
            .workspace
            .get(id)
            .cloned()
            .ok_or_else(|| DomError::MissingElement(id.dom_id()))?;
        let view = self.build_view(&window)?;
        self.inner.borrow_mut().views.insert(id, view);
        Ok(())
    }

    fn build_view(&self, window: &LatexWindow) -> Result<WindowView, DomError> {
        let root: HtmlElement = dom::create("div")?;
        root.set_class_name("latex-window");
        root.set_id(&window.id.dom_id());
        root.set_inner_html(WINDOW_SKELETON);

        let header: HtmlElement = dom::query_in(&root, ".window-header")?;
        let name_input: HtmlInputElement = dom::query_in(&root, ".window-title input")?;
        let close: HtmlElement = dom::query_in(&root, ".close-btn")?;
        let editor: HtmlTextAreaElement = dom::query_in(&root, ".window-editor")?;
        let preview: HtmlElement = dom::query_in(&root, ".window-preview")?;
        let handle: HtmlElement = dom::query_in(&root, ".window-resize-handle")?;
        let tabs: Vec<(WindowTab, HtmlElement)> =
            dom::query_all_in::<HtmlElement>(&root, ".window-tab")
                .into_iter()
                .filter_map(|tab| {
                    let kind = tab.get_attribute("data-tab")?.parse().ok()?;
                    Some((kind, tab))
                })
                .collect();

        name_input.set_value(&window.name);
        editor.set_value(&window.latex);
        dom::set_rect(&root, window.rect);
        dom::set_z_index(&root, window.z_index);

        let id = window.id;
        let mut listeners = vec![
            self.listen(&root, "mousedown", false, move |shared, _| shared.activate(id)),
            self.listen(&header, "mousedown", true, move |shared, event| {
                // Clicks in the name field edit the name instead.
                if event
                    .target()
                    .is_some_and(|t| t.dyn_ref::<HtmlInputElement>().is_some())
                {
                    return;
                }
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    shared.begin_drag(id, pointer(mouse));
                    event.prevent_default();
                }
            }),
            self.listen(&handle, "mousedown", true, move |shared, event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    shared.begin_resize(id, pointer(mouse));
                    event.stop_propagation();
                    event.prevent_default();
                }
            }),
            self.listen(&close, "click", false, move |shared, event| {
                event.stop_propagation();
                shared.close(id);
            }),
        ];

        let source = editor.clone();
        listeners.push(self.listen(&editor, "input", false, move |shared, _| {
            if let Err(e) = shared.inner.borrow_mut().workspace.set_latex(id, source.value()) {
                tracing::warn!("{e}");
            }
        }));

        let field = name_input.clone();
        listeners.push(self.listen(&name_input, "input", false, move |shared, _| {
            shared.rename(id, &field);
        }));

        for (kind, tab) in &tabs {
            let kind = *kind;
            listeners.push(self.listen(tab, "click", false, move |shared, _| {
                shared.select_tab(id, kind);
            }));
        }

        let view = WindowView {
            root,
            header,
            editor,
            preview,
            tabs,
            _listeners: listeners,
        };
        view.show_tab(window.tab);
        self.container.append_child(&view.root)?;
        Ok(view)
    }

    fn activate(&self, id: WindowId) {
        let mut inner = self.inner.borrow_mut();
        if inner.workspace.activate(id).is_some() {
            inner.sync_stacking();
        }
    }

    fn close(&self, id: WindowId) {
        let view = {
            let mut inner = self.inner.borrow_mut();
            inner.workspace.close_window(id);
            if matches!(
                inner.interaction,
                Some(Interaction::Drag(i, _) | Interaction::Resize(i, _)) if i == id
            ) {
                inner.interaction = None;
            }
            inner.views.remove(&id)
        };
        if let Some(view) = view {
            view.root.remove();
        }
    }

    fn rename(&self, id: WindowId, field: &HtmlInputElement) {
        let mut inner = self.inner.borrow_mut();
        let renamed = inner.workspace.rename(id, &field.value()).map(|_| ());
        match renamed {
            Ok(()) => {}
            Err(WorkspaceError::DuplicateName { .. }) => {
                toast("Window name already exists");
                if let Some(window) = inner.workspace.get(id) {
                    field.set_value(&window.name);
                }
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    fn select_tab(&self, id: WindowId, tab: WindowTab) {
        let mut inner = self.inner.borrow_mut();
        match inner.workspace.select_tab(id, tab) {
            Ok(change) => inner.apply_tab(change, &self.renderer),
            Err(e) => tracing::warn!("{e}"),
        }
    }

    fn switch_all(&self, tab: WindowTab) {
        let mut inner = self.inner.borrow_mut();
        for change in inner.workspace.switch_all(tab) {
            inner.apply_tab(change, &self.renderer);
        }
    }

    fn toggle_temp_preview(&self) {
        let mut inner = self.inner.borrow_mut();
        for change in inner.workspace.toggle_temp_preview() {
            inner.apply_tab(change, &self.renderer);
        }
        let on = inner.workspace.is_temp_preview();
        tracing::debug!("temporary preview {}", if on { "on" } else { "off" });

        let Some(button) = &self.temp_button else {
            return;
        };
        dom::set_class(button, "active", on);
        if let Ok(icon) = dom::query_in::<Element>(button, ".layui-icon") {
            dom::set_class(&icon, "layui-icon-eye", on);
            dom::set_class(&icon, "layui-icon-close-fill", !on);
        }
    }

    fn begin_drag(&self, id: WindowId, at: Point) {
        let mut inner = self.inner.borrow_mut();
        let Some(window) = inner.workspace.get(id) else {
            return;
        };
        inner.interaction = Some(Interaction::Drag(id, DragSession::begin(at, &window.rect)));
        if let Some(view) = inner.views.get(&id) {
            dom::set_class(&view.header, "dragging", true);
        }
    }

    fn begin_resize(&self, id: WindowId, at: Point) {
        let mut inner = self.inner.borrow_mut();
        let Some(window) = inner.workspace.get(id) else {
            return;
        };
        inner.interaction = Some(Interaction::Resize(
            id,
            ResizeSession::begin(at, &window.rect),
        ));
    }

    fn pointer_moved(&self, at: Point) {
        let mut inner = self.inner.borrow_mut();
        let result = match inner.interaction {
            None => return,
            Some(Interaction::Drag(id, session)) => {
                inner.workspace.move_to(id, session.position_at(at)).map(|_| id)
            }
            Some(Interaction::Resize(id, session)) => {
                let (width, height) = session.size_at(at);
                inner.workspace.resize_to(id, width, height).map(|_| id)
            }
        };
        match result {
            Ok(id) => inner.sync_rect(id),
            Err(e) => {
                tracing::warn!("{e}");
                inner.interaction = None;
            }
        }
    }

    fn pointer_released(&self) {
        let bounds = self.bounds();
        let mut inner = self.inner.borrow_mut();
        let Some(interaction) = inner.interaction.take() else {
            return;
        };
        let (id, result) = match interaction {
            Interaction::Drag(id, _) => {
                if let Some(view) = inner.views.get(&id) {
                    dom::set_class(&view.header, "dragging", false);
                }
                (id, inner.workspace.finish_drag(id, bounds))
            }
            Interaction::Resize(id, _) => (id, inner.workspace.finish_resize(id, bounds)),
        };
        match result {
            Ok(_) => inner.sync_rect(id),
            Err(e) => tracing::warn!("{e}"),
        }
    }

    fn constrain_all(&self) {
        let bounds = self.bounds();
        let mut inner = self.inner.borrow_mut();
        inner.workspace.constrain_all(bounds);
        for id in inner.workspace.ids() {
            inner.sync_rect(id);
        }
    }

    /// Replace every window with those in `json`. On a parse error nothing
    /// changes.
    fn import_json(&self, json: &str) -> Result<usize, LayoutError> {
        let layout = LayoutFile::from_json(json)?;
        let bounds = self.bounds();

        let (old_views, ids) = {
            let mut inner = self.inner.borrow_mut();
            inner.interaction = None;
            let ids = inner.workspace.import_layout(&layout, bounds);
            let old: Vec<WindowView> = inner.views.drain().map(|(_, view)| view).collect();
            (old, ids)
        };
        for view in old_views {
            view.root.remove();
        }
        for id in &ids {
            if let Err(e) = self.mount_view(*id) {
                tracing::warn!("could not show imported {id}: {e}");
            }
        }
        self.inner.borrow().sync_stacking();
        tracing::debug!("imported {} windows", ids.len());
        Ok(ids.len())
    }

    fn export_to_file(&self) {
        let layout = self.inner.borrow().workspace.export_layout();
        let result = layout
            .to_json_pretty()
            .map_err(|e| e.to_string())
            .and_then(|json| {
                download_text(&layout_file_name(), LAYOUT_MIME, &json).map_err(|e| e.to_string())
            });
        match result {
            Ok(()) => toast("Export succeeded"),
            Err(e) => toast(&format!("Export failed: {e}")),
        }
    }

    fn import_from_file(&self) {
        let this = self.this.clone();
        let picked = pick_file(LAYOUT_ACCEPT, move |file| {
            wasm_bindgen_futures::spawn_local(async move {
                let text = match read_text(&file).await {
                    Ok(text) => text,
                    Err(e) => {
                        toast(&format!("Import failed: {e}"));
                        return;
                    }
                };
                let Some(shared) = this.upgrade() else {
                    return;
                };
                match shared.import_json(&text) {
                    Ok(_) => toast("Import succeeded"),
                    Err(e) => toast(&format!("Import failed: {e}")),
                }
            });
        });
        match picked {
            Ok(listener) => {
                self.picker.replace(Some(listener));
            }
            Err(e) => tracing::warn!("file picker unavailable: {e}"),
        }
    }
}

fn pointer(event: &MouseEvent) -> Point {
    Point::new(event.client_x(), event.client_y())
}

/// Wiring for `#windows-container` and the workspace toolbar.
pub struct WindowsController {
    shared: Rc<Shared>,
    _listeners: Vec<EventListener>,
}

impl WindowsController {
    pub fn mount(config: &ReaderConfig, renderer: LatexJsRenderer) -> Result<Self, DomError> {
        let container: HtmlElement = dom::by_id("windows-container")?;
        let temp_button: Option<HtmlElement> = dom::by_id("temp-preview-btn").ok();

        let shared = Rc::new_cyclic(|this| Shared {
            this: this.clone(),
            container,
            temp_button,
            renderer,
            resize_debounce: Debouncer::new(config.resize_debounce_ms),
            picker: RefCell::new(None),
            inner: RefCell::new(Inner {
                workspace: Workspace::new(config.window_name_prefix.clone()),
                ..Default::default()
            }),
        });

        let mut listeners = Vec::new();

        let toolbar: [(&str, fn(&Shared)); 6] = [
            ("new-window-btn", |s| {
                if let Err(e) = s.create_window(None) {
                    tracing::warn!("could not open a window: {e}");
                }
            }),
            ("export-mlatex", Shared::export_to_file),
            ("import-mlatex", Shared::import_from_file),
            ("all-edit-btn", |s| s.switch_all(WindowTab::Editor)),
            ("all-preview-btn", |s| s.switch_all(WindowTab::Preview)),
            ("temp-preview-btn", Shared::toggle_temp_preview),
        ];
        for (id, action) in toolbar {
            match dom::by_id::<Element>(id) {
                Ok(button) => {
                    listeners.push(shared.listen(&button, "click", false, move |s, _| action(s)))
                }
                Err(e) => tracing::debug!("{e}"),
            }
        }

        let document = dom::document()?;
        listeners.push(shared.listen(&document, "mousemove", false, |s, event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                s.pointer_moved(pointer(mouse));
            }
        }));
        listeners.push(shared.listen(&document, "mouseup", false, |s, _| {
            s.pointer_released();
        }));

        let window = dom::window()?;
        listeners.push(shared.listen(&window, "resize", false, |s, _| {
            let this = s.this.clone();
            s.resize_debounce.schedule(move || {
                if let Some(shared) = this.upgrade() {
                    shared.constrain_all();
                }
            });
        }));

        Ok(Self {
            shared,
            _listeners: listeners,
        })
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot::from(&self.shared.inner.borrow().workspace)
    }

    pub fn layout(&self) -> LayoutFile {
        self.shared.inner.borrow().workspace.export_layout()
    }

    pub fn import_json(&self, json: &str) -> Result<usize, LayoutError> {
        self.shared.import_json(json)
    }
}
