//! Single-document editor: textarea, live preview, zoom and image export.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use texreader_browser::fetch::fetch_text;
use texreader_browser::files::download_url;
use texreader_browser::location::url_params;
use texreader_browser::rasterize::{RasterOptions, element_to_png};
use texreader_browser::{
    AppState, DEFAULT_SAMPLE, Debouncer, DomError, InitialSource, LatexJsRenderer, Loading,
    ReaderConfig, append_snippet, dom, render_into, timestamped_file_name, toast,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlTextAreaElement};

struct Editor {
    input: HtmlTextAreaElement,
    output: HtmlElement,
    font_display: Option<HtmlElement>,
    renderer: LatexJsRenderer,
    state: Rc<RefCell<AppState>>,
    debounce: Debouncer,
    raster: RasterOptions,
}

impl Editor {
    fn render(&self) {
        let options = self.state.borrow().editor_font.render_options();
        render_into(&self.renderer, &self.input.value(), &self.output, &options);
    }

    fn apply_font_size(&self) {
        let font = self.state.borrow().editor_font;
        dom::set_font_size(&self.output, font.px());
        if let Some(display) = &self.font_display {
            display.set_text_content(Some(&font.label()));
        }
    }

    fn zoom(&self, grow: bool) {
        {
            let mut state = self.state.borrow_mut();
            let percent = if grow {
                state.editor_font.zoom_in()
            } else {
                state.editor_font.zoom_out()
            };
            tracing::debug!("editor font -> {percent}%");
        }
        self.apply_font_size();
    }

    fn append(&self, snippet: &str) {
        self.input
            .set_value(&append_snippet(&self.input.value(), snippet));
        let _ = self.input.focus();
        self.render();
    }

    async fn save_image(&self) -> Result<(), DomError> {
        let data_url = element_to_png(&self.output, &self.raster).await?;
        download_url(&timestamped_file_name("latex", "png"), &data_url)
    }
}

pub struct EditorController {
    _editor: Rc<Editor>,
    _listeners: Vec<EventListener>,
}

impl EditorController {
    pub fn mount(
        config: &ReaderConfig,
        renderer: LatexJsRenderer,
        state: Rc<RefCell<AppState>>,
    ) -> Result<Self, DomError> {
        let editor = Rc::new(Editor {
            input: dom::by_id("latex-input")?,
            output: dom::by_id("latex-output")?,
            font_display: dom::by_id("font-size-display").ok(),
            renderer,
            state,
            debounce: Debouncer::new(config.render_debounce_ms),
            raster: RasterOptions {
                background_color: config.image_background.clone(),
                scale: config.image_scale,
            },
        });

        load_initial_source(&editor);

        let mut listeners = Vec::new();

        let weak = Rc::downgrade(&editor);
        listeners.push(EventListener::new(&editor.input, "input", move |_| {
            let Some(editor) = weak.upgrade() else { return };
            let weak = Rc::downgrade(&editor);
            editor.debounce.schedule(move || {
                if let Some(editor) = weak.upgrade() {
                    editor.render();
                }
            });
        }));

        for (id, grow) in [("zoom-in", true), ("zoom-out", false)] {
            if let Ok(button) = dom::by_id::<Element>(id) {
                let weak = Rc::downgrade(&editor);
                listeners.push(EventListener::new(&button, "click", move |_| {
                    if let Some(editor) = weak.upgrade() {
                        editor.zoom(grow);
                    }
                }));
            }
        }

        if let Ok(button) = dom::by_id::<Element>("save-image") {
            let weak = Rc::downgrade(&editor);
            listeners.push(EventListener::new(&button, "click", move |_| {
                if let Some(editor) = weak.upgrade() {
                    save_image(editor);
                }
            }));
        }

        for button in dom::query_all::<Element>(".quick-tools button[data-latex]") {
            let weak = Rc::downgrade(&editor);
            let target = button.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                let Some(editor) = weak.upgrade() else { return };
                if let Some(snippet) = target.get_attribute("data-latex").filter(|s| !s.is_empty()) {
                    editor.append(&snippet);
                }
            }));
        }

        editor.apply_font_size();
        editor.render();

        Ok(Self {
            _editor: editor,
            _listeners: listeners,
        })
    }
}

/// Fill the textarea from the page URL, falling back to the sample.
fn load_initial_source(editor: &Rc<Editor>) {
    match InitialSource::from_params(&url_params()) {
        InitialSource::Inline(text) => editor.input.set_value(&text),
        InitialSource::Sample => editor.input.set_value(DEFAULT_SAMPLE),
        InitialSource::Remote(url) => {
            let weak: Weak<Editor> = Rc::downgrade(editor);
            spawn_local(async move {
                let text = match fetch_text(&url).await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!("failed to load {url}: {e}");
                        DEFAULT_SAMPLE.to_owned()
                    }
                };
                if let Some(editor) = weak.upgrade() {
                    editor.input.set_value(&text);
                    editor.render();
                }
            });
        }
    }
}

fn save_image(editor: Rc<Editor>) {
    let loading = Loading::show();
    spawn_local(async move {
        let result = editor.save_image().await;
        drop(loading);
        match result {
            Ok(()) => toast("Image saved"),
            Err(e) => {
                tracing::warn!("image export failed: {e}");
                toast(&format!("Save failed: {e}"));
            }
        }
    });
}
