//! Top-level wiring: mode controllers, navigation and the visible mode.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use texreader_browser::dom;
use texreader_browser::location::{set_url_param, url_params};
use texreader_browser::{AppMode, AppState, DomError, LatexJsRenderer, ReaderConfig};
use web_sys::{Element, HtmlElement};

use crate::converter::ConverterController;
use crate::editor::EditorController;
use crate::quote::QuoteController;
use crate::windows::WindowsController;

const DESKTOP_NAV: &str = "#main-nav .layui-nav-item[data-mode]";
const MOBILE_NAV: &str = ".mobile-tab-btn[data-mode]";

pub struct App {
    state: Rc<RefCell<AppState>>,
    editor: Option<EditorController>,
    windows: Option<WindowsController>,
    converter: Option<ConverterController>,
    quote: Option<QuoteController>,
    nav_listeners: RefCell<Vec<EventListener>>,
}

/// Mount one controller; a page without its markup simply lacks that view.
fn optional<T>(name: &str, result: Result<T, DomError>) -> Option<T> {
    result
        .inspect_err(|e| tracing::warn!("{name} view unavailable: {e}"))
        .ok()
}

impl App {
    pub fn mount(config: ReaderConfig) -> Result<Rc<Self>, DomError> {
        // Fail early when there is no document at all.
        dom::document()?;

        let state = Rc::new(RefCell::new(AppState::default()));
        let renderer = LatexJsRenderer::new(config.renderer_assets.clone());

        let editor = optional(
            "editor",
            EditorController::mount(&config, renderer.clone(), state.clone()),
        );
        let windows = optional(
            "window",
            WindowsController::mount(&config, renderer.clone()),
        );
        let converter = optional("converter", ConverterController::mount(&config));
        let quote = optional("quote", QuoteController::mount(renderer));

        let app = Rc::new(Self {
            state,
            editor,
            windows,
            converter,
            quote,
            nav_listeners: RefCell::new(Vec::new()),
        });

        app.wire_navigation();
        if let Some(mode) = AppMode::from_params(&url_params()) {
            app.switch_mode(mode);
        }
        tracing::info!(
            "texreader mounted (editor: {}, window: {}, converter: {}, quote: {})",
            app.editor.is_some(),
            app.windows.is_some(),
            app.converter.is_some(),
            app.quote.is_some(),
        );
        Ok(app)
    }

    pub fn mode(&self) -> AppMode {
        self.state.borrow().mode
    }

    pub fn windows(&self) -> Option<&WindowsController> {
        self.windows.as_ref()
    }

    fn wire_navigation(self: &Rc<Self>) {
        let mut listeners = self.nav_listeners.borrow_mut();
        for selector in [DESKTOP_NAV, MOBILE_NAV] {
            for item in dom::query_all::<Element>(selector) {
                let Some(mode) = item
                    .get_attribute("data-mode")
                    .and_then(|m| m.parse::<AppMode>().ok())
                else {
                    continue;
                };
                let app: Weak<Self> = Rc::downgrade(self);
                listeners.push(EventListener::new(&item, "click", move |_| {
                    if let Some(app) = app.upgrade() {
                        app.switch_mode(mode);
                    }
                }));
            }
        }
    }

    /// Show `mode`, mark its navigation entries and record it in the URL.
    pub fn switch_mode(&self, mode: AppMode) {
        self.state.borrow_mut().switch_mode(mode);

        mark_nav(DESKTOP_NAV, "layui-this", mode);
        mark_nav(MOBILE_NAV, "active", mode);

        for candidate in AppMode::ALL {
            match dom::by_id::<HtmlElement>(candidate.container_id()) {
                Ok(container) => dom::set_block(&container, candidate == mode),
                Err(e) => tracing::debug!("{e}"),
            }
        }

        if let Err(e) = set_url_param("mode", mode.as_str()) {
            tracing::warn!("could not update the page URL: {e}");
        }
    }
}

fn mark_nav(selector: &str, class: &str, mode: AppMode) {
    for item in dom::query_all::<Element>(selector) {
        let on = item.get_attribute("data-mode").as_deref() == Some(mode.as_str());
        dom::set_class(&item, class, on);
    }
}
