//! Quote view: renders LaTeX passed in the page URL, plus the encoder panel
//! that builds shareable links.

use std::rc::Rc;

use gloo_events::EventListener;
use texreader_browser::clipboard::copy_text;
use texreader_browser::fetch::fetch_text;
use texreader_browser::files::{as_file_input, read_selected};
use texreader_browser::location::{open_in_new_tab, page_base_url, url_params};
use texreader_browser::{
    DomError, LatexJsRenderer, QuoteRequest, dom, encode_base64, render_into,
    share_url, share_url_for_encoded, toast,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

struct Encoder {
    input: HtmlTextAreaElement,
    output: HtmlTextAreaElement,
}

impl Encoder {
    fn encode(&self) {
        let text = self.input.value();
        if text.is_empty() {
            toast("Please enter LaTeX content");
            return;
        }
        self.output.set_value(&encode_base64(&text));
    }

    fn copy_url(&self) {
        let encoded = self.output.value();
        if encoded.is_empty() {
            toast("Generate the Base64 encoding first");
            return;
        }
        let url = match page_base_url() {
            Ok(base) => share_url_for_encoded(&base, &encoded),
            Err(e) => {
                toast(&format!("Could not build the link: {e}"));
                return;
            }
        };
        spawn_local(async move {
            match copy_text(&url).await {
                Ok(()) => toast("URL copied to clipboard"),
                Err(e) => toast(&format!("Copy failed: {e}")),
            }
        });
    }
}

/// Encode a local file and open it in the quote view in a new tab.
fn open_local_file(input: &HtmlInputElement) {
    read_selected(input, |result| {
        let opened = result.and_then(|text| {
            let url = share_url(&page_base_url()?, &text);
            open_in_new_tab(&url)
        });
        match opened {
            Ok(()) => toast("Preview opened in a new tab"),
            Err(e) => toast(&format!("Could not open the file: {e}")),
        }
    });
}

/// Render whatever the page URL carries and set up the chrome around it.
fn display_from_url(renderer: LatexJsRenderer) -> Result<(), DomError> {
    let display: Option<HtmlElement> = dom::by_id("quote-display").ok();
    let help: Option<HtmlElement> = dom::query(".quote-help").ok();

    let Some(request) = QuoteRequest::from_params(&url_params()) else {
        if let Some(help) = &help {
            dom::set_block(help, true);
        }
        if let Some(display) = &display {
            dom::set_block(display, false);
        }
        return Ok(());
    };
    let display = display.ok_or_else(|| DomError::MissingElement("quote-display".into()))?;

    if let Some(latex) = &request.inline {
        render_into(&renderer, latex, &display, &request.options);
    }
    if let Some(url) = request.remote.clone() {
        let display = display.clone();
        let options = request.options;
        spawn_local(async move {
            match fetch_text(&url).await {
                Ok(text) => {
                    render_into(&renderer, &text, &display, &options);
                }
                Err(e) => {
                    tracing::warn!("failed to load {url}: {e}");
                    toast(&format!("Failed to load URL: {e}"));
                }
            }
        });
    }

    if request.hide_ui {
        let body = dom::document()?.body().ok_or(DomError::NoDocument)?;
        dom::set_class(&body, "ui-hidden", true);
        body.append_child(&display)?;
    }
    if let Some(help) = &help {
        dom::set_block(help, false);
    }
    dom::set_block(&display, true);
    Ok(())
}

pub struct QuoteController {
    _listeners: Vec<EventListener>,
}

impl QuoteController {
    pub fn mount(renderer: LatexJsRenderer) -> Result<Self, DomError> {
        // Embedding pages may ship the display without the encoder panel.
        if let Err(e) = display_from_url(renderer) {
            tracing::warn!("quote display unavailable: {e}");
        }

        let encoder = Rc::new(Encoder {
            input: dom::by_id("encode-input")?,
            output: dom::by_id("encode-output")?,
        });

        let mut listeners = Vec::new();

        if let Ok(button) = dom::by_id::<Element>("encode-btn") {
            let encoder = encoder.clone();
            listeners.push(EventListener::new(&button, "click", move |_| encoder.encode()));
        }
        if let Ok(button) = dom::by_id::<Element>("copy-url-btn") {
            let encoder = encoder.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                encoder.copy_url()
            }));
        }
        if let Ok(input) = dom::by_id::<HtmlInputElement>("local-file-input") {
            listeners.push(EventListener::new(&input, "change", |event| {
                if let Some(input) = as_file_input(event.target()) {
                    open_local_file(&input);
                }
            }));
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
