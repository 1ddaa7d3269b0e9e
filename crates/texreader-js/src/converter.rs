//! PDF conversion form. Builds a compile-service URL and opens it in a new
//! tab after the user confirms.

use std::rc::Rc;

use gloo_events::EventListener;
use texreader_browser::converter::DEFAULT_COMMAND;
use texreader_browser::files::{as_file_input, read_selected};
use texreader_browser::layer::{confirm, toast_busy};
use texreader_browser::location::open_in_new_tab;
use texreader_browser::{
    CompileForm, CompileMode, DomError, ReaderConfig, SAMPLE_DOCUMENT, dom, toast,
};
use web_sys::{
    Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

const MODE_RADIOS: &str = r#"input[name="compile-mode"]"#;

struct Sections {
    text: HtmlElement,
    url: HtmlElement,
    git: HtmlElement,
    git_target: HtmlElement,
}

impl Sections {
    fn show(&self, mode: CompileMode) {
        let visible = mode.sections();
        dom::set_visible(&self.text, visible.text);
        dom::set_visible(&self.url, visible.url);
        dom::set_visible(&self.git, visible.git);
        dom::set_visible(&self.git_target, visible.git_target);
    }
}

struct Converter {
    content: HtmlTextAreaElement,
    sections: Sections,
    download_name_area: Option<HtmlElement>,
    api_server: Option<HtmlSelectElement>,
    default_server: Option<String>,
}

fn input_value(name: &str) -> String {
    dom::query::<HtmlInputElement>(&format!(r#"input[name="{name}"]"#))
        .map(|input| input.value())
        .unwrap_or_default()
}

fn checkbox(name: &str) -> bool {
    dom::query::<HtmlInputElement>(&format!(r#"input[name="{name}"]"#))
        .is_ok_and(|input| input.checked())
}

fn select_value(name: &str) -> Option<String> {
    dom::query::<HtmlSelectElement>(&format!(r#"select[name="{name}"]"#))
        .ok()
        .map(|select| select.value())
        .filter(|value| !value.is_empty())
}

impl Converter {
    fn selected_mode(&self) -> CompileMode {
        dom::query::<HtmlInputElement>(&format!("{MODE_RADIOS}:checked"))
            .ok()
            .and_then(|radio| radio.value().parse().ok())
            .unwrap_or_default()
    }

    /// Snapshot the form.
    fn read(&self) -> CompileForm {
        CompileForm {
            mode: self.selected_mode(),
            api_server: self
                .api_server
                .as_ref()
                .map(HtmlSelectElement::value)
                .filter(|value| !value.is_empty())
                .or_else(|| self.default_server.clone())
                .unwrap_or_default(),
            text: self.content.value(),
            url: input_value("url"),
            git: input_value("git"),
            target: input_value("target"),
            command: select_value("command")
                .unwrap_or_else(|| DEFAULT_COMMAND.to_owned())
                .into(),
            force: checkbox("force"),
            download: checkbox("download"),
            download_name: input_value("download-name"),
        }
    }

    /// Offer the configured servers when the page ships an empty select.
    fn populate_servers(&self, servers: &[String]) -> Result<(), DomError> {
        let Some(select) = &self.api_server else {
            return Ok(());
        };
        if select.length() > 0 {
            return Ok(());
        }
        for server in servers {
            let option = HtmlOptionElement::new_with_text_and_value(server, server)?;
            select.append_child(&option)?;
        }
        Ok(())
    }

    fn load_sample(&self) {
        self.content.set_value(SAMPLE_DOCUMENT);
        toast("Sample document loaded");
    }

    fn convert(&self) {
        let request = match self.read().build_request() {
            Ok(request) => request,
            Err(e) => {
                toast(&e.to_string());
                return;
            }
        };
        let url = request.url();
        tracing::debug!("opening compile request {url}");
        toast_busy("Opening the compile service in a new tab...", 2000);
        if let Err(e) = open_in_new_tab(&url) {
            tracing::warn!("could not open {url}: {e}");
        }
    }
}

pub struct ConverterController {
    _listeners: Vec<EventListener>,
}

impl ConverterController {
    pub fn mount(config: &ReaderConfig) -> Result<Self, DomError> {
        let converter = Rc::new(Converter {
            content: dom::by_id("latex-content")?,
            sections: Sections {
                text: dom::by_id("text-input-area")?,
                url: dom::by_id("url-input-area")?,
                git: dom::by_id("git-input-area")?,
                git_target: dom::by_id("git-target-area")?,
            },
            download_name_area: dom::by_id("download-name-area").ok(),
            api_server: dom::query(r#"select[name="api-server"]"#).ok(),
            default_server: config.default_compile_server().map(str::to_owned),
        });
        converter.populate_servers(&config.compile_servers)?;
        converter.sections.show(converter.selected_mode());

        let mut listeners = Vec::new();

        for radio in dom::query_all::<HtmlInputElement>(MODE_RADIOS) {
            let converter = converter.clone();
            let target = radio.clone();
            listeners.push(EventListener::new(&radio, "change", move |_| {
                match target.value().parse::<CompileMode>() {
                    Ok(mode) => converter.sections.show(mode),
                    Err(e) => tracing::warn!("{e}"),
                }
            }));
        }

        if let Ok(download) = dom::query::<HtmlInputElement>(r#"input[name="download"]"#) {
            let converter = converter.clone();
            let target = download.clone();
            if let Some(area) = &converter.download_name_area {
                dom::set_visible(area, download.checked());
            }
            listeners.push(EventListener::new(&download, "change", move |_| {
                if let Some(area) = &converter.download_name_area {
                    dom::set_visible(area, target.checked());
                }
            }));
        }

        if let Ok(button) = dom::by_id::<Element>("load-sample") {
            let converter = converter.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                converter.load_sample();
            }));
        }

        if let (Ok(button), Ok(file_input)) = (
            dom::by_id::<Element>("upload-tex"),
            dom::by_id::<HtmlInputElement>("tex-file-input"),
        ) {
            let picker = file_input.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                picker.click();
            }));

            let converter = converter.clone();
            listeners.push(EventListener::new(&file_input, "change", move |event| {
                let Some(input) = as_file_input(event.target()) else {
                    return;
                };
                let converter = converter.clone();
                read_selected(&input, move |result| match result {
                    Ok(text) => {
                        converter.content.set_value(&text);
                        toast("File loaded");
                    }
                    Err(e) => toast(&format!("Could not read file: {e}")),
                });
            }));
        }

        if let Ok(button) = dom::by_id::<Element>("convert-btn") {
            let converter = converter.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                let converter = converter.clone();
                confirm(
                    "Notice",
                    "The compile API has a running cost. Please use it responsibly.<br>\
                     Generate the PDF now?",
                    "Generate",
                    "Cancel",
                    move || converter.convert(),
                );
            }));
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
