//! Browser DOM layer for texreader.
//!
//! This crate binds the external browser libraries the viewer relies on and
//! wraps the DOM plumbing the mode controllers share. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `latexjs`: latex.js bindings and the `LatexRenderer` implementation
//! - `layer`: layui toasts, loading indicators and confirm dialogs
//! - `rasterize`: html2canvas PNG export
//! - `dom`, `location`: element lookup, styling, query string and history
//! - `files`, `fetch`, `clipboard`: client-side I/O
//! - `debounce`: timer-based debouncing for input and resize events
//!
//! # Re-exports
//!
//! This crate re-exports `texreader-core` for convenience, so consumers
//! only need to depend on `texreader-browser`.

// Re-export core crate
pub use texreader_core;
pub use texreader_core::*;

pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod files;
pub mod latexjs;
pub mod layer;
pub mod location;
pub mod rasterize;

pub use config::load_config;
pub use debounce::Debouncer;
pub use error::{DomError, describe_js};
pub use latexjs::LatexJsRenderer;
pub use layer::{Loading, toast};
