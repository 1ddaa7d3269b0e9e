//! texreader-core: framework-free state for the texreader LaTeX viewer.
//!
//! This crate provides:
//! - `QueryParams` and base64 helpers for URL-shared documents
//! - `Workspace` - floating window state with clamped drag/resize and z-order
//! - `LayoutFile` - the `.mlatex` import/export schema
//! - `CompileForm` / `QuoteRequest` - request building for the converter and
//!   quote views
//! - `LatexRenderer` - the seam platforms implement to render LaTeX

pub mod codec;
pub mod config;
pub mod converter;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod mode;
pub mod params;
pub mod quote;
pub mod render;
pub mod workspace;

pub use codec::{decode_base64, decode_base64_or_empty, encode_base64};
pub use config::ReaderConfig;
pub use converter::{CompileForm, CompileMode, CompileRequest, FormSections, SAMPLE_DOCUMENT};
pub use editor::{DEFAULT_SAMPLE, FontScale, InitialSource, append_snippet};
pub use error::{CodecError, CompileError, ConfigError, LayoutError, ReaderError, WorkspaceError};
pub use geometry::{Bounds, DragSession, Point, Rect, ResizeSession};
pub use layout::{LayoutFile, WindowRecord, layout_file_name, timestamped_file_name};
pub use mode::{AppMode, AppState};
pub use params::QueryParams;
pub use quote::{QuoteRequest, share_url, share_url_for_encoded};
pub use render::{Align, LatexRenderer, RenderOptions, render_into};
pub use smol_str::SmolStr;
pub use workspace::{LatexWindow, TabChange, WindowId, WindowTab, Workspace};
