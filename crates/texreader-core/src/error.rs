//! Error types for texreader.

use miette::Diagnostic;
use smol_str::SmolStr;

/// Main error type for texreader operations
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ReaderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Base64 payload errors.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum CodecError {
    #[error("invalid base64: {0}")]
    #[diagnostic(code(texreader::codec::base64))]
    Base64(#[from] base64::DecodeError),

    #[error("decoded base64 is not valid UTF-8")]
    #[diagnostic(
        code(texreader::codec::utf8),
        help("the payload must be UTF-8 text encoded with the standard alphabet")
    )]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors reading or writing `.mlatex` layout files.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("invalid layout file: {source}")]
    #[diagnostic(code(texreader::layout::parse))]
    Parse {
        source: serde_json::Error,
        #[help]
        advice: String,
    },

    #[error("failed to serialize layout: {0}")]
    #[diagnostic(code(texreader::layout::serialize))]
    Serialize(serde_json::Error),
}

impl LayoutError {
    pub(crate) fn parse(err: serde_json::Error) -> Self {
        let advice = parse_help(err.line(), err.column());
        Self::Parse {
            source: err,
            advice,
        }
    }
}

fn parse_help(line: usize, column: usize) -> String {
    if line == 0 {
        "the file ended before a complete layout was read".to_string()
    } else {
        format!("check line {line}, column {column}")
    }
}

/// Workspace state errors.
#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("window name `{name}` is already in use")]
    #[diagnostic(code(texreader::workspace::duplicate_name))]
    DuplicateName { name: SmolStr },

    #[error("no window with id `{id}`")]
    #[diagnostic(code(texreader::workspace::unknown_window))]
    UnknownWindow { id: SmolStr },
}

/// Compile form validation errors.
#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum CompileError {
    #[error("LaTeX content is required")]
    #[diagnostic(code(texreader::compile::missing_text))]
    MissingText,

    #[error("document URL is required")]
    #[diagnostic(code(texreader::compile::missing_url))]
    MissingUrl,

    #[error("git repository and target file are both required")]
    #[diagnostic(code(texreader::compile::missing_git))]
    MissingGitTarget,

    #[error("unknown compile mode `{0}`")]
    #[diagnostic(code(texreader::compile::unknown_mode))]
    UnknownMode(SmolStr),
}

/// Configuration errors.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    #[diagnostic(code(texreader::config::parse))]
    Parse(#[from] serde_json::Error),
}
