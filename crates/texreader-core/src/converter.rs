//! PDF compile requests for the remote compile service.
//!
//! Nothing is compiled locally: the form is validated and turned into a
//! query URL that the browser opens in a new tab.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::CompileError;
use crate::params::{QueryParams, with_query};

/// The engine the service uses when no `command` parameter is sent.
pub const DEFAULT_COMMAND: &str = "pdflatex";
pub const DEFAULT_DOWNLOAD_NAME: &str = "output.pdf";

/// Where the document comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompileMode {
    #[default]
    Text,
    Url,
    Git,
}

impl CompileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CompileMode::Text => "text",
            CompileMode::Url => "url",
            CompileMode::Git => "git",
        }
    }

    /// Which form sections are visible for this mode.
    pub fn sections(self) -> FormSections {
        FormSections {
            text: self == CompileMode::Text,
            url: self == CompileMode::Url,
            git: self == CompileMode::Git,
            git_target: self == CompileMode::Git,
        }
    }
}

impl FromStr for CompileMode {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(CompileMode::Text),
            "url" => Ok(CompileMode::Url),
            "git" => Ok(CompileMode::Git),
            other => Err(CompileError::UnknownMode(other.into())),
        }
    }
}

impl fmt::Display for CompileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormSections {
    pub text: bool,
    pub url: bool,
    pub git: bool,
    pub git_target: bool,
}

/// Raw values read from the converter form.
#[derive(Clone, Debug, Default)]
pub struct CompileForm {
    pub mode: CompileMode,
    pub api_server: String,
    pub text: String,
    pub url: String,
    pub git: String,
    pub target: String,
    pub command: SmolStr,
    pub force: bool,
    pub download: bool,
    pub download_name: String,
}

/// A validated request, ready to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileRequest {
    pub api_server: String,
    pub params: QueryParams,
}

impl CompileRequest {
    pub fn url(&self) -> String {
        with_query(&self.api_server, &self.params)
    }
}

impl CompileForm {
    /// Validate the form and build the request.
    ///
    /// Source fields are trimmed before the emptiness check. The engine is
    /// only sent when it differs from [`DEFAULT_COMMAND`].
    pub fn build_request(&self) -> Result<CompileRequest, CompileError> {
        let mut params = QueryParams::new();

        match self.mode {
            CompileMode::Text => {
                let text = self.text.trim();
                if text.is_empty() {
                    return Err(CompileError::MissingText);
                }
                params.append("text", text);
            }
            CompileMode::Url => {
                let url = self.url.trim();
                if url.is_empty() {
                    return Err(CompileError::MissingUrl);
                }
                params.append("url", url);
            }
            CompileMode::Git => {
                let git = self.git.trim();
                let target = self.target.trim();
                if git.is_empty() || target.is_empty() {
                    return Err(CompileError::MissingGitTarget);
                }
                params.append("git", git);
                params.append("target", target);
            }
        }

        if !self.command.is_empty() && self.command != DEFAULT_COMMAND {
            params.append("command", self.command.as_str());
        }
        if self.force {
            params.append("force", "true");
        }
        if self.download {
            let name = if self.download_name.is_empty() {
                DEFAULT_DOWNLOAD_NAME
            } else {
                &self.download_name
            };
            params.append("download", name);
        }

        Ok(CompileRequest {
            api_server: self.api_server.clone(),
            params,
        })
    }
}

/// Loaded by the "sample document" button.
pub const SAMPLE_DOCUMENT: &str = r"\documentclass[]{article}
\usepackage[T1]{fontenc}
\usepackage{lmodern}
\usepackage{amssymb,amsmath}
\usepackage[a4paper]{geometry}

\title{Sample LaTeX Document}
\author{LaTeX Reader}
\date{\today}

\begin{document}

\maketitle

\section{Introduction}

This is a sample LaTeX document that demonstrates basic formatting.

\section{Mathematical Formulas}

Einstein's famous equation:
\[ E=mc^2 \]

The quadratic formula:
\[ x = \frac{-b \pm \sqrt{b^2-4ac}}{2a} \]

A calculus example:
\[ \int_0^\infty e^{-x^2}dx = \frac{\sqrt{\pi}}{2} \]

\section{Lists}

\begin{itemize}
    \item First item
    \item Second item
    \item Third item
\end{itemize}

\section{Conclusion}

This is the end of the sample document.

\end{document}";

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = "https://latexonline.cc/compile";

    fn form(mode: CompileMode) -> CompileForm {
        CompileForm {
            mode,
            api_server: SERVER.into(),
            command: DEFAULT_COMMAND.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_mode_minimal() {
        let mut f = form(CompileMode::Text);
        f.text = "  \\section{A} x  ".into();
        let req = f.build_request().unwrap();
        assert_eq!(req.url(), format!("{SERVER}?text=%5Csection%7BA%7D%20x"));
    }

    #[test]
    fn test_all_options() {
        let mut f = form(CompileMode::Url);
        f.url = "https://example.com/a.tex".into();
        f.command = "xelatex".into();
        f.force = true;
        f.download = true;
        let req = f.build_request().unwrap();
        let pairs: Vec<_> = req.params.iter().collect();
        assert_eq!(pairs, vec![
            ("url", "https://example.com/a.tex"),
            ("command", "xelatex"),
            ("force", "true"),
            ("download", "output.pdf"),
        ]);

        f.download_name = "paper.pdf".into();
        let req = f.build_request().unwrap();
        assert_eq!(req.params.get("download"), Some("paper.pdf"));
    }

    #[test]
    fn test_git_mode() {
        let mut f = form(CompileMode::Git);
        f.git = "https://github.com/a/b".into();
        assert_eq!(f.build_request(), Err(CompileError::MissingGitTarget));
        f.target = "main.tex".into();
        let req = f.build_request().unwrap();
        assert_eq!(req.params.get("git"), Some("https://github.com/a/b"));
        assert_eq!(req.params.get("target"), Some("main.tex"));
        assert_eq!(req.params.get("command"), None);
    }

    #[test]
    fn test_validation_errors() {
        let mut f = form(CompileMode::Text);
        f.text = "   ".into();
        assert_eq!(f.build_request(), Err(CompileError::MissingText));
        assert_eq!(
            form(CompileMode::Url).build_request(),
            Err(CompileError::MissingUrl)
        );
    }

    #[test]
    fn test_mode_sections() {
        assert_eq!(CompileMode::Git.sections(), FormSections {
            text: false,
            url: false,
            git: true,
            git_target: true,
        });
        assert!(CompileMode::Text.sections().text);
        assert_eq!("url".parse::<CompileMode>(), Ok(CompileMode::Url));
        assert!("svn".parse::<CompileMode>().is_err());
    }
}
