//! Converter session: one input, one output, and the notices a user sees.
//!
//! Mirrors an interactive converter. Every input change re-runs the whole
//! pipeline; a failed run clears the output rather than leaving a stale one.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::pipeline::{ConvertOptions, Pipeline};
use crate::traits::ConvertError;

/// File extension accepted by [`Session::load_file`].
pub const SVG_EXTENSION: &str = ".svg";

/// A transient, user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The input is missing `<svg` or `</svg>`.
    InvalidFormat,

    /// A file without the `.svg` suffix was offered.
    WrongFileType,

    /// Copy was requested while there is no output.
    NothingToCopy,

    /// The file could not be read.
    ReadFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidFormat => f.write_str("Invalid SVG format"),
            Notice::WrongFileType => f.write_str("Please upload an SVG file"),
            Notice::NothingToCopy => f.write_str("No JSX to copy"),
            Notice::ReadFailed(reason) => write!(f, "Failed to read file: {reason}"),
        }
    }
}

impl From<&ConvertError> for Notice {
    fn from(err: &ConvertError) -> Self {
        match err {
            ConvertError::Format => Notice::InvalidFormat,
            ConvertError::Read { source, .. } => Notice::ReadFailed(source.to_string()),
        }
    }
}

/// Holds the current source text and its converted output.
#[derive(Debug, Default)]
pub struct Session {
    pipeline: Pipeline,
    input: String,
    output: String,
}

impl Session {
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            pipeline: Pipeline::new(options),
            input: String::new(),
            output: String::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Replace the input and re-run the pipeline.
    pub fn set_input(&mut self, text: impl Into<String>) -> Option<Notice> {
        self.input = text.into();

        match self.pipeline.convert(&self.input) {
            Ok(output) => {
                self.output = output.into_string();
                None
            }
            Err(err) => {
                tracing::debug!("Conversion failed: {}", err);
                self.output.clear();
                Some(Notice::from(&err))
            }
        }
    }

    /// Load a `.svg` file as the new input.
    ///
    /// Only the file name suffix is checked. A wrong suffix leaves the session
    /// untouched; a read failure clears the output.
    pub fn load_file(&mut self, path: &Path) -> Option<Notice> {
        let is_svg = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(SVG_EXTENSION));
        if !is_svg {
            return Some(Notice::WrongFileType);
        }

        match read_source(path) {
            Ok(text) => self.set_input(text),
            Err(err) => {
                tracing::warn!("{}", err);
                self.output.clear();
                Some(Notice::from(&err))
            }
        }
    }

    /// Output ready to be copied, or a notice when there is none.
    pub fn copy(&self) -> Result<&str, Notice> {
        if self.output.is_empty() {
            Err(Notice::NothingToCopy)
        } else {
            Ok(&self.output)
        }
    }
}

/// Read a markup file as text.
pub fn read_source(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn converts_on_input() {
        let mut session = Session::default();

        assert_eq!(session.set_input(r#"<svg class="a"></svg>"#), None);
        assert!(session.output().contains(r#"className="a""#));
    }

    #[test]
    fn invalid_input_clears_output() {
        let mut session = Session::default();
        session.set_input("<svg></svg>");

        let notice = session.set_input("<rect/>");

        assert_eq!(notice, Some(Notice::InvalidFormat));
        assert_eq!(session.output(), "");
        assert_eq!(session.input(), "<rect/>");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let mut session = Session::default();
        session.set_input("<svg></svg>");

        assert_eq!(session.set_input(""), None);
        assert_eq!(session.output(), "");
    }

    #[test]
    fn copy_requires_output() {
        let mut session = Session::default();

        assert_eq!(session.copy(), Err(Notice::NothingToCopy));

        session.set_input("<svg></svg>");
        assert!(session.copy().unwrap().starts_with("const SvgIcon"));
    }

    #[test]
    fn loads_svg_files() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("icon.svg");
        fs::write(&path, r#"<svg fill-rule="evenodd"></svg>"#).unwrap();

        let mut session = Session::default();

        assert_eq!(session.load_file(&path), None);
        assert!(session.output().contains(r#"fillRule="evenodd""#));
    }

    #[test]
    fn rejects_other_file_types() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("icon.png");
        fs::write(&path, "<svg></svg>").unwrap();

        let mut session = Session::default();
        session.set_input("<svg></svg>");
        let before = session.output().to_string();

        assert_eq!(session.load_file(&path), Some(Notice::WrongFileType));
        assert_eq!(session.output(), before);
    }

    #[test]
    fn read_failure_clears_output() {
        let temp = tempdir().unwrap();
        let mut session = Session::default();
        session.set_input("<svg></svg>");

        let notice = session.load_file(&temp.path().join("missing.svg"));

        assert!(matches!(notice, Some(Notice::ReadFailed(_))));
        assert_eq!(session.output(), "");
    }

    #[test]
    fn notices_have_user_facing_text() {
        assert_eq!(Notice::InvalidFormat.to_string(), "Invalid SVG format");
        assert_eq!(Notice::WrongFileType.to_string(), "Please upload an SVG file");
        assert_eq!(Notice::NothingToCopy.to_string(), "No JSX to copy");
    }
}
