//! Trait definitions for rewrite rules.

use std::fmt;
use std::path::PathBuf;

/// Position of a rule in the rewrite pipeline.
///
/// Stages run in ascending order. Later stages assume the markup shape
/// produced by earlier ones, so the order is part of the observable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Root element presence check
    Validate = 1,
    /// `style="..."` to object-literal restructuring
    Style = 2,
    /// `class` to `className`
    ClassName = 3,
    /// kebab-case to camelCase attribute names
    CamelCase = 4,
    /// Explicit attribute rename table
    RenameTable = 5,
    /// Component template wrapping
    Format = 6,
}

impl Stage {
    /// Stage number as used in logs and error messages.
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.number())
    }
}

/// A pure text-to-text rewrite applied as one step of the pipeline.
///
/// Rules are total: they never fail, whatever the input looks like.
pub trait RewriteRule: Send + Sync {
    /// Pipeline position of this rule.
    fn stage(&self) -> Stage;

    /// Short identifier (e.g., "style", "class-name")
    fn name(&self) -> &'static str;

    /// Rewrite the given markup.
    fn apply(&self, text: &str) -> String;
}

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid SVG format: expected both <svg and </svg>")]
    Format,

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered_by_number() {
        let mut stages = vec![
            Stage::Format,
            Stage::CamelCase,
            Stage::Validate,
            Stage::RenameTable,
            Stage::Style,
            Stage::ClassName,
        ];
        stages.sort();

        let numbers: Vec<u8> = stages.into_iter().map(Stage::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn read_error_names_the_path() {
        let err = ConvertError::Read {
            path: PathBuf::from("icons/logo.svg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        assert!(err.to_string().contains("icons/logo.svg"));
    }
}
