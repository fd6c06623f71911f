//! Inline style restructuring.
//!
//! Turns `style="fill:red;stroke-width:2px"` into the object form React
//! expects: `style={{fill: "red", strokeWidth: "2px"}}`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::traits::{RewriteRule, Stage};

// `style` must start an attribute, so `font-style="italic"` is left alone.
static STYLE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(^|\s)style="([^"]*)""#).expect("Invalid style attribute regex")
});

/// One `property: value` pair from a style attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    /// Property name as written in the source (kebab-case)
    pub property: String,

    /// Value, trimmed but otherwise untouched
    pub value: String,
}

impl StyleDeclaration {
    /// Render as an object-literal entry with a camelCase key.
    pub fn to_object_entry(&self) -> String {
        format!("{}: \"{}\"", kebab_to_camel(&self.property), self.value)
    }
}

/// Parse the raw contents of a `style` attribute.
///
/// Segments are split on `;`, then on `:`. Empty segments and segments
/// without a colon are dropped. Only the text between the first and second
/// colon is kept as the value, so `background:url(http://x)` yields
/// `url(http`.
pub fn parse_declarations(raw: &str) -> Vec<StyleDeclaration> {
    raw.split(';')
        .filter(|segment| !segment.trim().is_empty())
        .filter_map(|segment| {
            let mut parts = segment.split(':');
            let property = parts.next()?.trim();
            let value = parts.next()?.trim();
            Some(StyleDeclaration {
                property: property.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Convert kebab-case to camelCase.
///
/// A hyphen followed by an ASCII lowercase letter is removed and the letter
/// uppercased. Any other hyphen is kept.
pub fn kebab_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('-', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Stage 2: rewrite every `style="..."` attribute into an object literal.
#[derive(Debug, Default)]
pub struct StyleRestructurer;

impl StyleRestructurer {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for StyleRestructurer {
    fn stage(&self) -> Stage {
        Stage::Style
    }

    fn name(&self) -> &'static str {
        "style"
    }

    fn apply(&self, text: &str) -> String {
        STYLE_ATTR_RE
            .replace_all(text, |caps: &Captures| {
                let entries = parse_declarations(&caps[2])
                    .iter()
                    .map(StyleDeclaration::to_object_entry)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}style={{{{{entries}}}}}", &caps[1])
            })
            .into_owned()
    }
}
