//! Attribute name rewrites: `class`, kebab-case names, and the explicit
//! rename table.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::sync::LazyLock;

use crate::scanner::rewrite_attribute_names;
use crate::traits::{RewriteRule, Stage};

/// Fixed source-to-target attribute spellings.
///
/// Applied after the generic camelCase rule. Most entries repeat what that
/// rule already did; `xlink:href` is the one the legacy rule cannot reach.
pub const ATTRIBUTE_RENAMES: &[(&str, &str)] = &[
    ("xlink:href", "xlinkHref"),
    ("clip-path", "clipPath"),
    ("fill-rule", "fillRule"),
    ("stroke-width", "strokeWidth"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("fill-opacity", "fillOpacity"),
    ("font-family", "fontFamily"),
    ("font-size", "fontSize"),
    ("text-anchor", "textAnchor"),
];

/// Attribute prefixes JSX accepts verbatim.
const PASSTHROUGH_PREFIXES: &[&str] = &["data-", "aria-"];

static CLASS_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bclass=(["'])"#).expect("Invalid class attribute regex"));

static KEBAB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])-([a-z])").expect("Invalid kebab-case regex"));

/// How the generic camelCase rule locates what to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameMode {
    /// Rewrite attribute names only, as found by the scanner.
    #[default]
    Scoped,

    /// Rewrite every `<a-z>-<a-z>` in the whole text, values and text
    /// content included. Matches the output of the browser tool this
    /// converter replaces, hyphenated values and all.
    Legacy,
}

/// Stage 3: `class="..."` to `className="..."`.
#[derive(Debug, Default)]
pub struct ClassRenamer;

impl ClassRenamer {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for ClassRenamer {
    fn stage(&self) -> Stage {
        Stage::ClassName
    }

    fn name(&self) -> &'static str {
        "class-name"
    }

    fn apply(&self, text: &str) -> String {
        CLASS_ATTR_RE.replace_all(text, "className=$1").into_owned()
    }
}

/// Stage 4: kebab-case attribute names to camelCase.
#[derive(Debug, Default)]
pub struct CamelCaseRenamer {
    mode: RenameMode,
}

impl CamelCaseRenamer {
    pub fn new(mode: RenameMode) -> Self {
        Self { mode }
    }
}

impl RewriteRule for CamelCaseRenamer {
    fn stage(&self) -> Stage {
        Stage::CamelCase
    }

    fn name(&self) -> &'static str {
        "camel-case"
    }

    fn apply(&self, text: &str) -> String {
        match self.mode {
            RenameMode::Legacy => KEBAB_RE
                .replace_all(text, |caps: &Captures| {
                    format!("{}{}", &caps[1], caps[2].to_ascii_uppercase())
                })
                .into_owned(),
            RenameMode::Scoped => rewrite_attribute_names(text, camel_case_attribute),
        }
    }
}

/// camelCase a single attribute name.
///
/// `-` and `:` between two lowercase letters are removed and the second
/// letter uppercased, so `xlink:href` and `stroke-width` both convert.
/// `data-*` and `aria-*` names are returned unchanged.
pub fn camel_case_attribute(name: &str) -> String {
    if PASSTHROUGH_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
    {
        return name.to_string();
    }

    let bytes = name.as_bytes();
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for (i, c) in name.char_indices() {
        if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
            continue;
        }
        let is_joint = matches!(c, '-' | ':')
            && i > 0
            && bytes[i - 1].is_ascii_lowercase()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);
        if is_joint {
            upper_next = true;
        } else {
            out.push(c);
        }
    }

    out
}

/// Stage 5: literal replacements from [`ATTRIBUTE_RENAMES`].
#[derive(Debug, Default)]
pub struct RenameTable;

impl RenameTable {
    pub fn new() -> Self {
        Self
    }
}

impl RewriteRule for RenameTable {
    fn stage(&self) -> Stage {
        Stage::RenameTable
    }

    fn name(&self) -> &'static str {
        "rename-table"
    }

    fn apply(&self, text: &str) -> String {
        ATTRIBUTE_RENAMES
            .iter()
            .fold(text.to_string(), |acc, (from, to)| {
                acc.replace(&format!("{from}="), &format!("{to}="))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renames_class_attribute() {
        let out = ClassRenamer::new().apply(r#"<svg class="icon"><g class='a'/></svg>"#);

        assert_eq!(out, r#"<svg className="icon"><g className='a'/></svg>"#);
    }

    #[test]
    fn class_rename_ignores_other_names() {
        let out = ClassRenamer::new().apply(r#"<g subclass="x" data-class="y">class=</g>"#);

        assert_eq!(out, r#"<g subclass="x" data-className="y">class=</g>"#);
    }

    #[test]
    fn legacy_mode_rewrites_everywhere() {
        let renamer = CamelCaseRenamer::new(RenameMode::Legacy);
        let out = renamer.apply(r#"<path stroke-width="1" id="icon-home">see-also</path>"#);

        assert_eq!(out, r#"<path strokeWidth="1" id="iconHome">seeAlso</path>"#);
    }

    #[test]
    fn legacy_mode_leaves_namespaced_names() {
        let renamer = CamelCaseRenamer::new(RenameMode::Legacy);

        assert_eq!(renamer.apply(r##"xlink:href="#a""##), r##"xlink:href="#a""##);
    }

    #[test]
    fn scoped_mode_rewrites_names_only() {
        let renamer = CamelCaseRenamer::new(RenameMode::Scoped);
        let out = renamer.apply(r##"<use xlink:href="#icon-home" stroke-width="1">see-also</use>"##);

        assert_eq!(out, r##"<use xlinkHref="#icon-home" strokeWidth="1">see-also</use>"##);
    }

    #[test]
    fn scoped_mode_keeps_style_object_values() {
        let renamer = CamelCaseRenamer::new(RenameMode::Scoped);
        let text = r#"<text style={{fontFamily: "sans-serif"}} text-anchor="middle"/>"#;

        assert_eq!(
            renamer.apply(text),
            r#"<text style={{fontFamily: "sans-serif"}} textAnchor="middle"/>"#
        );
    }

    #[test]
    fn camel_case_attribute_rules() {
        assert_eq!(camel_case_attribute("stroke-linecap"), "strokeLinecap");
        assert_eq!(camel_case_attribute("xmlns:xlink"), "xmlnsXlink");
        assert_eq!(camel_case_attribute("xml:space"), "xmlSpace");
        assert_eq!(camel_case_attribute("data-icon-id"), "data-icon-id");
        assert_eq!(camel_case_attribute("aria-hidden"), "aria-hidden");
        assert_eq!(camel_case_attribute("x-1"), "x-1");
        assert_eq!(camel_case_attribute("viewBox"), "viewBox");
    }

    #[test]
    fn rename_table_handles_namespaced_href() {
        let out = RenameTable::new().apply(r##"<use xlink:href="#a"/>"##);

        assert_eq!(out, r##"<use xlinkHref="#a"/>"##);
    }

    #[test]
    fn rename_table_is_idempotent_after_camel_case() {
        let text = r#"<path clip-path="url(#a)" fill-opacity="0.5" font-family="Inter"/>"#;
        let camel = CamelCaseRenamer::new(RenameMode::Legacy).apply(text);
        let table = RenameTable::new();

        assert_eq!(table.apply(&camel), camel);
        assert_eq!(table.apply(&table.apply(text)), table.apply(text));
    }

    #[test]
    fn rename_table_requires_equals_sign() {
        let text = "<text>clip-path and font-size</text>";

        assert_eq!(RenameTable::new().apply(text), text);
    }
}
