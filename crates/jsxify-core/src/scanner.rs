//! Attribute-position scanner.
//!
//! A small state machine that walks markup and reports where attribute names
//! sit inside start tags. Text content, comments, declarations, closing tags
//! and attribute values are skipped, so a rewrite driven by these spans never
//! touches anything but names.

use std::ops::Range;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    TagName,
    BeforeAttrName,
    AttrName { start: usize },
    AfterAttrName,
    BeforeAttrValue,
    QuotedValue { quote: u8 },
    UnquotedValue,
    BracedValue { depth: usize, quote: Option<u8> },
}

/// Return the byte range of every attribute name in `text`, in order.
///
/// Never fails: an unterminated construct simply ends the scan. A name cut
/// off by the end of input is still reported.
pub fn attribute_name_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut state = State::Text;
    let mut i = 0;

    // Every transition happens on an ASCII byte, so span endpoints are
    // always char boundaries.
    while i < bytes.len() {
        let b = bytes[i];
        match state {
            State::Text => {
                if b != b'<' {
                    i += 1;
                    continue;
                }
                let rest = &text[i..];
                if rest.starts_with(COMMENT_START) {
                    i = skip_past(text, i + COMMENT_START.len(), COMMENT_END);
                } else if rest.starts_with(CDATA_START) {
                    i = skip_past(text, i + CDATA_START.len(), CDATA_END);
                } else if rest.starts_with("<!") || rest.starts_with("<?") || rest.starts_with("</")
                {
                    i = skip_past(text, i + 2, ">");
                } else if bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
                    state = State::TagName;
                    i += 1;
                } else {
                    i += 1;
                }
            }
            State::TagName => {
                if b.is_ascii_whitespace() || b == b'/' {
                    state = State::BeforeAttrName;
                } else if b == b'>' {
                    state = State::Text;
                }
                i += 1;
            }
            State::BeforeAttrName => {
                if b == b'>' {
                    state = State::Text;
                } else if !b.is_ascii_whitespace() && b != b'/' {
                    state = State::AttrName { start: i };
                }
                i += 1;
            }
            State::AttrName { start } => {
                if is_name_end(b) {
                    spans.push(start..i);
                    state = State::AfterAttrName;
                } else {
                    i += 1;
                }
            }
            State::AfterAttrName => {
                if b == b'=' {
                    state = State::BeforeAttrValue;
                    i += 1;
                } else if b.is_ascii_whitespace() {
                    i += 1;
                } else {
                    // Valueless attribute; reprocess this byte.
                    state = State::BeforeAttrName;
                }
            }
            State::BeforeAttrValue => {
                match b {
                    b'"' | b'\'' => state = State::QuotedValue { quote: b },
                    b'{' => {
                        state = State::BracedValue {
                            depth: 1,
                            quote: None,
                        }
                    }
                    b'>' => state = State::Text,
                    _ if b.is_ascii_whitespace() => {}
                    _ => state = State::UnquotedValue,
                }
                i += 1;
            }
            State::QuotedValue { quote } => {
                if b == quote {
                    state = State::BeforeAttrName;
                }
                i += 1;
            }
            State::UnquotedValue => {
                if b.is_ascii_whitespace() {
                    state = State::BeforeAttrName;
                } else if b == b'>' {
                    state = State::Text;
                }
                i += 1;
            }
            State::BracedValue { depth, quote } => {
                state = match (quote, b) {
                    (Some(q), _) if b == q => State::BracedValue { depth, quote: None },
                    (Some(_), _) => state,
                    (None, b'"' | b'\'' | b'`') => State::BracedValue {
                        depth,
                        quote: Some(b),
                    },
                    (None, b'{') => State::BracedValue {
                        depth: depth + 1,
                        quote: None,
                    },
                    (None, b'}') if depth == 1 => State::BeforeAttrName,
                    (None, b'}') => State::BracedValue {
                        depth: depth - 1,
                        quote: None,
                    },
                    (None, _) => state,
                };
                i += 1;
            }
        }
    }

    if let State::AttrName { start } = state {
        spans.push(start..bytes.len());
    }

    spans
}

/// Rebuild `text`, passing each attribute name through `rename`.
pub fn rewrite_attribute_names<F>(text: &str, rename: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for span in attribute_name_spans(text) {
        out.push_str(&text[last..span.start]);
        out.push_str(&rename(&text[span.clone()]));
        last = span.end;
    }
    out.push_str(&text[last..]);

    out
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'')
}

/// Index just past the next `terminator` at or after `from`, or the end.
fn skip_past(text: &str, from: usize, terminator: &str) -> usize {
    match text.get(from..).and_then(|rest| rest.find(terminator)) {
        Some(pos) => from + pos + terminator.len(),
        None => text.len(),
    }
}
