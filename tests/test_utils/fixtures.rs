//! Test Fixtures
//!
//! Common test data and helpers shared by the test targets

#![allow(dead_code)]

use ansicolor::{Annotation, AnsiColorNote, AnsiTranscoder, ColorPalette, MarkupText, Transcoded};

/// Opening tag for xterm red text
pub const XTERM_RED: &str = "<span style=\"color: #CD0000;\">";

/// Opening tag for xterm green text
pub const XTERM_GREEN: &str = "<span style=\"color: #00CD00;\">";

/// Opening tag of the span hiding raw text
pub const HIDDEN: &str = "<span style=\"display: none;\">";

/// Transcode with the xterm palette
pub fn transcode(input: &str) -> Transcoded<'_> {
    AnsiTranscoder::new(&ColorPalette::xterm()).transcode(input)
}

/// Transcode with the xterm palette, expecting a change
pub fn colorized(input: &str) -> String {
    match transcode(input) {
        Transcoded::Colorized(html) => html,
        Transcoded::Unchanged(text) => panic!("expected colorized output, got {:?}", text),
    }
}

/// Apply a note for `raw` to a host holding exactly `raw`
pub fn annotate(raw: &str) -> (Annotation, MarkupText) {
    annotate_within("", raw, "")
}

/// Apply a note for `raw` to a host holding `before + raw + after`
pub fn annotate_within(before: &str, raw: &str, after: &str) -> (Annotation, MarkupText) {
    let mut host = MarkupText::new(format!("{before}{raw}{after}"));
    let note = AnsiColorNote::new(raw, None);
    let result = note.apply(&mut host, before.len(), &ColorPalette::xterm());
    (result, host)
}

/// Open and close tag counts for `<span`, `<b>`, `<u>` and `<a `
pub fn tag_balance(html: &str) -> [(usize, usize); 4] {
    [
        (html.matches("<span").count(), html.matches("</span>").count()),
        (html.matches("<b>").count(), html.matches("</b>").count()),
        (html.matches("<u>").count(), html.matches("</u>").count()),
        (html.matches("<a ").count(), html.matches("</a>").count()),
    ]
}

/// Whether the tags in `html` nest properly
pub fn is_nested(html: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            return false;
        };
        let tag = &rest[start + 1..start + len];
        rest = &rest[start + len + 1..];

        if let Some(name) = tag.strip_prefix('/') {
            if stack.pop() != Some(name) {
                return false;
            }
        } else {
            let name = tag.split_whitespace().next().unwrap_or(tag);
            stack.push(name);
        }
    }
    stack.is_empty()
}
