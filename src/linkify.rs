//! File URL detection
//!
//! Finds `file://` references in console output and turns them into
//! hyperlinks, either by rewriting an HTML string or by asking a
//! [`HostText`] buffer to wrap the matching ranges.

use std::borrow::Cow;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::markup::HostText;

/// Quoted forms may contain spaces but never a tag boundary or a newline.
/// The unquoted form runs until whitespace, an angle bracket or ESC and may
/// not end in trailing punctuation.
const FILE_URL_PATTERN: &str = concat!(
    r"&quot;file://[^<>\n]*?&quot;",
    r#"|'file://[^'<>\n]*'"#,
    r#"|"file://[^"<>\n]*""#,
    r#"|file://[^\s<>\x1b]*[^\s<>\x1b,.:"'()\[\]=]"#,
);

/// Characters never kept at the end of an unquoted URL
const TRAILING_PUNCTUATION: &[char] = &[',', '.', ':', '"', '\'', '(', ')', '[', ']', '='];

/// Escaped brackets, quotes and ESC end an unquoted URL
const ENTITY_STOPS: [&str; 4] = ["&lt;", "&gt;", "&quot;", "&#27;"];

const SCHEME: &str = "file://";

/// Compiled file URL pattern
pub static FILE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(FILE_URL_PATTERN).expect("file URL pattern is valid"));

/// A file reference found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLink {
    /// Matched range, quotes included
    pub range: Range<usize>,
    /// Link target with quotes removed
    pub target: String,
}

/// All file references in `text`, left to right, non-overlapping
pub fn find_links(text: &str) -> Vec<FileLink> {
    FILE_URL
        .find_iter(text)
        .filter_map(|m| refine(text, m.range()))
        .collect()
}

/// Replace every file reference in an HTML string with an anchor
pub fn linkify(html: &str) -> Cow<'_, str> {
    render_links(html, &find_links(html))
}

/// Replace the given links of `html` with anchors
pub(crate) fn render_links<'a>(html: &'a str, links: &[FileLink]) -> Cow<'a, str> {
    if links.is_empty() {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + links.len() * 32);
    let mut cursor = 0;
    for link in links {
        out.push_str(&html[cursor..link.range.start]);
        out.push_str("<a href=\"");
        out.push_str(&link.target);
        out.push_str("\">");
        out.push_str(&link.target);
        out.push_str("</a>");
        cursor = link.range.end;
    }
    out.push_str(&html[cursor..]);
    Cow::Owned(out)
}

/// Hyperlink every file reference of `range` in place. Returns the number of
/// links created.
pub fn linkify_host<H: HostText + ?Sized>(host: &mut H, range: Range<usize>) -> Result<usize> {
    let links: Vec<FileLink> = host
        .find_tokens(&FILE_URL, range)?
        .into_iter()
        .filter_map(|found| refine(host.text(), found))
        .collect();

    for link in &links {
        host.hyperlink(link.range.clone(), &link.target)?;
    }
    Ok(links.len())
}

/// Cut unquoted matches at escaped brackets and compute the link target
fn refine(text: &str, range: Range<usize>) -> Option<FileLink> {
    let token = &text[range.clone()];
    let quoted = token.starts_with(['"', '\'']) || token.starts_with("&quot;");

    let mut end = range.end;
    if !quoted {
        if let Some(cut) = ENTITY_STOPS.iter().filter_map(|stop| token.find(stop)).min() {
            end = range.start + token[..cut].trim_end_matches(TRAILING_PUNCTUATION).len();
        }
    }

    let target = strip_quotes(&text[range.start..end]);
    if target.len() <= SCHEME.len() {
        return None;
    }

    Some(FileLink {
        range: range.start..end,
        target,
    })
}

fn strip_quotes(token: &str) -> String {
    token.replace("&quot;", "").replace(['"', '\''], "")
}
