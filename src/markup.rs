//! Markup Overlay
//!
//! A host text buffer never changes its characters. Annotations are recorded
//! as instructions positioned against the original text and only merged when
//! the buffer is rendered, so later insertions never shift earlier offsets.

use std::ops::Range;

use regex::Regex;

use crate::ansi::{escape_html, escape_html_into};
use crate::error::{Error, Result};

/// Capabilities the annotation pass needs from a host text buffer.
///
/// Offsets are byte offsets into [`text`](Self::text) and must fall on
/// character boundaries.
pub trait HostText {
    /// The unmodified text
    fn text(&self) -> &str;

    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Insert literal markup at `pos`
    fn add_markup(&mut self, pos: usize, markup: &str) -> Result<()>;

    /// Surround `range` with `open` and `close`
    fn wrap(&mut self, range: Range<usize>, open: &str, close: &str) -> Result<()>;

    /// Insert `markup` at the start of `range` and surround `range` with
    /// `open` and `close` as a single change. Nothing is recorded on error.
    fn overlay(
        &mut self,
        range: Range<usize>,
        markup: &str,
        open: &str,
        close: &str,
    ) -> Result<()> {
        self.wrap(range, &format!("{markup}{open}"), close)
    }

    /// Non-overlapping matches of `pattern` inside `range`, left to right
    fn find_tokens(&self, pattern: &Regex, range: Range<usize>) -> Result<Vec<Range<usize>>> {
        let text = self.text();
        let slice = text.get(range.clone()).ok_or(Error::InvalidRange {
            start: range.start,
            end: range.end,
        })?;

        Ok(pattern
            .find_iter(slice)
            .map(|m| range.start + m.start()..range.start + m.end())
            .collect())
    }

    /// Turn `range` into a hyperlink to `target`
    fn hyperlink(&mut self, range: Range<usize>, target: &str) -> Result<()> {
        let open = format!("<a href=\"{}\">", escape_html(target));
        self.wrap(range, &open, "</a>")
    }
}

/// How an instruction takes part in nesting
///
/// The declaration order is the rendering order for instructions sharing an
/// offset: closing tags first, then insertions, then opening tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKind {
    Close,
    Insert,
    Open,
}

/// One piece of markup positioned against the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupInstruction {
    /// Byte offset into the original text
    pub offset: usize,
    pub kind: TagKind,
    pub markup: String,
    /// Insertion sequence; shared by the open and close of one wrap
    seq: usize,
}

impl MarkupInstruction {
    /// Closing tags at one offset come out in reverse order of their wraps,
    /// everything else in insertion order
    fn sort_key(&self) -> (usize, TagKind, usize) {
        let order = match self.kind {
            TagKind::Close => usize::MAX - self.seq,
            TagKind::Insert | TagKind::Open => self.seq,
        };
        (self.offset, self.kind, order)
    }
}

/// In-memory host buffer: original text plus sorted markup instructions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupText {
    text: String,
    /// Kept sorted by `sort_key`
    tags: Vec<MarkupInstruction>,
    next_seq: usize,
}

impl MarkupText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
            next_seq: 0,
        }
    }

    /// Recorded instructions in rendering order
    pub fn instructions(&self) -> &[MarkupInstruction] {
        &self.tags
    }

    pub fn has_markup(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Every open has exactly one close after it and wraps never cross
    pub fn is_well_formed(&self) -> bool {
        let mut stack = Vec::new();
        for tag in &self.tags {
            match tag.kind {
                TagKind::Open => stack.push(tag.seq),
                TagKind::Close => {
                    if stack.pop() != Some(tag.seq) {
                        return false;
                    }
                }
                TagKind::Insert => {}
            }
        }
        stack.is_empty()
    }

    /// Render the text as HTML with every instruction applied
    pub fn render(&self) -> String {
        let markup_len: usize = self.tags.iter().map(|tag| tag.markup.len()).sum();
        let mut out = String::with_capacity(self.text.len() + markup_len);
        let mut cursor = 0;

        for tag in &self.tags {
            if tag.offset > cursor {
                escape_html_into(&mut out, &self.text[cursor..tag.offset]);
                cursor = tag.offset;
            }
            out.push_str(&tag.markup);
        }
        escape_html_into(&mut out, &self.text[cursor..]);
        out
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.text.len() {
            return Err(Error::OffsetOutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(Error::NotCharBoundary { offset });
        }
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start >= range.end {
            return Err(Error::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)
    }

    fn push(&mut self, offset: usize, kind: TagKind, markup: &str, seq: usize) {
        let tag = MarkupInstruction {
            offset,
            kind,
            markup: markup.to_string(),
            seq,
        };
        let key = tag.sort_key();
        let index = self.tags.partition_point(|existing| existing.sort_key() <= key);
        self.tags.insert(index, tag);
    }

    fn take_seq(&mut self) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl HostText for MarkupText {
    fn text(&self) -> &str {
        &self.text
    }

    fn add_markup(&mut self, pos: usize, markup: &str) -> Result<()> {
        self.check_offset(pos)?;
        let seq = self.take_seq();
        self.push(pos, TagKind::Insert, markup, seq);
        Ok(())
    }

    fn wrap(&mut self, range: Range<usize>, open: &str, close: &str) -> Result<()> {
        self.check_range(&range)?;

        let seq = self.take_seq();
        self.push(range.start, TagKind::Open, open, seq);
        self.push(range.end, TagKind::Close, close, seq);
        Ok(())
    }

    fn overlay(
        &mut self,
        range: Range<usize>,
        markup: &str,
        open: &str,
        close: &str,
    ) -> Result<()> {
        self.check_range(&range)?;

        let seq = self.take_seq();
        self.push(range.start, TagKind::Insert, markup, seq);
        let seq = self.take_seq();
        self.push(range.start, TagKind::Open, open, seq);
        self.push(range.end, TagKind::Close, close, seq);
        Ok(())
    }
}
