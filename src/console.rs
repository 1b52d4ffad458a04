//! Console log annotation
//!
//! [`ConsoleWriter`] is the write side: it prepends an encoded note to every
//! chunk of output that has something to annotate. [`ConsoleLog`] is the read
//! side: it separates the notes from the display text and renders the log as
//! HTML.

use std::io::Write;
use std::sync::Arc;

use crate::error::Result;
use crate::markup::MarkupText;
use crate::note::AnsiColorNote;
use crate::palette::ColorPalette;
use crate::persistence::{find_notes, NoteCodec};

/// Whether a chunk of output needs a note
pub fn needs_note(chunk: &str) -> bool {
    chunk.contains('\x1b') || chunk.contains("file://")
}

/// Writes console output, annotating chunks with escape sequences or file URLs
pub struct ConsoleWriter<W: Write, C: NoteCodec> {
    inner: W,
    codec: C,
    palette: Option<Arc<ColorPalette>>,
    notes_written: usize,
}

impl<W: Write, C: NoteCodec> ConsoleWriter<W, C> {
    pub fn new(inner: W, codec: C) -> Self {
        Self {
            inner,
            codec,
            palette: None,
            notes_written: 0,
        }
    }

    /// Record `palette` in every note instead of leaving the choice to the
    /// reader
    pub fn with_palette(mut self, palette: Arc<ColorPalette>) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Write one chunk, preceded by its note when it needs one
    pub fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        if needs_note(chunk) {
            let token = AnsiColorNote::encode_to(chunk, self.palette.clone(), &self.codec);
            if !token.is_empty() {
                self.inner.write_all(token.as_bytes())?;
                self.notes_written += 1;
            }
        }
        self.inner.write_all(chunk.as_bytes())?;
        Ok(())
    }

    /// Write `text` line by line
    pub fn write_lines(&mut self, text: &str) -> Result<()> {
        for line in text.split_inclusive('\n') {
            self.write_chunk(line)?;
        }
        Ok(())
    }

    pub fn notes_written(&self) -> usize {
        self.notes_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// An annotated log split into display text and positioned notes
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    text: String,
    notes: Vec<(usize, AnsiColorNote)>,
}

impl ConsoleLog {
    /// Split `log` into its display text and notes. Notes that fail to decode
    /// are dropped.
    pub fn parse<C: NoteCodec + ?Sized>(log: &str, codec: &C) -> Self {
        let mut text = String::with_capacity(log.len());
        let mut notes = Vec::new();
        let mut cursor = 0;

        for span in find_notes(log) {
            text.push_str(&log[cursor..span.start]);
            match codec.decode(&log[span.clone()]) {
                Ok(note) => notes.push((text.len(), note)),
                Err(err) => warn!("Dropping console note at byte {}: {}", span.start, err),
            }
            cursor = span.end;
        }
        text.push_str(&log[cursor..]);

        debug!("Parsed console log: {} bytes, {} notes", text.len(), notes.len());
        Self { text, notes }
    }

    /// Log text with notes removed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Notes with their offsets into [`text`](Self::text)
    pub fn notes(&self) -> &[(usize, AnsiColorNote)] {
        &self.notes
    }

    /// Apply every note and render the log as an HTML `<pre>` block
    pub fn render_html(&self, default_palette: &ColorPalette) -> String {
        let mut host = MarkupText::new(self.text.as_str());
        let mut degraded = 0;

        for (offset, note) in &self.notes {
            if note.apply(&mut host, *offset, default_palette).is_degraded() {
                degraded += 1;
            }
        }
        if degraded > 0 {
            warn!("{} of {} console notes could not be applied", degraded, self.notes.len());
        }

        format!("<pre>{}</pre>", host.render())
    }
}
