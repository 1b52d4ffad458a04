//! Console Notes
//!
//! An [`AnsiColorNote`] carries one chunk of raw console output together with
//! the palette it should be rendered with. Applying a note to a host buffer
//! overlays the colorized HTML and hides the raw chunk, or links file URLs in
//! place when the chunk has no escape sequences.

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ansi::{colorize, Transcoded, CONCEAL_OPEN};
use crate::error::{Error, Result};
use crate::linkify::{find_links, linkify_host, render_links};
use crate::markup::HostText;
use crate::palette::ColorPalette;
use crate::persistence::NoteCodec;

/// Markup hiding the raw chunk once its colorized copy is inserted
pub const HIDDEN_OPEN: &str = CONCEAL_OPEN;
pub const HIDDEN_CLOSE: &str = "</span>";

/// Outcome of applying a note
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Colorized HTML inserted, raw text hidden
    Colorized { links: usize },
    /// No escape sequences; file URLs linked in place
    Linked { links: usize },
    /// Nothing was changed on the host
    Degraded { reason: String },
}

impl Annotation {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Annotation::Degraded { .. })
    }

    /// Number of hyperlinks created
    pub fn links(&self) -> usize {
        match self {
            Annotation::Colorized { links } | Annotation::Linked { links } => *links,
            Annotation::Degraded { .. } => 0,
        }
    }
}

/// Annotation for one chunk of console output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsiColorNote {
    data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    palette: Option<Arc<ColorPalette>>,
}

impl AnsiColorNote {
    pub fn new(data: impl Into<String>, palette: Option<Arc<ColorPalette>>) -> Self {
        Self {
            data: data.into(),
            palette,
        }
    }

    /// Raw text this note annotates
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn palette(&self) -> Option<&Arc<ColorPalette>> {
        self.palette.as_ref()
    }

    /// The note's palette, or `default` when it has none
    pub fn palette_or<'a>(&'a self, default: &'a ColorPalette) -> &'a ColorPalette {
        self.palette.as_deref().unwrap_or(default)
    }

    /// Annotate the host text at `offset`, where this note's data must appear
    /// verbatim. Failures leave the host untouched and come back as
    /// [`Annotation::Degraded`].
    pub fn apply<H: HostText + ?Sized>(
        &self,
        host: &mut H,
        offset: usize,
        default_palette: &ColorPalette,
    ) -> Annotation {
        match self.try_apply(host, offset, default_palette) {
            Ok(annotation) => annotation,
            Err(err) => {
                warn!("Failed to annotate console text at offset {}: {}", offset, err);
                Annotation::Degraded {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn try_apply<H: HostText + ?Sized>(
        &self,
        host: &mut H,
        offset: usize,
        default_palette: &ColorPalette,
    ) -> Result<Annotation> {
        let range = self.locate(host, offset)?;

        match colorize(&self.data, self.palette_or(default_palette)) {
            Transcoded::Colorized(html) => {
                let links = find_links(&html);
                let html = render_links(&html, &links);
                host.overlay(range, &html, HIDDEN_OPEN, HIDDEN_CLOSE)?;
                Ok(Annotation::Colorized { links: links.len() })
            }
            Transcoded::Unchanged(_) => {
                let links = linkify_host(host, range)?;
                Ok(Annotation::Linked { links })
            }
        }
    }

    /// Range of this note's data in the host, checked against the host text
    fn locate<H: HostText + ?Sized>(&self, host: &H, offset: usize) -> Result<Range<usize>> {
        let text = host.text();
        if offset > text.len() {
            return Err(Error::OffsetOutOfBounds {
                offset,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(offset) {
            return Err(Error::NotCharBoundary { offset });
        }

        let end = offset + self.data.len();
        match text.get(offset..end) {
            Some(found) if found == self.data => Ok(offset..end),
            _ => Err(Error::TextMismatch {
                offset,
                expected_len: self.data.len(),
            }),
        }
    }

    /// Encode a note for `text` with `codec`. Returns an empty token when
    /// encoding fails.
    pub fn encode_to<C: NoteCodec + ?Sized>(
        text: impl Into<String>,
        palette: Option<Arc<ColorPalette>>,
        codec: &C,
    ) -> String {
        let note = Self::new(text, palette);
        match codec.encode(&note) {
            Ok(token) => token,
            Err(err) => {
                warn!("Failed to serialize console note: {}", err);
                String::new()
            }
        }
    }
}
