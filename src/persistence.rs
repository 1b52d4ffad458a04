//! Note persistence
//!
//! Notes are stored inline in a console log. [`ConsoleNoteCodec`] serializes a
//! note to JSON, base64 encodes it and frames it between a conceal sequence
//! and a reset, so a terminal showing the raw log never displays it.

use std::ops::Range;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::note::AnsiColorNote;

/// Start of an encoded note
pub const PREAMBLE: &str = "\x1b[8mha:";
/// End of an encoded note
pub const POSTAMBLE: &str = "\x1b[0m";

/// Turns notes into log tokens and back
pub trait NoteCodec {
    fn encode(&self, note: &AnsiColorNote) -> Result<String>;

    fn decode(&self, token: &str) -> Result<AnsiColorNote>;
}

/// JSON + base64 codec using the console framing
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNoteCodec;

impl NoteCodec for ConsoleNoteCodec {
    fn encode(&self, note: &AnsiColorNote) -> Result<String> {
        let json = serde_json::to_vec(note).map_err(|e| Error::NoteEncodingFailed {
            reason: e.to_string(),
        })?;

        let payload = STANDARD.encode(json);
        let mut token = String::with_capacity(PREAMBLE.len() + payload.len() + POSTAMBLE.len());
        token.push_str(PREAMBLE);
        token.push_str(&payload);
        token.push_str(POSTAMBLE);
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<AnsiColorNote> {
        let payload = token
            .strip_prefix(PREAMBLE)
            .and_then(|rest| rest.strip_suffix(POSTAMBLE))
            .ok_or_else(|| Error::NoteDecodingFailed {
                reason: "missing note framing".to_string(),
            })?;

        let json = STANDARD.decode(payload)?;
        Ok(serde_json::from_slice(&json)?)
    }
}

/// Byte ranges of every framed note in `log`, in order
///
/// A preamble with no postamble after it is not a note.
pub fn find_notes(log: &str) -> Vec<Range<usize>> {
    let mut notes = Vec::new();
    let mut pos = 0;

    while let Some(found) = log[pos..].find(PREAMBLE) {
        let start = pos + found;
        let payload = start + PREAMBLE.len();
        let Some(len) = log[payload..].find(POSTAMBLE) else {
            break;
        };
        let end = payload + len + POSTAMBLE.len();
        notes.push(start..end);
        pos = end;
    }

    notes
}
