//! ANSI escape code processing
//!
//! Transcodes console text containing ANSI escape sequences into HTML.
//! Recognized sequences are removed and SGR (Select Graphic Rendition)
//! parameters become nested `<span>`, `<b>` and `<u>` tags colored through a
//! [`ColorPalette`]. Everything else is copied through, HTML-escaped.

use std::borrow::Cow;

use crate::palette::{AnsiColor, ColorPalette, ColorSlot};

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Markup opening a concealed (SGR 8) run
pub const CONCEAL_OPEN: &str = "<span style=\"display: none;\">";

/// Result of a transcoding pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcoded<'a> {
    /// No escape sequence was recognized; this is the input as decoded
    Unchanged(Cow<'a, str>),
    /// At least one escape sequence was recognized; this is HTML
    Colorized(String),
}

impl Transcoded<'_> {
    /// Whether any escape sequence was recognized and acted upon
    pub fn is_changed(&self) -> bool {
        matches!(self, Transcoded::Colorized(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Transcoded::Unchanged(text) => text,
            Transcoded::Colorized(html) => html,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Transcoded::Unchanged(text) => text.into_owned(),
            Transcoded::Colorized(html) => html,
        }
    }
}

/// Transcode `data` with `palette`
pub fn colorize<'a>(data: &'a str, palette: &ColorPalette) -> Transcoded<'a> {
    AnsiTranscoder::new(palette).transcode(data)
}

/// Style attributes in effect at a point of the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleState {
    /// Foreground slot, `None` for the terminal default
    pub foreground: Option<ColorSlot>,
    /// Background slot, `None` for the terminal default
    pub background: Option<ColorSlot>,
    pub bold: bool,
    pub underline: bool,
    pub concealed: bool,
    pub reversed: bool,
}

impl StyleState {
    /// Reset all formatting to default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether every attribute is at its default
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the parameter list of an SGR sequence (the part between `ESC [`
    /// and `m`). Unknown or malformed parameters are skipped.
    pub fn apply_sgr(&mut self, params: &str) {
        let mut codes = params.split(';');

        while let Some(param) = codes.next() {
            if param.contains(':') {
                self.apply_subparams(param);
                continue;
            }

            let Some(code) = parse_param(param) else {
                trace!("Ignoring malformed SGR parameter {:?}", param);
                continue;
            };

            match code {
                0 => self.reset(),
                1 => self.bold = true,
                4 => self.underline = true,
                7 => self.reversed = true,
                8 => self.concealed = true,
                22 => self.bold = false,
                24 => self.underline = false,
                27 => self.reversed = false,
                28 => self.concealed = false,
                30..=37 => self.foreground = AnsiColor::from_ansi_code(code - 30).map(Into::into),
                38 => {
                    if let Some(color) = extended_color(&mut codes.by_ref().map(parse_param)) {
                        self.foreground = Some(color.into());
                    }
                }
                39 => self.foreground = None,
                40..=47 => self.background = AnsiColor::from_ansi_code(code - 40).map(Into::into),
                48 => {
                    if let Some(color) = extended_color(&mut codes.by_ref().map(parse_param)) {
                        self.background = Some(color.into());
                    }
                }
                49 => self.background = None,
                90..=97 => {
                    self.foreground = AnsiColor::from_bright_ansi_code(code - 90).map(Into::into)
                }
                100..=107 => {
                    self.background = AnsiColor::from_bright_ansi_code(code - 100).map(Into::into)
                }
                _ => trace!("Ignoring unsupported SGR code {}", code),
            }
        }
    }

    /// Colon separated form, e.g. `38:5:196`
    fn apply_subparams(&mut self, param: &str) {
        let mut parts = param.split(':').map(parse_param);
        match parts.next().flatten() {
            Some(38) => {
                if let Some(color) = extended_color(&mut parts) {
                    self.foreground = Some(color.into());
                }
            }
            Some(48) => {
                if let Some(color) = extended_color(&mut parts) {
                    self.background = Some(color.into());
                }
            }
            _ => trace!("Ignoring SGR sub-parameters {:?}", param),
        }
    }

    /// Tags needed to render this state, outermost first
    fn tags(&self) -> Vec<Tag> {
        let (foreground, background) = if self.reversed {
            (
                Some(self.background.unwrap_or(ColorSlot::DefaultBackground)),
                Some(self.foreground.unwrap_or(ColorSlot::DefaultForeground)),
            )
        } else {
            (self.foreground, self.background)
        };

        let mut tags = Vec::with_capacity(5);
        if let Some(slot) = background {
            tags.push(Tag::Background(slot));
        }
        if let Some(slot) = foreground {
            tags.push(Tag::Foreground(slot));
        }
        if self.bold {
            tags.push(Tag::Bold);
        }
        if self.underline {
            tags.push(Tag::Underline);
        }
        if self.concealed {
            tags.push(Tag::Conceal);
        }
        tags
    }
}

/// Empty parameters count as 0
fn parse_param(param: &str) -> Option<u16> {
    if param.is_empty() {
        Some(0)
    } else {
        param.parse().ok()
    }
}

/// Read the tail of a 38/48 parameter. Indexed colors outside the 16-color
/// palette and direct RGB colors are consumed but produce no color.
fn extended_color(params: &mut dyn Iterator<Item = Option<u16>>) -> Option<AnsiColor> {
    match params.next().flatten() {
        Some(5) => params.next().flatten().and_then(AnsiColor::from_indexed),
        Some(2) => {
            for _ in 0..3 {
                params.next();
            }
            None
        }
        _ => None,
    }
}

/// A rendered style attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Background(ColorSlot),
    Foreground(ColorSlot),
    Bold,
    Underline,
    Conceal,
}

impl Tag {
    fn write_open(&self, out: &mut String, palette: &ColorPalette) {
        match self {
            Tag::Background(slot) => {
                out.push_str("<span style=\"background-color: ");
                out.push_str(palette.value(*slot));
                out.push_str(";\">");
            }
            Tag::Foreground(slot) => {
                out.push_str("<span style=\"color: ");
                out.push_str(palette.value(*slot));
                out.push_str(";\">");
            }
            Tag::Bold => out.push_str("<b>"),
            Tag::Underline => out.push_str("<u>"),
            Tag::Conceal => out.push_str(CONCEAL_OPEN),
        }
    }

    fn close(&self) -> &'static str {
        match self {
            Tag::Background(_) | Tag::Foreground(_) | Tag::Conceal => "</span>",
            Tag::Bold => "</b>",
            Tag::Underline => "</u>",
        }
    }
}

/// Escape sequence scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Normal text
    Ground,
    /// After ESC
    Escape,
    /// After `ESC [`
    Csi,
    /// After `ESC ]`
    Osc,
    /// ESC seen inside an OSC string
    OscEscape,
    /// After ESC and an intermediate byte, e.g. `ESC (`
    Designate,
}

/// Output side of one transcoding pass
struct Pass<'p> {
    palette: &'p ColorPalette,
    out: String,
    state: StyleState,
    open: Vec<Tag>,
    changed: bool,
}

impl<'p> Pass<'p> {
    fn new(palette: &'p ColorPalette, capacity: usize) -> Self {
        Self {
            palette,
            out: String::with_capacity(capacity),
            state: StyleState::default(),
            open: Vec::new(),
            changed: false,
        }
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.sync_tags();
        escape_html_into(&mut self.out, text);
    }

    /// Close tags past the common prefix of open and wanted tags, then open
    /// the missing ones
    fn sync_tags(&mut self) {
        let wanted = self.state.tags();
        let keep = self
            .open
            .iter()
            .zip(&wanted)
            .take_while(|(open, wanted)| open == wanted)
            .count();

        while self.open.len() > keep {
            if let Some(tag) = self.open.pop() {
                self.out.push_str(tag.close());
            }
        }
        for tag in &wanted[keep..] {
            tag.write_open(&mut self.out, self.palette);
            self.open.push(*tag);
        }
    }

    fn control_sequence(&mut self, body: &str, final_byte: u8) {
        self.changed = true;
        let is_sgr = final_byte == b'm' && body.bytes().all(|b| b.is_ascii_digit() || b == b';' || b == b':');
        if is_sgr {
            self.state.apply_sgr(body);
        }
    }

    fn escape(&mut self, final_byte: u8) {
        self.changed = true;
        if final_byte == b'c' {
            self.state.reset();
        }
    }

    fn stripped(&mut self) {
        self.changed = true;
    }

    fn finish(mut self) -> String {
        while let Some(tag) = self.open.pop() {
            self.out.push_str(tag.close());
        }
        self.out
    }
}

/// ANSI to HTML transcoder
///
/// Stateless between calls: every [`transcode`](Self::transcode) starts from
/// the default style, so one transcoder can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct AnsiTranscoder<'p> {
    palette: &'p ColorPalette,
}

impl<'p> AnsiTranscoder<'p> {
    /// Create a new transcoder
    pub fn new(palette: &'p ColorPalette) -> Self {
        Self { palette }
    }

    /// Transcode raw bytes, decoding them as UTF-8 (invalid sequences become
    /// U+FFFD)
    pub fn transcode_bytes<'a>(&self, data: &'a [u8]) -> Transcoded<'a> {
        match String::from_utf8_lossy(data) {
            Cow::Borrowed(text) => self.transcode(text),
            Cow::Owned(text) => match self.transcode(&text) {
                Transcoded::Colorized(html) => Transcoded::Colorized(html),
                Transcoded::Unchanged(_) => Transcoded::Unchanged(Cow::Owned(text)),
            },
        }
    }

    /// Transcode text
    pub fn transcode<'a>(&self, input: &'a str) -> Transcoded<'a> {
        let bytes = input.as_bytes();
        let mut pass = Pass::new(self.palette, input.len() + 64);
        let mut scan = Scan::Ground;
        // Start of input not yet written out. While inside a sequence this is
        // the position of its ESC.
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            let byte = bytes[i];
            match scan {
                Scan::Ground => {
                    if byte == ESC {
                        pass.text(&input[start..i]);
                        start = i;
                        scan = Scan::Escape;
                    }
                }
                Scan::Escape => match byte {
                    b'[' => scan = Scan::Csi,
                    b']' => scan = Scan::Osc,
                    0x20..=0x2f => scan = Scan::Designate,
                    0x30..=0x7e => {
                        pass.escape(byte);
                        start = i + 1;
                        scan = Scan::Ground;
                    }
                    _ => {
                        // Not a sequence: the ESC stays as text, rescan this byte
                        scan = Scan::Ground;
                        continue;
                    }
                },
                Scan::Csi => match byte {
                    0x20..=0x3f => {}
                    0x40..=0x7e => {
                        pass.control_sequence(&input[start + 2..i], byte);
                        start = i + 1;
                        scan = Scan::Ground;
                    }
                    _ => {
                        scan = Scan::Ground;
                        continue;
                    }
                },
                Scan::Osc => match byte {
                    BEL => {
                        pass.stripped();
                        start = i + 1;
                        scan = Scan::Ground;
                    }
                    ESC => scan = Scan::OscEscape,
                    _ => {}
                },
                Scan::OscEscape => {
                    pass.stripped();
                    if byte == b'\\' {
                        start = i + 1;
                        scan = Scan::Ground;
                    } else {
                        // Unterminated OSC; the ESC starts a new sequence
                        start = i - 1;
                        scan = Scan::Escape;
                        continue;
                    }
                }
                Scan::Designate => match byte {
                    0x20..=0x2f => {}
                    0x30..=0x7e => {
                        pass.stripped();
                        start = i + 1;
                        scan = Scan::Ground;
                    }
                    _ => {
                        scan = Scan::Ground;
                        continue;
                    }
                },
            }
            i += 1;
        }

        if scan != Scan::Ground {
            trace!("Passing through truncated escape sequence at byte {}", start);
        }
        pass.text(&input[start..]);

        if pass.changed {
            Transcoded::Colorized(pass.finish())
        } else {
            Transcoded::Unchanged(Cow::Borrowed(input))
        }
    }
}

/// Escape text for HTML. ESC bytes become a character reference so the
/// output never contains anything that looks like an escape sequence.
pub fn escape_html_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\x1b' => out.push_str("&#27;"),
            c => out.push(c),
        }
    }
}

/// Escape text for HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(&mut out, text);
    out
}
