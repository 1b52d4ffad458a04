//! Color Palettes
//!
//! Maps the 18 logical ANSI color slots (8 standard colors, 8 bright colors,
//! default foreground and default background) to CSS color values.
//! Palettes are immutable once built and shared between notes through `Arc`.

use serde::{Deserialize, Serialize};

/// Number of logical color slots in a palette
pub const SLOT_COUNT: usize = 18;

/// Names of the palettes shipped with the crate
pub const BUILTIN_PALETTES: [&str; 4] = ["xterm", "vga", "css", "gnome-terminal"];

/// Name of the palette used when nothing else is configured
pub const DEFAULT_PALETTE: &str = "xterm";

/// ANSI color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Create color from standard ANSI code (0-7)
    pub fn from_ansi_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(AnsiColor::Black),
            1 => Some(AnsiColor::Red),
            2 => Some(AnsiColor::Green),
            3 => Some(AnsiColor::Yellow),
            4 => Some(AnsiColor::Blue),
            5 => Some(AnsiColor::Magenta),
            6 => Some(AnsiColor::Cyan),
            7 => Some(AnsiColor::White),
            _ => None,
        }
    }

    /// Create color from bright ANSI code (0-7)
    pub fn from_bright_ansi_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(AnsiColor::BrightBlack),
            1 => Some(AnsiColor::BrightRed),
            2 => Some(AnsiColor::BrightGreen),
            3 => Some(AnsiColor::BrightYellow),
            4 => Some(AnsiColor::BrightBlue),
            5 => Some(AnsiColor::BrightMagenta),
            6 => Some(AnsiColor::BrightCyan),
            7 => Some(AnsiColor::BrightWhite),
            _ => None,
        }
    }

    /// Create color from a 256-color index; only the 16 palette entries map
    pub fn from_indexed(index: u16) -> Option<Self> {
        match index {
            0..=7 => Self::from_ansi_code(index),
            8..=15 => Self::from_bright_ansi_code(index - 8),
            _ => None,
        }
    }
}

/// A logical palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Color(AnsiColor),
    DefaultForeground,
    DefaultBackground,
}

impl ColorSlot {
    /// Slot name as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            ColorSlot::Color(color) => match color {
                AnsiColor::Black => "black",
                AnsiColor::Red => "red",
                AnsiColor::Green => "green",
                AnsiColor::Yellow => "yellow",
                AnsiColor::Blue => "blue",
                AnsiColor::Magenta => "magenta",
                AnsiColor::Cyan => "cyan",
                AnsiColor::White => "white",
                AnsiColor::BrightBlack => "bright_black",
                AnsiColor::BrightRed => "bright_red",
                AnsiColor::BrightGreen => "bright_green",
                AnsiColor::BrightYellow => "bright_yellow",
                AnsiColor::BrightBlue => "bright_blue",
                AnsiColor::BrightMagenta => "bright_magenta",
                AnsiColor::BrightCyan => "bright_cyan",
                AnsiColor::BrightWhite => "bright_white",
            },
            ColorSlot::DefaultForeground => "default_foreground",
            ColorSlot::DefaultBackground => "default_background",
        }
    }
}

impl From<AnsiColor> for ColorSlot {
    fn from(color: AnsiColor) -> Self {
        ColorSlot::Color(color)
    }
}

/// Palette validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette name must not be empty")]
    EmptyName,

    #[error("invalid color for slot '{slot}': {value:?} (expected #RGB, #RRGGBB or a CSS color name)")]
    InvalidColor { slot: String, value: String },
}

/// Unvalidated palette description, as found in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSpec {
    pub name: String,
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub magenta: String,
    pub cyan: String,
    pub white: String,
    pub bright_black: String,
    pub bright_red: String,
    pub bright_green: String,
    pub bright_yellow: String,
    pub bright_blue: String,
    pub bright_magenta: String,
    pub bright_cyan: String,
    pub bright_white: String,
    pub default_foreground: String,
    pub default_background: String,
}

impl PaletteSpec {
    fn from_values(name: &str, colors: [&str; 16], foreground: &str, background: &str) -> Self {
        let [black, red, green, yellow, blue, magenta, cyan, white, bright_black, bright_red, bright_green, bright_yellow, bright_blue, bright_magenta, bright_cyan, bright_white] =
            colors.map(str::to_string);
        Self {
            name: name.to_string(),
            black,
            red,
            green,
            yellow,
            blue,
            magenta,
            cyan,
            white,
            bright_black,
            bright_red,
            bright_green,
            bright_yellow,
            bright_blue,
            bright_magenta,
            bright_cyan,
            bright_white,
            default_foreground: foreground.to_string(),
            default_background: background.to_string(),
        }
    }

    fn value(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Color(color) => match color {
                AnsiColor::Black => &self.black,
                AnsiColor::Red => &self.red,
                AnsiColor::Green => &self.green,
                AnsiColor::Yellow => &self.yellow,
                AnsiColor::Blue => &self.blue,
                AnsiColor::Magenta => &self.magenta,
                AnsiColor::Cyan => &self.cyan,
                AnsiColor::White => &self.white,
                AnsiColor::BrightBlack => &self.bright_black,
                AnsiColor::BrightRed => &self.bright_red,
                AnsiColor::BrightGreen => &self.bright_green,
                AnsiColor::BrightYellow => &self.bright_yellow,
                AnsiColor::BrightBlue => &self.bright_blue,
                AnsiColor::BrightMagenta => &self.bright_magenta,
                AnsiColor::BrightCyan => &self.bright_cyan,
                AnsiColor::BrightWhite => &self.bright_white,
            },
            ColorSlot::DefaultForeground => &self.default_foreground,
            ColorSlot::DefaultBackground => &self.default_background,
        }
    }

    /// Every slot with its value, in a fixed order
    fn slots(&self) -> [(ColorSlot, &str); SLOT_COUNT] {
        const SLOTS: [ColorSlot; SLOT_COUNT] = [
            ColorSlot::Color(AnsiColor::Black),
            ColorSlot::Color(AnsiColor::Red),
            ColorSlot::Color(AnsiColor::Green),
            ColorSlot::Color(AnsiColor::Yellow),
            ColorSlot::Color(AnsiColor::Blue),
            ColorSlot::Color(AnsiColor::Magenta),
            ColorSlot::Color(AnsiColor::Cyan),
            ColorSlot::Color(AnsiColor::White),
            ColorSlot::Color(AnsiColor::BrightBlack),
            ColorSlot::Color(AnsiColor::BrightRed),
            ColorSlot::Color(AnsiColor::BrightGreen),
            ColorSlot::Color(AnsiColor::BrightYellow),
            ColorSlot::Color(AnsiColor::BrightBlue),
            ColorSlot::Color(AnsiColor::BrightMagenta),
            ColorSlot::Color(AnsiColor::BrightCyan),
            ColorSlot::Color(AnsiColor::BrightWhite),
            ColorSlot::DefaultForeground,
            ColorSlot::DefaultBackground,
        ];
        SLOTS.map(|slot| (slot, self.value(slot)))
    }
}

/// Validated, immutable color palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteSpec", into = "PaletteSpec")]
pub struct ColorPalette {
    spec: PaletteSpec,
}

impl ColorPalette {
    /// Build a palette from a custom description, rejecting unusable values
    pub fn new(spec: PaletteSpec) -> Result<Self, PaletteError> {
        if spec.name.trim().is_empty() {
            return Err(PaletteError::EmptyName);
        }

        for (slot, value) in spec.slots() {
            if !is_valid_color(value) {
                return Err(PaletteError::InvalidColor {
                    slot: slot.name().to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(Self { spec })
    }

    /// Look up one of the built-in palettes by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "xterm" => Some(Self::xterm()),
            "vga" => Some(Self::vga()),
            "css" => Some(Self::css()),
            "gnome-terminal" => Some(Self::gnome_terminal()),
            _ => None,
        }
    }

    pub fn xterm() -> Self {
        let spec = PaletteSpec::from_values(
            "xterm",
            [
                "#000000", "#CD0000", "#00CD00", "#CDCD00", "#1E90FF", "#CD00CD", "#00CDCD",
                "#E5E5E5", "#4C4C4C", "#FF0000", "#00FF00", "#FFFF00", "#4682B4", "#FF00FF",
                "#00FFFF", "#FFFFFF",
            ],
            "#000000",
            "#FFFFFF",
        );
        Self { spec }
    }

    pub fn vga() -> Self {
        let spec = PaletteSpec::from_values(
            "vga",
            [
                "#000000", "#AA0000", "#00AA00", "#AA5500", "#0000AA", "#AA00AA", "#00AAAA",
                "#AAAAAA", "#555555", "#FF5555", "#55FF55", "#FFFF55", "#5555FF", "#FF55FF",
                "#55FFFF", "#FFFFFF",
            ],
            "#AAAAAA",
            "#000000",
        );
        Self { spec }
    }

    pub fn css() -> Self {
        let spec = PaletteSpec::from_values(
            "css",
            [
                "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "black",
                "red", "green", "yellow", "blue", "magenta", "cyan", "white",
            ],
            "black",
            "white",
        );
        Self { spec }
    }

    pub fn gnome_terminal() -> Self {
        let spec = PaletteSpec::from_values(
            "gnome-terminal",
            [
                "#000000", "#CC0000", "#4E9A06", "#C4A000", "#3465A4", "#75507B", "#06989A",
                "#D3D7CF", "#555753", "#EF2929", "#8AE234", "#FCE94F", "#729FCF", "#AD7FA8",
                "#34E2E2", "#EEEEEC",
            ],
            "#2E3436",
            "#FFFFFF",
        );
        Self { spec }
    }

    /// Palette name
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// CSS value for a slot
    pub fn value(&self, slot: ColorSlot) -> &str {
        self.spec.value(slot)
    }

    /// CSS value for one of the 16 colors
    pub fn color(&self, color: AnsiColor) -> &str {
        self.spec.value(ColorSlot::Color(color))
    }

    pub fn default_foreground(&self) -> &str {
        &self.spec.default_foreground
    }

    pub fn default_background(&self) -> &str {
        &self.spec.default_background
    }

    /// The underlying description, e.g. for exporting
    pub fn spec(&self) -> &PaletteSpec {
        &self.spec
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::xterm()
    }
}

impl TryFrom<PaletteSpec> for ColorPalette {
    type Error = PaletteError;

    fn try_from(spec: PaletteSpec) -> Result<Self, Self::Error> {
        Self::new(spec)
    }
}

impl From<ColorPalette> for PaletteSpec {
    fn from(palette: ColorPalette) -> Self {
        palette.spec
    }
}

/// Accepts `#RGB`, `#RRGGBB` and bare CSS color keywords. Anything else could
/// escape the generated `style` attribute.
fn is_valid_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !value.is_empty() && value.len() <= 32 && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}
