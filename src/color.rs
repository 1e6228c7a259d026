//! Hex color tokens and the luminance used to pick readable labels.

use std::{fmt, str::FromStr};
use lazy_static::lazy_static;
use regex::Regex;
use rgb::RGB8;
use crate::Error;

lazy_static! {
    static ref HEX_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Channel weights of the grayscale conversion, in thousandths.
const WEIGHTS: [u32; 3] = [299, 587, 114];

/// Labels turn black strictly above this luminance (128, in thousandths).
const BLACK_LABEL_ABOVE: u32 = 128_000;

/// Color of the text written over a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColor {
    Black,
    White,
}

impl LabelColor {
    /// Black on bright colors, white otherwise.  `luminance_milli` is
    /// expressed in thousandths of a channel unit.
    pub fn for_luminance_milli(luminance_milli: u32) -> Self {
        if luminance_milli > BLACK_LABEL_ABOVE { LabelColor::Black }
        else { LabelColor::White }
    }

    pub fn rgb(self) -> RGB8 {
        match self {
            LabelColor::Black => RGB8::new(0, 0, 0),
            LabelColor::White => RGB8::new(255, 255, 255),
        }
    }

    /// Name usable in SVG and CSS.
    pub fn css(self) -> &'static str {
        match self {
            LabelColor::Black => "black",
            LabelColor::White => "white",
        }
    }
}

/// Perceived brightness of a color.
pub trait Luminance {
    /// Returns 1000 × (0.299 R + 0.587 G + 0.114 B), computed exactly
    /// on the \[0, 255\] channels.
    fn luminance_milli(&self) -> u32;

    /// Returns 0.299 R + 0.587 G + 0.114 B, in \[0, 255\].
    fn luminance(&self) -> f64 { self.luminance_milli() as f64 / 1000. }

    /// Returns the label color readable over `self`.
    fn label_color(&self) -> LabelColor {
        LabelColor::for_luminance_milli(self.luminance_milli())
    }
}

impl Luminance for RGB8 {
    fn luminance_milli(&self) -> u32 {
        let [wr, wg, wb] = WEIGHTS;
        wr * self.r as u32 + wg * self.g as u32 + wb * self.b as u32
    }
}

/// A `#RRGGBB` color as supplied by the user.  The text keeps its
/// original letter case; it is what gets printed on the swatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorToken {
    text: String,
    rgb: RGB8,
}

impl ColorToken {
    /// The token exactly as it was given.
    pub fn as_str(&self) -> &str { &self.text }

    pub fn rgb(&self) -> RGB8 { self.rgb }
}

impl FromStr for ColorToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if !HEX_RE.is_match(s) {
            return Err(Error::InvalidColorLiteral(s.to_string()))
        }
        let channel = |i: usize| u8::from_str_radix(&s[i .. i + 2], 16)
            .map_err(|_| Error::InvalidColorLiteral(s.to_string()));
        Ok(ColorToken {
            text: s.to_string(),
            rgb: RGB8::new(channel(1)?, channel(3)?, channel(5)?),
        })
    }
}

impl Luminance for ColorToken {
    #[inline]
    fn luminance_milli(&self) -> u32 { self.rgb.luminance_milli() }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
