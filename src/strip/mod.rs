//! Palette strips: a row of labeled swatches, one per color.
//!
//! The input is free-form text listing `#RRGGBB` colors, separated by
//! commas, spaces or line breaks (see [`parse_colors`]).  Each color
//! becomes a square cell filled with it and labeled with its own text,
//! in black or white depending on the [`Luminance`] of the cell.

use std::{fs, io::Cursor, path::Path};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, RgbImage};
use rgb::RGB8;
use tracing::{debug, info};
use crate::{Error, Result, color::{ColorToken, Luminance}};

mod glyphs;
mod vector;

/// Side of a cell, in pixels.
pub const CELL: u32 = 100;

/// Transparent space around the cells, in pixels.
pub const MARGIN: u32 = 2;

/// Magnification of the 5×7 label font.
const GLYPH_SCALE: u32 = 2;

const BORDER: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// How the tokens of an input are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Newline,
}

impl Delimiter {
    /// Commas win over spaces, which win over line breaks.
    pub fn sniff(input: &str) -> Self {
        if input.contains(',') { Delimiter::Comma }
        else if input.contains(' ') { Delimiter::Space }
        else { Delimiter::Newline }
    }
}

/// Split `input` into color tokens.  The whole input is trimmed, the
/// [`Delimiter`] is chosen by [`Delimiter::sniff`], then every piece is
/// trimmed and empty pieces are dropped.  Tokens are not validated.
pub fn parse_colors(input: &str) -> Vec<&str> {
    let input = input.trim();
    let pieces: Vec<&str> = match Delimiter::sniff(input) {
        Delimiter::Comma => input.split(',').collect(),
        Delimiter::Space => input.split(' ').collect(),
        Delimiter::Newline => input.split(is_line_break).collect(),
    };
    pieces.into_iter().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Characters ending a line, `\r\n` counting as two (the empty piece
/// between them is dropped).
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' ..= '\x1e'
             | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Width in pixels of a strip of `n` cells, if it fits in a `u32`.
fn strip_width(n: usize) -> Option<u32> {
    u32::try_from(n).ok()?.checked_mul(CELL)?.checked_add(1 + 2 * MARGIN)
}

fn pixel(c: RGB8) -> Rgba<u8> { Rgba([c.r, c.g, c.b, 255]) }

/// An ordered, non-empty list of colors to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteStrip {
    tokens: Vec<ColorToken>,
}

impl PaletteStrip {
    /// Parse and validate every token of `input`.
    ///
    /// Fails with [`Error::EmptyInput`] when no token is found and
    /// with [`Error::InvalidColorLiteral`] on the first token that is
    /// not a `#RRGGBB` color.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = parse_colors(input);
        if tokens.is_empty() { return Err(Error::EmptyInput) }
        let tokens = tokens.into_iter().map(str::parse::<ColorToken>)
            .collect::<Result<Vec<ColorToken>>>()?;
        debug!(colors = tokens.len(), "parsed palette strip");
        Ok(PaletteStrip { tokens })
    }

    /// Number of cells, at least 1.
    pub fn len(&self) -> usize { self.tokens.len() }

    /// Always `false`: parsing rejects inputs without colors.
    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn tokens(&self) -> &[ColorToken] { &self.tokens }

    /// Size of the raster image, in pixels.  Fails with
    /// [`Error::TooManyColors`] when the width does not fit in a `u32`.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let w = strip_width(self.len()).ok_or(Error::TooManyColors(self.len()))?;
        Ok((w, CELL + 1 + 2 * MARGIN))
    }

    /// Top-left corner of cell `i`, on its border, or `None` past the
    /// last cell.  Cells are `CELL + 1` pixels wide, neighbours sharing
    /// their common edge.
    pub fn cell_origin(&self, i: usize) -> Option<(u32, u32)> {
        if i >= self.len() { return None }
        let x = u32::try_from(i).ok()?.checked_mul(CELL)?.checked_add(MARGIN)?;
        Some((x, MARGIN))
    }

    /// Draw the strip.  Pixels outside the cells are transparent.
    pub fn render(&self) -> Result<RgbaImage> {
        let (w, h) = self.dimensions()?;
        let mut img = RgbaImage::new(w, h);
        for (i, token) in self.tokens.iter().enumerate() {
            let Some((x0, y0)) = self.cell_origin(i) else { break };
            let (x1, y1) = (x0 + CELL, y0 + CELL);
            let fill = pixel(token.rgb());
            for y in y0 ..= y1 {
                for x in x0 ..= x1 {
                    let edge = x == x0 || x == x1 || y == y0 || y == y1;
                    img.put_pixel(x, y, if edge { BORDER } else { fill });
                }
            }
            glyphs::draw_text(&mut img, token.as_str(),
                              x0 + CELL / 2, y0 + CELL / 2, GLYPH_SCALE,
                              pixel(token.label_color().rgb()));
        }
        Ok(img)
    }

    /// SVG rendering of the strip, with real text labels.
    pub fn to_svg(&self) -> ::svg::Document { vector::document(&self.tokens) }

    /// Encode the strip in the format named by the extension of
    /// `path`: `svg`, or a raster format such as `png`, `jpg` or
    /// `webp`.  JPEG has no alpha channel, so the margin is white there.
    pub fn encode_for(&self, path: &Path) -> Result<Vec<u8>> {
        let ext = path.extension().and_then(|e| e.to_str());
        if ext.is_some_and(|e| e.eq_ignore_ascii_case("svg")) {
            return Ok(self.to_svg().to_string().into_bytes())
        }
        let format = ImageFormat::from_path(path)
            .map_err(|_| Error::UnsupportedFormat(path.to_path_buf()))?;
        let img = self.render()?;
        let img = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(flatten(&img))
        } else {
            DynamicImage::ImageRgba8(img)
        };
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format)?;
        Ok(buf.into_inner())
    }

    /// Render and write the strip to `path`.  Nothing is written when
    /// encoding fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_for(path)?;
        fs::write(path, &bytes).map_err(Error::io(path))?;
        info!(path = %path.display(), colors = self.len(), "wrote palette strip");
        Ok(())
    }
}

/// Composite `img` over white.
fn flatten(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let over = |c: u8| {
            ((c as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8 };
        image::Rgb([over(r), over(g), over(b)])
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_delimiters() {
        assert_eq!(parse_colors("#FF0000, #00FF00, #0000FF"),
                   ["#FF0000", "#00FF00", "#0000FF"]);
        assert_eq!(parse_colors("#FF0000 #00FF00"), ["#FF0000", "#00FF00"]);
        assert_eq!(parse_colors("#FF0000\n#00FF00\n"), ["#FF0000", "#00FF00"]);
        assert_eq!(parse_colors("#FF0000\r\n\r\n#00FF00"), ["#FF0000", "#00FF00"]);
        assert_eq!(parse_colors("#FF0000"), ["#FF0000"]);
    }

    #[test]
    fn every_kind_of_line_break() {
        assert_eq!(parse_colors("#FF0000\r#00FF00\r"), ["#FF0000", "#00FF00"]);
        assert_eq!(parse_colors("#FF0000\u{2028}#00FF00"), ["#FF0000", "#00FF00"]);
        for sep in ["\x0b", "\x0c", "\x1c", "\x1d", "\x1e", "\u{85}", "\u{2029}"] {
            let input = format!("#111111{sep}#222222");
            assert_eq!(parse_colors(&input), ["#111111", "#222222"], "{sep:?}");
        }
        let strip = PaletteStrip::parse("#FF0000\r#00FF00").unwrap();
        assert_eq!(strip.len(), 2);
        assert!(!strip.is_empty());
    }

    #[test]
    fn width_overflow_is_detected() {
        assert_eq!(strip_width(1), Some(CELL + 1 + 2 * MARGIN));
        assert_eq!(strip_width(42_949_672), Some(u32::MAX - 90));
        assert_eq!(strip_width(42_949_673), None);
        assert_eq!(strip_width(usize::MAX), None);
    }

    #[test]
    fn commas_take_priority() {
        // Spaces and newlines only pad the comma-separated tokens.
        assert_eq!(parse_colors("#111111 ,\n #222222,,"), ["#111111", "#222222"]);
        // Trailing whitespace is trimmed before sniffing.
        assert_eq!(parse_colors("#111111\n#222222 \n"), ["#111111", "#222222"]);
        // A space anywhere beats line breaks.
        assert_eq!(parse_colors("#111111\n#222222 #333333"),
                   ["#111111\n#222222", "#333333"]);
    }

    #[test]
    fn empty_input() {
        for input in ["", "   ", "\n\t\n", " , ,"] {
            assert!(parse_colors(input).is_empty(), "{input:?}");
            assert!(matches!(PaletteStrip::parse(input), Err(Error::EmptyInput)));
        }
    }

    #[test]
    fn invalid_token_is_named() {
        match PaletteStrip::parse("#FF0000, red, #00FF00") {
            Err(Error::InvalidColorLiteral(t)) => assert_eq!(t, "red"),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn one_cell_per_token_in_order() {
        let strip = PaletteStrip::parse("#FF0000,#00FF00,#0000FF,#ffffff").unwrap();
        let img = strip.render().unwrap();
        assert_eq!(img.dimensions(), strip.dimensions().unwrap());
        assert_eq!(img.dimensions(), (4 * CELL + 1 + 2 * MARGIN, CELL + 1 + 2 * MARGIN));
        let expected = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
        for (i, [r, g, b]) in expected.into_iter().enumerate() {
            let (x0, y0) = strip.cell_origin(i).unwrap();
            assert_eq!(*img.get_pixel(x0 + 5, y0 + 5), Rgba([r, g, b, 255]));
            assert_eq!(*img.get_pixel(x0, y0 + 5), BORDER);
        }
    }

    #[test]
    fn margin_is_transparent() {
        let img = PaletteStrip::parse("#123456").unwrap().render().unwrap();
        let (w, h) = img.dimensions();
        for (x, y) in [(0, 0), (w - 1, h - 1), (MARGIN - 1, h / 2), (w / 2, 0)] {
            assert_eq!(img.get_pixel(x, y)[3], 0, "({x}, {y})");
        }
    }

    fn label_pixels(strip: &PaletteStrip, i: usize, ink: Rgba<u8>) -> usize {
        let img = strip.render().unwrap();
        let (x0, y0) = strip.cell_origin(i).unwrap();
        (x0 + 2 .. x0 + CELL - 1)
            .flat_map(|x| (y0 + 2 .. y0 + CELL - 1).map(move |y| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) == ink)
            .count()
    }

    #[test]
    fn label_contrast() {
        let black = Rgba([0, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        let strip = PaletteStrip::parse("#FFFFFF #000000 #808080").unwrap();
        assert!(label_pixels(&strip, 0, black) > 0);
        assert!(label_pixels(&strip, 1, white) > 0);
        // L = 128 is not bright enough for black text.
        assert!(label_pixels(&strip, 2, white) > 0);
        assert_eq!(label_pixels(&strip, 2, black), 0);
    }

    #[test]
    fn svg_has_a_cell_and_label_per_token() {
        let strip = PaletteStrip::parse("#ff0000\n#FFFF00").unwrap();
        let doc = strip.to_svg().to_string();
        assert_eq!(doc.matches("<rect").count(), 2);
        assert_eq!(doc.matches("<text").count(), 2);
        let red = doc.find("#ff0000").unwrap();
        let yellow = doc.find("#FFFF00").unwrap();
        assert!(red < yellow);
        assert!(doc.contains("fill=\"black\""));
        assert!(doc.contains("fill=\"white\""));
    }

    #[test]
    fn unknown_extension() {
        let strip = PaletteStrip::parse("#000000").unwrap();
        for p in ["strip", "strip.txt"] {
            match strip.encode_for(Path::new(p)) {
                Err(Error::UnsupportedFormat(path)) => assert_eq!(path, Path::new(p)),
                other => panic!("{p}: {other:?}"),
            }
        }
    }

    #[test]
    fn jpeg_margin_is_white() {
        let img = flatten(&PaletteStrip::parse("#000000").unwrap().render().unwrap());
        assert_eq!(*img.get_pixel(0, 0), image::Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(MARGIN + 5, MARGIN + 5), image::Rgb([0, 0, 0]));
    }
}
