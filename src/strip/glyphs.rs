//! A 5×7 bitmap font covering the characters of `#RRGGBB` labels.

use image::{Rgba, RgbaImage};

pub(crate) const WIDTH: u32 = 5;
pub(crate) const HEIGHT: u32 = 7;

/// Rows from top to bottom, the leftmost column in bit 4.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        _ => return None,
    };
    Some(rows)
}

/// Width in pixels of `text` drawn at `scale`, one blank column
/// between characters.
pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 { 0 } else { (n * (WIDTH + 1) - 1) * scale }
}

/// Draw `text` centered on (`cx`, `cy`).  Characters without a glyph
/// are left blank; pixels falling outside `img` are clipped.
pub(crate) fn draw_text(img: &mut RgbaImage, text: &str, cx: u32, cy: u32,
                        scale: u32, color: Rgba<u8>) {
    let left = cx as i64 - text_width(text, scale) as i64 / 2;
    let top = cy as i64 - (HEIGHT * scale) as i64 / 2;
    let advance = ((WIDTH + 1) * scale) as i64;
    let (w, h) = (img.width() as i64, img.height() as i64);
    for (k, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let x_c = left + k as i64 * advance;
        for (r, bits) in rows.iter().enumerate() {
            for col in 0 .. WIDTH {
                if bits & (1 << (WIDTH - 1 - col)) == 0 { continue }
                let x0 = x_c + (col * scale) as i64;
                let y0 = top + r as i64 * scale as i64;
                for y in y0 .. y0 + scale as i64 {
                    for x in x0 .. x0 + scale as i64 {
                        if 0 <= x && x < w && 0 <= y && y < h {
                            img.put_pixel(x as u32, y as u32, color);
                        }
                    }
                }
            }
        }
    }
}
