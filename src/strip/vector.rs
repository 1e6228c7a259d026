//! Vector rendering of a strip, one unit per cell.

use svg::Document;
use svg::node::element::{Rectangle, Text};
use crate::color::{ColorToken, Luminance};
use super::CELL;

/// Space around the cells, in cell units.
const PAD: f64 = 0.05;
const STROKE: f64 = 0.01;
const FONT_SIZE: f64 = 0.11;

pub(crate) fn document(tokens: &[ColorToken]) -> Document {
    let n = tokens.len() as f64;
    let (w, h) = (n + 2. * PAD, 1. + 2. * PAD);
    let mut doc = Document::new()
        .set("viewBox", (-PAD, -PAD, w, h))
        .set("width", w * CELL as f64)
        .set("height", h * CELL as f64);
    for (i, token) in tokens.iter().enumerate() {
        let x = i as f64;
        let cell = Rectangle::new()
            .set("x", x)
            .set("y", 0.)
            .set("width", 1.)
            .set("height", 1.)
            .set("fill", token.as_str())
            .set("stroke", "black")
            .set("stroke-width", STROKE);
        let label = Text::new(token.as_str())
            .set("x", x + 0.5)
            .set("y", 0.5)
            .set("fill", token.label_color().css())
            .set("font-family", "sans-serif")
            .set("font-size", FONT_SIZE)
            .set("font-weight", "bold")
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central");
        doc = doc.add(cell).add(label);
    }
    doc
}
