//! Palette data preparation and visualization.
//!
//! - [`compile`]: turn a curated [`PaletteDataset`] (family →
//!   category → colors) into a C++ nested map literal for the native
//!   build, see [`compile::compile`].
//! - [`strip`]: draw a [`PaletteStrip`], a row of labeled swatches, from
//!   a free-form list of `#RRGGBB` colors.
//!
//! Both are one-shot transforms: read one input, write one file.
//!
//! ```
//! use palette_kit::{PaletteDataset, compile::{compile, CompileOptions,
//!                   FamilySelection}};
//! let data = PaletteDataset::from_json_str(
//!     r##"{ "och_re": { "dead-reef": ["#0A0A0A"] } }"##).unwrap();
//! let opts = CompileOptions::new(FamilySelection::only(["och_re"]));
//! assert!(compile(&data, &opts).as_str().contains("{ \"OchRe\", {"));
//! ```

mod error;
pub mod color;
pub mod compile;
pub mod config;
pub mod dataset;
pub mod strip;

pub use error::{Error, Result};
pub use color::{ColorToken, LabelColor, Luminance};
pub use compile::{CompileOptions, CompiledMapping, FamilySelection};
pub use config::CompilerConfig;
pub use dataset::PaletteDataset;
pub use strip::PaletteStrip;
