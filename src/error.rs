//! Errors reported by the compiler and the strip renderer.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The renderer input held no color token once split and trimmed.
    #[error("no colors found in input")]
    EmptyInput,

    /// A renderer token is not of the form `#RRGGBB`.
    #[error("invalid color “{0}”: expected `#` followed by 6 hex digits")]
    InvalidColorLiteral(String),

    /// The dataset is not a mapping of families to mappings of
    /// categories to color lists.
    #[error("malformed palette dataset {}: {reason}", .path.display())]
    MalformedDataset { path: PathBuf, reason: String },

    /// The output path has an extension no encoder is available for.
    #[error("unsupported image format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The strip is too wide for an image of `u32` pixels.
    #[error("too many colors to draw: {0}")]
    TooManyColors(usize),

    #[error("invalid configuration {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
