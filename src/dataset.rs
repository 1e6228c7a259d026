//! Curated palette datasets: families of named categories, each
//! holding an ordered list of colors.
//!
//! The source is a JSON (or JSON5) object of the shape
//!
//! ```json
//! { "ochRe": { "namatjira_qual": ["#6B6C58", "#A45E41", null] },
//!   "skipped": null }
//! ```
//!
//! Families and categories that are `null` or have an empty name, and
//! colors that are `null`, are dropped when loading; everything else
//! keeps the order of the file.

use std::{fmt, fs,
          marker::PhantomData,
          path::{Path, PathBuf}};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use tracing::debug;
use crate::{Error, Result};

/// Entries of a map in source order.  A repeated key replaces the
/// value of its first occurrence, in place.
struct Entries<T>(Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where D: Deserializer<'de> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut map: A)
                            -> std::result::Result<Self::Value, A::Error>
            where A: MapAccess<'de> {
                let mut entries: Vec<(String, T)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some(entry) => entry.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

type RawCategories = Entries<Option<Vec<Option<String>>>>;
type RawDataset = Entries<Option<RawCategories>>;

/// Syntax of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Strict JSON.
    Json,
    /// JSON5: comments, trailing commas, unquoted keys.
    Json5,
}

impl DatasetFormat {
    /// `.json5` files are JSON5, anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json5") => DatasetFormat::Json5,
            _ => DatasetFormat::Json,
        }
    }
}

/// A named, ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub colors: Vec<String>,
}

/// A top-level group of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub name: String,
    pub categories: Vec<Category>,
}

/// A whole dataset, cleaned of absent entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteDataset {
    pub families: Vec<Family>,
}

impl PaletteDataset {
    /// Read the dataset at `path`, in the format given by its
    /// extension.  A file that is not a two-level mapping ending in
    /// color lists is reported as [`Error::MalformedDataset`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(Error::io(path))?;
        let dataset = Self::parse(&src, DatasetFormat::from_path(path), path)?;
        debug!(path = %path.display(), families = dataset.families.len(),
               "loaded palette dataset");
        Ok(dataset)
    }

    pub fn from_json_str(src: &str) -> Result<Self> {
        Self::parse(src, DatasetFormat::Json, Path::new("<string>"))
    }

    pub fn from_json5_str(src: &str) -> Result<Self> {
        Self::parse(src, DatasetFormat::Json5, Path::new("<string>"))
    }

    fn parse(src: &str, format: DatasetFormat, origin: &Path) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedDataset {
            path: PathBuf::from(origin), reason };
        let raw: RawDataset = match format {
            DatasetFormat::Json => serde_json::from_str(src)
                .map_err(|e| malformed(e.to_string()))?,
            DatasetFormat::Json5 => json5::from_str(src)
                .map_err(|e| malformed(e.to_string()))?,
        };
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDataset) -> Self {
        let mut families = Vec::with_capacity(raw.0.len());
        for (name, categories) in raw.0 {
            let categories = match categories {
                Some(c) if !name.is_empty() => c,
                _ => {
                    debug!(family = %name, "skipping absent family");
                    continue
                }
            };
            let mut family = Family { name, categories: vec![] };
            for (name, colors) in categories.0 {
                let colors = match colors {
                    Some(c) if !name.is_empty() => c,
                    _ => {
                        debug!(family = %family.name, category = %name,
                               "skipping absent category");
                        continue
                    }
                };
                let n = colors.len();
                let colors: Vec<String> = colors.into_iter().flatten().collect();
                if colors.len() < n {
                    debug!(family = %family.name, category = %name,
                           dropped = n - colors.len(), "skipping absent colors");
                }
                family.categories.push(Category { name, colors });
            }
            families.push(family);
        }
        PaletteDataset { families }
    }

    /// Returns the family with the raw name `name`, if any.
    pub fn family(&self, name: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool { self.families.is_empty() }
}
