//! Compile a [`PaletteDataset`] into a C++ nested map literal.
//!
//! The literal has the type
//! `std::map<std::string, std::map<std::string, std::vector<std::string>>>`
//! and maps normalized family names to normalized category names to
//! the list of colors, e.g.
//!
//! ```text
//! std::map<std::string, std::map<std::string, std::vector<std::string>>> color_palettes = {
//!     { "Ochre", {
//!         { "NamatjiraQual", {
//!             "#6B6C58",
//!             "#A45E41"
//!         } }
//!     } }
//! };
//! ```

use std::{fmt, fs, path::Path};
use tracing::{debug, info, warn};
use crate::{Error, Result, dataset::PaletteDataset};

const MAP_TYPE: &str = "std::map<std::string, std::map<std::string, \
                        std::vector<std::string>>>";
const INDENT: &str = "    ";

/// Name of the emitted variable unless [`CompileOptions::variable`]
/// says otherwise.
pub const DEFAULT_VARIABLE: &str = "color_palettes";

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Convert a family or category name to the identifier used in the
/// literal: words separated by `_`, `-` or whitespace are capitalized
/// and glued together, so `"och_re"` becomes `"OchRe"` and
/// `"deep-blue"` becomes `"DeepBlue"`.  The rest of each word is
/// lowercased (`"ochRe"` gives `"Ochre"`).
pub fn normalize_identifier(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect()
}

/// Which families of the dataset are compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilySelection {
    All,
    /// Families whose raw dataset name is listed.
    Only(Vec<String>),
}

impl FamilySelection {
    pub fn only<I, S>(names: I) -> Self
    where I: IntoIterator<Item = S>, S: Into<String> {
        FamilySelection::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, family: &str) -> bool {
        match self {
            FamilySelection::All => true,
            FamilySelection::Only(names) => names.iter().any(|n| n == family),
        }
    }
}

/// Layout of the compiled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputStyle {
    /// The bare declaration, without trailing newline.
    Literal,
    /// A self-contained header: include guard, the standard includes
    /// and an `inline` variable inside `namespace`.
    Header { namespace: String },
}

/// How to compile a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    selection: FamilySelection,
    variable: String,
    style: OutputStyle,
}

impl CompileOptions {
    pub fn new(selection: FamilySelection) -> Self {
        CompileOptions { selection,
                         variable: DEFAULT_VARIABLE.to_string(),
                         style: OutputStyle::Literal }
    }

    /// Set the name of the C++ variable.
    pub fn variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Emit a header with the map inside `namespace`.
    pub fn header(mut self, namespace: impl Into<String>) -> Self {
        self.style = OutputStyle::Header { namespace: namespace.into() };
        self
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }
}

/// A family as it appears in the literal.
struct Block<'a> {
    ident: String,
    categories: Vec<(String, &'a [String])>,
}

/// A string literal with `"` and `\` escaped.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => fmt::Write::write_char(f, c)?,
            }
        }
        f.write_str("\"")
    }
}

struct Literal<'a> {
    variable: &'a str,
    blocks: &'a [Block<'a>],
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MAP_TYPE} {} = {{", self.variable)?;
        for (i, block) in self.blocks.iter().enumerate() {
            f.write_str(if i == 0 { "\n" } else { ",\n" })?;
            write!(f, "{INDENT}{{ {}, {{", Quoted(&block.ident))?;
            for (j, (ident, colors)) in block.categories.iter().enumerate() {
                f.write_str(if j == 0 { "\n" } else { ",\n" })?;
                write!(f, "{INDENT}{INDENT}{{ {}, {{", Quoted(ident))?;
                for (k, color) in colors.iter().enumerate() {
                    f.write_str(if k == 0 { "\n" } else { ",\n" })?;
                    write!(f, "{INDENT}{INDENT}{INDENT}{}", Quoted(color))?;
                }
                write!(f, "\n{INDENT}{INDENT}}} }}")?;
            }
            write!(f, "\n{INDENT}}} }}")?;
        }
        f.write_str("\n};")
    }
}

/// The compiled text, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMapping(String);

impl CompiledMapping {
    pub fn as_str(&self) -> &str { &self.0 }

    /// Write the text verbatim to `path`, replacing any previous
    /// content.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.0).map_err(Error::io(path))?;
        info!(path = %path.display(), bytes = self.0.len(),
              "wrote compiled palettes");
        Ok(())
    }
}

impl fmt::Display for CompiledMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compile the families of `dataset` selected by `options`, in
/// dataset order.  The result only depends on the arguments.
pub fn compile(dataset: &PaletteDataset, options: &CompileOptions)
               -> CompiledMapping {
    if dataset.is_empty() {
        debug!("dataset has no families");
    }
    if let FamilySelection::Only(names) = &options.selection {
        for name in names.iter().filter(|n| dataset.family(n).is_none()) {
            warn!(family = %name, "selected family not found in dataset");
        }
    }
    let mut blocks = vec![];
    for family in &dataset.families {
        if !options.selection.includes(&family.name) { continue }
        let ident = normalize_identifier(&family.name);
        if ident.is_empty() {
            warn!(family = %family.name, "family name has no letters, skipped");
            continue
        }
        let mut categories = vec![];
        for category in &family.categories {
            let id = normalize_identifier(&category.name);
            if id.is_empty() {
                warn!(family = %family.name, category = %category.name,
                      "category name has no letters, skipped");
                continue
            }
            categories.push((id, category.colors.as_slice()));
        }
        debug!(family = %ident, categories = categories.len(), "compiled family");
        blocks.push(Block { ident, categories });
    }

    let literal = Literal { variable: &options.variable, blocks: &blocks };
    let text = match &options.style {
        OutputStyle::Literal => literal.to_string(),
        OutputStyle::Header { namespace } => format!(
            "#pragma once\n\n\
             #include <map>\n\
             #include <string>\n\
             #include <vector>\n\n\
             namespace {namespace} {{\n\n\
             inline {literal}\n\n\
             }} // namespace {namespace}\n"),
    };
    CompiledMapping(text)
}

/// Load `input`, compile it and write the result to `output`.  The
/// output is left untouched when the dataset cannot be read.
pub fn compile_file(input: impl AsRef<Path>, output: impl AsRef<Path>,
                    options: &CompileOptions) -> Result<CompiledMapping> {
    let dataset = PaletteDataset::load(input)?;
    let mapping = compile(&dataset, options);
    mapping.write_to(output)?;
    Ok(mapping)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Category, Family};

    fn dataset(src: &str) -> PaletteDataset {
        PaletteDataset::from_json_str(src).unwrap()
    }

    const OCHRE: &str = r##"{
        "ochRe": { "namatjira_qual": ["#6B6C58", "#A45E41"],
                   "dead_reef": ["#0A0A0A"] },
        "other": { "x": ["#FFFFFF"] } }"##;

    #[test]
    fn identifiers() {
        assert_eq!(normalize_identifier("och_re"), "OchRe");
        assert_eq!(normalize_identifier("deep-blue"), "DeepBlue");
        assert_eq!(normalize_identifier("Already"), "Already");
        assert_eq!(normalize_identifier("ochRe"), "Ochre");
        assert_eq!(normalize_identifier("  light  blue__-x "), "LightBlueX");
        assert_eq!(normalize_identifier("émile zola"), "ÉmileZola");
        assert_eq!(normalize_identifier("_-_"), "");
    }

    #[test]
    fn selected_family() {
        let opts = CompileOptions::new(FamilySelection::only(["ochRe"]));
        let out = compile(&dataset(OCHRE), &opts);
        assert_eq!(out.as_str(), "\
std::map<std::string, std::map<std::string, std::vector<std::string>>> color_palettes = {
    { \"Ochre\", {
        { \"NamatjiraQual\", {
            \"#6B6C58\",
            \"#A45E41\"
        } },
        { \"DeadReef\", {
            \"#0A0A0A\"
        } }
    } }
};");
    }

    #[test]
    fn all_families_in_order() {
        let out = compile(&dataset(OCHRE),
                          &CompileOptions::new(FamilySelection::All));
        let ochre = out.as_str().find("\"Ochre\"").unwrap();
        let other = out.as_str().find("\"Other\"").unwrap();
        assert!(ochre < other);
        assert!(out.as_str().contains("    } },\n    { \"Other\", {\n"));
    }

    #[test]
    fn empty_dataset() {
        assert!(PaletteDataset::default().is_empty());
        assert!(!dataset(OCHRE).is_empty());
        let out = compile(&PaletteDataset::default(),
                          &CompileOptions::new(FamilySelection::All));
        assert_eq!(out.as_str(),
                   format!("{MAP_TYPE} color_palettes = {{\n}};"));
    }

    #[test]
    fn missing_family_is_not_an_error() {
        let opts = CompileOptions::new(FamilySelection::only(["nope"]));
        let out = compile(&dataset(OCHRE), &opts);
        assert!(out.as_str().ends_with("= {\n};"));
    }

    #[test]
    fn null_category_leaves_no_separator() {
        let d = dataset(r##"{ "f": { "a": ["#000000"], "b": null } }"##);
        let out = compile(&d, &CompileOptions::new(FamilySelection::All));
        assert!(!out.as_str().contains("\"B\""));
        assert!(!out.as_str().contains(",\n    }"));
        assert!(!out.as_str().contains(",\n        }"));
        assert!(out.as_str().ends_with("\"#000000\"\n        } }\n    } }\n};"));
    }

    #[test]
    fn empty_blocks_close_on_next_line() {
        let d = PaletteDataset { families: vec![
            Family { name: "bare".into(), categories: vec![] },
            Family { name: "f".into(), categories: vec![
                Category { name: "none".into(), colors: vec![] }] }] };
        let out = compile(&d, &CompileOptions::new(FamilySelection::All)
                          .variable("p"));
        assert_eq!(out.as_str(), format!("{MAP_TYPE} p = {{
    {{ \"Bare\", {{
    }} }},
    {{ \"F\", {{
        {{ \"None\", {{
        }} }}
    }} }}
}};"));
    }

    #[test]
    fn deterministic() {
        let d = dataset(OCHRE);
        let opts = CompileOptions::new(FamilySelection::All);
        assert_eq!(compile(&d, &opts), compile(&d, &opts));
    }

    #[test]
    fn escapes_quotes() {
        let d = dataset(r##"{ "f": { "c": ["a\"b\\c"] } }"##);
        let out = compile(&d, &CompileOptions::new(FamilySelection::All));
        assert!(out.as_str().contains(r#""a\"b\\c""#));
    }

    #[test]
    fn header_style() {
        let d = dataset(r##"{ "f": { "c": ["#010203"] } }"##);
        let out = compile(&d, &CompileOptions::new(FamilySelection::All)
                          .header("qualpal"));
        let s = out.as_str();
        assert!(s.starts_with("#pragma once\n\n#include <map>\n"));
        assert!(s.contains(&format!("namespace qualpal {{\n\ninline {MAP_TYPE} \
                                     color_palettes = {{\n")));
        assert!(s.ends_with("};\n\n} // namespace qualpal\n"));
    }

    #[test]
    fn names_without_letters_are_skipped() {
        let d = dataset(r##"{ "__": { "c": [] }, "f": { "-": ["#000000"] } }"##);
        let out = compile(&d, &CompileOptions::new(FamilySelection::All));
        assert_eq!(out.as_str(), format!("{MAP_TYPE} color_palettes = {{
    {{ \"F\", {{
    }} }}
}};"));
    }
}
