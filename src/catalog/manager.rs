//! Data manager for the two catalog documents
//!
//! Adds categories and tools to `tools_data.json` / `tools_icons.json` and
//! writes both back in the layout the repository keeps them in (four-space
//! indent, trailing newline, original key order).

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use super::loader::CatalogSettings;
use super::model::{IconMap, ToolCatalog, ToolEntry};
use crate::error::{Result, ToolshelfError};

/// Fields for a new tool. `url` and `banner` are derived when absent.
#[derive(Debug, Clone, Default)]
pub struct NewTool {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub banner: Option<String>,
}

pub struct CatalogManager {
    catalog_file: PathBuf,
    icons_file: PathBuf,
    catalog: ToolCatalog,
    icons: IconMap,
}

impl CatalogManager {
    /// Open the documents under `root`. The directory holding them must
    /// exist; a missing file starts empty and is created on save.
    pub fn open(root: impl AsRef<Path>, settings: &CatalogSettings) -> Result<Self> {
        let root = root.as_ref();
        let catalog_file = root.join(&settings.catalog_path);
        let icons_file = root.join(&settings.icons_path);

        if let Some(dir) = catalog_file.parent() {
            if !dir.is_dir() {
                return Err(std::io::Error::new(
                    ErrorKind::NotFound,
                    format!("data directory '{}' not found", dir.display()),
                )
                .into());
            }
        }

        let catalog = load_json_file(&catalog_file)?;
        let icons = load_json_file(&icons_file)?;
        Ok(Self {
            catalog_file,
            icons_file,
            catalog,
            icons,
        })
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Category names in document order.
    pub fn categories(&self) -> Vec<String> {
        self.catalog.keys().cloned().collect()
    }

    /// Add an empty category with its icon and save both documents.
    pub fn add_category(&mut self, name: &str, icon: &str) -> Result<()> {
        let name = required(name, "category")?;
        let icon = required(icon, "icon")?;
        if self.catalog.contains_key(name) {
            return Err(ToolshelfError::CategoryExists(name.to_string()));
        }

        self.catalog.insert(name.to_string(), Vec::new());
        self.icons.insert(name.to_string(), icon.to_string());
        info!("Added category '{}' ({})", name, icon);
        self.save()
    }

    /// Append a tool to an existing category and save both documents.
    pub fn add_tool(&mut self, category: &str, tool: NewTool) -> Result<ToolEntry> {
        let name = required(&tool.name, "name")?;
        let description = required(&tool.description, "description")?;
        if !self.catalog.contains_key(category) {
            return Err(ToolshelfError::UnknownCategory(category.to_string()));
        }

        let url = match tool.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => default_url(category, name),
        };
        let banner = match tool.banner.as_deref().map(str::trim) {
            Some(banner) if !banner.is_empty() => banner.to_string(),
            _ => default_banner(category, &url),
        };

        let entry = ToolEntry {
            name: name.to_string(),
            description: description.to_string(),
            url,
            banner: Some(banner),
        };

        self.catalog
            .get_mut(category)
            .ok_or_else(|| ToolshelfError::UnknownCategory(category.to_string()))?
            .push(entry.clone());
        info!("Added tool '{}' to '{}'", entry.name, category);
        self.save()?;
        Ok(entry)
    }

    pub fn save(&self) -> Result<()> {
        save_json_file(&self.catalog_file, &self.catalog)?;
        save_json_file(&self.icons_file, &self.icons)
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolshelfError::EmptyField(field));
    }
    Ok(value)
}

fn slug(s: &str) -> String {
    s.to_lowercase().replace(' ', "_")
}

/// `tools/<category>/<name>.html`, both lowercased with spaces as underscores.
pub fn default_url(category: &str, name: &str) -> String {
    format!("tools/{}/{}.html", slug(category), slug(name))
}

/// `images/<category lowercased>/<url file stem>.png`
pub fn default_banner(category: &str, url: &str) -> String {
    let stem = Path::new(url)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("images/{}/{}.png", category.to_lowercase(), stem)
}

fn load_json_file<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        warn!("'{}' not found, a new one will be created on save", path.display());
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Four-space pretty printing with every non-ASCII character written as a
/// `\uXXXX` escape (UTF-16 code units, so astral characters become a
/// surrogate pair).
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (idx, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

fn save_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, AsciiFormatter(PrettyFormatter::with_indent(b"    ")));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    fs::write(path, buf)?;
    info!("Saved {}", path.display());
    Ok(())
}
