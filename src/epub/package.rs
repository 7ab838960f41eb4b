//! OPF package document parsing: metadata, manifest and spine.

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{attr_value, local_name, strip_bom};
use crate::archive::Archive;
use crate::error::Result;

/// Book metadata (the Dublin Core subset the reader displays).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub authors: Vec<String>,
    pub language: String,
    pub description: String,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// The primary creator, or an empty string.
    pub fn creator(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or("")
    }
}

/// A manifest entry. The media type is kept but never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub href: String,
    pub media_type: String,
}

/// Parsed package document.
#[derive(Debug, Clone, Default)]
pub struct PackageDescriptor {
    pub metadata: Metadata,
    /// Maps manifest id -> item with a normalized href
    manifest: HashMap<String, ManifestItem>,
    /// Spine idrefs in declaration order
    spine: Vec<String>,
    /// Directory of the package document inside the archive ("" at the root)
    base_dir: String,
}

impl PackageDescriptor {
    pub fn manifest(&self) -> &HashMap<String, ManifestItem> {
        &self.manifest
    }

    pub fn spine(&self) -> &[String] {
        &self.spine
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// Content paths in reading order.
    ///
    /// Spine idrefs without a manifest entry are dropped, so the result is the
    /// spine filtered by manifest membership, possibly empty.
    pub fn resolved_content_paths(&self) -> Vec<String> {
        self.spine
            .iter()
            .filter_map(|idref| match self.manifest.get(idref) {
                Some(item) => Some(item.href.clone()),
                None => {
                    log::debug!("spine idref {idref:?} has no manifest entry");
                    None
                }
            })
            .collect()
    }

    /// Archive entry name for a content path, relative to the package directory.
    pub fn entry_path(&self, href: &str) -> String {
        if self.base_dir.is_empty() {
            normalize_href(href)
        } else {
            normalize_href(&format!("{}/{}", self.base_dir, href))
        }
    }
}

/// Read and parse the package document at `path`.
///
/// Manifest hrefs are relative to the directory the package document was
/// actually found in, which differs from `path` when only a suffix matched.
pub fn parse_package<R: Read + Seek>(archive: &mut Archive<R>, path: &str) -> Result<PackageDescriptor> {
    let entry = archive.find_entry(path)?;
    let stored = entry.name().to_string();
    let bytes = archive.read(entry)?;
    let content = String::from_utf8(strip_bom(&bytes).to_vec())?;

    let mut package = parse_opf(&content)?;
    let normalized = normalize_href(&stored);
    package.base_dir = normalized
        .rsplit_once('/')
        .map(|(dir, _)| dir.to_string())
        .unwrap_or_default();

    log::debug!(
        "parsed package {path}: {} manifest items, {} spine entries",
        package.manifest.len(),
        package.spine.len()
    );
    Ok(package)
}

const METADATA_FIELDS: [&str; 4] = ["title", "creator", "language", "description"];

/// Parse OPF package document text.
pub fn parse_opf(content: &str) -> Result<PackageDescriptor> {
    // Whitespace around entity references is significant in metadata text
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut metadata = Metadata::default();
    let mut manifest: HashMap<String, ManifestItem> = HashMap::new();
    let mut spine: Vec<String> = Vec::new();

    let mut in_metadata = false;
    let mut current_element: Option<&'static str> = None;
    let mut buf_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => in_metadata = true,
                    local if in_metadata && current_element.is_none() => {
                        current_element = METADATA_FIELDS
                            .iter()
                            .copied()
                            .find(|field| field.as_bytes() == local);
                        buf_text.clear();
                    }
                    b"item" => add_manifest_item(&e, &mut manifest)?,
                    b"itemref" => add_spine_ref(&e, &mut spine)?,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"item" => add_manifest_item(&e, &mut manifest)?,
                    b"itemref" => add_spine_ref(&e, &mut spine)?,
                    _ => {}
                }
            }
            Event::Text(e) => {
                if current_element.is_some() {
                    buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::CData(e) => {
                if current_element.is_some() {
                    buf_text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if current_element.is_some() {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = resolve_entity(&entity) {
                        buf_text.push_str(&resolved);
                    }
                }
            }
            Event::End(e) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"metadata" {
                    in_metadata = false;
                }

                if let Some(elem) = current_element
                    && local == elem.as_bytes()
                {
                    let value = buf_text.trim().to_string();
                    match elem {
                        "title" if metadata.title.is_empty() => metadata.title = value,
                        "creator" if !value.is_empty() => metadata.authors.push(value),
                        "language" if metadata.language.is_empty() => metadata.language = value,
                        "description" if metadata.description.is_empty() => {
                            metadata.description = value
                        }
                        _ => {}
                    }
                    current_element = None;
                    buf_text.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(PackageDescriptor {
        metadata,
        manifest,
        spine,
        base_dir: String::new(),
    })
}

fn add_manifest_item(e: &BytesStart<'_>, manifest: &mut HashMap<String, ManifestItem>) -> Result<()> {
    let mut id = String::new();
    let mut href = String::new();
    let mut media_type = String::new();

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"id" => id = attr_value(&attr)?,
            b"href" => href = attr_value(&attr)?,
            b"media-type" => media_type = attr_value(&attr)?,
            _ => {}
        }
    }

    if id.is_empty() {
        return Ok(());
    }
    if href.is_empty() {
        // Spine references to it then drop as unresolved
        log::debug!("skipping manifest item {id:?} without href");
        return Ok(());
    }

    manifest.insert(
        id,
        ManifestItem {
            href: normalize_href(&href),
            media_type,
        },
    );
    Ok(())
}

fn add_spine_ref(e: &BytesStart<'_>, spine: &mut Vec<String>) -> Result<()> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"idref" {
            spine.push(attr_value(&attr)?);
        }
    }
    Ok(())
}

/// Clean a relative path: drop `.` and empty segments and fold `..` into its
/// parent. `..` at the top is discarded, so the result never escapes the
/// archive root.
pub fn normalize_href(href: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in href.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}
