//! The extraction pipeline: archive, container, package, then every spine
//! entry in reading order.
//!
//! Failures before the spine is known abort with an [`ExtractError`]. A
//! spine entry that cannot be read or rendered is logged and left out.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, warn};

use crate::archive::Archive;
use crate::epub::{Metadata, PackageDescriptor, parse_package, resolve_container};
use crate::error::{ExtractError, Result, Stage};
use crate::render::{Fragment, RenderedDocument, render_document};
use crate::style::Theme;

/// An extracted book: metadata plus one rendered section per readable
/// spine entry, in spine order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub sections: Vec<RenderedDocument>,
}

impl Document {
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// True when no section produced any fragment.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(RenderedDocument::is_empty)
    }

    /// All fragments of all sections, in reading order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.sections.iter().flat_map(|s| s.fragments.iter())
    }

    /// Compose the whole book under `theme`.
    pub fn text(&self, theme: &Theme) -> String {
        self.sections
            .iter()
            .map(|section| theme.compose(&section.fragments))
            .collect()
    }

    /// Compose without colours or weights.
    pub fn plain_text(&self) -> String {
        self.text(&Theme::plain())
    }
}

/// Extract the book at `path`.
pub fn extract<P: AsRef<Path>>(path: P) -> std::result::Result<Document, ExtractError> {
    let archive: Archive<File> =
        Archive::open(path).map_err(|e| ExtractError::new(Stage::Archive, e))?;
    extract_archive(archive)
}

/// Extract a book from any seekable byte source.
pub fn extract_from_reader<R: Read + Seek>(reader: R) -> std::result::Result<Document, ExtractError> {
    let archive = Archive::from_reader(reader).map_err(|e| ExtractError::new(Stage::Archive, e))?;
    extract_archive(archive)
}

fn extract_archive<R: Read + Seek>(mut archive: Archive<R>) -> std::result::Result<Document, ExtractError> {
    let opf_path =
        resolve_container(&mut archive).map_err(|e| ExtractError::new(Stage::Container, e))?;
    let package = parse_package(&mut archive, &opf_path)
        .map_err(|e| ExtractError::new(Stage::Package, e))?;

    let paths = package.resolved_content_paths();
    debug!("{} spine entries resolved from {opf_path}", paths.len());

    let mut sections = Vec::with_capacity(paths.len());
    for href in &paths {
        match render_entry(&mut archive, &package, href) {
            Ok(section) => sections.push(section),
            Err(e) => warn!("skipping spine entry {href}: {e}"),
        }
    }

    Ok(Document {
        metadata: package.metadata,
        sections,
    })
}

fn render_entry<R: Read + Seek>(
    archive: &mut Archive<R>,
    package: &PackageDescriptor,
    href: &str,
) -> Result<RenderedDocument> {
    let entry = archive.find_entry(&package.entry_path(href))?;
    let bytes = archive.read(entry)?;
    render_document(&bytes)
}
