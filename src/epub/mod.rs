//! EPUB descriptor parsing (container.xml and the OPF package document).

mod container;
mod package;

pub use container::{CONTAINER_PATH, parse_container_xml, resolve_container};
pub use package::{
    ManifestItem, Metadata, PackageDescriptor, normalize_href, parse_opf, parse_package,
};

use quick_xml::events::attributes::Attribute;

use crate::error::{Error, Result};

/// Unescaped value of an XML attribute (`&amp;`, `&#38;`, ...).
pub(crate) fn attr_value(attr: &Attribute<'_>) -> Result<String> {
    attr.unescape_value()
        .map(|value| value.into_owned())
        .map_err(|e| Error::Parse(format!("invalid attribute value: {e}")))
}

/// Strip UTF-8 BOM if present.
pub(crate) fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Extract local name from namespaced XML name (e.g., "dc:title" -> "title").
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}
