//! `META-INF/container.xml` resolution.

use std::io::{Read, Seek};

use quick_xml::Reader;
use quick_xml::events::Event;

use super::{attr_value, local_name, strip_bom};
use crate::archive::Archive;
use crate::error::{Error, Result};

/// Well-known location of the container descriptor.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Find the package document path declared by the archive's container descriptor.
///
/// The returned path is the `full-path` attribute verbatim; whether it exists
/// in the archive is checked by the caller.
pub fn resolve_container<R: Read + Seek>(archive: &mut Archive<R>) -> Result<String> {
    let bytes = archive.read_entry(CONTAINER_PATH)?;
    let path = parse_container_xml(&bytes)?;
    log::debug!("container.xml points at {path}");
    Ok(path)
}

/// Parse container.xml and return the first rootfile's `full-path`.
pub fn parse_container_xml(bytes: &[u8]) -> Result<String> {
    let content = String::from_utf8(strip_bom(bytes).to_vec())?;

    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"rootfile" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"full-path" {
                        let path = attr_value(&attr)?;
                        if path.trim().is_empty() {
                            return Err(Error::Parse("rootfile has an empty full-path".into()));
                        }
                        return Ok(path);
                    }
                }
                return Err(Error::Parse("rootfile has no full-path attribute".into()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Err(Error::Parse("no rootfile found in container.xml".into()))
}
