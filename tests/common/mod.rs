//! In-memory EPUB construction shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;

pub const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// Zip the given entries, in order, into an in-memory archive.
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in files {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Zip the entries uncompressed, so their bytes appear verbatim in the archive.
pub fn zip_bytes_stored(files: &[(&str, &[u8])]) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Flip the case of the first byte of `marker` inside stored entry data,
/// leaving the recorded CRC-32 stale.
pub fn corrupt_stored(bytes: &mut [u8], marker: &[u8]) {
    let pos = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("marker not found in archive");
    bytes[pos] ^= 0x20;
}

/// Write the archive to a temporary `.epub` file.
pub fn epub_file(files: &[(&str, &[u8])]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".epub").tempfile().unwrap();
    file.write_all(&zip_bytes(files)).unwrap();
    file.flush().unwrap();
    file
}

/// An OPF with one manifest item per `(id, href)` and the given spine.
pub fn opf(title: &str, items: &[(&str, &str)], spine: &[&str]) -> String {
    let manifest: String = items
        .iter()
        .map(|(id, href)| {
            format!(r#"    <item id="{id}" href="{href}" media-type="application/xhtml+xml"/>"#) + "\n"
        })
        .collect();
    let spine: String = spine
        .iter()
        .map(|idref| format!(r#"    <itemref idref="{idref}"/>"#) + "\n")
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>{title}</dc:title>
    <dc:creator>Jane Author</dc:creator>
    <dc:language>en</dc:language>
    <dc:description>A short book.</dc:description>
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine>
{spine}  </spine>
</package>"#
    )
}

/// A minimal XHTML chapter whose body is `body`.
pub fn chapter(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Chapter</title></head>
<body>{body}</body>
</html>"#
    )
}
