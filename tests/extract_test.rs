//! End-to-end extraction tests.
//!
//! Each test builds a small EPUB in memory, writes it to a temporary file
//! and runs the full pipeline over it.

mod common;

use common::{CONTAINER, chapter, corrupt_stored, epub_file, opf, zip_bytes, zip_bytes_stored};
use lexo::{Error, Fragment, Stage, Theme, extract, extract_from_reader};
use std::io::Cursor;

// ============================================================================
// Reading order and metadata
// ============================================================================

#[test]
fn test_extract_metadata_and_spine_order() {
    let opf = opf(
        "Ordered",
        &[("c1", "ch1.xhtml"), ("c2", "ch2.xhtml"), ("c3", "ch3.xhtml")],
        &["c3", "c1", "c2"],
    );
    let ch1 = chapter("<h1>One</h1>");
    let ch2 = chapter("<h1>Two</h1>");
    let ch3 = chapter("<h1>Three</h1>");
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
        ("OEBPS/ch2.xhtml", ch2.as_bytes()),
        ("OEBPS/ch3.xhtml", ch3.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();

    assert_eq!(book.title(), "Ordered");
    assert_eq!(book.metadata.authors, vec!["Jane Author"]);
    assert_eq!(book.metadata.language, "en");
    assert_eq!(book.metadata.description, "A short book.");
    assert_eq!(book.plain_text(), "Three\n\nOne\n\nTwo\n\n");
}

#[test]
fn test_duplicate_spine_entries_render_twice() {
    let opf = opf("Twice", &[("c1", "ch1.xhtml")], &["c1", "c1"]);
    let ch1 = chapter("<p>again</p>");
    let bytes = zip_bytes(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
    ]);

    let book = extract_from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(book.plain_text(), "again\n\nagain\n\n");
}

// ============================================================================
// Recoverable failures
// ============================================================================

#[test]
fn test_missing_entry_is_skipped_without_placeholder() {
    let opf = opf(
        "Gappy",
        &[("c1", "ch1.xhtml"), ("c2", "ch2.xhtml"), ("c3", "ch3.xhtml")],
        &["c1", "c2", "c3"],
    );
    let ch1 = chapter("<p>first</p>");
    let ch3 = chapter("<p>third</p>");
    // ch2.xhtml is declared but absent from the archive
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
        ("OEBPS/ch3.xhtml", ch3.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();

    let first = Theme::plain().compose(&lexo::render_document(ch1.as_bytes()).unwrap().fragments);
    let third = Theme::plain().compose(&lexo::render_document(ch3.as_bytes()).unwrap().fragments);
    assert_eq!(book.sections.len(), 2);
    assert_eq!(book.plain_text(), format!("{first}{third}"));
}

#[test]
fn test_unreadable_entry_is_skipped() {
    let opf = opf(
        "Corrupt",
        &[("c1", "ch1.xhtml"), ("c2", "ch2.xhtml"), ("c3", "ch3.xhtml")],
        &["c1", "c2", "c3"],
    );
    let ch1 = chapter("<p>first</p>");
    let ch2 = chapter("<p>second-chapter-body</p>");
    let ch3 = chapter("<p>third</p>");
    let mut bytes = zip_bytes_stored(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
        ("OEBPS/ch2.xhtml", ch2.as_bytes()),
        ("OEBPS/ch3.xhtml", ch3.as_bytes()),
    ]);
    // ch2 is present but fails its checksum when read
    corrupt_stored(&mut bytes, b"second-chapter-body");

    let book = extract_from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(book.sections.len(), 2);
    assert_eq!(book.plain_text(), "first\n\nthird\n\n");
}

#[test]
fn test_manifest_item_without_href_does_not_abort() {
    let opf = r#"<package><metadata><title>Fonts</title></metadata><manifest>
<item id="c1" href="ch1.xhtml" media-type="application/xhtml+xml"/>
<item id="font" media-type="font/otf"/>
</manifest><spine><itemref idref="c1"/></spine></package>"#;
    let ch1 = chapter("<p>readable</p>");
    let bytes = zip_bytes(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
    ]);

    let book = extract_from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(book.plain_text(), "readable\n\n");
}

#[test]
fn test_binary_spine_entry_is_skipped() {
    let opf = opf("Mixed", &[("img", "cover.png"), ("c1", "ch1.xhtml")], &["img", "c1"]);
    let ch1 = chapter("<p>text</p>");
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/cover.png", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0"),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    assert_eq!(book.plain_text(), "text\n\n");
}

#[test]
fn test_empty_spine_yields_empty_document() {
    let opf = opf("Empty", &[("c1", "ch1.xhtml")], &[]);
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    assert!(book.is_empty());
    assert_eq!(book.plain_text(), "");
    assert_eq!(book.title(), "Empty");
}

#[test]
fn test_fully_unresolved_spine_yields_empty_document() {
    let opf = opf("Dangling", &[], &["nowhere", "gone"]);
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    assert!(book.sections.is_empty());
    assert_eq!(book.plain_text(), "");
}

// ============================================================================
// Fatal failures
// ============================================================================

#[test]
fn test_nonexistent_file_fails_at_archive_stage() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = extract(dir.path().join("missing.epub")).unwrap_err();
    assert_eq!(err.stage, Stage::Archive);
    assert!(matches!(err.source, Error::Io(_)));
}

#[test]
fn test_not_a_zip_fails_at_archive_stage() {
    let err = extract_from_reader(Cursor::new(b"not an archive at all".to_vec())).unwrap_err();
    assert_eq!(err.stage, Stage::Archive);
    assert!(err.to_string().starts_with("failed to open archive"));
}

#[test]
fn test_missing_container_fails_at_container_stage() {
    let bytes = zip_bytes(&[("mimetype", b"application/epub+zip")]);
    let err = extract_from_reader(Cursor::new(bytes)).unwrap_err();
    assert_eq!(err.stage, Stage::Container);
    assert!(matches!(err.source, Error::NotFound(_)));
}

#[test]
fn test_empty_rootfile_fails_at_container_stage() {
    let container = r#"<container><rootfiles><rootfile full-path=""/></rootfiles></container>"#;
    let bytes = zip_bytes(&[("META-INF/container.xml", container.as_bytes())]);
    let err = extract_from_reader(Cursor::new(bytes)).unwrap_err();
    assert_eq!(err.stage, Stage::Container);
    assert!(matches!(err.source, Error::Parse(_)));
}

#[test]
fn test_missing_package_fails_at_package_stage() {
    let bytes = zip_bytes(&[("META-INF/container.xml", CONTAINER.as_bytes())]);
    let err = extract_from_reader(Cursor::new(bytes)).unwrap_err();
    assert_eq!(err.stage, Stage::Package);
    assert!(matches!(err.source, Error::NotFound(_)));
}

#[test]
fn test_malformed_package_fails_at_package_stage() {
    let bytes = zip_bytes(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", b"<package><manifest></package>"),
    ]);
    let err = extract_from_reader(Cursor::new(bytes)).unwrap_err();
    assert_eq!(err.stage, Stage::Package);
}

// ============================================================================
// Lookup tolerance
// ============================================================================

#[test]
fn test_case_insensitive_and_escaped_hrefs() {
    let opf = opf(
        "Lookup",
        &[("c1", "Text/Chapter%201.xhtml"), ("c2", "TEXT/ch2.XHTML")],
        &["c1", "c2"],
    );
    let ch1 = chapter("<p>spaced</p>");
    let ch2 = chapter("<p>shouty</p>");
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/Text/Chapter 1.xhtml", ch1.as_bytes()),
        ("OEBPS/text/ch2.xhtml", ch2.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    assert_eq!(book.plain_text(), "spaced\n\nshouty\n\n");
}

#[test]
fn test_escaped_paths_in_descriptors() {
    let container = r#"<container><rootfiles><rootfile full-path="Tom &amp; Jerry/content.opf"/></rootfiles></container>"#;
    let opf = opf("Cartoons", &[("c1", "Tom&amp;Jerry.xhtml")], &["c1"]);
    let ch1 = chapter("<p>cartoon</p>");
    let bytes = zip_bytes(&[
        ("META-INF/container.xml", container.as_bytes()),
        ("Tom & Jerry/content.opf", opf.as_bytes()),
        ("Tom & Jerry/Tom&Jerry.xhtml", ch1.as_bytes()),
    ]);

    let book = extract_from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(book.plain_text(), "cartoon\n\n");
}

#[test]
fn test_package_path_found_by_suffix() {
    let container = r#"<container><rootfiles><rootfile full-path="content.opf"/></rootfiles></container>"#;
    let opf = opf("Nested", &[("c1", "ch1.xhtml")], &["c1"]);
    let ch1 = chapter("<p>deep</p>");
    let file = epub_file(&[
        ("META-INF/container.xml", container.as_bytes()),
        ("book/OPS/content.opf", opf.as_bytes()),
        ("book/OPS/ch1.xhtml", ch1.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    assert_eq!(book.title(), "Nested");
    assert_eq!(book.plain_text(), "deep\n\n");
}

// ============================================================================
// Rendering through the pipeline
// ============================================================================

#[test]
fn test_image_placeholders() {
    let opf = opf("Pictures", &[("c1", "ch1.xhtml")], &["c1"]);
    let ch1 = chapter(r#"<img src="a.png"/><img src="b.png" alt="cover"/>"#);
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    let images: Vec<_> = book
        .fragments()
        .filter_map(|f| match f {
            Fragment::Image { alt } => Some(alt.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(images, vec![None, Some("cover".to_string())]);
    assert_eq!(book.plain_text(), "[image]\n\n[image: cover]\n\n");
}

#[test]
fn test_themes_do_not_change_plain_content() {
    let opf = opf("Styled", &[("c1", "ch1.xhtml")], &["c1"]);
    let ch1 = chapter("<h1>Head</h1><p>Some <em>styled</em> text</p><pre>code  here</pre>");
    let file = epub_file(&[
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
    ]);

    let book = extract(file.path()).unwrap();
    assert_eq!(book.plain_text(), "Head\n\nSome styled text\n\ncode  here\n\n");

    colored::control::set_override(true);
    let styled = book.text(&Theme::default());
    assert!(styled.contains("\u{1b}["));
    assert!(styled.contains("Head"));
}
