//! # lexo
//!
//! Extract readable, styled text from EPUB ebooks.
//!
//! Extraction follows the EPUB layers in order: the ZIP archive,
//! `META-INF/container.xml`, the OPF package document, and finally every
//! spine entry in reading order. Each content document is parsed with a
//! permissive HTML parser and rendered into role-tagged [`Fragment`]s; a
//! [`Theme`] turns those fragments into terminal text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lexo::{Theme, extract};
//!
//! let book = extract("book.epub").unwrap();
//! println!("{}", book.title());
//! print!("{}", book.text(&Theme::default()));
//! ```
//!
//! ## Failure policy
//!
//! Failing to open the archive, resolve the container or parse the package
//! document returns an [`ExtractError`] naming the stage. A spine entry that
//! cannot be read or rendered is logged through the `log` facade and left
//! out of the result.
//!
//! ## Re-theming
//!
//! Rendering never bakes in presentation, so one [`Document`] can be
//! composed under any number of themes:
//!
//! ```
//! use lexo::{Presentation, Role, Theme};
//! use lexo::render::render_document;
//!
//! let doc = render_document(b"<body><h1>Title</h1></body>").unwrap();
//! let theme = Theme::plain().with(Role::Heading(1), Presentation::new().bold());
//! assert!(theme.compose(&doc.fragments).contains("Title"));
//! assert_eq!(Theme::plain().compose(&doc.fragments), "Title\n\n");
//! ```

pub mod archive;
pub mod dom;
pub mod epub;
pub mod error;
pub mod extract;
pub mod render;
pub mod style;
pub(crate) mod util;

pub use archive::{Archive, EntryHandle};
pub use epub::{Metadata, PackageDescriptor};
pub use error::{Error, ExtractError, Result, Stage};
pub use extract::{Document, extract, extract_from_reader};
pub use render::{Fragment, RenderedDocument, Span, render_document};
pub use style::{Presentation, Role, Theme};
