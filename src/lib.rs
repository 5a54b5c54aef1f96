//! # styled-pdf2md
//!
//! Convert the text layer of a PDF to Markdown, recovering headings, bold and
//! italics from font metadata.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Decode    pdfium opens the buffer, walks each page's characters
//!  ├─ 2. Layout    characters → spans → lines → blocks (content order)
//!  ├─ 3. Classify  per span: size > 14 → "# ", bold → **…**, italic → *…*
//!  ├─ 4. Assemble  concatenate spans per line, drop blank lines
//!  └─ 5. Emit      one blank line after every block, join with "\n"
//! ```
//!
//! Steps 3–5 are pure functions of the layout tree and are available on
//! their own through [`render_document`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use styled_pdf2md::{convert_bytes, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("document.pdf")?;
//!     let markdown = convert_bytes(&bytes, &ConversionConfig::default())?;
//!     println!("{markdown}");
//!     Ok(())
//! }
//! ```
//!
//! ## Without pdfium
//!
//! ```rust
//! use styled_pdf2md::{render_document, Block, Document, Line, Page, Span};
//!
//! let doc = Document {
//!     pages: vec![Page {
//!         number: 1,
//!         blocks: vec![Block {
//!             lines: vec![
//!                 Line { spans: vec![Span::new("Title", 18.0, "Helvetica", 0)] },
//!                 Line { spans: vec![Span::new("body", 10.0, "Helvetica", 0)] },
//!             ],
//!         }],
//!     }],
//! };
//! assert_eq!(render_document(&doc), "# Title\nbody\n");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2md` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! pdfium itself is loaded at runtime; see [`pipeline::decode::bind_pdfium`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageSelection};
pub use convert::{
    convert, convert_bytes, convert_bytes_with_stats, convert_sync, convert_to_file, inspect,
};
pub use error::{DecodeError, Pdf2MdError};
pub use model::{Block, Document, Line, Page, Span, StyleFlags};
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata};
pub use pipeline::assemble::render_document;
pub use pipeline::classify::{style_span, HEADING_SIZE_THRESHOLD};
pub use pipeline::decode::decode_document;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
