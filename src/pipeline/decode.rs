//! PDF decoding via pdfium: bytes → layout tree.
//!
//! ## Binding
//!
//! pdfium is a C++ shared library loaded at runtime. [`bind_pdfium`] looks
//! for it in `PDFIUM_LIB_PATH` (a file or a directory), then next to the
//! process working directory, then wherever the system loader finds it.
//!
//! ## Handle lifetime
//!
//! The `PdfDocument` opened here borrows the `Pdfium` instance and closes
//! its pdfium handle on drop. Both live only inside one call, so the handle
//! is released on success, on an empty result, and on every `?` exit.
//!
//! ## Style flags
//!
//! pdfium exposes the font descriptor of each character rather than a
//! ready-made span flag word, so [`FontDescriptor::style_flags`] translates
//! it into [`StyleFlags`] bits. A weight of 700 or more counts as bold, as
//! does the ForceBold flag. Everything downstream only sees the translated
//! bits.
//!
//! ## Baselines
//!
//! Glyphs are positioned by their text origin (`origin_y`), not by their ink
//! box: an apostrophe's ink starts well above the line it belongs to.

use crate::config::ConversionConfig;
use crate::error::DecodeError;
use crate::model::{Document, Page, StyleFlags};
use crate::output::DocumentMetadata;
use crate::pipeline::layout::{Glyph, LayoutBuilder, LayoutOptions};
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// How far into the buffer the `%PDF` header may start.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Reject buffers that cannot possibly be a PDF before touching pdfium.
pub fn check_magic(bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    if window.windows(4).any(|w| w == b"%PDF") {
        return Ok(());
    }
    let mut magic = [0u8; 4];
    let n = bytes.len().min(4);
    magic[..n].copy_from_slice(&bytes[..n]);
    Err(DecodeError::NotAPdf { magic })
}

/// Bind to a pdfium shared library.
pub fn bind_pdfium() -> Result<Pdfium, DecodeError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(p) if !p.is_empty() => {
            let path = PathBuf::from(p);
            let lib = if path.is_dir() {
                Pdfium::pdfium_platform_library_name_at_path(&path)
            } else {
                path
            };
            debug!("Binding pdfium from PDFIUM_LIB_PATH: {}", lib.display());
            Pdfium::bind_to_library(lib)
        }
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| DecodeError::EngineUnavailable(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

fn open_document<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, DecodeError> {
    pdfium.load_pdf_from_byte_slice(bytes, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                DecodeError::WrongPassword
            } else {
                DecodeError::PasswordRequired
            }
        } else {
            DecodeError::Corrupt { detail: err_str }
        }
    })
}

/// Decode selected pages, handing each finished page to `sink` in order.
///
/// `sink` receives the page and the number of selected pages. Returns the
/// document metadata, read while the document is open.
pub fn decode_pages_with<F>(
    bytes: &[u8],
    config: &ConversionConfig,
    mut sink: F,
) -> Result<DocumentMetadata, DecodeError>
where
    F: FnMut(Page, usize),
{
    check_magic(bytes)?;
    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, bytes, config.password.as_deref())?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    let indices = config.pages.to_indices(total_pages);
    info!(
        "PDF loaded: {} pages, {} selected",
        total_pages,
        indices.len()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(indices.len());
    }

    let options = config.layout_options();
    for &idx in &indices {
        let number = idx + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(number, indices.len());
        }

        let page = pages
            .get(idx as u16)
            .map_err(|e| DecodeError::PageUnreadable {
                page: number,
                detail: format!("{:?}", e),
            })?;
        let decoded = decode_page(&page, number, options)?;
        debug!(
            "Decoded page {} → {} blocks",
            number,
            decoded.blocks.len()
        );
        sink(decoded, indices.len());
    }

    Ok(read_metadata(&document))
}

/// Decode selected pages into a full layout tree.
pub fn decode_document(bytes: &[u8], config: &ConversionConfig) -> Result<Document, DecodeError> {
    let mut document = Document::default();
    decode_pages_with(bytes, config, |page, _| document.pages.push(page))?;
    Ok(document)
}

fn decode_page(
    page: &PdfPage,
    number: usize,
    options: LayoutOptions,
) -> Result<Page, DecodeError> {
    let text = page.text().map_err(|e| DecodeError::PageUnreadable {
        page: number,
        detail: format!("{:?}", e),
    })?;

    let mut builder = LayoutBuilder::new(number, options);
    for ch in text.chars().iter() {
        let Some(c) = ch.unicode_char() else {
            continue;
        };
        builder.push(Glyph {
            ch: c,
            font_name: ch.font_name(),
            font_size: ch.scaled_font_size().value,
            style_flags: FontDescriptor::of(&ch).style_flags(),
            baseline: ch.origin_y().ok().map(|y| y.value),
        });
    }

    Ok(builder.finish())
}

/// Weight at and above which a face counts as bold.
pub const BOLD_WEIGHT: u32 = 700;

/// The font-descriptor facts pdfium reports for one character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontDescriptor {
    pub italic: bool,
    pub serif: bool,
    pub fixed_pitch: bool,
    /// The ForceBold descriptor flag.
    pub force_bold: bool,
    /// Numeric weight (100–900), when the font declares one.
    pub weight: Option<u32>,
}

impl FontDescriptor {
    fn of(ch: &PdfPageTextChar) -> Self {
        Self {
            italic: ch.font_is_italic(),
            serif: ch.font_is_serif(),
            fixed_pitch: ch.font_is_fixed_pitch(),
            force_bold: ch.font_is_bold_reenforced(),
            weight: ch.font_weight().map(weight_value),
        }
    }

    /// Translate into [`StyleFlags`] bits.
    pub fn style_flags(self) -> u32 {
        let mut flags = StyleFlags::empty();
        flags.set(StyleFlags::ITALIC, self.italic);
        flags.set(StyleFlags::SERIFED, self.serif);
        flags.set(StyleFlags::MONOSPACED, self.fixed_pitch);
        flags.set(
            StyleFlags::BOLD,
            self.force_bold || self.weight.is_some_and(|w| w >= BOLD_WEIGHT),
        );
        flags.bits()
    }
}

fn weight_value(weight: PdfFontWeight) -> u32 {
    match weight {
        PdfFontWeight::Weight100 => 100,
        PdfFontWeight::Weight200 => 200,
        PdfFontWeight::Weight300 => 300,
        PdfFontWeight::Weight400Normal => 400,
        PdfFontWeight::Weight500 => 500,
        PdfFontWeight::Weight600 => 600,
        PdfFontWeight::Weight700Bold => 700,
        PdfFontWeight::Weight800 => 800,
        PdfFontWeight::Weight900 => 900,
        PdfFontWeight::Custom(w) => w,
    }
}

/// Read document metadata without walking any page text.
pub fn extract_metadata(
    bytes: &[u8],
    password: Option<&str>,
) -> Result<DocumentMetadata, DecodeError> {
    check_magic(bytes)?;
    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, bytes, password)?;
    Ok(read_metadata(&document))
}

fn read_metadata(document: &PdfDocument) -> DocumentMetadata {
    let metadata = document.metadata();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    }
}
