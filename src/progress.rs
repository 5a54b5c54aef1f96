//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`]. Events fire
//! synchronously from the thread doing the conversion, in page order.
//!
//! # Example
//!
//! ```rust
//! use styled_pdf2md::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     lines: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, _page_num: usize, _total_pages: usize, lines_emitted: usize) {
//!         self.lines.fetch_add(lines_emitted, Ordering::SeqCst);
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { lines: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once the PDF is open and the page selection is known.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called before a page's text layer is decoded.
    ///
    /// `page_num` is the 1-indexed page number in the PDF; `total_pages` is
    /// the number of selected pages.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called after a page has been emitted.
    ///
    /// `lines_emitted` counts non-empty Markdown lines the page produced,
    /// excluding block separators.
    fn on_page_complete(&self, page_num: usize, total_pages: usize, lines_emitted: usize) {
        let _ = (page_num, total_pages, lines_emitted);
    }

    /// Called once after the last selected page has been emitted.
    fn on_conversion_complete(&self, total_pages: usize, markdown_len: usize) {
        let _ = (total_pages, markdown_len);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
