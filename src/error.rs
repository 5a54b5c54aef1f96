//! Error types for the styled-pdf2md library.
//!
//! Two error types mirror the two layers of the crate:
//!
//! * [`DecodeError`] — the only failure the conversion core knows about: the
//!   bytes could not be turned into a layout tree. Classification, line
//!   assembly and emission are total functions and never fail.
//!
//! * [`Pdf2MdError`] — failures of the outer surface (file lookup, download,
//!   writing output, config validation). A [`DecodeError`] propagates into it
//!   unchanged via `From`.
//!
//! Neither layer retries or produces partial output.

use std::path::PathBuf;
use thiserror::Error;

/// The supplied bytes could not be decoded into a layout tree.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Zero-length input.
    #[error("Input is empty; expected PDF bytes")]
    Empty,

    /// No `%PDF` header near the start of the buffer.
    #[error("Input is not a PDF (first bytes: {magic:?})")]
    NotAPdf { magic: [u8; 4] },

    /// pdfium rejected the document structure.
    #[error("PDF is corrupt: {detail}\nTry repairing with: qpdf input.pdf output.pdf")]
    Corrupt { detail: String },

    /// The document is encrypted and no password was supplied.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was supplied but pdfium rejected it.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// The pdfium shared library could not be located or bound.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium, place the library in the current\n\
directory, or install it where the system loader can find it.\n"
    )]
    EngineUnavailable(String),

    /// A page opened but its text layer could not be read.
    #[error("Page {page}: text layer unreadable: {detail}")]
    PageUnreadable { page: usize, detail: String },
}

/// All fatal errors returned by the outer (file / URL / CLI-facing) API.
#[derive(Debug, Error)]
pub enum Pdf2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The page selection matched no page of the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    // ── Decode errors ─────────────────────────────────────────────────────
    #[error(transparent)]
    Decode(#[from] DecodeError),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
