//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements one transformation step; data only flows
//! forward.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ layout ──▶ classify ──▶ assemble
//! (bytes)   (pdfium)   (group)    (per span)   (lines, blocks, join)
//! ```
//!
//! 1. [`input`]    — read a local file or download a URL into memory
//! 2. [`decode`]   — open the PDF with pdfium and walk each page's characters
//! 3. [`layout`]   — fold characters into spans, lines and blocks
//! 4. [`classify`] — decorate a single span with heading / bold / italic
//! 5. [`assemble`] — build lines, separate blocks, join the document

pub mod assemble;
pub mod classify;
pub mod decode;
pub mod input;
pub mod layout;
