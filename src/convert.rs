//! Conversion entry points.
//!
//! The core is synchronous: [`convert_bytes`] takes a PDF buffer and returns
//! Markdown or a [`DecodeError`], nothing else. The async functions around it
//! resolve paths and URLs, then run the core on tokio's blocking pool because
//! pdfium calls must not stall the async workers.

use crate::config::{ConversionConfig, PageSelection};
use crate::error::{DecodeError, Pdf2MdError};
use crate::model::Page;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::assemble::{EmitCounts, MarkdownWriter};
use crate::pipeline::{decode, input};
use crate::progress::ProgressCallback;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert PDF bytes to Markdown.
///
/// # Errors
/// [`DecodeError`] when the bytes are not a readable PDF. No partial output
/// is ever returned.
pub fn convert_bytes(bytes: &[u8], config: &ConversionConfig) -> Result<String, DecodeError> {
    convert_bytes_with_stats(bytes, config).map(|output| output.markdown)
}

/// Like [`convert_bytes`], but also returns metadata and counters.
pub fn convert_bytes_with_stats(
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<ConversionOutput, DecodeError> {
    let start = Instant::now();
    let mut emitter = PageEmitter::new(config.progress_callback.as_ref());

    let metadata =
        decode::decode_pages_with(bytes, config, |page, selected| emitter.emit(&page, selected))?;

    let (markdown, counts) = emitter.finish();
    let mut stats = ConversionStats::from_counts(metadata.page_count, counts);
    stats.total_duration_ms = start.elapsed().as_millis() as u64;

    Ok(ConversionOutput {
        filename: None,
        markdown,
        metadata,
        stats,
    })
}

/// Feeds decoded pages into a [`MarkdownWriter`] and reports each one to the
/// progress callback.
struct PageEmitter<'a> {
    writer: MarkdownWriter,
    callback: Option<&'a ProgressCallback>,
}

impl<'a> PageEmitter<'a> {
    fn new(callback: Option<&'a ProgressCallback>) -> Self {
        Self {
            writer: MarkdownWriter::new(),
            callback,
        }
    }

    fn emit(&mut self, page: &Page, selected: usize) {
        let before = self.writer.counts().lines_emitted;
        self.writer.push_page(page);
        let emitted = self.writer.counts().lines_emitted - before;
        debug!("Emitted page {}: {} lines", page.number, emitted);
        if let Some(cb) = self.callback {
            cb.on_page_complete(page.number, selected, emitted);
        }
    }

    fn finish(self) -> (String, EmitCounts) {
        let (markdown, counts) = self.writer.finish();
        if let Some(cb) = self.callback {
            cb.on_conversion_complete(counts.pages, markdown.len());
        }
        (markdown, counts)
    }
}

/// Convert a PDF file or URL to Markdown.
///
/// # Errors
/// - input not found, unreadable, or download failure
/// - [`DecodeError`] (wrapped) when the bytes are not a readable PDF
/// - [`Pdf2MdError::PageOutOfRange`] when an explicit page selection matches
///   no page of the document
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2MdError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let filename = resolved.filename;
    let bytes = resolved.bytes;
    let cfg = config.clone();

    let mut output = tokio::task::spawn_blocking(move || convert_bytes_with_stats(&bytes, &cfg))
        .await
        .map_err(|e| Pdf2MdError::Internal(format!("Conversion task panicked: {}", e)))??;

    if output.stats.processed_pages == 0
        && output.stats.total_pages > 0
        && config.pages != PageSelection::All
    {
        return Err(Pdf2MdError::PageOutOfRange {
            page: first_requested_page(&config.pages),
            total: output.stats.total_pages,
        });
    }

    output.filename = filename;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {}/{} pages, {} lines, {}ms total",
        output.stats.processed_pages,
        output.stats.total_pages,
        output.stats.lines_emitted,
        output.stats.total_duration_ms
    );

    Ok(output)
}

/// Convert a PDF and write output directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Pdf2MdError> {
    let output = convert(input_str, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Pdf2MdError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, &output.markdown)
        .await
        .map_err(|e| Pdf2MdError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Pdf2MdError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2MdError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2MdError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_str, config))
}

/// Extract PDF metadata without converting content.
pub async fn inspect(
    input_str: impl AsRef<str>,
    password: Option<&str>,
) -> Result<DocumentMetadata, Pdf2MdError> {
    let resolved = input::resolve_input(input_str.as_ref(), 120).await?;
    let bytes = resolved.bytes;
    let pwd = password.map(|s| s.to_string());

    let metadata =
        tokio::task::spawn_blocking(move || decode::extract_metadata(&bytes, pwd.as_deref()))
            .await
            .map_err(|e| Pdf2MdError::Internal(format!("Metadata task panicked: {}", e)))??;
    Ok(metadata)
}

fn first_requested_page(selection: &PageSelection) -> usize {
    match selection {
        PageSelection::All => 0,
        PageSelection::Single(p) => *p,
        PageSelection::Range(start, _) => *start,
        PageSelection::Set(pages) => pages.first().copied().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Document, Line, Span};
    use crate::pipeline::assemble::render_document;
    use crate::progress::ConversionProgressCallback;
    use std::sync::{Arc, Mutex};

    #[test]
    fn empty_bytes_fail_with_decode_error() {
        let err = convert_bytes(&[], &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Empty));
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = convert_bytes(b"<html></html>", &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::NotAPdf { .. }));
    }

    #[tokio::test]
    async fn convert_propagates_decode_error_unchanged() {
        let mut tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::io::Write::write_all(&mut tmp, b"not a pdf at all").unwrap();
        let path = tmp.path().to_string_lossy().to_string();

        let err = convert(&path, &ConversionConfig::default()).await.unwrap_err();
        assert!(
            matches!(err, Pdf2MdError::Decode(DecodeError::NotAPdf { .. })),
            "got {err:?}"
        );
    }

    #[derive(Default)]
    struct RecordingCallback {
        pages: Mutex<Vec<(usize, usize, usize)>>,
        completed: Mutex<Option<(usize, usize)>>,
    }

    impl ConversionProgressCallback for RecordingCallback {
        fn on_page_complete(&self, page_num: usize, total_pages: usize, lines_emitted: usize) {
            self.pages
                .lock()
                .unwrap()
                .push((page_num, total_pages, lines_emitted));
        }

        fn on_conversion_complete(&self, total_pages: usize, markdown_len: usize) {
            *self.completed.lock().unwrap() = Some((total_pages, markdown_len));
        }
    }

    fn text_page(number: usize, lines: &[&str]) -> Page {
        Page {
            number,
            blocks: vec![Block {
                lines: lines
                    .iter()
                    .map(|t| Line {
                        spans: vec![Span::new(*t, 10.0, "Helvetica", 0)],
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn emitter_reports_lines_per_page() {
        let recorder = Arc::new(RecordingCallback::default());
        let cb: ProgressCallback = recorder.clone();
        let mut emitter = PageEmitter::new(Some(&cb));

        emitter.emit(&text_page(3, &["a", "  ", "b"]), 2);
        emitter.emit(&text_page(7, &["c"]), 2);
        let (markdown, counts) = emitter.finish();

        assert_eq!(markdown, "a\nb\n\nc\n");
        assert_eq!(counts.lines_dropped, 1);
        assert_eq!(
            *recorder.pages.lock().unwrap(),
            vec![(3, 2, 2), (7, 2, 1)]
        );
        assert_eq!(
            *recorder.completed.lock().unwrap(),
            Some((2, markdown.len()))
        );
    }

    #[test]
    fn emitter_without_callback_matches_render() {
        let mut emitter = PageEmitter::new(None);
        let page = text_page(1, &["Title", "body"]);
        emitter.emit(&page, 1);
        let (markdown, _) = emitter.finish();

        let doc = Document { pages: vec![page] };
        assert_eq!(markdown, render_document(&doc));
    }

    #[test]
    fn convert_sync_reports_missing_file() {
        let err = convert_sync("/no/such/dir/input.pdf", &ConversionConfig::default())
            .unwrap_err();
        assert!(matches!(err, Pdf2MdError::FileNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn inspect_rejects_non_pdf() {
        let mut tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::io::Write::write_all(&mut tmp, b"").unwrap();
        let path = tmp.path().to_string_lossy().to_string();

        let err = tokio_test::block_on(inspect(&path, None)).unwrap_err();
        assert!(matches!(err, Pdf2MdError::Decode(DecodeError::Empty)), "got {err:?}");
    }

    #[test]
    fn first_requested_page_per_selection() {
        assert_eq!(first_requested_page(&PageSelection::Single(7)), 7);
        assert_eq!(first_requested_page(&PageSelection::Range(3, 9)), 3);
        assert_eq!(first_requested_page(&PageSelection::Set(vec![5, 2])), 5);
        assert_eq!(first_requested_page(&PageSelection::Set(vec![])), 0);
    }
}
