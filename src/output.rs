//! Result types returned by the conversion entry points.

use crate::pipeline::assemble::EmitCounts;
use serde::{Deserialize, Serialize};

/// Everything a conversion produced.
///
/// Serialises to the `{filename, markdown, ...}` shape that an upload
/// endpoint returns to its client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Display name of the input (file name or last URL path segment).
    pub filename: Option<String>,
    pub markdown: String,
    pub metadata: DocumentMetadata,
    pub stats: ConversionStats,
}

/// Document information dictionary plus structural facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Counters for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the PDF.
    pub total_pages: usize,
    /// Pages that were selected and emitted.
    pub processed_pages: usize,
    pub blocks: usize,
    pub spans: usize,
    /// Non-empty Markdown lines written (block separators excluded).
    pub lines_emitted: usize,
    /// Lines dropped because they were blank after styling.
    pub lines_dropped: usize,
    pub total_duration_ms: u64,
}

impl ConversionStats {
    pub(crate) fn from_counts(total_pages: usize, counts: EmitCounts) -> Self {
        Self {
            total_pages,
            processed_pages: counts.pages,
            blocks: counts.blocks,
            spans: counts.spans,
            lines_emitted: counts.lines_emitted,
            lines_dropped: counts.lines_dropped,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_serialises_filename_and_markdown() {
        let out = ConversionOutput {
            filename: Some("report.pdf".into()),
            markdown: "# Title\n".into(),
            metadata: DocumentMetadata::default(),
            stats: ConversionStats::default(),
        };
        let v: serde_json::Value = serde_json::to_value(&out).unwrap();
        assert_eq!(v["filename"], "report.pdf");
        assert_eq!(v["markdown"], "# Title\n");
    }

    #[test]
    fn stats_copy_emit_counts() {
        let counts = EmitCounts {
            pages: 2,
            blocks: 5,
            spans: 40,
            lines_emitted: 12,
            lines_dropped: 1,
        };
        let stats = ConversionStats::from_counts(9, counts);
        assert_eq!(stats.total_pages, 9);
        assert_eq!(stats.processed_pages, 2);
        assert_eq!(stats.lines_emitted, 12);
        assert_eq!(stats.total_duration_ms, 0);
    }
}
