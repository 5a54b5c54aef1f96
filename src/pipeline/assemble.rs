//! Line assembly, block separation and final emission.
//!
//! [`MarkdownWriter`] owns the running sequence of output entries. Feeding it
//! blocks in document order and calling [`MarkdownWriter::finish`] is the
//! whole walker/emitter; [`render_document`] does exactly that.
//!
//! Entries are joined with a single `\n`. Each block appends one empty entry
//! after its lines, so a document ending in a block ends in `\n`.

use crate::model::{Block, Document, Line, Page};
use crate::pipeline::classify::style_span;

/// Concatenate the styled spans of one line.
///
/// Returns `None` when the result is empty after trimming; the line is then
/// dropped entirely. The returned text is the untrimmed concatenation.
pub fn assemble_line(line: &Line) -> Option<String> {
    let text: String = line.spans.iter().map(style_span).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Counters gathered while emitting. They never influence the output text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitCounts {
    pub pages: usize,
    pub blocks: usize,
    pub spans: usize,
    pub lines_emitted: usize,
    pub lines_dropped: usize,
}

/// Accumulates output lines and blank block separators.
#[derive(Debug, Default)]
pub struct MarkdownWriter {
    entries: Vec<String>,
    counts: EmitCounts,
}

impl MarkdownWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&mut self, page: &Page) {
        self.counts.pages += 1;
        for block in &page.blocks {
            self.push_block(block);
        }
    }

    /// Emit a block's surviving lines followed by exactly one blank entry.
    pub fn push_block(&mut self, block: &Block) {
        self.counts.blocks += 1;
        for line in &block.lines {
            self.counts.spans += line.spans.len();
            match assemble_line(line) {
                Some(text) => {
                    self.counts.lines_emitted += 1;
                    self.entries.push(text);
                }
                None => self.counts.lines_dropped += 1,
            }
        }
        self.entries.push(String::new());
    }

    pub fn counts(&self) -> EmitCounts {
        self.counts
    }

    /// Join all entries with `\n`.
    pub fn finish(self) -> (String, EmitCounts) {
        (self.entries.join("\n"), self.counts)
    }
}

/// Render a layout tree to Markdown. Pure and deterministic.
pub fn render_document(doc: &Document) -> String {
    render_document_with_counts(doc).0
}

pub fn render_document_with_counts(doc: &Document) -> (String, EmitCounts) {
    let mut writer = MarkdownWriter::new();
    for page in &doc.pages {
        writer.push_page(page);
    }
    writer.finish()
}
