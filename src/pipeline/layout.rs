//! Layout grouping: characters in content order → spans, lines, blocks.
//!
//! pdfium reports a page as a flat run of characters, each with its own font
//! descriptor and bounding box. [`LayoutBuilder`] folds that run into the
//! nested tree the emitter expects, without ever re-sorting it:
//!
//! * a **span** continues while font name, size and flags stay the same;
//! * a **line** ends at an engine-generated `\r`/`\n`, or when the baseline
//!   moves more than `line_tolerance × font_size`;
//! * a **block** ends when the next line starts more than
//!   `block_gap_ratio × font_size` below the previous one, or above it.
//!
//! The builder knows nothing about pdfium, so the grouping rules are tested
//! here with synthetic glyphs.

use crate::model::{Block, Line, Page, Span};

/// Grouping tolerances. See [`crate::ConversionConfig`] for the defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub line_tolerance: f32,
    pub block_gap_ratio: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_tolerance: 0.5,
            block_gap_ratio: 1.5,
        }
    }
}

/// One decoded character with its font descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub font_name: String,
    pub font_size: f32,
    pub style_flags: u32,
    /// Text-origin y in PDF user space (y grows upward): the baseline the
    /// glyph sits on, whatever its ink extent. `None` when the engine has no
    /// geometry for the character, e.g. a generated space.
    pub baseline: Option<f32>,
}

const SIZE_EPSILON: f32 = 0.01;

#[derive(Debug)]
pub struct LayoutBuilder {
    options: LayoutOptions,
    page_number: usize,
    blocks: Vec<Block>,
    lines: Vec<Line>,
    spans: Vec<Span>,
    span: Option<Span>,
    line_baseline: Option<f32>,
    line_size: f32,
    prev_line: Option<(f32, f32)>,
}

impl LayoutBuilder {
    pub fn new(page_number: usize, options: LayoutOptions) -> Self {
        Self {
            options,
            page_number,
            blocks: Vec::new(),
            lines: Vec::new(),
            spans: Vec::new(),
            span: None,
            line_baseline: None,
            line_size: 0.0,
            prev_line: None,
        }
    }

    pub fn push(&mut self, glyph: Glyph) {
        if glyph.ch == '\r' || glyph.ch == '\n' {
            self.end_line();
            return;
        }

        let size = glyph.font_size.max(1.0);
        if let Some(y) = glyph.baseline.filter(|_| !glyph.ch.is_whitespace()) {
            if let Some(ly) = self.line_baseline {
                if (y - ly).abs() > self.options.line_tolerance * size.max(self.line_size) {
                    self.end_line();
                }
            }
            if self.line_baseline.is_none() {
                if let Some((py, psize)) = self.prev_line {
                    let drop = py - y;
                    let moved_up = drop < -(self.options.line_tolerance * size);
                    if moved_up || drop > self.options.block_gap_ratio * psize.max(size) {
                        self.close_block();
                    }
                }
                self.line_baseline = Some(y);
            }
            self.line_size = self.line_size.max(size);
        }

        self.append(glyph);
    }

    /// Flush everything and return the finished page.
    pub fn finish(mut self) -> Page {
        self.end_line();
        self.close_block();
        Page {
            number: self.page_number,
            blocks: self.blocks,
        }
    }

    fn append(&mut self, glyph: Glyph) {
        match self.span.as_mut() {
            Some(span) if same_style(span, &glyph) => span.text.push(glyph.ch),
            _ => {
                self.flush_span();
                self.span = Some(Span {
                    text: glyph.ch.to_string(),
                    font_size: glyph.font_size,
                    font_name: glyph.font_name,
                    style_flags: glyph.style_flags,
                });
            }
        }
    }

    fn flush_span(&mut self) {
        if let Some(span) = self.span.take() {
            self.spans.push(span);
        }
    }

    fn end_line(&mut self) {
        self.flush_span();
        if !self.spans.is_empty() {
            self.lines.push(Line {
                spans: std::mem::take(&mut self.spans),
            });
        }
        if let Some(y) = self.line_baseline.take() {
            self.prev_line = Some((y, self.line_size));
        }
        self.line_size = 0.0;
    }

    /// Close the current block. The line in progress, if any, is left alone
    /// so it becomes the first line of the next block.
    fn close_block(&mut self) {
        if !self.lines.is_empty() {
            self.blocks.push(Block {
                lines: std::mem::take(&mut self.lines),
            });
        }
    }
}

fn same_style(span: &Span, glyph: &Glyph) -> bool {
    span.style_flags == glyph.style_flags
        && (span.font_size - glyph.font_size).abs() < SIZE_EPSILON
        && span.font_name == glyph.font_name
}
