//! The decoded layout tree: pages → blocks → lines → spans.
//!
//! These are plain ordered records with no back-references. The tree is built
//! fresh for each conversion, read once by the emitter, and dropped. Nothing
//! in the conversion path takes `&mut` to it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-span font attributes as reported by the layout source.
    ///
    /// Bit positions follow the MuPDF span flag convention. They are
    /// a property of the layout source, not of the PDF format, so a decoder
    /// with different semantics must translate into these bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u32 {
        /// Bit 0: superscripted glyphs.
        const SUPERSCRIPT = 1 << 0;
        /// Bit 1: italic face.
        const ITALIC = 1 << 1;
        /// Bit 2: serifed face.
        const SERIFED = 1 << 2;
        /// Bit 3: monospaced face.
        const MONOSPACED = 1 << 3;
        /// Bit 4: bold face.
        const BOLD = 1 << 4;
    }
}

impl StyleFlags {
    /// `true` when the bold bit (value 16) is set.
    pub fn is_bold(self) -> bool {
        self.contains(StyleFlags::BOLD)
    }

    /// `true` when the italic bit (value 2) is set.
    pub fn is_italic(self) -> bool {
        self.contains(StyleFlags::ITALIC)
    }
}

/// A whole decoded document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

/// One page, with blocks in the order the layout source supplied them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-indexed page number within the source PDF.
    pub number: usize,
    pub blocks: Vec<Block>,
}

/// A contiguous layout grouping, usually a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub lines: Vec<Line>,
}

/// One visual line; rendered as at most one output line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

/// The smallest unit of uniformly styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    /// Point size.
    pub font_size: f32,
    /// Font family / PostScript name, e.g. `Helvetica-Bold`.
    pub font_name: String,
    /// Raw flag bits, kept verbatim; see [`StyleFlags`].
    pub style_flags: u32,
}

impl Span {
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        style_flags: u32,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            style_flags,
        }
    }

    /// The flag bits as a typed set. Unknown bits are retained.
    pub fn flags(&self) -> StyleFlags {
        StyleFlags::from_bits_retain(self.style_flags)
    }
}

impl Document {
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    pub fn line_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .map(|b| b.lines.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_predicates_match_raw_bits() {
        assert!(StyleFlags::from_bits_retain(16).is_bold());
        assert!(!StyleFlags::from_bits_retain(16).is_italic());
        assert!(StyleFlags::from_bits_retain(2).is_italic());
        assert!(!StyleFlags::from_bits_retain(2).is_bold());

        let both = StyleFlags::from_bits_retain(18);
        assert!(both.is_bold() && both.is_italic());
    }

    #[test]
    fn unknown_bits_are_kept() {
        let span = Span::new("x", 10.0, "Times", 16 | 1024);
        assert_eq!(span.flags().bits(), 1040);
        assert!(span.flags().is_bold());
    }

    #[test]
    fn counts_walk_every_page() {
        let doc = Document {
            pages: vec![
                Page {
                    number: 1,
                    blocks: vec![
                        Block {
                            lines: vec![Line::default(), Line::default()],
                        },
                        Block::default(),
                    ],
                },
                Page {
                    number: 2,
                    blocks: vec![Block {
                        lines: vec![Line::default()],
                    }],
                },
            ],
        };
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn layout_tree_serialises_with_raw_flags() {
        let span = Span::new("Hi", 12.0, "Arial", 18);
        let json = serde_json::to_string(&span).unwrap();
        assert!(json.contains("\"style_flags\":18"), "got: {json}");
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(back, span);
    }
}
