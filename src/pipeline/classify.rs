//! Span classification: turn one span into its Markdown-decorated text.
//!
//! Three tests run in a fixed order and each wraps the output of the one
//! before it, so the order is also the nesting order:
//!
//! ```text
//! "Hi" ──heading──▶ "# Hi" ──bold──▶ "**# Hi**" ──italic──▶ "***# Hi***"
//! ```
//!
//! Classification looks at nothing but the span itself. Empty text is not
//! special-cased: an empty bold span becomes `****`.

use crate::model::Span;

/// Spans strictly larger than this many points are treated as headings.
///
/// Fixed; not part of [`crate::ConversionConfig`].
pub const HEADING_SIZE_THRESHOLD: f32 = 14.0;

/// Substring of a font name that marks a bold face regardless of flags.
pub const BOLD_FONT_MARKER: &str = "Bold";

const HEADING_PREFIX: &str = "# ";
const BOLD_WRAP: &str = "**";
const ITALIC_WRAP: &str = "*";

/// `font_size > 14`.
pub fn is_heading(span: &Span) -> bool {
    span.font_size > HEADING_SIZE_THRESHOLD
}

/// Bold by font name (`...Bold...`) or by flag bit 16.
pub fn is_bold(span: &Span) -> bool {
    span.font_name.contains(BOLD_FONT_MARKER) || span.flags().is_bold()
}

/// Italic by flag bit 2 only; font names are not consulted.
pub fn is_italic(span: &Span) -> bool {
    span.flags().is_italic()
}

/// Produce the decorated text for a single span.
pub fn style_span(span: &Span) -> String {
    let mut text = span.text.clone();
    if is_heading(span) {
        text.insert_str(0, HEADING_PREFIX);
    }
    if is_bold(span) {
        text = wrap(&text, BOLD_WRAP);
    }
    if is_italic(span) {
        text = wrap(&text, ITALIC_WRAP);
    }
    text
}

fn wrap(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len() + marker.len() * 2);
    out.push_str(marker);
    out.push_str(text);
    out.push_str(marker);
    out
}
