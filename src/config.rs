//! Configuration types for PDF-to-Markdown conversion.
//!
//! Everything that can vary between runs lives in [`ConversionConfig`],
//! built via [`ConversionConfigBuilder`]. The Markdown heuristics themselves
//! (heading size, bold/italic bits) are fixed and are not part of the config;
//! see [`crate::pipeline::classify`].

use crate::error::Pdf2MdError;
use crate::pipeline::layout::LayoutOptions;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

const LINE_TOLERANCE_RANGE: RangeInclusive<f32> = 0.05..=5.0;
const BLOCK_GAP_RANGE: RangeInclusive<f32> = 0.5..=10.0;

/// Configuration for a PDF-to-Markdown conversion.
///
/// # Example
/// ```rust
/// use styled_pdf2md::{ConversionConfig, PageSelection};
///
/// let config = ConversionConfig::builder()
///     .pages(PageSelection::Range(1, 3))
///     .block_gap_ratio(2.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.block_gap_ratio, 2.0);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Page selection. Default: all pages.
    pub pages: PageSelection,

    /// Baseline movement, as a fraction of the font size, that still counts
    /// as the same line. Default: 0.5.
    pub line_tolerance: f32,

    /// Vertical gap between consecutive baselines, as a multiple of the font
    /// size, above which a new block starts. Default: 1.5.
    ///
    /// Ordinary line spacing sits around 1.2; paragraph breaks usually add
    /// at least half a line on top.
    pub block_gap_ratio: f32,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Optional per-page progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        let layout = LayoutOptions::default();
        Self {
            password: None,
            pages: PageSelection::default(),
            line_tolerance: layout.line_tolerance,
            block_gap_ratio: layout.block_gap_ratio,
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pages", &self.pages)
            .field("line_tolerance", &self.line_tolerance)
            .field("block_gap_ratio", &self.block_gap_ratio)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    pub(crate) fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            line_tolerance: self.line_tolerance,
            block_gap_ratio: self.block_gap_ratio,
        }
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn line_tolerance(mut self, ratio: f32) -> Self {
        self.config.line_tolerance = ratio;
        self
    }

    pub fn block_gap_ratio(mut self, ratio: f32) -> Self {
        self.config.block_gap_ratio = ratio;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2MdError> {
        let c = &self.config;
        if !LINE_TOLERANCE_RANGE.contains(&c.line_tolerance) {
            return Err(Pdf2MdError::InvalidConfig(format!(
                "line tolerance must be {}–{}, got {}",
                LINE_TOLERANCE_RANGE.start(),
                LINE_TOLERANCE_RANGE.end(),
                c.line_tolerance
            )));
        }
        if !BLOCK_GAP_RANGE.contains(&c.block_gap_ratio) {
            return Err(Pdf2MdError::InvalidConfig(format!(
                "block gap ratio must be {}–{}, got {}",
                BLOCK_GAP_RANGE.start(),
                BLOCK_GAP_RANGE.end(),
                c.block_gap_ratio
            )));
        }
        if c.download_timeout_secs == 0 {
            return Err(Pdf2MdError::InvalidConfig(
                "download timeout must be ≥ 1s".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Specifies which pages of the PDF to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Convert all pages (default).
    #[default]
    All,
    /// Convert a single page (1-indexed).
    Single(usize),
    /// Convert a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Convert specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}
