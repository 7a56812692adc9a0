//! Transform options.
//!
//! [`FilterOptions::default()`] reproduces the camera deployment: monochrome
//! output, truncating quantization, sequential rows with a scheduler yield
//! every 200 rows, tolerant LUT parsing.

use lutcam_lut::ParseMode;
use serde::Deserialize;

/// Rows between cooperative yields in sequential mode.
pub const DEFAULT_YIELD_EVERY: usize = 200;

/// How the interpolated color is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Average the three channels, clamp, and write the same value to all
    /// three (forced grayscale).
    #[default]
    Monochrome,
    /// Clamp and write each channel independently.
    Color,
}

/// Float to 8-bit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantize {
    /// `(v * 255) as u8`
    #[default]
    Truncate,
    /// `(v * 255).round() as u8`
    Round,
}

impl Quantize {
    /// Converts a value in `[0, 1]` to a byte.
    #[inline]
    pub fn to_u8(self, v: f32) -> u8 {
        match self {
            Self::Truncate => (v * 255.0) as u8,
            Self::Round => (v * 255.0).round() as u8,
        }
    }
}

/// Row scheduling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Rows in order on the calling thread, yielding to the OS scheduler
    /// every `yield_every` rows (0 never yields).
    Sequential {
        /// Rows between yields
        yield_every: usize,
    },
    /// Rows spread over the rayon pool.
    Parallel,
}

/// Options for [`apply`](crate::apply) and [`apply_lut_file`](crate::apply_lut_file).
///
/// Deserializable from YAML/JSON; missing keys take their defaults.
///
/// ```rust
/// use lutcam_ops::{FilterOptions, OutputMode};
///
/// let opts = FilterOptions::default().with_mode(OutputMode::Color).parallel(true);
/// assert!(opts.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Output mode
    pub mode: OutputMode,
    /// Float to byte conversion
    pub quantize: Quantize,
    /// Spread rows over worker threads
    pub parallel: bool,
    /// Rows between cooperative yields when running sequentially
    pub yield_every: usize,
    /// LUT parse mode used by the file entry points
    pub parse: ParseMode,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Monochrome,
            quantize: Quantize::Truncate,
            parallel: false,
            yield_every: DEFAULT_YIELD_EVERY,
            parse: ParseMode::Tolerant,
        }
    }
}

impl FilterOptions {
    /// Sets the output mode.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the quantization.
    pub fn with_quantize(mut self, quantize: Quantize) -> Self {
        self.quantize = quantize;
        self
    }

    /// Enables or disables row parallelism.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the yield interval for sequential runs.
    pub fn with_yield_every(mut self, rows: usize) -> Self {
        self.yield_every = rows;
        self
    }

    /// Sets the LUT parse mode.
    pub fn with_parse(mut self, parse: ParseMode) -> Self {
        self.parse = parse;
        self
    }

    /// The effective schedule.
    ///
    /// Without the `parallel` feature this is always sequential.
    pub fn schedule(&self) -> Schedule {
        if self.parallel && cfg!(feature = "parallel") {
            Schedule::Parallel
        } else {
            Schedule::Sequential {
                yield_every: self.yield_every,
            }
        }
    }
}
