//! Mutable view over an interleaved RGB8 pixel buffer.
//!
//! Camera drivers hand out frames as flat byte buffers they own. An
//! [`RgbFrame`] borrows such a buffer together with its declared dimensions
//! so the transform engine can rewrite it in place without taking ownership.
//!
//! # Layout
//!
//! ```text
//! byte index of (x, y) = (y * width + x) * 3
//! [R0 G0 B0][R1 G1 B1] ... row 0 ... [..] row 1 ...
//! ```
//!
//! The declared capacity is `width * height * 3`. The backing slice may be
//! shorter (caller error); everything that touches pixel bytes only ever
//! reads or writes inside `min(declared, actual)`.

use crate::{Error, Result};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// Borrowed RGB8 frame.
///
/// # Example
///
/// ```rust
/// use lutcam_core::RgbFrame;
///
/// let mut bytes = vec![0u8; 2 * 2 * 3];
/// let mut frame = RgbFrame::new(&mut bytes, 2, 2);
/// frame.set_pixel(1, 1, [255, 128, 0]).unwrap();
/// assert_eq!(frame.pixel(1, 1).unwrap(), [255, 128, 0]);
/// assert_eq!(bytes[9..12], [255, 128, 0]);
/// ```
pub struct RgbFrame<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> RgbFrame<'a> {
    /// Wraps a buffer with the given dimensions.
    ///
    /// Never fails: a buffer shorter than `width * height * 3` is accepted
    /// and pixels past its end are treated as absent.
    pub fn new(data: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Wraps a buffer, requiring its length to match the dimensions exactly.
    pub fn checked(data: &'a mut [u8], width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "frame size overflows"))?;

        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self::new(data, width, height))
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Capacity implied by the dimensions, `width * height * 3`.
    ///
    /// Saturates instead of overflowing on absurd dimensions.
    #[inline]
    pub fn declared_len(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(CHANNELS)
    }

    /// Number of bytes that may be touched: the smaller of the declared
    /// capacity and the backing slice.
    #[inline]
    pub fn usable_len(&self) -> usize {
        self.declared_len().min(self.data.len())
    }

    /// Returns `true` if the backing slice covers the declared capacity.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.data.len() >= self.declared_len()
    }

    /// Byte index of the first channel of pixel (x, y).
    ///
    /// Saturates to `usize::MAX` when the index is not representable.
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        Self::index_of(x, y, self.width).unwrap_or(usize::MAX)
    }

    fn index_of(x: u32, y: u32, width: u32) -> Option<usize> {
        (y as usize)
            .checked_mul(width as usize)?
            .checked_add(x as usize)?
            .checked_mul(CHANNELS)
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        let oob = || Error::out_of_bounds(x, y, self.width, self.height);
        if x >= self.width || y >= self.height {
            return Err(oob());
        }
        let idx = Self::index_of(x, y, self.width).ok_or_else(oob)?;
        let last = idx.checked_add(CHANNELS - 1).ok_or_else(oob)?;
        if last >= self.usable_len() {
            return Err(oob());
        }
        Ok(idx)
    }

    /// Reads pixel (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        let idx = self.checked_index(x, y)?;
        Ok([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Writes pixel (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx..idx + CHANNELS].copy_from_slice(&rgb);
        Ok(())
    }

    /// Coordinates and value of the center pixel.
    pub fn center_pixel(&self) -> Result<(u32, u32, [u8; 3])> {
        let (x, y) = (self.width / 2, self.height / 2);
        Ok((x, y, self.pixel(x, y)?))
    }

    /// The usable bytes, read-only.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.usable_len();
        &self.data[..len]
    }

    /// The usable bytes, mutable.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.usable_len();
        &mut self.data[..len]
    }

    /// Mutable rows over the usable bytes.
    ///
    /// The last row is shorter than [`stride`](Self::stride) when the
    /// backing buffer ends mid-row. A zero-width frame yields no rows.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, u8> {
        let stride = self.stride().max(1);
        self.as_bytes_mut().chunks_mut(stride)
    }
}

impl std::fmt::Debug for RgbFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.data.len())
            .finish()
    }
}
