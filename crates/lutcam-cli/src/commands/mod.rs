//! CLI command implementations

pub mod apply;
pub mod identity;
pub mod info;
pub mod probe;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reads a raw RGB8 frame, warning if its size does not match.
pub fn read_frame(path: &Path, width: u32, height: u32) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let expected = width as u64 * height as u64 * 3;
    if bytes.len() as u64 != expected {
        warn!(
            expected,
            actual = bytes.len(),
            "Frame size does not match {}x{}",
            width,
            height
        );
    }
    Ok(bytes)
}

/// Writes a raw frame.
pub fn write_frame(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to save: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.rgb");
        write_frame(&path, &[1, 2, 3, 4, 5]).unwrap();
        // size mismatch is only a warning
        assert_eq!(read_frame(&path, 1, 1).unwrap(), [1, 2, 3, 4, 5]);
        assert!(read_frame(&dir.path().join("none.rgb"), 1, 1).is_err());
    }
}
