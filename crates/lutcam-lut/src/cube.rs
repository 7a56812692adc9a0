//! Adobe/Resolve .cube 3D LUT loading and writing.
//!
//! # Format
//!
//! ```text
//! # Comment
//! LUT_3D_SIZE 33
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Samples are listed red fastest, then green, then blue.
//!
//! # Tolerance
//!
//! The loader targets camera firmware, so it prefers a usable cube over a
//! precise diagnosis:
//!
//! - sizes above [`MAX_LUT_SIZE`] are clamped, not rejected
//! - lines before the first `LUT_3D_SIZE` and lines past `size^3` samples
//!   are ignored
//! - a malformed sample keeps whatever leading numbers could be scanned
//!   (missing components are `0.0`) and still occupies its slot
//! - a short file leaves the remaining samples at zero
//!
//! Every such event is recorded in the [`LoadReport`]. [`ParseMode::Strict`]
//! turns malformed lines into an error once the whole file has been read.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use lutcam_lut::cube;
//!
//! let text = "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let lut = cube::parse(Cursor::new(text)).unwrap();
//! assert_eq!(lut.size(), 2);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use lutcam_core::Vec3f;
use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use crate::{Lut3D, LutError, LutResult};

/// Largest accepted cube edge length. Larger declarations are clamped.
pub const MAX_LUT_SIZE: usize = 33;

const SIZE_KEYWORD: &str = "LUT_3D_SIZE";

/// How malformed lines are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Keep best-effort values and finish the load.
    #[default]
    Tolerant,
    /// Finish reading, then fail if any sample or size line was malformed.
    Strict,
}

/// Kind of irregular line found while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Sample line that did not scan as three numbers.
    MalformedSample,
    /// `LUT_3D_SIZE` line without a usable positive integer.
    MalformedSize,
    /// Data line before any size directive; ignored.
    SampleBeforeSize,
    /// Data line after the cube was full; ignored.
    ExtraSample,
    /// Keyword line such as `TITLE` or `DOMAIN_MIN`; skipped.
    Directive,
}

impl IssueKind {
    /// Returns `true` for issues that [`ParseMode::Strict`] rejects.
    #[inline]
    pub fn is_malformed(self) -> bool {
        matches!(self, Self::MalformedSample | Self::MalformedSize)
    }
}

/// One irregular line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineIssue {
    /// 1-based line number
    pub line: usize,
    /// What was wrong with it
    pub kind: IssueKind,
    /// The trimmed line text
    pub text: String,
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {:?}: {}", self.line, self.kind, self.text)
    }
}

/// Outcome of a load: the cube plus what happened while reading it.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The loaded cube, `size^3` samples
    pub lut: Lut3D,
    /// Size as written in the file, before clamping
    pub declared_size: Option<usize>,
    /// Number of sample lines stored
    pub samples_read: usize,
    /// Irregular lines in file order
    pub issues: Vec<LineIssue>,
}

impl LoadReport {
    /// Returns `true` if the file provided fewer than `size^3` samples.
    pub fn is_partial(&self) -> bool {
        self.samples_read < self.lut.entry_count()
    }

    /// Returns `true` if the declared size exceeded [`MAX_LUT_SIZE`].
    pub fn was_clamped(&self) -> bool {
        self.declared_size.is_some_and(|d| d > self.lut.size())
    }

    /// Issues that [`ParseMode::Strict`] would reject.
    pub fn malformed(&self) -> impl Iterator<Item = &LineIssue> {
        self.issues.iter().filter(|i| i.kind.is_malformed())
    }
}

/// Loads a 3D LUT from a .cube file with [`ParseMode::Tolerant`].
///
/// # Errors
///
/// - [`LutError::SourceUnavailable`] if the file cannot be opened or read
/// - [`LutError::DegenerateLut`] if no `LUT_3D_SIZE` directive was found
pub fn load<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    load_with(path, ParseMode::Tolerant).map(|report| report.lut)
}

/// Loads a 3D LUT from a .cube file and returns the full [`LoadReport`].
pub fn load_with<P: AsRef<Path>>(path: P, mode: ParseMode) -> LutResult<LoadReport> {
    let path = path.as_ref();
    let unavailable = |source| LutError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unavailable)?;
    let report = parse_with(BufReader::new(file), mode).map_err(|e| match e {
        LutError::Io(source) => unavailable(source),
        other => other,
    })?;

    info!(
        path = %path.display(),
        size = report.lut.size(),
        entries = report.lut.entry_count(),
        samples = report.samples_read,
        "Loaded LUT"
    );
    Ok(report)
}

/// Parses a 3D LUT from a reader with [`ParseMode::Tolerant`].
pub fn parse<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    parse_with(reader, ParseMode::Tolerant).map(|report| report.lut)
}

/// Parses a 3D LUT from a reader.
///
/// Bytes that are not valid UTF-8 are replaced, so a stray binary byte only
/// spoils the line it sits on.
pub fn parse_with<R: BufRead>(mut reader: R, mode: ParseMode) -> LutResult<LoadReport> {
    let mut parser = CubeParser::default();
    let mut buf = Vec::with_capacity(128);
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let text = String::from_utf8_lossy(&buf);
        parser.feed(line_no, text.trim());
    }

    parser.finish(mode)
}

#[derive(Default)]
struct CubeParser {
    lut: Option<Lut3D>,
    cursor: usize,
    declared: Option<usize>,
    issues: Vec<LineIssue>,
}

impl CubeParser {
    fn feed(&mut self, line_no: usize, line: &str) {
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some(rest) = line.strip_prefix(SIZE_KEYWORD) {
            match scan_int(rest) {
                Some(n) if n > 0 => self.declare(n),
                _ => self.note(line_no, IssueKind::MalformedSize, line),
            }
            return;
        }

        if is_directive(line) {
            trace!(line = line_no, "Skipping directive: {}", line);
            self.note(line_no, IssueKind::Directive, line);
            return;
        }

        let Some(lut) = self.lut.as_mut() else {
            self.note(line_no, IssueKind::SampleBeforeSize, line);
            return;
        };
        if self.cursor >= lut.entry_count() {
            self.note(line_no, IssueKind::ExtraSample, line);
            return;
        }

        let (sample, complete) = scan_sample(line);
        lut.set_flat(self.cursor, sample);
        self.cursor += 1;
        if !complete {
            self.note(line_no, IssueKind::MalformedSample, line);
        }
    }

    fn declare(&mut self, requested: u64) {
        let requested = usize::try_from(requested).unwrap_or(usize::MAX);
        let size = requested.min(MAX_LUT_SIZE);
        if requested > MAX_LUT_SIZE {
            warn!(requested, size, "LUT size exceeds limit, clamping");
        }
        debug!(size, "LUT size");

        // A later directive replaces whatever was collected so far.
        self.lut = Some(Lut3D::with_size(size));
        self.cursor = 0;
        self.declared = Some(requested);
    }

    fn note(&mut self, line: usize, kind: IssueKind, text: &str) {
        self.issues.push(LineIssue {
            line,
            kind,
            text: text.to_string(),
        });
    }

    fn finish(self, mode: ParseMode) -> LutResult<LoadReport> {
        let lut = self.lut.ok_or(LutError::DegenerateLut)?;

        let malformed = self.issues.iter().filter(|i| i.kind.is_malformed()).count();
        if malformed > 0 {
            if mode == ParseMode::Strict {
                let issues = self
                    .issues
                    .into_iter()
                    .filter(|i| i.kind.is_malformed())
                    .collect();
                return Err(LutError::Malformed { issues });
            }
            warn!(count = malformed, "Tolerated malformed LUT lines");
        }

        if self.cursor < lut.entry_count() {
            warn!(
                expected = lut.entry_count(),
                found = self.cursor,
                "LUT ended early, remaining entries stay zero"
            );
        }

        Ok(LoadReport {
            lut,
            declared_size: self.declared,
            samples_read: self.cursor,
            issues: self.issues,
        })
    }
}

/// Keyword lines such as `TITLE`, `DOMAIN_MIN` or `LUT_1D_SIZE`.
///
/// A leading token that scans as a number (`NAN`, `INF`) makes the line a
/// sample instead.
fn is_directive(line: &str) -> bool {
    let token = line.split_whitespace().next().unwrap_or("");
    if scan_float(token).is_some() {
        return false;
    }
    token.starts_with(|c: char| c.is_ascii_uppercase())
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Leading integer of `s`, `%d` style: optional sign, then digits.
fn scan_int(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits[..end].parse().unwrap_or(u64::MAX))
}

/// Scans up to three floats `%f %f %f` style.
///
/// Returns the sample (unscanned components are zero) and whether all three
/// components were read cleanly.
fn scan_sample(line: &str) -> (Vec3f, bool) {
    let mut rgb = [0.0f32; 3];
    let mut tokens = line.split_whitespace();

    for slot in rgb.iter_mut() {
        let Some((value, whole)) = tokens.next().and_then(scan_float) else {
            return (Vec3f::from_array(rgb), false);
        };
        *slot = value;
        if !whole {
            // The unparsed tail of the token stops the scan.
            return (Vec3f::from_array(rgb), false);
        }
    }

    (Vec3f::from_array(rgb), true)
}

/// Longest float prefix of a token, and whether it covered the whole token.
fn scan_float(token: &str) -> Option<(f32, bool)> {
    if let Ok(v) = token.parse::<f32>() {
        return Some((v, true));
    }
    (1..token.len())
        .rev()
        .filter(|&end| token.is_char_boundary(end))
        .find_map(|end| token[..end].parse::<f32>().ok())
        .map(|v| (v, false))
}

/// Writes a 3D LUT to a .cube file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = Lut3D::identity(33);
/// cube::write("identity.cube", &lut)?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, lut: &Lut3D) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, lut)?;
    writer.flush()?;
    Ok(())
}

/// Writes a 3D LUT in .cube text form.
pub fn write_to<W: Write>(mut writer: W, lut: &Lut3D) -> LutResult<()> {
    if lut.is_empty() {
        return Err(LutError::InvalidSize("cannot write an empty LUT".into()));
    }

    writeln!(writer, "# Generated by lutcam")?;
    writeln!(writer, "{} {}", SIZE_KEYWORD, lut.size())?;
    writeln!(writer)?;

    // Flat order is already red fastest
    for s in lut.samples() {
        writeln!(writer, "{:.6} {:.6} {:.6}", s.r, s.g, s.b)?;
    }

    Ok(())
}
