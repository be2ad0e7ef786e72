//! Streaming readers for IDX feature (IDX3) and label (IDX1) files.
//!
//! # Feature file layout
//! ```text
//! bytes  0-3:   magic       (0x00000803 for MNIST images, big-endian u32)
//! bytes  4-7:   N           (number of samples, big-endian u32)
//! bytes  8-11:  rows        (big-endian u32)
//! bytes 12-15:  cols        (big-endian u32)
//! bytes 16..:   N * rows * cols bytes, sample-major, uint8
//! ```
//!
//! # Label file layout
//! ```text
//! bytes  0-3:   magic       (0x00000801 for MNIST labels, big-endian u32)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, one raw label per sample
//! ```
//!
//! Both readers pull bytes sequentially from any `Read`, so the same code
//! serves files on disk and in-memory buffers in tests.
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{DataError, Result};
use crate::idx::header::{
    decode_be_u32, hex_bytes, FeatureHeader, IdxMagic, LabelHeader, FEATURE_MAGIC, LABEL_MAGIC,
};

const FEATURE_HEADER_WORDS: usize = 4;
const LABEL_HEADER_WORDS: usize = 2;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Opens `path` and reads every sample of a feature file.
///
/// Returns the parsed header and one `Vec<u8>` of length `rows * cols` per
/// sample, in file order.
pub fn read_feature_file(path: &Path, strict: bool) -> Result<(FeatureHeader, Vec<Vec<u8>>)> {
    let mut reader = open(path)?;
    read_features(&mut reader, path, strict)
}

/// Opens `path` and reads every raw label of a label file.
pub fn read_label_file(path: &Path, strict: bool) -> Result<(LabelHeader, Vec<u8>)> {
    let mut reader = open(path)?;
    read_labels(&mut reader, path, strict)
}

/// Reads a feature file from an arbitrary byte stream.
///
/// `path` is only used to label errors and log lines.
pub fn read_features<R: Read>(
    reader: &mut R,
    path: &Path,
    strict: bool,
) -> Result<(FeatureHeader, Vec<Vec<u8>>)> {
    let words = read_header_words(reader, path, FEATURE_HEADER_WORDS)?;
    let header = FeatureHeader {
        magic: IdxMagic(words[0]),
        samples: words[1] as usize,
        rows: words[2] as usize,
        cols: words[3] as usize,
    };
    check_magic(path, header.magic, FEATURE_MAGIC, strict)?;

    info!(
        "{}: magic {}, {} samples of {}x{}",
        path.display(),
        header.magic,
        header.samples,
        header.rows,
        header.cols
    );

    let sample_size = match header.data_len().and(header.sample_size()) {
        Some(size) if size > 0 || header.samples == 0 => size,
        _ => {
            return Err(DataError::InvalidDimensions {
                path: path.to_path_buf(),
                samples: header.samples,
                rows: header.rows,
                cols: header.cols,
            })
        }
    };

    let mut samples = Vec::new();
    for sample in 0..header.samples {
        let buf = read_up_to(reader, sample_size).map_err(|e| DataError::from_io(path, e))?;
        if buf.len() < sample_size {
            return Err(DataError::TruncatedSample {
                path: path.to_path_buf(),
                sample,
                offset: buf.len(),
                sample_size,
            });
        }
        samples.push(buf);
    }

    info!("{}: read {} feature vectors", path.display(), samples.len());
    Ok((header, samples))
}

/// Reads a label file from an arbitrary byte stream.
pub fn read_labels<R: Read>(
    reader: &mut R,
    path: &Path,
    strict: bool,
) -> Result<(LabelHeader, Vec<u8>)> {
    let words = read_header_words(reader, path, LABEL_HEADER_WORDS)?;
    let header = LabelHeader {
        magic: IdxMagic(words[0]),
        labels: words[1] as usize,
    };
    check_magic(path, header.magic, LABEL_MAGIC, strict)?;

    info!(
        "{}: magic {}, {} labels",
        path.display(),
        header.magic,
        header.labels
    );

    let labels = read_up_to(reader, header.labels).map_err(|e| DataError::from_io(path, e))?;
    if labels.len() < header.labels {
        return Err(DataError::TruncatedLabels {
            path: path.to_path_buf(),
            index: labels.len(),
            declared: header.labels,
        });
    }

    Ok((header, labels))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| DataError::from_io(path, e))?;
    Ok(BufReader::new(file))
}

/// Reads `count` big-endian header words, logging each one's raw bytes.
fn read_header_words<R: Read>(reader: &mut R, path: &Path, count: usize) -> Result<Vec<u32>> {
    let mut words = Vec::with_capacity(count);
    for word in 0..count {
        let mut bytes = [0u8; 4];
        let filled = fill(reader, &mut bytes).map_err(|e| DataError::from_io(path, e))?;
        if filled < bytes.len() {
            return Err(DataError::TruncatedHeader {
                path: path.to_path_buf(),
                word,
                expected_words: count,
            });
        }
        debug!("raw bytes for header[{}]: {}", word, hex_bytes(&bytes));
        words.push(decode_be_u32(bytes));
    }
    Ok(words)
}

fn check_magic(path: &Path, magic: IdxMagic, expected: u32, strict: bool) -> Result<()> {
    if magic.0 == expected {
        return Ok(());
    }
    if strict {
        return Err(DataError::InvalidMagic {
            path: path.to_path_buf(),
            expected,
            got: magic.0,
        });
    }
    warn!(
        "{}: unexpected magic {} (expected {:#010x}), continuing",
        path.display(),
        magic,
        expected
    );
    Ok(())
}

/// Reads at most `len` bytes. The buffer grows with the bytes that actually
/// arrive, so a header that overstates the data cannot force a huge allocation.
fn read_up_to<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Reads until `buf` is full or the stream ends; returns the bytes filled.
///
/// Unlike `read_exact`, a short read still reports how far it got.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
