use crate::idx::header::{FEATURE_MAGIC, LABEL_MAGIC};

/// Builds the bytes of an IDX3 feature file holding `samples`, each
/// `rows * cols` bytes long. Used by tests to fabricate files.
pub fn build_idx3_bytes(samples: &[&[u8]], rows: u32, cols: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + samples.iter().map(|s| s.len()).sum::<usize>());
    buf.extend_from_slice(&FEATURE_MAGIC.to_be_bytes());
    buf.extend_from_slice(&(samples.len() as u32).to_be_bytes());
    buf.extend_from_slice(&rows.to_be_bytes());
    buf.extend_from_slice(&cols.to_be_bytes());
    for sample in samples {
        buf.extend_from_slice(sample);
    }
    buf
}

/// Builds the bytes of an IDX1 label file.
pub fn build_idx1_bytes(labels: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + labels.len());
    buf.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
    buf.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    buf.extend_from_slice(labels);
    buf
}
