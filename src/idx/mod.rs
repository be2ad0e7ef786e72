pub mod header;
pub mod reader;
pub mod fixture;

pub use header::{decode_be_u32, FeatureHeader, IdxMagic, LabelHeader};
pub use reader::{read_feature_file, read_label_file};
pub use fixture::{build_idx1_bytes, build_idx3_bytes};
