pub mod record;
pub mod class_map;
pub mod split;
pub mod handler;

pub use record::Record;
pub use class_map::ClassMap;
pub use split::{split_sizes, SplitRanges};
pub use handler::DataHandler;
