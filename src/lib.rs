pub mod error;
pub mod idx;
pub mod data;
pub mod config;

// Convenience re-exports
pub use error::DataError;
pub use idx::header::decode_be_u32;
pub use data::record::Record;
pub use data::class_map::ClassMap;
pub use data::handler::DataHandler;
pub use config::loader_config::LoaderConfig;
