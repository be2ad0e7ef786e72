use std::path::Path;

use log::info;

use crate::config::loader_config::LoaderConfig;
use crate::data::class_map::ClassMap;
use crate::data::record::Record;
use crate::data::split::{shuffle, split_sizes, SplitRanges};
use crate::error::{DataError, Result};
use crate::idx::reader::{read_feature_file, read_label_file};

/// Owns a dataset read from IDX files and the train / test / validation
/// partition over it.
///
/// Subsets are index ranges into the single owned `Vec<Record>`; the
/// accessors hand out borrowed slices, so no record is ever copied and a
/// subset cannot outlive the handler.
///
/// Typical use:
/// ```no_run
/// use std::path::Path;
/// use ferrite_data::{DataHandler, LoaderConfig};
///
/// let mut handler = DataHandler::new(LoaderConfig::default());
/// handler.read_feature_vector(Path::new("train-images-idx3-ubyte"))?;
/// handler.read_feature_labels(Path::new("train-labels-idx1-ubyte"))?;
/// handler.count_classes();
/// handler.split_data()?;
/// println!("{} training records", handler.training_data().len());
/// # Ok::<(), ferrite_data::DataError>(())
/// ```
#[derive(Debug, Default)]
pub struct DataHandler {
    config: LoaderConfig,
    records: Vec<Record>,
    class_map: ClassMap,
    feature_len: usize,
    split: SplitRanges,
}

impl DataHandler {
    pub fn new(config: LoaderConfig) -> DataHandler {
        DataHandler { config, ..Default::default() }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Overrides the shuffle seed used by the next `split_data`.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
    }

    /// Reads features then labels, and enumerates classes.
    pub fn load(&mut self, features: &Path, labels: &Path) -> Result<()> {
        self.read_feature_vector(features)?;
        self.read_feature_labels(labels)?;
        self.count_classes();
        Ok(())
    }

    /// Reads every sample of the feature file at `path` and appends one
    /// `Record` per sample to the collection.
    ///
    /// Nothing is appended if the read fails. Any previous split is discarded.
    pub fn read_feature_vector(&mut self, path: &Path) -> Result<()> {
        let (header, samples) = read_feature_file(path, self.config.strict)?;

        // The reader has already rejected headers whose size overflows.
        self.feature_len = header.sample_size().unwrap_or_default();
        self.records.extend(samples.into_iter().map(Record::new));
        self.split = SplitRanges::default();

        info!("stored features, collection size: {}", self.records.len());
        Ok(())
    }

    /// Reads the label file at `path` and sets label `i` on record `i`.
    ///
    /// The label count must equal the record count; otherwise no record is
    /// touched and the call fails.
    pub fn read_feature_labels(&mut self, path: &Path) -> Result<()> {
        let (_, labels) = read_label_file(path, self.config.strict)?;

        if labels.len() > self.records.len() {
            return Err(DataError::LabelCountExceedsRecords {
                labels: labels.len(),
                records: self.records.len(),
            });
        }
        if labels.len() < self.records.len() {
            return Err(DataError::CountMismatch {
                records: self.records.len(),
                labels: labels.len(),
            });
        }

        for (record, label) in self.records.iter_mut().zip(labels) {
            record.set_label(label);
        }

        info!("stored labels, collection size: {}", self.records.len());
        Ok(())
    }

    /// Assigns every record a dense class index, in first-seen order of raw
    /// labels over the current collection order. Returns the class count.
    pub fn count_classes(&mut self) -> usize {
        for record in &mut self.records {
            let class = self.class_map.insert_or_get(record.label());
            record.set_enumerated_label(class);
        }
        info!("extracted {} unique classes", self.class_map.len());
        self.class_map.len()
    }

    /// Shuffles the collection and partitions it into training, test and
    /// validation ranges by the configured percentages.
    pub fn split_data(&mut self) -> Result<()> {
        self.config.validate()?;

        let (train, test, validation) = split_sizes(
            self.records.len(),
            self.config.train_percent,
            self.config.test_percent,
        );

        shuffle(&mut self.records, self.config.seed);
        self.split = SplitRanges::from_sizes(train, test, validation);

        info!("training data size: {}", train);
        info!("test data size: {}", test);
        info!("validation data size: {}", validation);
        Ok(())
    }

    pub fn training_data(&self) -> &[Record] {
        &self.records[self.split.train.clone()]
    }

    pub fn test_data(&self) -> &[Record] {
        &self.records[self.split.test.clone()]
    }

    pub fn validation_data(&self) -> &[Record] {
        &self.records[self.split.validation.clone()]
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn num_classes(&self) -> usize {
        self.class_map.len()
    }

    pub fn class_map(&self) -> &ClassMap {
        &self.class_map
    }

    /// `rows * cols` of the most recently read feature file.
    pub fn feature_len(&self) -> usize {
        self.feature_len
    }
}

#[cfg(test)]
impl DataHandler {
    pub(crate) fn from_records(config: LoaderConfig, records: Vec<Record>) -> DataHandler {
        DataHandler { config, records, ..Default::default() }
    }
}
