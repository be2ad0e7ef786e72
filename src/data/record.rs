/// One dataset sample: its raw feature bytes, the raw label read from the
/// label file, and the dense class index assigned by `DataHandler::count_classes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    features: Vec<u8>,
    label: u8,
    enumerated_label: Option<usize>,
}

impl Record {
    pub fn new(features: Vec<u8>) -> Record {
        Record { features, label: 0, enumerated_label: None }
    }

    pub fn features(&self) -> &[u8] {
        &self.features
    }

    /// Raw label byte; 0 until a label file has been attached.
    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn set_label(&mut self, label: u8) {
        self.label = label;
    }

    /// Class index in `[0, num_classes)`, or `None` before enumeration.
    pub fn enumerated_label(&self) -> Option<usize> {
        self.enumerated_label
    }

    pub fn set_enumerated_label(&mut self, class: usize) {
        self.enumerated_label = Some(class);
    }
}
