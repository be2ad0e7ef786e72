use std::collections::HashMap;

/// Maps raw label bytes to dense class indices, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    index: HashMap<u8, usize>,
    order: Vec<u8>,
}

impl ClassMap {
    pub fn new() -> ClassMap {
        ClassMap::default()
    }

    /// Returns the class index of `raw`, assigning the next one if unseen.
    pub fn insert_or_get(&mut self, raw: u8) -> usize {
        if let Some(&class) = self.index.get(&raw) {
            return class;
        }
        let class = self.order.len();
        self.index.insert(raw, class);
        self.order.push(raw);
        class
    }

    pub fn get(&self, raw: u8) -> Option<usize> {
        self.index.get(&raw).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(raw label, class index)` pairs in class-index order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.order.iter().enumerate().map(|(class, &raw)| (raw, class))
    }
}
