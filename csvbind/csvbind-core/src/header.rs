//! Column name → position index built from the header row.

use std::collections::HashMap;

/// Immutable mapping from column name to zero-based position.
///
/// Names are case-sensitive. When a name occurs more than once the last
/// occurrence wins; [`HeaderIndex::duplicates`] reports such names so callers
/// can reject them instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl HeaderIndex {
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        let mut duplicates = Vec::new();

        for (index, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), index).is_some() && !duplicates.contains(name) {
                duplicates.push(name.clone());
            }
        }

        Self {
            names,
            positions,
            duplicates,
        }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Column names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names that occur more than once, in order of their second occurrence.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HeaderIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
