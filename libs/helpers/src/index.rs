use std::collections::BTreeMap;
use std::ops::Bound;

use rand::{rngs::StdRng, SeedableRng};

use crate::columns::random_keys;
use postings_index::{Operator, OrderedPostingsIndex, RowId};

/// A random byte column together with the index built over it and a grouped
/// reference view used to compute expected query results naively.
pub struct TestColumn {
    pub column: Vec<Vec<u8>>,
    pub index: OrderedPostingsIndex,
    groups: BTreeMap<Vec<u8>, Vec<RowId>>,
}

impl TestColumn {
    pub fn new(width: usize, length: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        let column = random_keys(width, length, &mut rng);

        let mut index = OrderedPostingsIndex::new();
        let mut groups = BTreeMap::<Vec<u8>, Vec<RowId>>::new();
        for (row, key) in column.iter().enumerate() {
            let row = row as RowId;
            index.insert(key, row);
            groups.entry(key.clone()).or_default().push(row);
        }

        Self {
            column,
            index,
            groups,
        }
    }

    /// Row ids the query must return, computed from the reference view:
    /// Equal lists one key's rows in insertion order; Less/LessEqual walk
    /// the qualifying keys in descending order, rows in insertion order
    /// within each key.
    pub fn expected_rows(&self, key: &[u8], op: Operator) -> Vec<RowId> {
        match op {
            Operator::Equal => self.groups.get(key).cloned().unwrap_or_default(),
            Operator::Less => self
                .groups
                .range::<[u8], _>((Bound::Unbounded, Bound::Excluded(key)))
                .rev()
                .flat_map(|(_, rows)| rows.iter().copied())
                .collect(),
            Operator::LessEqual => self
                .groups
                .range::<[u8], _>((Bound::Unbounded, Bound::Included(key)))
                .rev()
                .flat_map(|(_, rows)| rows.iter().copied())
                .collect(),
            op => panic!("no reference evaluation for operator {}", op),
        }
    }

    /// Distinct keys in ascending order, from the reference view
    pub fn expected_keys(&self) -> Vec<&[u8]> {
        self.groups.keys().map(|k| k.as_slice()).collect()
    }
}
