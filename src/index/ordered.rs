//! Ordered index over byte-comparable keys
//!
//! Keeps one postings list per distinct key, with keys in lexicographic
//! order, and answers Equal / Less / LessEqual predicates with a stateful
//! forward-only cursor over the matching row ids.

use log::debug;

use crate::base::{Len, Operator, QueryError, RowId};

/// A distinct key and the row ids that hold it, in insertion order
struct PostingsEntry {
    key: Vec<u8>,
    rows: Vec<RowId>,
}

/// Sorted sequence of postings entries, unique by key.
///
/// The index is insert-only and single-writer: build it in one thread, then
/// query it as much as you like. Insertion cost is linear in the number of
/// distinct keys (entries shift in the backing array), which is fine for a
/// build-once column index.
pub struct OrderedPostingsIndex {
    entries: Vec<PostingsEntry>,
}

impl OrderedPostingsIndex {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a row id to the postings list for `key`, creating the entry at
    /// its sorted position if the key is new
    pub fn insert(&mut self, key: &[u8], row: RowId) {
        match self
            .entries
            .binary_search_by(|e| e.key.as_slice().cmp(key))
        {
            Ok(ix) => self.entries[ix].rows.push(row),
            Err(ix) => self.entries.insert(
                ix,
                PostingsEntry {
                    key: key.to_vec(),
                    rows: vec![row],
                },
            ),
        }
    }

    /// Evaluates `column-value <op> key` and returns a cursor over the
    /// matching row ids.
    ///
    /// The call itself never fails: unsupported operators (Greater,
    /// GreaterEqual, NotEqual) come back as a cursor whose error state is
    /// set, so callers must check [`PostingsCursor::err`] even when the
    /// cursor reports no elements.
    pub fn query(&self, key: &[u8], op: Operator) -> PostingsCursor<'_> {
        // First entry whose key is >= the query key (lower bound)
        let ix = self.entries.partition_point(|e| e.key.as_slice() < key);
        let exact = ix < self.entries.len() && self.entries[ix].key == key;

        match op {
            Operator::Equal => {
                if exact {
                    PostingsCursor::Equal(EntryWalk::new(&self.entries, ix))
                } else {
                    PostingsCursor::Empty
                }
            }
            Operator::Less => {
                if ix == 0 {
                    PostingsCursor::Empty
                } else {
                    PostingsCursor::Descending(EntryWalk::new(&self.entries, ix - 1))
                }
            }
            Operator::LessEqual => {
                if exact {
                    PostingsCursor::Descending(EntryWalk::new(&self.entries, ix))
                } else if ix == 0 {
                    PostingsCursor::Empty
                } else {
                    PostingsCursor::Descending(EntryWalk::new(&self.entries, ix - 1))
                }
            }
            Operator::Greater | Operator::GreaterEqual | Operator::NotEqual => {
                debug!("unsupported operator {} on ordered index", op);
                PostingsCursor::Errored(QueryError::UnsupportedOperator(op))
            }
        }
    }

    /// Query dispatch from a raw operator code. Codes outside the defined
    /// set yield an errored cursor, keeping the "a query always returns a
    /// cursor" contract for callers working from untyped plans.
    pub fn query_code(&self, key: &[u8], code: u8) -> PostingsCursor<'_> {
        match Operator::try_from(code) {
            Ok(op) => self.query(key, op),
            Err(e) => PostingsCursor::Errored(e),
        }
    }

    /// Distinct keys, in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|e| e.key.as_slice())
    }
}

impl Default for OrderedPostingsIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Len for OrderedPostingsIndex {
    /// Number of distinct keys
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cursor position inside the entry array, shared by the live cursor
/// variants: `entry` is the current entry, `pos` the next offset within its
/// postings list.
pub struct EntryWalk<'a> {
    entries: &'a [PostingsEntry],
    entry: usize,
    pos: usize,
    current: Option<RowId>,
}

impl<'a> EntryWalk<'a> {
    fn new(entries: &'a [PostingsEntry], entry: usize) -> Self {
        Self {
            entries,
            entry,
            pos: 0,
            current: None,
        }
    }
}

/// A lazy, single-pass cursor over the row ids selected by a query.
///
/// The variant set is closed: Equal emits one entry's postings in insertion
/// order; Descending walks entries toward smaller keys, postings in
/// insertion order within each entry. There is deliberately no ascending
/// variant — Greater/GreaterEqual/NotEqual are not implemented, and adding
/// them later extends this enum under exhaustive matching.
pub enum PostingsCursor<'a> {
    /// No entry matches the query
    Empty,
    /// The query itself was invalid; see [`PostingsCursor::err`]
    Errored(QueryError),
    Equal(EntryWalk<'a>),
    Descending(EntryWalk<'a>),
}

impl PostingsCursor<'_> {
    /// Moves to the next row id. Returns false when the cursor is exhausted
    /// or errored; distinguish the two with [`PostingsCursor::err`].
    pub fn advance(&mut self) -> bool {
        match self {
            PostingsCursor::Empty | PostingsCursor::Errored(_) => false,
            PostingsCursor::Equal(w) => {
                match w.entries[w.entry].rows.get(w.pos) {
                    Some(&row) => {
                        w.current = Some(row);
                        w.pos += 1;
                        true
                    }
                    None => {
                        w.current = None;
                        false
                    }
                }
            }
            PostingsCursor::Descending(w) => loop {
                // Postings lists are never empty, so this settles in at
                // most two rounds
                if let Some(&row) = w.entries[w.entry].rows.get(w.pos) {
                    w.current = Some(row);
                    w.pos += 1;
                    break true;
                }
                if w.entry == 0 {
                    w.current = None;
                    break false;
                }
                w.entry -= 1;
                w.pos = 0;
            },
        }
    }

    /// Returns the row id under the cursor (can panic when the cursor was
    /// never advanced, or advanced past the end)
    pub fn current(&self) -> RowId {
        let current = match self {
            PostingsCursor::Empty | PostingsCursor::Errored(_) => None,
            PostingsCursor::Equal(w) | PostingsCursor::Descending(w) => w.current,
        };
        current.expect("cursor is not positioned on a row")
    }

    /// Terminal error state. Must be checked even after `advance` returns
    /// false: an errored cursor also reports no further elements.
    pub fn err(&self) -> Option<&QueryError> {
        match self {
            PostingsCursor::Errored(e) => Some(e),
            _ => None,
        }
    }
}

impl Iterator for PostingsCursor<'_> {
    type Item = RowId;

    fn next(&mut self) -> Option<RowId> {
        if self.advance() {
            Some(self.current())
        } else {
            None
        }
    }
}
