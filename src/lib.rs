mod tests;

pub mod base;
pub mod index {
    pub mod bitmap;
    pub mod ordered;
}

pub use base::{Len, Operator, QueryError, RowId};
pub use index::bitmap::BitmapPostingsIndex;
pub use index::ordered::{OrderedPostingsIndex, PostingsCursor};
