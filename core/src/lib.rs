//! cinedex-core: inverted-index construction and BM25 ranking over a small
//! movie collection.
//!
//! The pipeline is one-directional: raw documents go through the tokenizer
//! into [`InvertedIndex::build`], the built index is persisted to a cache
//! directory via [`persist`], and a loaded index answers term-frequency, IDF,
//! and BM25 queries through [`bm25`].

pub mod bm25;
pub mod index;
pub mod persist;
pub mod tokenizer;

mod error;

pub use bm25::Bm25Params;
pub use error::Error;
pub use index::{DocId, Document, InvertedIndex};
