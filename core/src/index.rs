use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::tokenizer::{normalize, normalize_term};
use crate::Error;

pub type DocId = u32;

/// One movie record. Title and description together form the indexed text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub description: String,
}

/// Inverted index over one corpus snapshot.
///
/// The four maps are built together and persisted together; scoring assumes
/// docmap and doc_lengths share the same key set. Not safe for concurrent
/// mutation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    /// term -> ids of documents containing it. A `BTreeSet` keeps the ids
    /// deduplicated and sorted, and serializes as a sorted sequence.
    pub(crate) postings: HashMap<String, BTreeSet<DocId>>,
    pub(crate) docmap: HashMap<DocId, Document>,
    /// doc id -> (term -> occurrence count in that document's combined text).
    pub(crate) term_frequencies: HashMap<DocId, HashMap<String, u32>>,
    /// doc id -> token count after normalization.
    pub(crate) doc_lengths: HashMap<DocId, u32>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the index from a full corpus snapshot.
    ///
    /// Duplicate ids are last-write-wins for the stored document and its
    /// recorded length; their token occurrences still accumulate into the
    /// frequency and posting tables. Rebuilding a fresh index from the same
    /// corpus and stopword set yields an identical index.
    pub fn build(
        &mut self,
        documents: impl IntoIterator<Item = Document>,
        stopwords: Option<&HashSet<String>>,
    ) {
        for doc in documents {
            let combined = format!("{} {}", doc.title, doc.description);
            let tokens = normalize(&combined, stopwords);
            let doc_id = doc.id;
            self.docmap.insert(doc_id, doc);
            self.doc_lengths.insert(doc_id, tokens.len() as u32);
            let tf = self.term_frequencies.entry(doc_id).or_default();
            for token in tokens {
                self.postings.entry(token.clone()).or_default().insert(doc_id);
                *tf.entry(token).or_insert(0) += 1;
            }
        }
        tracing::info!(
            num_docs = self.docmap.len(),
            num_terms = self.postings.len(),
            "index built"
        );
    }

    /// Ids of documents containing `term`, ascending. The term is lowercased
    /// but otherwise looked up as-is; callers holding raw user input should
    /// normalize first.
    pub fn get_documents(&self, term: &str) -> Vec<DocId> {
        let term = term.to_lowercase();
        self.postings
            .get(&term)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Term frequency of a single term in a document; 0 when either the
    /// document or the term is absent. Multi-token input is rejected.
    pub fn get_tf(&self, doc_id: DocId, term: &str) -> Result<u32, Error> {
        let token = normalize_term(term)?;
        Ok(self
            .term_frequencies
            .get(&doc_id)
            .and_then(|tf| tf.get(&token))
            .copied()
            .unwrap_or(0))
    }

    pub fn document(&self, doc_id: DocId) -> Option<&Document> {
        self.docmap.get(&doc_id)
    }

    pub fn num_docs(&self) -> usize {
        self.docmap.len()
    }

    /// Token count of a document's combined text, `None` for unknown ids.
    pub fn doc_length(&self, doc_id: DocId) -> Option<u32> {
        self.doc_lengths.get(&doc_id).copied()
    }

    /// Mean token count over all indexed documents; 0.0 only when the index
    /// is empty.
    pub fn avg_doc_length(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        let total: u64 = self.doc_lengths.values().map(|&len| u64::from(len)).sum();
        total as f64 / self.doc_lengths.len() as f64
    }
}
