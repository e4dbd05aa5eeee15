//! BM25 scoring and query ranking over [`InvertedIndex`].
//!
//! Two different IDF quantities live here on purpose: [`InvertedIndex::bm25_idf`]
//! is the BM25 variant `ln((N - n + 0.5) / (n + 0.5) + 1)`, while
//! [`InvertedIndex::plain_idf`] is the simpler `ln((N + 1) / (n + 1))` used by
//! the plain TF-IDF commands. They are not interchangeable.

use crate::index::{DocId, InvertedIndex};
use crate::tokenizer::{normalize, normalize_term};
use crate::Error;

/// BM25 tuning parameters.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Document-length normalization strength.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

impl InvertedIndex {
    /// BM25 inverse document frequency of a single term. Always >= 0.
    pub fn bm25_idf(&self, term: &str) -> Result<f64, Error> {
        let token = normalize_term(term)?;
        Ok(self.idf_token(&token))
    }

    /// Plain inverse document frequency, `ln((N + 1) / (n + 1))`. Kept
    /// deliberately separate from [`Self::bm25_idf`].
    pub fn plain_idf(&self, term: &str) -> Result<f64, Error> {
        let token = normalize_term(term)?;
        let total = self.num_docs() as f64;
        let matching = self.matching_docs(&token) as f64;
        Ok(((total + 1.0) / (matching + 1.0)).ln())
    }

    /// Saturated, length-normalized term-frequency component of BM25.
    ///
    /// Fails with `DocNotFound` for ids the index has never seen. An index
    /// whose documents all normalized to zero tokens has average length 0;
    /// the score is then defined as 0.0 instead of dividing by it.
    pub fn bm25_tf(&self, doc_id: DocId, term: &str, params: Bm25Params) -> Result<f64, Error> {
        let token = normalize_term(term)?;
        self.bm25_tf_token(doc_id, &token, params)
    }

    /// Full BM25 contribution of one term to one document, with default
    /// parameters.
    pub fn bm25(&self, doc_id: DocId, term: &str) -> Result<f64, Error> {
        let token = normalize_term(term)?;
        self.bm25_token(doc_id, &token)
    }

    /// Rank every indexed document against `query` by summed BM25 score.
    ///
    /// The query runs through the same normalizer as indexed text, without a
    /// stopword set. Documents sharing no term with the query stay in the
    /// ranking with score 0. Ordering is deterministic: score descending,
    /// ties broken by ascending doc id. Returns at most `limit` entries.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<(DocId, f64)>, Error> {
        let tokens = normalize(query, None);
        let mut scored: Vec<(DocId, f64)> = Vec::with_capacity(self.num_docs());
        for &doc_id in self.docmap.keys() {
            let mut total = 0.0;
            for token in &tokens {
                total += self.bm25_token(doc_id, token)?;
            }
            scored.push((doc_id, total));
        }
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(limit);
        Ok(scored)
    }

    fn matching_docs(&self, token: &str) -> usize {
        self.postings.get(token).map_or(0, |ids| ids.len())
    }

    fn idf_token(&self, token: &str) -> f64 {
        let total = self.num_docs() as f64;
        let matching = self.matching_docs(token) as f64;
        ((total - matching + 0.5) / (matching + 0.5) + 1.0).ln()
    }

    fn tf_token(&self, doc_id: DocId, token: &str) -> u32 {
        self.term_frequencies
            .get(&doc_id)
            .and_then(|tf| tf.get(token))
            .copied()
            .unwrap_or(0)
    }

    fn bm25_tf_token(&self, doc_id: DocId, token: &str, params: Bm25Params) -> Result<f64, Error> {
        let doc_len = self
            .doc_lengths
            .get(&doc_id)
            .copied()
            .ok_or(Error::DocNotFound { doc_id })?;
        let avg = self.avg_doc_length();
        if avg == 0.0 {
            return Ok(0.0);
        }
        let tf = f64::from(self.tf_token(doc_id, token));
        let length_norm = 1.0 - params.b + params.b * (f64::from(doc_len) / avg);
        Ok((tf * (params.k1 + 1.0)) / (tf + params.k1 * length_norm))
    }

    fn bm25_token(&self, doc_id: DocId, token: &str) -> Result<f64, Error> {
        let tf_score = self.bm25_tf_token(doc_id, token, Bm25Params::default())?;
        Ok(tf_score * self.idf_token(token))
    }
}
