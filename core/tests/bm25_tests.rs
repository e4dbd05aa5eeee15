use cinedex_core::{Bm25Params, Document, Error, InvertedIndex};

fn doc(id: u32, title: &str, description: &str) -> Document {
    Document { id, title: title.into(), description: description.into() }
}

/// Two docs with trivially stemmed terms: doc 1 = "hacker hacker code"
/// (3 tokens), doc 2 = "code code code code" (4 tokens), avg length 3.5.
fn tiny_corpus() -> InvertedIndex {
    let mut ix = InvertedIndex::new();
    ix.build(
        vec![doc(1, "hacker", "hacker code"), doc(2, "code", "code code code")],
        None,
    );
    ix
}

fn matrix_corpus() -> InvertedIndex {
    let mut ix = InvertedIndex::new();
    ix.build(
        vec![
            doc(1, "The Matrix", "A hacker discovers reality is a simulation"),
            doc(2, "Matrix Reloaded", "The hacker returns"),
        ],
        None,
    );
    ix
}

#[test]
fn bm25_idf_matches_formula() {
    let ix = tiny_corpus();
    // "hacker" appears in 1 of 2 docs: ln((2 - 1 + 0.5) / (1 + 0.5) + 1) = ln 2
    let expected = ((2.0_f64 - 1.0 + 0.5) / (1.0 + 0.5) + 1.0).ln();
    assert!((ix.bm25_idf("hacker").unwrap() - expected).abs() < 1e-12);
    // "code" appears in both docs: ln((2 - 2 + 0.5) / (2 + 0.5) + 1)
    let expected = ((0.5_f64) / (2.5) + 1.0).ln();
    assert!((ix.bm25_idf("code").unwrap() - expected).abs() < 1e-12);
}

#[test]
fn bm25_tf_matches_formula() {
    let ix = tiny_corpus();
    let params = Bm25Params::default();
    let length_norm = 1.0 - 0.75 + 0.75 * (3.0 / 3.5);
    let expected = (2.0 * (1.2 + 1.0)) / (2.0 + 1.2 * length_norm);
    assert!((ix.bm25_tf(1, "hacker", params).unwrap() - expected).abs() < 1e-12);
}

#[test]
fn bm25_is_tf_times_idf() {
    let ix = tiny_corpus();
    let tf = ix.bm25_tf(1, "hacker", Bm25Params::default()).unwrap();
    let idf = ix.bm25_idf("hacker").unwrap();
    assert!((ix.bm25(1, "hacker").unwrap() - tf * idf).abs() < 1e-12);
}

#[test]
fn idf_is_non_increasing_in_matching_docs() {
    let ix = tiny_corpus();
    // "hacker" matches 1 doc, "code" matches 2, corpus size fixed
    assert!(ix.bm25_idf("hacker").unwrap() > ix.bm25_idf("code").unwrap());
}

#[test]
fn tf_score_is_non_decreasing_in_raw_frequency() {
    // Equal lengths so length normalization is held fixed.
    let mut ix = InvertedIndex::new();
    ix.build(
        vec![doc(1, "code", "code"), doc(2, "code", "cat")],
        None,
    );
    let params = Bm25Params::default();
    let high = ix.bm25_tf(1, "code", params).unwrap();
    let low = ix.bm25_tf(2, "code", params).unwrap();
    assert!(high > low);
}

#[test]
fn plain_idf_is_a_different_quantity() {
    let ix = tiny_corpus();
    let plain = ix.plain_idf("hacker").unwrap();
    let expected = ((2.0_f64 + 1.0) / (1.0 + 1.0)).ln();
    assert!((plain - expected).abs() < 1e-12);
    assert!((plain - ix.bm25_idf("hacker").unwrap()).abs() > 1e-3);
}

#[test]
fn scoring_unknown_doc_is_not_found() {
    let ix = tiny_corpus();
    assert!(matches!(
        ix.bm25_tf(99, "hacker", Bm25Params::default()),
        Err(Error::DocNotFound { doc_id: 99 })
    ));
    assert!(matches!(ix.bm25(99, "hacker"), Err(Error::DocNotFound { .. })));
}

#[test]
fn all_empty_documents_score_zero_instead_of_dividing() {
    let mut ix = InvertedIndex::new();
    ix.build(vec![doc(1, "", "")], None);
    assert_eq!(ix.avg_doc_length(), 0.0);
    let score = ix.bm25_tf(1, "hacker", Bm25Params::default()).unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn search_ranks_shorter_matching_doc_first() {
    let ix = matrix_corpus();
    // Both docs contain "hacker" once; doc 2 is shorter (5 vs 9 tokens,
    // avg 7), so its saturated tf is larger and it ranks first.
    let hits = ix.search("hacker", 1).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, 2);

    let idf = ((2.0_f64 - 2.0 + 0.5) / (2.0 + 0.5) + 1.0).ln();
    let length_norm = 1.0 - 0.75 + 0.75 * (5.0 / 7.0);
    let expected = idf * (1.0 * 2.2) / (1.0 + 1.2 * length_norm);
    assert!((hits[0].1 - expected).abs() < 1e-12);
}

#[test]
fn search_keeps_zero_overlap_docs_with_score_zero() {
    let ix = matrix_corpus();
    let hits = ix.search("zebra", 10).unwrap();
    assert_eq!(hits, vec![(1, 0.0), (2, 0.0)]);
}

#[test]
fn search_breaks_ties_by_ascending_doc_id() {
    let mut ix = InvertedIndex::new();
    ix.build(
        vec![doc(7, "code cat", ""), doc(3, "code cat", "")],
        None,
    );
    let hits = ix.search("code", 10).unwrap();
    assert_eq!(hits[0].0, 3);
    assert_eq!(hits[1].0, 7);
    assert_eq!(hits[0].1, hits[1].1);
}

#[test]
fn search_respects_limit_bounds() {
    let ix = matrix_corpus();
    assert!(ix.search("hacker", 0).unwrap().is_empty());
    assert_eq!(ix.search("hacker", 100).unwrap().len(), 2);

    let hits = ix.search("matrix hacker", 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].1 >= hits[1].1);
}

#[test]
fn search_on_empty_index_returns_nothing() {
    let ix = InvertedIndex::new();
    assert!(ix.search("hacker", 5).unwrap().is_empty());
}
