use anyhow::{Context, Result};
use cinedex_core::Document;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Deserialize)]
struct Corpus {
    movies: Vec<Document>,
}

/// Load the `{"movies": [...]}` corpus file.
pub fn load_movies(path: &Path) -> Result<Vec<Document>> {
    let file = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    let corpus: Corpus = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing corpus {}", path.display()))?;
    Ok(corpus.movies)
}

/// Load a stopword list, one lowercase word per line. Blank lines are
/// skipped.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    let file = File::open(path).with_context(|| format!("opening stopwords {}", path.display()))?;
    let mut words = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }
    Ok(words)
}
