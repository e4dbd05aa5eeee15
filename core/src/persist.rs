use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::index::{DocId, Document, InvertedIndex};
use crate::Error;

/// Filesystem layout of a persisted index under a caller-chosen cache
/// directory. The location is always passed in explicitly so multiple
/// indexes (and tests) can coexist.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn postings(&self) -> PathBuf { self.root.join("postings.bin") }
    fn docmap(&self) -> PathBuf { self.root.join("docmap.bin") }
    fn term_frequencies(&self) -> PathBuf { self.root.join("term_frequencies.bin") }
    fn doc_lengths(&self) -> PathBuf { self.root.join("doc_lengths.bin") }
    fn all(&self) -> [PathBuf; 4] {
        [self.postings(), self.docmap(), self.term_frequencies(), self.doc_lengths()]
    }
}

/// Persist all four maps of the index.
///
/// Each blob is first written to a `.tmp` sibling; the four renames happen
/// only after every write has succeeded, so a failed save never leaves a
/// mixed old/new blob set behind.
pub fn save(index: &InvertedIndex, paths: &IndexPaths) -> Result<(), Error> {
    fs::create_dir_all(&paths.root)?;
    let staged = [
        stage(&paths.postings(), &index.postings)?,
        stage(&paths.docmap(), &index.docmap)?,
        stage(&paths.term_frequencies(), &index.term_frequencies)?,
        stage(&paths.doc_lengths(), &index.doc_lengths)?,
    ];
    for (tmp, dest) in staged {
        fs::rename(tmp, dest)?;
    }
    tracing::debug!(root = %paths.root.display(), "index saved");
    Ok(())
}

/// Load a previously saved index.
///
/// All four blobs must be present; anything missing means no complete build
/// exists at this location and the caller gets `IndexNotFound` with nothing
/// partially populated.
pub fn load(paths: &IndexPaths) -> Result<InvertedIndex, Error> {
    for path in paths.all() {
        if !path.exists() {
            return Err(Error::IndexNotFound { path: paths.root.clone() });
        }
    }
    let postings: HashMap<String, BTreeSet<DocId>> = read_blob(&paths.postings())?;
    let docmap: HashMap<DocId, Document> = read_blob(&paths.docmap())?;
    let term_frequencies: HashMap<DocId, HashMap<String, u32>> =
        read_blob(&paths.term_frequencies())?;
    let doc_lengths: HashMap<DocId, u32> = read_blob(&paths.doc_lengths())?;
    tracing::debug!(
        root = %paths.root.display(),
        num_docs = docmap.len(),
        "index loaded"
    );
    Ok(InvertedIndex { postings, docmap, term_frequencies, doc_lengths })
}

impl InvertedIndex {
    /// Save to `cache_dir`, creating it if absent.
    pub fn save<P: AsRef<Path>>(&self, cache_dir: P) -> Result<(), Error> {
        save(self, &IndexPaths::new(cache_dir))
    }

    /// Load the index persisted under `cache_dir`.
    pub fn load_from<P: AsRef<Path>>(cache_dir: P) -> Result<Self, Error> {
        load(&IndexPaths::new(cache_dir))
    }
}

fn stage<T: Serialize>(dest: &Path, value: &T) -> Result<(PathBuf, PathBuf), Error> {
    let tmp = dest.with_extension("bin.tmp");
    let mut writer = BufWriter::new(File::create(&tmp)?);
    bincode::serialize_into(&mut writer, value)?;
    writer.flush()?;
    Ok((tmp, dest.to_path_buf()))
}

fn read_blob<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}
