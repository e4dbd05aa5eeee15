use anyhow::Result;
use cinedex_core::{Bm25Params, InvertedIndex};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod loader;

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(about = "Build and query a BM25 movie index", long_about = None)]
struct Cli {
    /// Movie corpus JSON file
    #[arg(long, default_value = "data/movies.json")]
    data: PathBuf,
    /// Stopword list, one word per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Index cache directory
    #[arg(long, default_value = "cache")]
    cache: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the inverted index from the corpus and save it
    Build,
    /// Term frequency of a term in a document
    Tf { doc_id: u32, term: String },
    /// Plain inverse document frequency, ln((N+1)/(n+1))
    Idf { term: String },
    /// Plain TF-IDF score of a term in a document
    Tfidf { doc_id: u32, term: String },
    /// BM25 inverse document frequency of a term
    Bm25Idf { term: String },
    /// BM25 saturated term-frequency component
    Bm25Tf {
        doc_id: u32,
        term: String,
        #[arg(long, default_value_t = 1.2)]
        k1: f64,
        #[arg(long, default_value_t = 0.75)]
        b: f64,
    },
    /// Full BM25 score of a term in a document
    Bm25 { doc_id: u32, term: String },
    /// Rank movies against a free-text query with BM25
    Search {
        query: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build => {
            let movies = loader::load_movies(&cli.data)?;
            tracing::info!(num_movies = movies.len(), "corpus loaded");
            let stopwords = match &cli.stopwords {
                Some(path) => Some(loader::load_stopwords(path)?),
                None => None,
            };
            let mut index = InvertedIndex::new();
            index.build(movies, stopwords.as_ref());
            index.save(&cli.cache)?;
            println!("index built");
        }
        Commands::Tf { doc_id, term } => {
            let index = load_index(&cli.cache)?;
            println!("{}", index.get_tf(doc_id, &term)?);
        }
        Commands::Idf { term } => {
            let index = load_index(&cli.cache)?;
            println!("Plain IDF of '{}': {:.2}", term, index.plain_idf(&term)?);
        }
        Commands::Tfidf { doc_id, term } => {
            let index = load_index(&cli.cache)?;
            let tf = f64::from(index.get_tf(doc_id, &term)?);
            let idf = index.plain_idf(&term)?;
            println!("TF-IDF score of '{term}' in document {doc_id}: {:.2}", tf * idf);
        }
        Commands::Bm25Idf { term } => {
            let index = load_index(&cli.cache)?;
            println!("BM25 IDF of '{}': {:.4}", term, index.bm25_idf(&term)?);
        }
        Commands::Bm25Tf { doc_id, term, k1, b } => {
            let index = load_index(&cli.cache)?;
            println!("{:.4}", index.bm25_tf(doc_id, &term, Bm25Params { k1, b })?);
        }
        Commands::Bm25 { doc_id, term } => {
            let index = load_index(&cli.cache)?;
            println!("{:.4}", index.bm25(doc_id, &term)?);
        }
        Commands::Search { query, limit } => {
            let index = load_index(&cli.cache)?;
            println!("Searching for: {query}");
            for (rank, (doc_id, score)) in index.search(&query, limit)?.iter().enumerate() {
                if let Some(movie) = index.document(*doc_id) {
                    println!(
                        "{}. {} (ID: {}, score: {:.4})",
                        rank + 1,
                        movie.title,
                        doc_id,
                        score
                    );
                }
            }
        }
    }
    Ok(())
}

/// Load the persisted index. Never builds on the caller's behalf; a missing
/// index surfaces as "run build first".
fn load_index(cache: &Path) -> Result<InvertedIndex> {
    Ok(InvertedIndex::load_from(cache)?)
}
