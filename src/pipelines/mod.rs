//! Pipelines.
//!
//! Each subcommand is backed by a struct implementing [Pipeline]:
//!
//! - [Extract]: dataset folder to `.sents` file.
//! - [Preprocess]: `.sents` file and word vectors to vocabulary and training arrays.
//! - [Tokenize]: WikiExtractor output to tokenized sentence shards, using a pool of workers.
//! - [Frequencies]: token counts of a tokenized corpus and its rare-token-filtered rewrite.
//! - [Oov]: tokens of a `.sents` file missing from a word2vec table.
mod extract;
mod freq;
mod oov;
#[allow(clippy::module_inception)]
mod pipeline;
mod preprocess;
mod tokenize;

pub use extract::Extract;
pub use freq::Frequencies;
pub use oov::Oov;
pub use pipeline::Pipeline;
pub use preprocess::{Preprocess, PreprocessSummary};
pub use tokenize::Tokenize;
