//! # simplecorpus
//!
//! Sentence simplification data preparation: aligned (complex, simple) sentence pairs
//! are extracted from Newsela, PWKP or the Kauchak ACL corpus, then turned into a vocabulary,
//! an embedding matrix initialized from word2vec vectors, and length-bucketed id arrays.
//!
//! Each step is a [pipelines::Pipeline], that can be used from the `simplecorpus` binary or as a library.
pub mod config;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod processing;
pub mod sources;
