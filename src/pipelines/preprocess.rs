//! Training corpus generation pipeline
//!
//! Turns a `.sents` file into the files a sequence-to-sequence trainer consumes.
//!
//! # Processing
//! 1. Sentence pairs are read, and a vocabulary is built over both sides (optionally frequency-filtered).
//! 1. The vocabulary is written in `<name>.vocab`.
//! 1. Pairs are encoded, length-filtered and (by default) grouped in buckets by source length.
//! 1. Word vectors of vocabulary tokens are loaded from a word2vec binary table and spliced in a random embedding matrix.
//! 1. The embedding matrix and the encoded corpus are written in `<name>.npz`, and a run summary in `<name>.summary.json`.
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{Layout, PreprocessConfig};
use crate::error::Error;
use crate::io::reader::read_sents;
use crate::io::writer::{write_vocabulary, CorpusWriter};
use crate::pipelines::Pipeline;
use crate::processing::vocab::EOS_ID;
use crate::processing::{EmbeddingMatrix, SentenceEncoder, VocabularyBuilder, W2vReader};

/// What a [Preprocess] run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessSummary {
    pub nb_pairs: usize,
    /// Pairs left after length filtering.
    pub nb_kept: usize,
    pub vocabulary_size: usize,
    /// Vocabulary tokens that got a pretrained vector.
    pub nb_pretrained: usize,
    pub dims: usize,
    /// Maximum number of tokens of source and target sentences, before filtering.
    pub max_lengths: [usize; 2],
    pub target_width: usize,
    /// Bucket source lengths, empty for the flat layout.
    pub buckets: Vec<usize>,
    pub vocabulary_path: PathBuf,
    pub corpus_path: PathBuf,
    pub arrays: Vec<String>,
}

pub struct Preprocess {
    src: PathBuf,
    w2v: PathBuf,
    dst: PathBuf,
    name: String,
    config: PreprocessConfig,
}

impl Preprocess {
    pub fn new(
        src: PathBuf,
        w2v: PathBuf,
        dst: PathBuf,
        name: String,
        config: PreprocessConfig,
    ) -> Self {
        debug!("preprocess config: {:?}", config);
        Self {
            src,
            w2v,
            dst,
            name,
            config,
        }
    }

    /// Get a reference to the run configuration.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    fn output_path(&self, extension: &str) -> PathBuf {
        self.dst.join(format!("{}.{}", self.name, extension))
    }

    fn prepare_dst(dst: &Path) -> Result<(), Error> {
        if !dst.exists() {
            warn!("Destination folder does not exist. Creating");
            std::fs::create_dir_all(dst)?;
        }
        if !dst.is_dir() {
            return Err(Error::Custom(format!(
                "Destination has to be a directory: {:?}",
                dst
            )));
        }
        Ok(())
    }
}

impl Pipeline<PreprocessSummary> for Preprocess {
    fn run(&self) -> Result<PreprocessSummary, Error> {
        Self::prepare_dst(&self.dst)?;

        let pairs = read_sents(&self.src)?;

        let mut builder = VocabularyBuilder::new();
        for pair in &pairs {
            builder.add_pair(pair);
        }
        let built = builder.build(self.config.vocab_filter);
        let vocabulary = built.vocabulary;
        info!("vocabulary size: {}", vocabulary.len());

        let vocabulary_path = self.output_path("vocab");
        write_vocabulary(BufWriter::new(File::create(&vocabulary_path)?), &vocabulary)?;
        info!("wrote vocabulary in {:?}", vocabulary_path);

        let encoder = SentenceEncoder::new(&vocabulary, built.max_lengths[1], self.config.max_len);
        let encoded = encoder.encode_all(&pairs)?;

        let (header, vectors) = W2vReader::from_path(&self.w2v)?.vectors_for(&vocabulary)?;
        let nb_pretrained = vocabulary
            .iter()
            .filter(|(id, token)| *id != EOS_ID && vectors.contains_key(*token))
            .count();
        let embeddings = EmbeddingMatrix::splice(
            &vocabulary,
            &vectors,
            header.dims,
            self.config.init_range,
            self.config.seed,
        )?;

        let corpus_path = self.output_path("npz");
        let mut writer = CorpusWriter::create(&corpus_path)?;
        writer.write_embeddings(&embeddings)?;

        let nb_kept = encoded.len();
        let target_width = encoded.target_width();
        let buckets = match self.config.layout {
            Layout::Bucketed => {
                let buckets = encoded.into_buckets();
                info!("{} buckets", buckets.len());
                writer.write_buckets(&buckets)?;
                buckets.keys().collect()
            }
            Layout::Flat => {
                writer.write_flat(&encoded)?;
                Vec::new()
            }
        };
        let arrays = writer.finish()?;

        let summary = PreprocessSummary {
            nb_pairs: pairs.len(),
            nb_kept,
            vocabulary_size: vocabulary.len(),
            nb_pretrained,
            dims: header.dims,
            max_lengths: built.max_lengths,
            target_width,
            buckets,
            vocabulary_path,
            corpus_path,
            arrays,
        };

        let summary_path = self.output_path("summary.json");
        serde_json::to_writer_pretty(BufWriter::new(File::create(&summary_path)?), &summary)?;
        info!("wrote summary in {:?}", summary_path);

        Ok(summary)
    }
}
