//! Run parameters.
//!
//! Command line arguments are converted once into these immutable values,
//! which are then handed to every component that needs them.
use std::time::Duration;

/// Frequency-ranked vocabulary truncation.
///
/// When set, the vocabulary reserves `*UKT*` and only keeps the
/// `max_vocab_size` most frequent tokens that occur at least `min_freq` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabFilter {
    pub min_freq: u64,
    pub max_vocab_size: usize,
}

impl Default for VocabFilter {
    fn default() -> Self {
        Self {
            min_freq: 5,
            max_vocab_size: 40_000,
        }
    }
}

/// Array layout of the written corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `x_<len>`, `y_<len>`, `ylen_<len>` per source length, plus `x_lens`.
    Bucketed,
    /// `data_x`, `data_y`.
    Flat,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Bucketed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessConfig {
    pub vocab_filter: Option<VocabFilter>,
    /// Pairs whose source or target (EOS included) is longer are dropped.
    pub max_len: Option<usize>,
    /// Half-width of the uniform distribution used for embedding rows.
    pub init_range: f32,
    pub seed: Option<u64>,
    pub layout: Layout,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            vocab_filter: None,
            max_len: None,
            init_range: 0.25,
            seed: None,
            layout: Layout::default(),
        }
    }
}

impl PreprocessConfig {
    pub fn with_vocab_filter(mut self, filter: VocabFilter) -> Self {
        self.vocab_filter = Some(filter);
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeConfig {
    pub workers: usize,
    /// Cap on the number of files each worker handles, `None` for no cap.
    pub max_files: Option<usize>,
    /// Sentences with fewer tokens are not written.
    pub min_tokens: usize,
    /// Longest wait for the next worker report.
    pub timeout: Duration,
}

impl Default for TokenizeConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            max_files: None,
            min_tokens: 6,
            timeout: Duration::from_secs(6 * 60 * 60),
        }
    }
}
