/*! Content processing

Contains structures and functions that turn sentence pairs into training tensors:

- [dedup]: keeps the best alignment of each source sentence of a document.
- [vocab]: digit normalization, tokenization and vocabulary building.
- [encode]: id encoding, padding and length bucketing.
- [embeddings]: word2vec loading and embedding matrix initialization.

[segment] and [freq] work on raw text corpora that are used to train word vectors.
!*/
pub mod dedup;
pub mod embeddings;
pub mod encode;
pub mod freq;
pub mod segment;
pub mod vocab;

pub use embeddings::{EmbeddingMatrix, W2vReader};
pub use encode::{Buckets, EncodedCorpus, LengthBucket, SentenceEncoder};
pub use vocab::{Vocabulary, VocabularyBuilder};
