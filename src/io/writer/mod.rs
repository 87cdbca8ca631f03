/*!
# File writing

- [SentsWriter] writes sentence pairs in `.sents` files, [ShardWriter] writes tokenized sentences. Both implement [WriterTrait].
- [write_vocabulary] writes `token id` lines.
- [CorpusWriter] writes the embedding matrix and the encoded corpus as named arrays in a `.npz` container.
!*/
mod corpus;
mod textwriter;
mod vocab;
mod writertrait;

pub use corpus::CorpusWriter;
pub use textwriter::{SentsWriter, ShardWriter};
pub use vocab::write_vocabulary;
pub use writertrait::WriterTrait;
