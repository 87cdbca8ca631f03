/*! Corpus reading utilities

- [ParagraphReader] groups lines into blank-line separated paragraphs.
- [read_sents] loads the tab-separated pair files written by [crate::io::writer::SentsWriter].
!*/
mod sents;
mod textreader;

pub use sents::{read_sents, sents_from_reader};
pub use textreader::ParagraphReader;
