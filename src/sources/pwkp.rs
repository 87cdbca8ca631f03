//! PWKP (Zhu et al., 2010) parallel corpus.
//!
//! Pairs are paragraphs of exactly two lines (complex then simple), separated by a blank line.
//! Sentences are not tokenized in the original file, so each side goes through
//! [crate::processing::segment::word_tokenize].
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::io::reader::ParagraphReader;
use crate::processing::segment::word_tokenize;
use crate::sources::SentencePair;

pub const PWKP_FILE: &str = "PWKP_108016";

/// Log progress every `PROGRESS_STEP` paragraphs.
const PROGRESS_STEP: usize = 5000;

pub struct Pwkp {
    path: PathBuf,
}

impl Pwkp {
    pub fn new(folder: &Path) -> Self {
        Self {
            path: folder.join(PWKP_FILE),
        }
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn sentence_pairs(&self) -> Result<Vec<SentencePair>, Error> {
        info!("reading pwkp paragraphs from {:?}", self.path);
        let reader = BufReader::new(File::open(&self.path)?);
        let pairs = paragraph_pairs(reader)?;
        info!("got {} pairs", pairs.len());
        Ok(pairs)
    }
}

/// Tokenize and join with single spaces.
fn tokenized(sentence: &str) -> String {
    word_tokenize(sentence.trim()).join(" ")
}

pub fn paragraph_pairs<R: BufRead>(reader: R) -> Result<Vec<SentencePair>, Error> {
    let mut pairs = Vec::new();
    for (idx, paragraph) in ParagraphReader::new(reader).enumerate() {
        let paragraph = paragraph?;
        match paragraph.as_slice() {
            [complex, simple] => {
                pairs.push(SentencePair::new(tokenized(complex), tokenized(simple)))
            }
            other => debug!(
                "skipping paragraph {} ({} lines instead of 2)",
                idx,
                other.len()
            ),
        }

        if idx % PROGRESS_STEP == 0 {
            info!("{} paragraphs read", idx);
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn two_line_paragraphs() {
        let input = "Paris is the capital of France, a country.
Paris is France's capital.

This paragraph has three lines.
It should be skipped.
Really.

A lone line.

Cats (felines) sleep.
Cats sleep.
";
        let pairs = paragraph_pairs(Cursor::new(input)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs[0].source(),
            "Paris is the capital of France , a country ."
        );
        assert_eq!(pairs[1].source(), "Cats ( felines ) sleep .");
        assert_eq!(pairs[1].target(), "Cats sleep .");
    }

    #[test]
    fn empty_input() {
        assert!(paragraph_pairs(Cursor::new("")).unwrap().is_empty());
    }
}
