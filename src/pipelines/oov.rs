//! Out-of-vocabulary report.
use std::path::PathBuf;

use itertools::Itertools;
use log::info;

use crate::error::Error;
use crate::pipelines::Pipeline;
use crate::processing::W2vReader;
use crate::sources::kauchak::SENTENCE_FIELD;

/// Lists the tokens of an aligned file (`title\tparagraph\tsentence` lines)
/// that have no vector in a word2vec table.
pub struct Oov {
    src: PathBuf,
    w2v: PathBuf,
}

impl Oov {
    pub fn new(src: PathBuf, w2v: PathBuf) -> Self {
        Self { src, w2v }
    }
}

impl Pipeline<Vec<String>> for Oov {
    /// Returns missing tokens, sorted.
    fn run(&self) -> Result<Vec<String>, Error> {
        let words = W2vReader::from_path(&self.w2v)?.words()?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_path(&self.src)?;

        let mut tokens = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(sentence) = record.get(SENTENCE_FIELD) {
                tokens.extend(sentence.split_whitespace().map(String::from));
            }
        }
        let nb_tokens = tokens.iter().unique().count();

        let missing: Vec<String> = tokens
            .into_iter()
            .filter(|token| !words.contains(token))
            .unique()
            .sorted()
            .collect();
        info!(
            "{} out of {} distinct tokens missing from {:?}",
            missing.len(),
            nb_tokens,
            self.w2v
        );
        Ok(missing)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use byteorder::{LittleEndian, WriteBytesExt};

    use super::*;

    #[test]
    fn missing() {
        let dir = tempfile::tempdir().unwrap();
        let w2v = dir.path().join("vectors.bin");
        let mut table = Vec::new();
        write!(table, "2 1\n").unwrap();
        for word in ["a", "cat"] {
            write!(table, "{} ", word).unwrap();
            table.write_f32::<LittleEndian>(0.5).unwrap();
            table.write_all(b"\n").unwrap();
        }
        fs::write(&w2v, table).unwrap();

        let src = dir.path().join("normal.aligned");
        fs::write(&src, "Cat\t0\ta cat \"sat\"\nCat\t1\ta dog\n").unwrap();

        let missing = Oov::new(src, w2v).run().unwrap();
        assert_eq!(missing, vec!["\"sat\"", "dog"]);
    }
}
