//! `.sents` files: one `source\ttarget` pair per line.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::sources::SentencePair;

/// Read the sentence pairs of a `.sents` file.
///
/// Only the first two tab-separated fields are used, and blank lines are skipped.
pub fn read_sents(path: &Path) -> Result<Vec<SentencePair>, Error> {
    info!("loading sentence pairs from {:?}", path);
    let pairs = sents_from_reader(BufReader::new(File::open(path)?), path)?;
    info!("loaded {} pairs", pairs.len());
    Ok(pairs)
}

pub fn sents_from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Vec<SentencePair>, Error> {
    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        match (fields.next(), fields.next()) {
            (Some(source), Some(target)) => {
                pairs.push(SentencePair::new(source.to_string(), target.to_string()))
            }
            _ => {
                return Err(Error::MalformedLine {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: "expected a tab-separated sentence pair".to_string(),
                })
            }
        }
    }
    Ok(pairs)
}
