//! Newsela aligned sentences.
//!
//! Each line of the alignment file is
//! ```text
//! DOC1234-foo.en  V0  V3  complex sentence  simpler sentence
//! ```
//! that is a document token, the source version, the target version (the score),
//! then the two sentences.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::processing::dedup::{AlignmentCandidate, DocumentDedup};
use crate::sources::SentencePair;

pub const ALIGNED_FILE: &str = "newsela_articles_20150302.aligned.sents.txt";

/// Number of trailing characters of the document token that identify a document.
const DOCUMENT_ID_LEN: usize = 4;

pub struct Newsela {
    path: PathBuf,
}

/// Fields of a single alignment line.
#[derive(Debug, PartialEq, Eq)]
struct AlignedLine<'a> {
    document: &'a str,
    sentence_id: &'a str,
    grade: &'a str,
    source: &'a str,
    target: &'a str,
}

impl<'a> AlignedLine<'a> {
    fn parse(line: &'a str, path: &Path, line_nb: usize) -> Result<Self, Error> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        match fields[..] {
            [document, sentence_id, grade, source, target, ..] => Ok(Self {
                document,
                sentence_id,
                grade,
                source,
                target,
            }),
            _ => Err(Error::MalformedLine {
                path: path.to_path_buf(),
                line: line_nb,
                reason: format!("expected 5 tab-separated fields, got {}", fields.len()),
            }),
        }
    }

    /// Score of the alignment, read from the second character of the grade token (`V3` -> 3).
    fn score(&self, path: &Path, line_nb: usize) -> Result<u32, Error> {
        self.grade
            .chars()
            .nth(1)
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| Error::MalformedLine {
                path: path.to_path_buf(),
                line: line_nb,
                reason: format!("invalid grade level token {:?}", self.grade),
            })
    }
}

/// Last [DOCUMENT_ID_LEN] characters of a document token.
fn document_id(token: &str) -> &str {
    let start = token
        .char_indices()
        .rev()
        .nth(DOCUMENT_ID_LEN - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &token[start..]
}

impl Newsela {
    /// Use the default alignment file located in `folder`.
    pub fn new(folder: &Path) -> Self {
        Self {
            path: folder.join(ALIGNED_FILE),
        }
    }

    /// Use an alignment file located at `path`.
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn sentence_pairs(&self, dedup: bool) -> Result<Vec<SentencePair>, Error> {
        info!("reading newsela alignments from {:?}", self.path);
        let reader = BufReader::new(File::open(&self.path)?);
        let pairs = if dedup {
            dedup_pairs(reader, &self.path)?
        } else {
            all_pairs(reader, &self.path)?
        };
        info!("got {} pairs (dedup: {})", pairs.len(), dedup);
        Ok(pairs)
    }
}

/// Every alignment line is kept as a pair.
pub fn all_pairs<R: BufRead>(reader: R, path: &Path) -> Result<Vec<SentencePair>, Error> {
    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            debug!("skipping empty line {}", idx + 1);
            continue;
        }
        let aligned = AlignedLine::parse(&line, path, idx + 1)?;
        pairs.push(SentencePair::new(
            aligned.source.to_string(),
            aligned.target.to_string(),
        ));
    }
    Ok(pairs)
}

/// Keep the best alignment of each source sentence, per document.
///
/// Documents are delimited by runs of lines sharing the same document id.
pub fn dedup_pairs<R: BufRead>(reader: R, path: &Path) -> Result<Vec<SentencePair>, Error> {
    let mut pairs = Vec::new();
    let mut dedup = DocumentDedup::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            debug!("skipping empty line {}", idx + 1);
            continue;
        }
        let aligned = AlignedLine::parse(&line, path, idx + 1)?;
        let candidate = AlignmentCandidate::new(
            aligned.sentence_id,
            aligned.source,
            aligned.score(path, idx + 1)?,
            aligned.target,
        );
        pairs.extend(dedup.push(document_id(aligned.document), candidate));
    }

    pairs.extend(dedup.finish());
    Ok(pairs)
}
