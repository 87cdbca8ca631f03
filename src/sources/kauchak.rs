//! Sentence-aligned Wikipedia/Simple Wikipedia (Kauchak, ACL 2013).
//!
//! `normal.aligned` and `simple.aligned` share the same line numbering.
//! Lines look like `article title\tparagraph\tsentence`.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use itertools::{EitherOrBoth, Itertools};
use log::info;

use crate::error::Error;
use crate::sources::SentencePair;

pub const NORMAL_FILE: &str = "normal.aligned";
pub const SIMPLE_FILE: &str = "simple.aligned";

/// Index of the sentence field.
pub const SENTENCE_FIELD: usize = 2;

pub struct Kauchak {
    normal: PathBuf,
    simple: PathBuf,
}

/// Get the sentence field of a line.
pub fn sentence_field<'a>(line: &'a str, path: &Path, line_nb: usize) -> Result<&'a str, Error> {
    line.trim()
        .split('\t')
        .nth(SENTENCE_FIELD)
        .ok_or_else(|| Error::MalformedLine {
            path: path.to_path_buf(),
            line: line_nb,
            reason: format!("missing field {}", SENTENCE_FIELD),
        })
}

impl Kauchak {
    pub fn new(folder: &Path) -> Self {
        Self {
            normal: folder.join(NORMAL_FILE),
            simple: folder.join(SIMPLE_FILE),
        }
    }

    pub fn sentence_pairs(&self) -> Result<Vec<SentencePair>, Error> {
        info!("reading {:?} and {:?}", self.normal, self.simple);
        let normal = BufReader::new(File::open(&self.normal)?);
        let simple = BufReader::new(File::open(&self.simple)?);
        let pairs = lockstep_pairs(normal, simple, &self.normal, &self.simple)?;
        info!("got {} pairs", pairs.len());
        Ok(pairs)
    }
}

/// Zip both files line by line.
///
/// Fails with [Error::LengthMismatch] if one file still has non-empty lines once the other one is exhausted.
pub fn lockstep_pairs<A: BufRead, B: BufRead>(
    normal: A,
    simple: B,
    normal_path: &Path,
    simple_path: &Path,
) -> Result<Vec<SentencePair>, Error> {
    let mut pairs = Vec::new();
    let mut normal_lines = 0;
    let mut simple_lines = 0;

    for (idx, lines) in normal.lines().zip_longest(simple.lines()).enumerate() {
        let line_nb = idx + 1;
        match lines {
            EitherOrBoth::Both(n, s) => {
                let (n, s) = (n?, s?);
                if n.trim().is_empty() && s.trim().is_empty() {
                    continue;
                }
                normal_lines += 1;
                simple_lines += 1;
                pairs.push(SentencePair::new(
                    sentence_field(&n, normal_path, line_nb)?.to_string(),
                    sentence_field(&s, simple_path, line_nb)?.to_string(),
                ));
            }
            EitherOrBoth::Left(n) => {
                if !n?.trim().is_empty() {
                    normal_lines += 1;
                }
            }
            EitherOrBoth::Right(s) => {
                if !s?.trim().is_empty() {
                    simple_lines += 1;
                }
            }
        }
    }

    if normal_lines != simple_lines {
        return Err(Error::LengthMismatch {
            normal: normal_path.to_path_buf(),
            simple: simple_path.to_path_buf(),
            normal_lines,
            simple_lines,
        });
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(normal: &str, simple: &str) -> Result<Vec<SentencePair>, Error> {
        lockstep_pairs(
            Cursor::new(normal.to_string()),
            Cursor::new(simple.to_string()),
            Path::new("normal.aligned"),
            Path::new("simple.aligned"),
        )
    }

    #[test]
    fn aligned() {
        let normal = "April\t0\tApril is the fourth month of the year .
April\t1\tIt has 30 days .
";
        let simple = "April\t0\tApril is the 4th month .
April\t1\tIt has 30 days .
";
        let pairs = run(normal, simple).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].source(), "April is the fourth month of the year .");
        assert_eq!(pairs[0].target(), "April is the 4th month .");
    }

    #[test]
    fn trailing_blank_lines() {
        let pairs = run("a\t0\tfoo\n\n\n", "a\t0\tbar\n").unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn mismatch() {
        let err = run("a\t0\tfoo\na\t1\tbaz\n", "a\t0\tbar\n").unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                normal_lines: 2,
                simple_lines: 1,
                ..
            }
        ));
    }

    #[test]
    fn missing_field() {
        let err = run("a\tfoo\n", "a\t0\tbar\n").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));
    }
}
