//! Token frequency table and rare-token filtering of a tokenized corpus.
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::pipelines::Pipeline;
use crate::processing::freq::TokenCounts;

/// Writes `<src>.freq` (`token count` lines by ascending count)
/// and `<src>.minf_<min_freq>`, a copy of `src` where rare tokens are replaced with `*UKT*`.
pub struct Frequencies {
    src: PathBuf,
    min_freq: u64,
}

impl Frequencies {
    pub fn new(src: PathBuf, min_freq: u64) -> Self {
        Self { src, min_freq }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.src.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }
}

impl Pipeline<(PathBuf, PathBuf)> for Frequencies {
    /// Returns the frequency table and filtered corpus paths.
    fn run(&self) -> Result<(PathBuf, PathBuf), Error> {
        let mut counts = TokenCounts::new();
        for line in BufReader::new(File::open(&self.src)?).lines() {
            counts.add_line(&line?);
        }
        info!(
            "{} lines, {} distinct tokens, {} seen at least {} times",
            counts.nb_lines(),
            counts.len(),
            counts.nb_at_least(self.min_freq),
            self.min_freq
        );

        let freq_path = self.sibling(".freq");
        let mut out = BufWriter::new(File::create(&freq_path)?);
        for (token, count) in counts.ascending() {
            writeln!(out, "{} {}", token, count)?;
        }
        out.flush()?;
        info!("wrote frequencies in {:?}", freq_path);

        // second pass, so that the corpus is never held in memory
        let filtered_path = self.sibling(&format!(".minf_{}", self.min_freq));
        let mut out = BufWriter::new(File::create(&filtered_path)?);
        for line in BufReader::new(File::open(&self.src)?).lines() {
            writeln!(out, "{}", counts.filter_line(&line?, self.min_freq))?;
        }
        out.flush()?;
        info!("wrote filtered corpus in {:?}", filtered_path);

        Ok((freq_path, filtered_path))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn outputs() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("wiki.txt");
        fs::write(&src, "the cat sat\nthe dog sat\n").unwrap();

        let (freq, filtered) = Frequencies::new(src, 2).run().unwrap();
        assert_eq!(freq, dir.path().join("wiki.txt.freq"));
        assert_eq!(filtered, dir.path().join("wiki.txt.minf_2"));

        assert_eq!(
            fs::read_to_string(freq).unwrap(),
            "cat 1\ndog 1\nsat 2\nthe 2\n"
        );
        assert_eq!(
            fs::read_to_string(filtered).unwrap(),
            "the *UKT* sat\nthe *UKT* sat\n"
        );
    }
}
